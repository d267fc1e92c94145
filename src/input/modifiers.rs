use bitflags::bitflags;

bitflags! {
    /// Modifier and button state mask as reported by the platform.
    ///
    /// The platform reports the state *before* the event it accompanies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RawState: u32 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        const MOD1 = 1 << 3;
        const BUTTON1 = 1 << 8;
        const BUTTON2 = 1 << 9;
        const BUTTON3 = 1 << 10;
        const BUTTON4 = 1 << 11;
        const BUTTON5 = 1 << 12;
        const SUPER = 1 << 26;
        const META = 1 << 28;
    }
}

impl RawState {
    /// Primary, middle and secondary buttons. The platform does not reliably
    /// clear the side-button bits, so they are left out of this mask.
    pub const MOUSE_BUTTONS: RawState = RawState::BUTTON1
        .union(RawState::BUTTON2)
        .union(RawState::BUTTON3);
}

bitflags! {
    /// Normalized modifier set delivered to peers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 2;
        const ALT = 1 << 3;
        const META = 1 << 4;
        const BUTTON_PRIMARY = 1 << 5;
        const BUTTON_SECONDARY = 1 << 6;
        const BUTTON_MIDDLE = 1 << 7;
        const BUTTON_BACK = 1 << 8;
        const BUTTON_FORWARD = 1 << 9;
    }
}

impl Modifiers {
    /// Any bit that marks pointer motion as a drag.
    pub const DRAG_BUTTONS: Modifiers = Modifiers::BUTTON_PRIMARY
        .union(Modifiers::BUTTON_MIDDLE)
        .union(Modifiers::BUTTON_SECONDARY)
        .union(Modifiers::BUTTON_BACK)
        .union(Modifiers::BUTTON_FORWARD);

    pub fn from_raw(raw: RawState) -> Self {
        const MAP: [(RawState, Modifiers); 10] = [
            (RawState::SHIFT, Modifiers::SHIFT),
            (RawState::CONTROL, Modifiers::CONTROL),
            (RawState::MOD1, Modifiers::ALT),
            (RawState::SUPER, Modifiers::META),
            (RawState::META, Modifiers::META),
            (RawState::BUTTON1, Modifiers::BUTTON_PRIMARY),
            (RawState::BUTTON2, Modifiers::BUTTON_MIDDLE),
            (RawState::BUTTON3, Modifiers::BUTTON_SECONDARY),
            (RawState::BUTTON4, Modifiers::BUTTON_BACK),
            (RawState::BUTTON5, Modifiers::BUTTON_FORWARD),
        ];
        MAP.iter()
            .filter(|(bit, _)| raw.contains(*bit))
            .fold(Modifiers::empty(), |acc, (_, m)| acc | *m)
    }

    pub fn is_drag(self) -> bool {
        self.intersects(Self::DRAG_BUTTONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_bits_map_through() {
        let m = Modifiers::from_raw(RawState::SHIFT | RawState::CONTROL | RawState::MOD1);
        assert_eq!(m, Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::ALT);
    }

    #[test]
    fn lock_is_dropped() {
        assert!(Modifiers::from_raw(RawState::LOCK).is_empty());
    }

    #[test]
    fn middle_and_secondary_follow_platform_numbering() {
        // button 2 is the middle button on the platform, button 3 the secondary
        let m = Modifiers::from_raw(RawState::BUTTON2 | RawState::BUTTON3);
        assert_eq!(m, Modifiers::BUTTON_MIDDLE | Modifiers::BUTTON_SECONDARY);
        assert!(m.is_drag());
    }

    #[test]
    fn side_buttons_count_as_drag() {
        assert!(Modifiers::from_raw(RawState::BUTTON4).is_drag());
        assert!(!Modifiers::from_raw(RawState::SHIFT).is_drag());
    }
}
