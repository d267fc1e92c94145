use super::modifiers::{Modifiers, RawState};
use crate::constants::{MOUSE_BACK_BUTTON, MOUSE_FORWARD_BUTTON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    None,
    Left,
    Right,
    Other,
    Back,
    Forward,
}

impl MouseButton {
    /// Maps a platform button number. Buttons other than 1, 2, 3 and the two
    /// side buttons are not reported to peers.
    pub fn from_platform(button: u32) -> Self {
        match button {
            1 => MouseButton::Left,
            2 => MouseButton::Other,
            3 => MouseButton::Right,
            MOUSE_BACK_BUTTON => MouseButton::Back,
            MOUSE_FORWARD_BUTTON => MouseButton::Forward,
            _ => MouseButton::None,
        }
    }

    /// Button reported with a motion event, picked from the held buttons in
    /// priority order.
    pub fn from_drag_state(modifiers: Modifiers) -> Self {
        const PRIORITY: [(Modifiers, MouseButton); 5] = [
            (Modifiers::BUTTON_PRIMARY, MouseButton::Left),
            (Modifiers::BUTTON_MIDDLE, MouseButton::Other),
            (Modifiers::BUTTON_SECONDARY, MouseButton::Right),
            (Modifiers::BUTTON_BACK, MouseButton::Back),
            (Modifiers::BUTTON_FORWARD, MouseButton::Forward),
        ];
        PRIORITY
            .iter()
            .find(|(bit, _)| modifiers.contains(*bit))
            .map(|(_, button)| *button)
            .unwrap_or(MouseButton::None)
    }
}

/// State bit that tracks a platform button number, if any.
pub fn button_mask(button: u32) -> RawState {
    match button {
        1 => RawState::BUTTON1,
        2 => RawState::BUTTON2,
        3 => RawState::BUTTON3,
        MOUSE_BACK_BUTTON => RawState::BUTTON4,
        MOUSE_FORWARD_BUTTON => RawState::BUTTON5,
        _ => RawState::empty(),
    }
}

/// Converts the pre-event state reported by the platform into the state
/// after a press or release of `button`.
pub fn state_after(state: RawState, button: u32, press: bool) -> RawState {
    let mask = button_mask(button);
    if press { state | mask } else { state - mask }
}

/// Whether a release completes the gesture, i.e. no button remains held.
///
/// Side buttons never show up in the platform mask, so releasing one of
/// them always counts as the end of the gesture.
pub fn release_ends_gesture(before: RawState, after: RawState, button: u32) -> bool {
    if before.intersects(RawState::MOUSE_BUTTONS) && !after.intersects(RawState::MOUSE_BUTTONS) {
        return true;
    }
    button == MOUSE_BACK_BUTTON || button == MOUSE_FORWARD_BUTTON
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
    /// Precise scrolling; not translated into discrete deltas.
    Smooth,
}

/// Signed (dx, dy) for one discrete scroll step. Shift swaps the axes.
pub fn scroll_delta(direction: ScrollDirection, state: RawState) -> (f64, f64) {
    let (dx, dy) = match direction {
        ScrollDirection::Up => (0.0, 1.0),
        ScrollDirection::Down => (0.0, -1.0),
        ScrollDirection::Left => (1.0, 0.0),
        ScrollDirection::Right => (-1.0, 0.0),
        ScrollDirection::Smooth => (0.0, 0.0),
    };
    if state.contains(RawState::SHIFT) {
        (dy, dx)
    } else {
        (dx, dy)
    }
}
