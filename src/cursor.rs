#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorKind {
    #[default]
    Default,
    Text,
    Crosshair,
    ClosedHand,
    OpenHand,
    PointingHand,
    ResizeUp,
    ResizeDown,
    ResizeUpDown,
    ResizeLeft,
    ResizeRight,
    ResizeLeftRight,
    ResizeSouthWest,
    ResizeNorthEast,
    ResizeSouthEast,
    ResizeNorthWest,
    Move,
    Wait,
    Disappear,
    None,
}

impl CursorKind {
    /// Name of the themed platform cursor for this kind.
    pub fn name(self) -> &'static str {
        match self {
            CursorKind::Default => "default",
            CursorKind::Text => "text",
            CursorKind::Crosshair => "crosshair",
            CursorKind::ClosedHand => "grabbing",
            CursorKind::OpenHand => "grab",
            CursorKind::PointingHand => "pointer",
            CursorKind::ResizeUp => "n-resize",
            CursorKind::ResizeDown => "s-resize",
            CursorKind::ResizeUpDown => "ns-resize",
            CursorKind::ResizeLeft => "w-resize",
            CursorKind::ResizeRight => "e-resize",
            CursorKind::ResizeLeftRight => "ew-resize",
            CursorKind::ResizeSouthWest => "sw-resize",
            CursorKind::ResizeNorthEast => "ne-resize",
            CursorKind::ResizeSouthEast => "se-resize",
            CursorKind::ResizeNorthWest => "nw-resize",
            CursorKind::Move => "move",
            CursorKind::Wait => "wait",
            CursorKind::Disappear | CursorKind::None => "none",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [CursorKind; 19] = [
            CursorKind::Default,
            CursorKind::Text,
            CursorKind::Crosshair,
            CursorKind::ClosedHand,
            CursorKind::OpenHand,
            CursorKind::PointingHand,
            CursorKind::ResizeUp,
            CursorKind::ResizeDown,
            CursorKind::ResizeUpDown,
            CursorKind::ResizeLeft,
            CursorKind::ResizeRight,
            CursorKind::ResizeLeftRight,
            CursorKind::ResizeSouthWest,
            CursorKind::ResizeNorthEast,
            CursorKind::ResizeSouthEast,
            CursorKind::ResizeNorthWest,
            CursorKind::Move,
            CursorKind::Wait,
            CursorKind::None,
        ];
        ALL.into_iter().find(|kind| kind.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_cursors_share_a_name() {
        assert_eq!(CursorKind::Disappear.name(), CursorKind::None.name());
        assert_eq!(CursorKind::default().name(), "default");
        assert_eq!(CursorKind::ClosedHand.name(), "grabbing");
    }

    #[test]
    fn names_resolve_back_to_kinds() {
        assert_eq!(CursorKind::from_name("ew-resize"), Some(CursorKind::ResizeLeftRight));
        assert_eq!(CursorKind::from_name("none"), Some(CursorKind::None));
        assert_eq!(CursorKind::from_name("bogus"), None);
    }
}
