use bitflags::bitflags;

use crate::input::{RawState, ScrollDirection};

/// Pointer position carried by raw pointer events, in surface and root
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
    pub root_x: f64,
    pub root_y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64, root_x: f64, root_y: f64) -> Self {
        Self {
            x,
            y,
            root_x,
            root_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    /// Platform button number (1 primary, 2 middle, 3 secondary, 8/9 side).
    pub button: u32,
    pub pos: PointerPos,
    /// State before the event.
    pub state: RawState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    pub pos: PointerPos,
    pub state: RawState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub direction: ScrollDirection,
    pub pos: PointerPos,
    pub state: RawState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    pub enter: bool,
    pub pos: PointerPos,
    pub state: RawState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub press: bool,
    pub keysym: u32,
    pub state: RawState,
}

bitflags! {
    /// Window manager state bits carried by a state-change notification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StateMask: u32 {
        const ICONIFIED = 1 << 1;
        const MAXIMIZED = 1 << 2;
        const FULLSCREEN = 1 << 4;
        const ABOVE = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStateEvent {
    pub changed: StateMask,
    pub new_state: StateMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configure {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Raw platform notification delivered to a single window.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    Realize,
    ButtonPress(ButtonEvent),
    ButtonRelease(ButtonEvent),
    Motion(MotionEvent),
    Scroll(ScrollEvent),
    Crossing(CrossingEvent),
    Key(KeyEvent),
    Focus { focus_in: bool },
    WindowState(WindowStateEvent),
    ConfigureView { width: i32, height: i32 },
    ConfigureWindow(Configure),
    Paint,
    Delete,
    Destroy,
}

impl RawEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RawEvent::Realize => "realize",
            RawEvent::ButtonPress(_) => "button-press",
            RawEvent::ButtonRelease(_) => "button-release",
            RawEvent::Motion(_) => "motion",
            RawEvent::Scroll(_) => "scroll",
            RawEvent::Crossing(_) => "crossing",
            RawEvent::Key(_) => "key",
            RawEvent::Focus { .. } => "focus",
            RawEvent::WindowState(_) => "window-state",
            RawEvent::ConfigureView { .. } => "configure-view",
            RawEvent::ConfigureWindow(_) => "configure-window",
            RawEvent::Paint => "paint",
            RawEvent::Delete => "delete",
            RawEvent::Destroy => "destroy",
        }
    }
}
