mod commands;
mod context;
mod dispatch;
mod geometry;
mod grab;
mod hierarchy;
mod lifecycle;
mod manager;

use bitflags::bitflags;

pub use context::WindowContext;
pub use geometry::{Bounds, Geometry, SizeLimits};
pub use grab::GrabState;
pub use lifecycle::{EventGuard, EventsCounter};
pub use manager::{CreateParams, WindowManager};

slotmap::new_key_type! {
    /// Handle to a window context. Stale handles (windows already deleted)
    /// are detected rather than dereferenced.
    pub struct WindowId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameType {
    #[default]
    Titled,
    Untitled,
    Transparent,
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowType {
    #[default]
    Normal,
    Utility,
    Popup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Normal,
    Floating,
    TopMost,
}

impl Level {
    pub fn is_on_top(self) -> bool {
        !matches!(self, Level::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ScreenId(pub i64);

bitflags! {
    /// Capabilities requested when a window is created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        const CLOSABLE = 1 << 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// ARGB icon image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub width: i32,
    pub height: i32,
    pub pixels: Vec<u32>,
}
