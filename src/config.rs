use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SCROLL_LINE_SIZE};

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Size applied to a surface shown before any size was requested.
    pub default_width: i32,
    pub default_height: i32,
    /// Line size reported with scroll notifications.
    pub scroll_line_size: f64,
    /// Run commands queued by peers as soon as the notifying callback
    /// returns. When off, they run at the end of the current dispatch, or
    /// on [`WindowManager::run_commands`](crate::window::WindowManager::run_commands)
    /// for notifications sent outside a dispatch.
    pub run_peer_commands: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            scroll_line_size: SCROLL_LINE_SIZE,
            run_peer_commands: true,
        }
    }
}
