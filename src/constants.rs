//! Shared crate-wide constants.

/// Width applied to a surface that is shown before any size was requested.
pub const DEFAULT_WIDTH: i32 = 320;

/// Height applied to a surface that is shown before any size was requested.
pub const DEFAULT_HEIGHT: i32 = 200;

/// Line size reported with every scroll notification, on both axes.
///
/// Discrete wheel clicks are reported as a unit delta; the peer multiplies
/// the delta by this value to obtain a distance.
pub const SCROLL_LINE_SIZE: f64 = 40.0;

/// Platform button number of the "back" side button.
pub const MOUSE_BACK_BUTTON: u32 = 8;

/// Platform button number of the "forward" side button.
pub const MOUSE_FORWARD_BUTTON: u32 = 9;

/// Sentinel used for an unbounded maximum size in geometry hints.
pub const UNBOUNDED: i32 = i32::MAX;
