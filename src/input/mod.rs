//! Normalization of raw platform input into the peer's event model.
//!
//! Platform numbering (button numbers, keysyms, state masks) never leaves
//! this module; peers only see [`Modifiers`], [`MouseButton`] and
//! [`KeyCode`].

pub mod keyboard;
pub mod modifiers;
pub mod mouse;

pub use keyboard::{KeyCode, NormalizedKey, normalize_key};
pub use modifiers::{Modifiers, RawState};
pub use mouse::{MouseButton, ScrollDirection, scroll_delta};
