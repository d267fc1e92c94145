pub mod config;
pub mod constants;
pub mod cursor;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod events;
pub mod input;
pub mod peer;
pub mod script;
pub mod state;
pub mod tracing_sub;
pub mod window;

pub use error::{PeerError, WmError};
pub use window::{WindowId, WindowManager};
