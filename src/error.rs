use thiserror::Error;

use crate::window::WindowId;

#[derive(Debug, Error)]
pub enum WmError {
    #[error("unknown window {0:?}")]
    UnknownWindow(WindowId),
    #[error("window {0:?} is being destroyed")]
    WindowDestroyed(WindowId),
    #[error("window {child:?} cannot be owned by its own descendant {parent:?}")]
    HierarchyCycle { parent: WindowId, child: WindowId },
    #[error("window {0:?} cannot own itself")]
    SelfOwnership(WindowId),
    #[error("pixel buffer holds {len} pixels, {width}x{height} requires {required}")]
    PixelBufferTooSmall {
        len: usize,
        width: i32,
        height: i32,
        required: usize,
    },
}

/// Failure reported by a peer callback.
///
/// The engine logs and clears these at the call site; they never abort the
/// native event being processed.
#[derive(Debug, Error)]
#[error("peer callback `{callback}` failed: {message}")]
pub struct PeerError {
    pub callback: &'static str,
    pub message: String,
}

impl PeerError {
    pub fn new(callback: &'static str, message: impl Into<String>) -> Self {
        Self {
            callback,
            message: message.into(),
        }
    }
}

pub type PeerResult = Result<(), PeerError>;
