//! Pointer grab and drag grab.
//!
//! Two single-holder slots: the focus grab (exclusive pointer and keyboard
//! routing, e.g. for an open popup menu) and the drag grab (routing for a
//! press-move-release gesture). They can be held at the same time; while
//! a drag is active the platform grab belongs to the drag holder.

use super::{WindowId, WindowManager};
use crate::cursor::CursorKind;
use crate::drivers::Platform;
use crate::error::WmError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrabState {
    grab_window: Option<WindowId>,
    drag_window: Option<WindowId>,
}

impl GrabState {
    pub fn grab_window(&self) -> Option<WindowId> {
        self.grab_window
    }

    pub fn drag_window(&self) -> Option<WindowId> {
        self.drag_window
    }

    /// Window the platform pointer grab is issued for: the drag holder
    /// first, then the focus-grab holder.
    pub fn pointer_holder(&self) -> Option<WindowId> {
        self.drag_window.or(self.grab_window)
    }
}

impl<P: Platform> WindowManager<P> {
    pub fn grab_state(&self) -> GrabState {
        self.grab
    }

    /// Makes `id` the focus-grab holder.
    ///
    /// While a drag is active the drag grab already routes everything, so
    /// no platform grab is requested. Returns `false` when the platform
    /// refused the grab; the previous holder is then kept.
    pub fn grab_focus(&mut self, id: WindowId) -> Result<bool, WmError> {
        self.live(id)?;
        Ok(self.try_grab_focus(id))
    }

    fn try_grab_focus(&mut self, id: WindowId) -> bool {
        if self.grab.drag_window.is_none() && !self.platform.grab_pointer(id, None, true) {
            tracing::debug!(window_id = ?id, "focus grab refused");
            return false;
        }
        if let Some(previous) = self.grab.grab_window
            && previous != id
        {
            tracing::trace!(window_id = ?id, ?previous, "focus grab displaced");
        }
        self.grab.grab_window = Some(id);
        true
    }

    /// Starts a drag grab on `id` with the window's current cursor.
    pub fn grab_mouse_drag_focus(&mut self, id: WindowId) -> Result<bool, WmError> {
        let cursor = self.live(id)?.cursor;
        if !self.platform.grab_pointer(id, cursor, false) {
            tracing::debug!(window_id = ?id, "drag grab refused");
            return Ok(false);
        }
        self.grab.drag_window = Some(id);
        tracing::trace!(window_id = ?id, "drag grab started");
        Ok(true)
    }

    /// Releases the focus grab on behalf of `id`.
    pub fn ungrab_focus(&mut self, id: WindowId) -> Result<(), WmError> {
        self.live(id)?;
        self.release_focus_grab(id);
        Ok(())
    }

    /// Clears the focus-grab slot and tells `id` it lost the grab. The
    /// platform grab stays in place while a drag is active.
    pub(super) fn release_focus_grab(&mut self, id: WindowId) {
        if self.grab.drag_window.is_none() {
            self.platform.ungrab_pointer();
        }
        self.grab.grab_window = None;
        tracing::trace!(window_id = ?id, "focus grab released");
        self.notify_window(id, "notify_focus_ungrab", |peer| peer.notify_focus_ungrab());
    }

    /// Ends the drag grab and hands the platform grab back to the
    /// focus-grab holder, if there still is one.
    pub fn ungrab_mouse_drag_focus(&mut self) {
        let previous = self.grab.drag_window.take();
        self.platform.ungrab_pointer();
        tracing::trace!(?previous, "drag grab released");
        if let Some(holder) = self.grab.grab_window {
            self.try_grab_focus(holder);
        }
    }

    /// Sets the cursor of `id` and re-issues the active pointer grab so the
    /// new cursor shows while it is held.
    pub fn set_cursor(&mut self, id: WindowId, cursor: CursorKind) -> Result<(), WmError> {
        self.live_mut(id)?.cursor = Some(cursor);
        if let Some(drag) = self.grab.drag_window {
            self.platform.grab_pointer(drag, Some(cursor), false);
        } else if let Some(holder) = self.grab.grab_window {
            self.platform.grab_pointer(holder, Some(cursor), true);
        }
        self.platform.set_cursor(id, cursor);
        Ok(())
    }
}
