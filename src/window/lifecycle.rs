//! Deferred destruction.
//!
//! Every dispatch into a window holds an [`EventGuard`] on that window's
//! [`EventsCounter`]. Destroying a window detaches it right away, but the
//! slot is only freed once no guard is outstanding, so a handler that
//! destroys its own window keeps running against a valid (if quiet)
//! context.

use std::cell::Cell;
use std::rc::Rc;

use super::{WindowId, WindowManager};
use crate::drivers::Platform;
use crate::error::WmError;

#[derive(Debug, Clone, Default)]
pub struct EventsCounter(Rc<Cell<usize>>);

impl EventsCounter {
    pub fn count(&self) -> usize {
        self.0.get()
    }

    pub fn enter(&self) -> EventGuard {
        self.0.set(self.0.get() + 1);
        EventGuard {
            counter: Rc::clone(&self.0),
        }
    }
}

/// Marks one event in flight; released on drop, including during unwinding.
#[derive(Debug)]
pub struct EventGuard {
    counter: Rc<Cell<usize>>,
}

impl Drop for EventGuard {
    fn drop(&mut self) {
        self.counter.set(self.counter.get().saturating_sub(1));
    }
}

impl<P: Platform> WindowManager<P> {
    /// Runs `f` with an event in flight on `id`, then deletes the window if
    /// it was destroyed meanwhile and no other event holds it.
    pub fn with_event_guard<R>(
        &mut self,
        id: WindowId,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, WmError> {
        let guard = self.live(id)?.events.enter();
        let result = f(self);
        drop(guard);
        self.reap(id);
        Ok(result)
    }

    /// Detaches the window and deletes it, or defers the deletion while
    /// events are in flight. Destroying a window twice is a no-op.
    pub fn destroy(&mut self, id: WindowId) -> Result<(), WmError> {
        let ctx = self.windows.get(id).ok_or(WmError::UnknownWindow(id))?;
        if ctx.destroy_pending {
            return Ok(());
        }
        self.process_destroy(id);
        self.reap(id);
        Ok(())
    }

    /// First phase of destruction: leave the hierarchy and the grab slots,
    /// tell the peer, and let go of both peers.
    ///
    /// Children are detached (owner cleared, transient relation removed)
    /// but stay alive, and drop any keep-above they only inherited.
    pub(super) fn process_destroy(&mut self, id: WindowId) {
        let Some(ctx) = self.windows.get_mut(id) else {
            return;
        };
        ctx.destroy_pending = true;
        tracing::debug!(window_id = ?id, "destroying window");

        if let Some(owner) = ctx.owner.take() {
            if let Some(parent) = self.windows.get_mut(owner) {
                parent.children.remove(&id);
            }
            self.platform.set_transient_for(id, None);
        }

        if self.grab.drag_window() == Some(id) {
            self.ungrab_mouse_drag_focus();
        }
        if self.grab.grab_window() == Some(id) {
            self.release_focus_grab(id);
        }

        let children = self
            .windows
            .get_mut(id)
            .map(|ctx| std::mem::take(&mut ctx.children))
            .unwrap_or_default();
        for child in children {
            self.platform.set_transient_for(child, None);
            if let Some(child_ctx) = self.windows.get_mut(child) {
                child_ctx.owner = None;
            }
            self.refresh_inherited_on_top(child);
        }

        self.notify_window(id, "notify_destroy", |peer| peer.notify_destroy());

        if let Some(ctx) = self.windows.get_mut(id) {
            ctx.view_peer = None;
            ctx.window_peer = None;
        }
    }

    /// Second phase: frees the slot once nothing is in flight.
    pub(super) fn reap(&mut self, id: WindowId) {
        let Some(ctx) = self.windows.get(id) else {
            return;
        };
        if !ctx.destroy_pending {
            return;
        }
        let in_flight = ctx.events.count();
        if in_flight > 0 {
            tracing::debug!(window_id = ?id, in_flight, "deferring window deletion");
            return;
        }
        self.windows.remove(id);
        self.platform.destroy_surface(id);
        tracing::debug!(window_id = ?id, "deleted window");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_counts_and_releases() {
        let counter = EventsCounter::default();
        let outer = counter.enter();
        let inner = counter.enter();
        assert_eq!(counter.count(), 2);
        drop(inner);
        assert_eq!(counter.count(), 1);
        drop(outer);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn guard_is_released_on_unwind() {
        let counter = EventsCounter::default();
        let shared = counter.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = shared.enter();
            panic!("handler failed");
        }));
        assert!(result.is_err());
        assert_eq!(counter.count(), 0);
    }
}
