use super::geometry::Bounds;
use super::{FrameType, Icon, Rgb, WindowId, WindowManager};
use crate::drivers::Platform;
use crate::error::WmError;
use crate::peer::{FocusEvent, MouseNotification, ViewPeer};

fn check_pixels(len: usize, width: i32, height: i32) -> Result<(), WmError> {
    let required = usize::try_from(width.max(0))
        .unwrap_or(0)
        .saturating_mul(usize::try_from(height.max(0)).unwrap_or(0));
    if len < required {
        return Err(WmError::PixelBufferTooSmall {
            len,
            width,
            height,
            required,
        });
    }
    Ok(())
}

impl<P: Platform> WindowManager<P> {
    /// Replaces the view peer. The outgoing view is told the pointer left.
    ///
    /// Returns `false` if the outgoing view closed the window from that
    /// notification; the new view is dropped in that case.
    pub fn set_view(&mut self, id: WindowId, view: Option<Box<dyn ViewPeer>>) -> Result<bool, WmError> {
        self.with_event_guard(id, |wm| {
            wm.notify_view(id, "notify_mouse", |peer| {
                peer.notify_mouse(MouseNotification::synthetic_exit())
            });
            let Ok(ctx) = wm.live_mut(id) else {
                return false;
            };
            ctx.view_peer = view;
            tracing::debug!(window_id = ?id, attached = ctx.view_peer.is_some(), "view replaced");
            true
        })
    }

    /// Drops both peers; the context keeps working but goes quiet.
    pub fn detach(&mut self, id: WindowId) -> Result<(), WmError> {
        let ctx = self.live_mut(id)?;
        ctx.view_peer = None;
        ctx.window_peer = None;
        tracing::debug!(window_id = ?id, "detached peers");
        Ok(())
    }

    /// Shows or hides the window. A peer closing the window from one of
    /// the notifications sent here ends the call quietly.
    pub fn set_visible(&mut self, id: WindowId, visible: bool) -> Result<(), WmError> {
        self.with_event_guard(id, |wm| {
            if visible {
                wm.show_window(id)
            } else {
                wm.hide_window(id);
                Ok(())
            }
        })?
    }

    fn show_window(&mut self, id: WindowId) -> Result<(), WmError> {
        self.platform.show(id);
        if self.platform.default_size(id).is_none() {
            let (width, height) = (self.config.default_width, self.config.default_height);
            self.set_bounds(id, Bounds::size(width, height))?;
        }
        // sent up front; the platform focus event may arrive out of order
        if self.live(id).is_ok_and(|ctx| ctx.flags.enabled()) {
            self.notify_window(id, "notify_focus", |peer| {
                peer.notify_focus(FocusEvent::Gained)
            });
        }
        Ok(())
    }

    fn hide_window(&mut self, id: WindowId) {
        self.platform.hide(id);
        let Ok(ctx) = self.live_mut(id) else {
            return;
        };
        if ctx.view_peer.is_some() && ctx.flags.set_mouse_entered(false) {
            self.notify_view(id, "notify_mouse", |peer| {
                peer.notify_mouse(MouseNotification::synthetic_exit())
            });
        }
    }

    pub fn is_visible(&self, id: WindowId) -> bool {
        self.platform.is_visible(id)
    }

    /// Only titled frames have a header bar to show the title in.
    pub fn set_title(&mut self, id: WindowId, title: &str) -> Result<(), WmError> {
        if self.live(id)?.frame_type == FrameType::Titled {
            self.platform.set_title(id, title);
        }
        Ok(())
    }

    pub fn set_alpha(&mut self, id: WindowId, alpha: f64) -> Result<(), WmError> {
        self.live(id)?;
        self.platform.set_opacity(id, alpha.clamp(0.0, 1.0));
        Ok(())
    }

    pub fn set_enabled(&mut self, id: WindowId, enabled: bool) -> Result<(), WmError> {
        self.live_mut(id)?.flags.set_enabled(enabled);
        self.update_window_constraints(id);
        Ok(())
    }

    pub fn set_focusable(&mut self, id: WindowId, focusable: bool) -> Result<(), WmError> {
        self.live(id)?;
        self.platform.set_accept_focus(id, focusable);
        Ok(())
    }

    /// A modal window is made transient for `parent` on the platform side
    /// only; the owner relation is left alone.
    pub fn set_modal(
        &mut self,
        id: WindowId,
        modal: bool,
        parent: Option<WindowId>,
    ) -> Result<(), WmError> {
        self.live(id)?;
        if modal && let Some(parent) = parent {
            self.live(parent)?;
            self.platform.set_transient_for(id, Some(parent));
        }
        self.platform.set_modal(id, modal);
        Ok(())
    }

    pub fn set_icon(&mut self, id: WindowId, icon: Option<Icon>) -> Result<(), WmError> {
        self.live(id)?;
        if let Some(icon) = &icon {
            check_pixels(icon.pixels.len(), icon.width, icon.height)?;
        }
        self.platform.set_icon(id, icon.as_ref());
        Ok(())
    }

    pub fn set_background(&mut self, id: WindowId, color: Rgb) -> Result<(), WmError> {
        self.live(id)?;
        self.platform.set_background(id, color);
        Ok(())
    }

    pub fn enter_fullscreen(&mut self, id: WindowId) -> Result<(), WmError> {
        self.live(id)?;
        self.platform.fullscreen(id, true);
        self.live_mut(id)?.flags.set_fullscreen(true);
        Ok(())
    }

    /// The fullscreen flag is cleared by the resulting window-state event.
    pub fn exit_fullscreen(&mut self, id: WindowId) -> Result<(), WmError> {
        self.live(id)?;
        self.platform.fullscreen(id, false);
        Ok(())
    }

    pub fn to_front(&mut self, id: WindowId) -> Result<(), WmError> {
        self.live(id)?;
        self.platform.raise(id);
        Ok(())
    }

    pub fn to_back(&mut self, id: WindowId) -> Result<(), WmError> {
        self.live(id)?;
        self.platform.lower(id);
        Ok(())
    }

    /// Presents the window if it is visible; hidden windows are left alone.
    pub fn request_focus(&mut self, id: WindowId) -> Result<(), WmError> {
        self.live(id)?;
        if self.platform.is_visible(id) {
            self.platform.present(id);
        }
        Ok(())
    }

    pub fn set_minimized(&mut self, id: WindowId, minimize: bool) -> Result<(), WmError> {
        self.live_mut(id)?.flags.set_iconified(minimize);
        self.platform.iconify(id, minimize);
        if !minimize {
            self.platform.focus(id);
        }
        Ok(())
    }

    pub fn set_maximized(&mut self, id: WindowId, maximize: bool) -> Result<(), WmError> {
        self.live_mut(id)?.flags.set_maximized(maximize);
        self.platform.maximize(id, maximize);
        Ok(())
    }

    /// Paints an ARGB buffer into the content area. Transparent frames also
    /// get their input shape cut from the alpha channel.
    pub fn paint(
        &mut self,
        id: WindowId,
        pixels: &[u32],
        width: i32,
        height: i32,
    ) -> Result<(), WmError> {
        let frame_type = self.live(id)?.frame_type;
        check_pixels(pixels.len(), width, height)?;
        if frame_type == FrameType::Transparent {
            self.platform.apply_shape_mask(id, pixels, width, height);
        }
        self.platform.paint(id, pixels, width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_check_rejects_short_buffers() {
        assert!(check_pixels(6, 3, 2).is_ok());
        let err = check_pixels(5, 3, 2).unwrap_err();
        assert!(matches!(err, WmError::PixelBufferTooSmall { required: 6, .. }));
    }

    #[test]
    fn pixel_check_accepts_empty_sizes() {
        assert!(check_pixels(0, 0, 10).is_ok());
        assert!(check_pixels(0, -1, -1).is_ok());
    }
}
