use super::{WindowId, WindowManager};
use crate::constants::UNBOUNDED;
use crate::drivers::{GeometryHints, Platform};
use crate::error::WmError;
use crate::peer::ResizeKind;

/// Last known geometry of a window, as reported by configure events and
/// bounds requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub view_width: i32,
    pub view_height: i32,
    pub gravity_x: f32,
    pub gravity_y: f32,
    /// Size requested before the surface was realized.
    pub default_size: Option<(i32, i32)>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: -1,
            height: -1,
            view_width: -1,
            view_height: -1,
            gravity_x: 0.0,
            gravity_y: 0.0,
            default_size: None,
        }
    }
}

/// Minimum and maximum size requested by the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    min_width: i32,
    min_height: i32,
    max_width: Option<i32>,
    max_height: Option<i32>,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: 1,
            min_height: 1,
            max_width: None,
            max_height: None,
        }
    }
}

impl SizeLimits {
    /// Non-positive minimums clamp to 1.
    pub fn set_minimum(&mut self, width: i32, height: i32) {
        self.min_width = width.max(1);
        self.min_height = height.max(1);
    }

    /// Non-positive maximums mean "unbounded".
    pub fn set_maximum(&mut self, width: i32, height: i32) {
        self.max_width = (width > 0).then_some(width);
        self.max_height = (height > 0).then_some(height);
    }

    pub fn minimum(&self) -> (i32, i32) {
        (self.min_width, self.min_height)
    }

    pub fn maximum(&self) -> (Option<i32>, Option<i32>) {
        (self.max_width, self.max_height)
    }

    /// Hints for a resizable window.
    pub fn hints(&self) -> GeometryHints {
        GeometryHints {
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width.unwrap_or(UNBOUNDED),
            max_height: self.max_height.unwrap_or(UNBOUNDED),
        }
    }

    /// Hints that freeze a window at its allocated size.
    pub fn fixed(width: i32, height: i32) -> GeometryHints {
        GeometryHints {
            min_width: width,
            min_height: height,
            max_width: width,
            max_height: height,
        }
    }
}

/// A bounds request. Unset fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: Option<i32>,
    pub y: Option<i32>,
    /// Outer size; takes precedence over the content size when either
    /// dimension is positive.
    pub width: i32,
    pub height: i32,
    pub content_width: i32,
    pub content_height: i32,
    pub gravity_x: f32,
    pub gravity_y: f32,
}

impl Bounds {
    pub fn size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn content(width: i32, height: i32) -> Self {
        Self {
            content_width: width,
            content_height: height,
            ..Self::default()
        }
    }

    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }
}

impl<P: Platform> WindowManager<P> {
    /// Resizes and/or moves a window.
    ///
    /// An unrealized surface gets no configure event, so the requested size
    /// is remembered as its default size and reported to the peer here.
    pub fn set_bounds(&mut self, id: WindowId, bounds: Bounds) -> Result<(), WmError> {
        let ctx = self.live_mut(id)?;
        ctx.geometry.gravity_x = bounds.gravity_x;
        ctx.geometry.gravity_y = bounds.gravity_y;
        let realized = ctx.flags.realized();
        let current = (ctx.geometry.width, ctx.geometry.height);
        tracing::trace!(window_id = ?id, ?bounds, realized, "set bounds");

        if bounds.width > 0 || bounds.height > 0 {
            let width = if bounds.width > 0 { bounds.width } else { current.0.max(1) };
            let height = if bounds.height > 0 { bounds.height } else { current.1.max(1) };
            self.update_window_constraints(id);
            if realized {
                self.platform.resize(id, width, height);
            } else {
                if let Some(ctx) = self.windows.get_mut(id) {
                    ctx.geometry.default_size = Some((width, height));
                }
                self.platform.set_default_size(id, width, height);
                self.notify_window(id, "notify_resize", |peer| {
                    peer.notify_resize(ResizeKind::Resize, width, height)
                });
            }
        } else if bounds.content_width > 0 || bounds.content_height > 0 {
            self.platform
                .set_content_size(id, bounds.content_width, bounds.content_height);
        }

        if bounds.x.is_some() || bounds.y.is_some() {
            let Some(ctx) = self.windows.get(id) else {
                return Ok(());
            };
            let x = bounds.x.unwrap_or(ctx.geometry.x);
            let y = bounds.y.unwrap_or(ctx.geometry.y);
            self.platform.move_to(id, x, y);
        }
        Ok(())
    }

    pub fn set_resizable(&mut self, id: WindowId, resizable: bool) -> Result<(), WmError> {
        self.live_mut(id)?.flags.set_resizable(resizable);
        self.update_window_constraints(id);
        Ok(())
    }

    pub fn set_minimum_size(&mut self, id: WindowId, width: i32, height: i32) -> Result<(), WmError> {
        self.live_mut(id)?.limits.set_minimum(width, height);
        self.update_window_constraints(id);
        Ok(())
    }

    pub fn set_maximum_size(&mut self, id: WindowId, width: i32, height: i32) -> Result<(), WmError> {
        self.live_mut(id)?.limits.set_maximum(width, height);
        self.update_window_constraints(id);
        Ok(())
    }

    pub(super) fn update_window_constraints(&mut self, id: WindowId) {
        let Some(ctx) = self.windows.get(id) else {
            return;
        };
        let hints = if ctx.needs_fixed_size() {
            let (width, height) = self.platform.view_size(id);
            SizeLimits::fixed(width, height)
        } else {
            ctx.limits.hints()
        };
        self.platform.set_geometry_hints(id, hints);
    }
}
