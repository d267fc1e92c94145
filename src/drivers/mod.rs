pub mod headless;

pub use headless::{HeadlessPlatform, PlatformCall};

use crate::cursor::CursorKind;
use crate::window::{FrameType, Icon, Rgb, ScreenId, WindowId};

/// How the native surface for a window is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub popup: bool,
    pub utility: bool,
    pub frame_type: FrameType,
    /// Titled frames get a header bar; `closable` controls its close button.
    pub header_bar: bool,
    pub closable: bool,
    pub decorated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryHints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
}

/// Native windowing backend the engine drives.
///
/// Surfaces are addressed by the id of the window that owns them. All
/// calls happen on the UI thread.
pub trait Platform {
    fn create_surface(&mut self, id: WindowId, spec: &SurfaceSpec);
    fn destroy_surface(&mut self, id: WindowId);

    fn set_transient_for(&mut self, id: WindowId, parent: Option<WindowId>);
    fn set_keep_above(&mut self, id: WindowId, above: bool);

    /// Grabs all pointer devices for `id`. `owner_events` keeps delivering
    /// events to the application's own windows normally.
    fn grab_pointer(&mut self, id: WindowId, cursor: Option<CursorKind>, owner_events: bool)
    -> bool;
    fn ungrab_pointer(&mut self);
    /// Whether a pointer press happened outside every application window
    /// while the pointer is grabbed.
    fn press_outside_grab(&self) -> bool {
        false
    }

    fn resize(&mut self, id: WindowId, width: i32, height: i32);
    fn set_default_size(&mut self, id: WindowId, width: i32, height: i32);
    fn default_size(&self, id: WindowId) -> Option<(i32, i32)>;
    fn move_to(&mut self, id: WindowId, x: i32, y: i32);
    fn set_content_size(&mut self, id: WindowId, width: i32, height: i32);
    fn set_geometry_hints(&mut self, id: WindowId, hints: GeometryHints);
    /// Allocated size of the content area.
    fn view_size(&self, id: WindowId) -> (i32, i32);
    /// Allocated size of the whole surface.
    fn window_size(&self, id: WindowId) -> (i32, i32);

    fn show(&mut self, id: WindowId);
    fn hide(&mut self, id: WindowId);
    fn is_visible(&self, id: WindowId) -> bool;
    fn present(&mut self, _id: WindowId) {}
    fn raise(&mut self, _id: WindowId) {}
    fn lower(&mut self, _id: WindowId) {}
    fn focus(&mut self, _id: WindowId) {}

    fn iconify(&mut self, id: WindowId, iconify: bool);
    fn maximize(&mut self, id: WindowId, maximize: bool);
    fn fullscreen(&mut self, id: WindowId, fullscreen: bool);

    fn set_title(&mut self, _id: WindowId, _title: &str) {}
    fn set_opacity(&mut self, _id: WindowId, _alpha: f64) {}
    fn set_modal(&mut self, _id: WindowId, _modal: bool) {}
    fn set_icon(&mut self, _id: WindowId, _icon: Option<&Icon>) {}
    fn set_background(&mut self, _id: WindowId, _color: Rgb) {}
    fn set_cursor(&mut self, _id: WindowId, _cursor: CursorKind) {}
    fn set_accept_focus(&mut self, _id: WindowId, _focusable: bool) {}

    /// Screen that owns the given root coordinate, if any.
    fn screen_at(&self, _x: i32, _y: i32) -> Option<ScreenId> {
        None
    }

    fn paint(&mut self, id: WindowId, pixels: &[u32], width: i32, height: i32);
    fn apply_shape_mask(&mut self, _id: WindowId, _pixels: &[u32], _width: i32, _height: i32) {}
}

impl<T: Platform + ?Sized> Platform for &mut T {
    fn create_surface(&mut self, id: WindowId, spec: &SurfaceSpec) {
        (**self).create_surface(id, spec)
    }
    fn destroy_surface(&mut self, id: WindowId) {
        (**self).destroy_surface(id)
    }
    fn set_transient_for(&mut self, id: WindowId, parent: Option<WindowId>) {
        (**self).set_transient_for(id, parent)
    }
    fn set_keep_above(&mut self, id: WindowId, above: bool) {
        (**self).set_keep_above(id, above)
    }
    fn grab_pointer(
        &mut self,
        id: WindowId,
        cursor: Option<CursorKind>,
        owner_events: bool,
    ) -> bool {
        (**self).grab_pointer(id, cursor, owner_events)
    }
    fn ungrab_pointer(&mut self) {
        (**self).ungrab_pointer()
    }
    fn press_outside_grab(&self) -> bool {
        (**self).press_outside_grab()
    }
    fn resize(&mut self, id: WindowId, width: i32, height: i32) {
        (**self).resize(id, width, height)
    }
    fn set_default_size(&mut self, id: WindowId, width: i32, height: i32) {
        (**self).set_default_size(id, width, height)
    }
    fn default_size(&self, id: WindowId) -> Option<(i32, i32)> {
        (**self).default_size(id)
    }
    fn move_to(&mut self, id: WindowId, x: i32, y: i32) {
        (**self).move_to(id, x, y)
    }
    fn set_content_size(&mut self, id: WindowId, width: i32, height: i32) {
        (**self).set_content_size(id, width, height)
    }
    fn set_geometry_hints(&mut self, id: WindowId, hints: GeometryHints) {
        (**self).set_geometry_hints(id, hints)
    }
    fn view_size(&self, id: WindowId) -> (i32, i32) {
        (**self).view_size(id)
    }
    fn window_size(&self, id: WindowId) -> (i32, i32) {
        (**self).window_size(id)
    }
    fn show(&mut self, id: WindowId) {
        (**self).show(id)
    }
    fn hide(&mut self, id: WindowId) {
        (**self).hide(id)
    }
    fn is_visible(&self, id: WindowId) -> bool {
        (**self).is_visible(id)
    }
    fn present(&mut self, id: WindowId) {
        (**self).present(id)
    }
    fn raise(&mut self, id: WindowId) {
        (**self).raise(id)
    }
    fn lower(&mut self, id: WindowId) {
        (**self).lower(id)
    }
    fn focus(&mut self, id: WindowId) {
        (**self).focus(id)
    }
    fn iconify(&mut self, id: WindowId, iconify: bool) {
        (**self).iconify(id, iconify)
    }
    fn maximize(&mut self, id: WindowId, maximize: bool) {
        (**self).maximize(id, maximize)
    }
    fn fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        (**self).fullscreen(id, fullscreen)
    }
    fn set_title(&mut self, id: WindowId, title: &str) {
        (**self).set_title(id, title)
    }
    fn set_opacity(&mut self, id: WindowId, alpha: f64) {
        (**self).set_opacity(id, alpha)
    }
    fn set_modal(&mut self, id: WindowId, modal: bool) {
        (**self).set_modal(id, modal)
    }
    fn set_icon(&mut self, id: WindowId, icon: Option<&Icon>) {
        (**self).set_icon(id, icon)
    }
    fn set_background(&mut self, id: WindowId, color: Rgb) {
        (**self).set_background(id, color)
    }
    fn set_cursor(&mut self, id: WindowId, cursor: CursorKind) {
        (**self).set_cursor(id, cursor)
    }
    fn set_accept_focus(&mut self, id: WindowId, focusable: bool) {
        (**self).set_accept_focus(id, focusable)
    }
    fn screen_at(&self, x: i32, y: i32) -> Option<ScreenId> {
        (**self).screen_at(x, y)
    }
    fn paint(&mut self, id: WindowId, pixels: &[u32], width: i32, height: i32) {
        (**self).paint(id, pixels, width, height)
    }
    fn apply_shape_mask(&mut self, id: WindowId, pixels: &[u32], width: i32, height: i32) {
        (**self).apply_shape_mask(id, pixels, width, height)
    }
}
