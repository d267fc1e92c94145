use std::collections::HashMap;

use super::{GeometryHints, Platform, SurfaceSpec};
use crate::cursor::CursorKind;
use crate::window::{Icon, Rgb, ScreenId, WindowId};

/// A platform call, as recorded by [`HeadlessPlatform`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    Create(WindowId),
    Destroy(WindowId),
    Transient(WindowId, Option<WindowId>),
    KeepAbove(WindowId, bool),
    Grab {
        id: WindowId,
        owner_events: bool,
        granted: bool,
    },
    Ungrab,
    Resize(WindowId, i32, i32),
    DefaultSize(WindowId, i32, i32),
    Move(WindowId, i32, i32),
    ContentSize(WindowId, i32, i32),
    Hints(WindowId, GeometryHints),
    Show(WindowId),
    Hide(WindowId),
    Present(WindowId),
    Raise(WindowId),
    Lower(WindowId),
    Iconify(WindowId, bool),
    Maximize(WindowId, bool),
    Fullscreen(WindowId, bool),
    Modal(WindowId, bool),
    Cursor(WindowId, CursorKind),
    Paint(WindowId, i32, i32),
    ShapeMask(WindowId),
}

#[derive(Debug, Clone, Default)]
pub struct Surface {
    pub spec: Option<SurfaceSpec>,
    pub transient_for: Option<WindowId>,
    pub keep_above: bool,
    pub visible: bool,
    pub default_size: Option<(i32, i32)>,
    pub size: (i32, i32),
    pub view_size: (i32, i32),
    pub position: (i32, i32),
    pub hints: Option<GeometryHints>,
    pub title: String,
    pub opacity: f64,
    pub modal: bool,
    pub accept_focus: bool,
    pub background: Option<Rgb>,
    pub has_icon: bool,
    pub cursor: CursorKind,
}

/// In-memory platform that tracks surface state and records every call.
///
/// Pointer grabs succeed unless [`HeadlessPlatform::set_grab_allowed`]
/// turned them off.
#[derive(Debug)]
pub struct HeadlessPlatform {
    surfaces: HashMap<WindowId, Surface>,
    screens: Vec<(ScreenId, i32, i32, i32, i32)>,
    grab: Option<WindowId>,
    grab_allowed: bool,
    outside_press: bool,
    calls: Vec<PlatformCall>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
            screens: vec![(ScreenId(0), 0, 0, 1920, 1080)],
            grab: None,
            grab_allowed: true,
            outside_press: false,
            calls: Vec::new(),
        }
    }

    /// Places a screen at the given root rectangle. Screens added later win
    /// when rectangles overlap.
    pub fn add_screen(&mut self, id: ScreenId, x: i32, y: i32, width: i32, height: i32) {
        self.screens.insert(0, (id, x, y, width, height));
    }

    pub fn set_grab_allowed(&mut self, allowed: bool) {
        self.grab_allowed = allowed;
    }

    pub fn set_outside_press(&mut self, outside: bool) {
        self.outside_press = outside;
    }

    pub fn surface(&self, id: WindowId) -> Option<&Surface> {
        self.surfaces.get(&id)
    }

    pub fn grabbed(&self) -> Option<WindowId> {
        self.grab
    }

    pub fn calls(&self) -> &[PlatformCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<PlatformCall> {
        std::mem::take(&mut self.calls)
    }

    fn surface_mut(&mut self, id: WindowId) -> &mut Surface {
        self.surfaces.entry(id).or_default()
    }
}

impl Platform for HeadlessPlatform {
    fn create_surface(&mut self, id: WindowId, spec: &SurfaceSpec) {
        let surface = self.surface_mut(id);
        surface.spec = Some(*spec);
        surface.opacity = 1.0;
        surface.accept_focus = true;
        self.calls.push(PlatformCall::Create(id));
    }

    fn destroy_surface(&mut self, id: WindowId) {
        self.surfaces.remove(&id);
        if self.grab == Some(id) {
            self.grab = None;
        }
        self.calls.push(PlatformCall::Destroy(id));
    }

    fn set_transient_for(&mut self, id: WindowId, parent: Option<WindowId>) {
        self.surface_mut(id).transient_for = parent;
        self.calls.push(PlatformCall::Transient(id, parent));
    }

    fn set_keep_above(&mut self, id: WindowId, above: bool) {
        self.surface_mut(id).keep_above = above;
        self.calls.push(PlatformCall::KeepAbove(id, above));
    }

    fn grab_pointer(
        &mut self,
        id: WindowId,
        cursor: Option<CursorKind>,
        owner_events: bool,
    ) -> bool {
        let granted = self.grab_allowed;
        if granted {
            self.grab = Some(id);
            if let Some(cursor) = cursor {
                self.surface_mut(id).cursor = cursor;
            }
        }
        self.calls.push(PlatformCall::Grab {
            id,
            owner_events,
            granted,
        });
        granted
    }

    fn ungrab_pointer(&mut self) {
        self.grab = None;
        self.calls.push(PlatformCall::Ungrab);
    }

    fn press_outside_grab(&self) -> bool {
        self.grab.is_some() && self.outside_press
    }

    fn resize(&mut self, id: WindowId, width: i32, height: i32) {
        let surface = self.surface_mut(id);
        surface.size = (width, height);
        surface.view_size = (width, height);
        self.calls.push(PlatformCall::Resize(id, width, height));
    }

    fn set_default_size(&mut self, id: WindowId, width: i32, height: i32) {
        self.surface_mut(id).default_size = Some((width, height));
        self.calls.push(PlatformCall::DefaultSize(id, width, height));
    }

    fn default_size(&self, id: WindowId) -> Option<(i32, i32)> {
        self.surfaces.get(&id).and_then(|s| s.default_size)
    }

    fn move_to(&mut self, id: WindowId, x: i32, y: i32) {
        self.surface_mut(id).position = (x, y);
        self.calls.push(PlatformCall::Move(id, x, y));
    }

    fn set_content_size(&mut self, id: WindowId, width: i32, height: i32) {
        self.surface_mut(id).view_size = (width, height);
        self.calls.push(PlatformCall::ContentSize(id, width, height));
    }

    fn set_geometry_hints(&mut self, id: WindowId, hints: GeometryHints) {
        self.surface_mut(id).hints = Some(hints);
        self.calls.push(PlatformCall::Hints(id, hints));
    }

    fn view_size(&self, id: WindowId) -> (i32, i32) {
        self.surfaces.get(&id).map(|s| s.view_size).unwrap_or((0, 0))
    }

    fn window_size(&self, id: WindowId) -> (i32, i32) {
        self.surfaces.get(&id).map(|s| s.size).unwrap_or((0, 0))
    }

    fn show(&mut self, id: WindowId) {
        let surface = self.surface_mut(id);
        surface.visible = true;
        if surface.size == (0, 0)
            && let Some(size) = surface.default_size
        {
            surface.size = size;
            surface.view_size = size;
        }
        self.calls.push(PlatformCall::Show(id));
    }

    fn hide(&mut self, id: WindowId) {
        self.surface_mut(id).visible = false;
        self.calls.push(PlatformCall::Hide(id));
    }

    fn is_visible(&self, id: WindowId) -> bool {
        self.surfaces.get(&id).is_some_and(|s| s.visible)
    }

    fn present(&mut self, id: WindowId) {
        self.calls.push(PlatformCall::Present(id));
    }

    fn raise(&mut self, id: WindowId) {
        self.calls.push(PlatformCall::Raise(id));
    }

    fn lower(&mut self, id: WindowId) {
        self.calls.push(PlatformCall::Lower(id));
    }

    fn iconify(&mut self, id: WindowId, iconify: bool) {
        self.calls.push(PlatformCall::Iconify(id, iconify));
    }

    fn maximize(&mut self, id: WindowId, maximize: bool) {
        self.calls.push(PlatformCall::Maximize(id, maximize));
    }

    fn fullscreen(&mut self, id: WindowId, fullscreen: bool) {
        self.calls.push(PlatformCall::Fullscreen(id, fullscreen));
    }

    fn set_title(&mut self, id: WindowId, title: &str) {
        self.surface_mut(id).title = title.to_string();
    }

    fn set_opacity(&mut self, id: WindowId, alpha: f64) {
        self.surface_mut(id).opacity = alpha;
    }

    fn set_modal(&mut self, id: WindowId, modal: bool) {
        self.surface_mut(id).modal = modal;
        self.calls.push(PlatformCall::Modal(id, modal));
    }

    fn set_icon(&mut self, id: WindowId, icon: Option<&Icon>) {
        self.surface_mut(id).has_icon = icon.is_some();
    }

    fn set_background(&mut self, id: WindowId, color: Rgb) {
        self.surface_mut(id).background = Some(color);
    }

    fn set_cursor(&mut self, id: WindowId, cursor: CursorKind) {
        self.surface_mut(id).cursor = cursor;
        self.calls.push(PlatformCall::Cursor(id, cursor));
    }

    fn set_accept_focus(&mut self, id: WindowId, focusable: bool) {
        self.surface_mut(id).accept_focus = focusable;
    }

    fn screen_at(&self, x: i32, y: i32) -> Option<ScreenId> {
        self.screens
            .iter()
            .find(|(_, sx, sy, w, h)| x >= *sx && x < sx + w && y >= *sy && y < sy + h)
            .map(|(id, ..)| *id)
    }

    fn paint(&mut self, id: WindowId, _pixels: &[u32], width: i32, height: i32) {
        self.calls.push(PlatformCall::Paint(id, width, height));
    }

    fn apply_shape_mask(&mut self, id: WindowId, _pixels: &[u32], _width: i32, _height: i32) {
        self.calls.push(PlatformCall::ShapeMask(id));
    }
}
