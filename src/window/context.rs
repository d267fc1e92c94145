use std::collections::BTreeSet;

use super::geometry::{Geometry, SizeLimits};
use super::lifecycle::EventsCounter;
use super::{Capabilities, FrameType, ScreenId, WindowId, WindowType};
use crate::cursor::CursorKind;
use crate::peer::{ViewPeer, WindowPeer};
use crate::state::WindowFlags;

/// State of one native top-level or popup surface.
///
/// Contexts live in the [`WindowManager`](super::WindowManager) arena and
/// refer to each other by [`WindowId`]. The owner is a plain back-reference;
/// the children set lists windows this one is transient for, but does not
/// decide when they are deleted.
pub struct WindowContext {
    pub(super) window_peer: Option<Box<dyn WindowPeer>>,
    pub(super) view_peer: Option<Box<dyn ViewPeer>>,
    pub(super) owner: Option<WindowId>,
    pub(super) children: BTreeSet<WindowId>,
    pub(super) flags: WindowFlags,
    pub(super) geometry: Geometry,
    pub(super) limits: SizeLimits,
    pub(super) screen: ScreenId,
    pub(super) cursor: Option<CursorKind>,
    /// Keep-above hint last applied to the native surface.
    pub(super) kept_above: bool,
    pub(super) frame_type: FrameType,
    pub(super) window_type: WindowType,
    pub(super) capabilities: Capabilities,
    pub(super) events: EventsCounter,
    pub(super) destroy_pending: bool,
}

impl WindowContext {
    pub(super) fn new(
        window_peer: Option<Box<dyn WindowPeer>>,
        screen: ScreenId,
        frame_type: FrameType,
        window_type: WindowType,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            window_peer,
            view_peer: None,
            owner: None,
            children: BTreeSet::new(),
            flags: WindowFlags::new(),
            geometry: Geometry::default(),
            limits: SizeLimits::default(),
            screen,
            cursor: None,
            kept_above: false,
            frame_type,
            window_type,
            capabilities,
            events: EventsCounter::default(),
            destroy_pending: false,
        }
    }

    pub fn owner(&self) -> Option<WindowId> {
        self.owner
    }

    pub fn children(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.children.iter().copied()
    }

    pub fn has_child(&self, id: WindowId) -> bool {
        self.children.contains(&id)
    }

    pub fn flags(&self) -> &WindowFlags {
        &self.flags
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn limits(&self) -> &SizeLimits {
        &self.limits
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn cursor(&self) -> Option<CursorKind> {
        self.cursor
    }

    pub fn kept_above(&self) -> bool {
        self.kept_above
    }

    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn has_window_peer(&self) -> bool {
        self.window_peer.is_some()
    }

    pub fn has_view_peer(&self) -> bool {
        self.view_peer.is_some()
    }

    pub fn events_in_flight(&self) -> usize {
        self.events.count()
    }

    /// Destruction was requested; the context only waits for in-flight
    /// events to finish before it is deleted.
    pub fn is_dead(&self) -> bool {
        self.destroy_pending
    }

    /// Not resizable, or disabled: the surface is frozen at its current size.
    pub(super) fn needs_fixed_size(&self) -> bool {
        !self.flags.resizable() || self.flags.disabled()
    }
}

impl std::fmt::Debug for WindowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowContext")
            .field("owner", &self.owner)
            .field("children", &self.children)
            .field("flags", &self.flags)
            .field("frame_type", &self.frame_type)
            .field("window_type", &self.window_type)
            .field("events_in_flight", &self.events.count())
            .field("destroy_pending", &self.destroy_pending)
            .finish_non_exhaustive()
    }
}
