//! Boundary with the managed UI-object peers.
//!
//! A window has a [`WindowPeer`] for window-level notifications and,
//! optionally, a [`ViewPeer`] for its content area. Both are opaque to the
//! engine: it only calls them and logs the failures they report.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::PeerResult;
use crate::input::keyboard::KeyKind;
use crate::input::{KeyCode, Modifiers, MouseButton};
use crate::window::{Level, ScreenId, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Gained,
    Lost,
    /// The user tried to activate a disabled window.
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeKind {
    Resize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Minimize,
    Maximize,
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Up,
    Move,
    Drag,
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseNotification {
    pub kind: MouseKind,
    pub button: MouseButton,
    pub x: i32,
    pub y: i32,
    pub root_x: i32,
    pub root_y: i32,
    pub modifiers: Modifiers,
    pub is_popup_trigger: bool,
    pub is_synthesized: bool,
}

impl MouseNotification {
    /// Exit notification with no position, used when the view is replaced
    /// or the window is hidden while the pointer is inside.
    pub fn synthetic_exit() -> Self {
        Self {
            kind: MouseKind::Exit,
            button: MouseButton::None,
            x: 0,
            y: 0,
            root_x: 0,
            root_y: 0,
            modifiers: Modifiers::empty(),
            is_popup_trigger: false,
            is_synthesized: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollNotification {
    pub x: i32,
    pub y: i32,
    pub root_x: i32,
    pub root_y: i32,
    pub dx: f64,
    pub dy: f64,
    pub modifiers: Modifiers,
    pub line_size_x: f64,
    pub line_size_y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNotification {
    pub kind: KeyKind,
    pub key_code: KeyCode,
    pub chars: String,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuRequest {
    pub x: i32,
    pub y: i32,
    pub root_x: i32,
    pub root_y: i32,
    pub is_keyboard: bool,
}

pub trait WindowPeer {
    fn notify_focus(&mut self, _event: FocusEvent) -> PeerResult {
        Ok(())
    }
    fn notify_focus_ungrab(&mut self) -> PeerResult {
        Ok(())
    }
    fn notify_close(&mut self) -> PeerResult {
        Ok(())
    }
    fn notify_destroy(&mut self) -> PeerResult {
        Ok(())
    }
    fn notify_resize(&mut self, _kind: ResizeKind, _width: i32, _height: i32) -> PeerResult {
        Ok(())
    }
    fn notify_move(&mut self, _x: i32, _y: i32) -> PeerResult {
        Ok(())
    }
    fn notify_move_to_screen(&mut self, _screen: ScreenId) -> PeerResult {
        Ok(())
    }
    fn notify_level_changed(&mut self, _level: Level) -> PeerResult {
        Ok(())
    }
    fn notify_state_changed(&mut self, _state: StateChange) -> PeerResult {
        Ok(())
    }
}

pub trait ViewPeer {
    fn notify_repaint(&mut self, _x: i32, _y: i32, _width: i32, _height: i32) -> PeerResult {
        Ok(())
    }
    fn notify_resize(&mut self, _width: i32, _height: i32) -> PeerResult {
        Ok(())
    }
    fn notify_moved(&mut self) -> PeerResult {
        Ok(())
    }
    fn notify_mouse(&mut self, _event: MouseNotification) -> PeerResult {
        Ok(())
    }
    fn notify_scroll(&mut self, _event: ScrollNotification) -> PeerResult {
        Ok(())
    }
    fn notify_key(&mut self, _event: KeyNotification) -> PeerResult {
        Ok(())
    }
    fn notify_menu(&mut self, _request: MenuRequest) -> PeerResult {
        Ok(())
    }
}

/// Inbound command a peer may request while it is being notified.
///
/// Peers cannot call back into the engine directly; they push commands
/// here and the engine runs them as soon as the current callback returns,
/// still inside the dispatch of the event that triggered them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Destroy(WindowId),
    SetVisible(WindowId, bool),
    SetEnabled(WindowId, bool),
    SetLevel(WindowId, Level),
    RequestFocus(WindowId),
    GrabFocus(WindowId),
    UngrabFocus(WindowId),
    ToFront(WindowId),
    ToBack(WindowId),
}

#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Rc<RefCell<VecDeque<Command>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        self.inner.borrow_mut().push_back(command);
    }

    pub fn pop(&self) -> Option<Command> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Every notification a peer can receive, flattened for recording.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Focus(FocusEvent),
    FocusUngrab,
    Closed,
    Destroyed,
    Resized(ResizeKind, i32, i32),
    Moved(i32, i32),
    MovedToScreen(ScreenId),
    LevelChanged(Level),
    StateChanged(StateChange),
    Repaint(i32, i32, i32, i32),
    ViewResized(i32, i32),
    ViewMoved,
    Mouse(MouseNotification),
    Scroll(ScrollNotification),
    Key(KeyNotification),
    Menu(MenuRequest),
}

/// Shared notification log.
pub type NotificationLog = Rc<RefCell<Vec<(String, Notification)>>>;

/// Peer that appends every notification it receives to a shared log,
/// tagged with a label.
///
/// One recorder can serve as both the window peer and the view peer of a
/// window; clone it to hand out both halves.
#[derive(Debug, Clone)]
pub struct RecordingPeer {
    label: String,
    log: NotificationLog,
}

impl RecordingPeer {
    pub fn new(label: impl Into<String>, log: NotificationLog) -> Self {
        Self {
            label: label.into(),
            log,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn record(&self, notification: Notification) -> PeerResult {
        tracing::trace!(peer = %self.label, ?notification, "peer notified");
        self.log
            .borrow_mut()
            .push((self.label.clone(), notification));
        Ok(())
    }
}

impl WindowPeer for RecordingPeer {
    fn notify_focus(&mut self, event: FocusEvent) -> PeerResult {
        self.record(Notification::Focus(event))
    }
    fn notify_focus_ungrab(&mut self) -> PeerResult {
        self.record(Notification::FocusUngrab)
    }
    fn notify_close(&mut self) -> PeerResult {
        self.record(Notification::Closed)
    }
    fn notify_destroy(&mut self) -> PeerResult {
        self.record(Notification::Destroyed)
    }
    fn notify_resize(&mut self, kind: ResizeKind, width: i32, height: i32) -> PeerResult {
        self.record(Notification::Resized(kind, width, height))
    }
    fn notify_move(&mut self, x: i32, y: i32) -> PeerResult {
        self.record(Notification::Moved(x, y))
    }
    fn notify_move_to_screen(&mut self, screen: ScreenId) -> PeerResult {
        self.record(Notification::MovedToScreen(screen))
    }
    fn notify_level_changed(&mut self, level: Level) -> PeerResult {
        self.record(Notification::LevelChanged(level))
    }
    fn notify_state_changed(&mut self, state: StateChange) -> PeerResult {
        self.record(Notification::StateChanged(state))
    }
}

impl ViewPeer for RecordingPeer {
    fn notify_repaint(&mut self, x: i32, y: i32, width: i32, height: i32) -> PeerResult {
        self.record(Notification::Repaint(x, y, width, height))
    }
    fn notify_resize(&mut self, width: i32, height: i32) -> PeerResult {
        self.record(Notification::ViewResized(width, height))
    }
    fn notify_moved(&mut self) -> PeerResult {
        self.record(Notification::ViewMoved)
    }
    fn notify_mouse(&mut self, event: MouseNotification) -> PeerResult {
        self.record(Notification::Mouse(event))
    }
    fn notify_scroll(&mut self, event: ScrollNotification) -> PeerResult {
        self.record(Notification::Scroll(event))
    }
    fn notify_key(&mut self, event: KeyNotification) -> PeerResult {
        self.record(Notification::Key(event))
    }
    fn notify_menu(&mut self, request: MenuRequest) -> PeerResult {
        self.record(Notification::Menu(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_queue_is_fifo_and_shared() {
        let q = CommandQueue::new();
        let handle = q.clone();
        let id = WindowId::default();
        handle.push(Command::ToFront(id));
        handle.push(Command::Destroy(id));
        assert_eq!(q.pop(), Some(Command::ToFront(id)));
        assert_eq!(q.pop(), Some(Command::Destroy(id)));
        assert!(q.is_empty());
    }

    #[test]
    fn recording_peer_tags_entries() {
        let log = NotificationLog::default();
        let mut peer = RecordingPeer::new("main", log.clone());
        WindowPeer::notify_resize(&mut peer, ResizeKind::Resize, 10, 20).unwrap();
        ViewPeer::notify_moved(&mut peer).unwrap();
        let entries = log.borrow();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "main");
        assert_eq!(entries[0].1, Notification::Resized(ResizeKind::Resize, 10, 20));
        assert_eq!(entries[1].1, Notification::ViewMoved);
    }
}
