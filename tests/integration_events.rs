use wm_context::constants::UNBOUNDED;
use wm_context::drivers::{GeometryHints, HeadlessPlatform, Platform, PlatformCall};
use wm_context::events::{
    ButtonEvent, Configure, CrossingEvent, KeyEvent, PointerPos, RawEvent, ScrollEvent,
    StateMask, WindowStateEvent,
};
use wm_context::input::keyboard::KeyKind;
use wm_context::input::{KeyCode, Modifiers, MouseButton, RawState, ScrollDirection};
use wm_context::peer::{
    FocusEvent, MenuRequest, MouseKind, Notification, NotificationLog, RecordingPeer, ResizeKind,
    StateChange,
};
use wm_context::window::{Bounds, CreateParams, FrameType, ScreenId, WindowId, WindowManager};
use wm_context::WmError;

struct Harness {
    wm: WindowManager<HeadlessPlatform>,
    log: NotificationLog,
    id: WindowId,
}

impl Harness {
    fn new() -> Self {
        Self::with_frame(FrameType::Titled)
    }

    fn with_frame(frame_type: FrameType) -> Self {
        let log = NotificationLog::default();
        let mut wm = WindowManager::new(HeadlessPlatform::new());
        let id = wm
            .create(CreateParams::new(frame_type).peer(RecordingPeer::new("w", log.clone())))
            .unwrap();
        wm.set_view(id, Some(Box::new(RecordingPeer::new("v", log.clone()))))
            .unwrap();
        Self { wm, log, id }
    }

    fn send(&mut self, event: RawEvent) {
        self.wm.dispatch(self.id, event).unwrap();
    }

    /// Notifications since the last call.
    fn take(&mut self) -> Vec<Notification> {
        self.log.borrow_mut().drain(..).map(|(_, n)| n).collect()
    }
}

fn state(changed: StateMask, new_state: StateMask) -> RawEvent {
    RawEvent::WindowState(WindowStateEvent { changed, new_state })
}

fn configure(x: i32, y: i32, width: i32, height: i32) -> RawEvent {
    RawEvent::ConfigureWindow(Configure {
        x,
        y,
        width,
        height,
    })
}

fn key(press: bool, keysym: u32, state: RawState) -> RawEvent {
    RawEvent::Key(KeyEvent {
        press,
        keysym,
        state,
    })
}

fn typed_chars(notifications: &[Notification]) -> Vec<String> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::Key(k) if k.kind == KeyKind::Typed => Some(k.chars.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn configure_reports_resize_move_and_view_move() {
    let mut h = Harness::new();
    h.send(configure(10, 20, 640, 480));
    assert_eq!(
        h.take(),
        vec![
            Notification::Resized(ResizeKind::Resize, 640, 480),
            Notification::Moved(10, 20),
            Notification::ViewMoved,
        ]
    );
    let geometry = h.wm.context(h.id).unwrap().geometry();
    assert_eq!((geometry.width, geometry.height), (640, 480));
}

#[test]
fn resize_is_suppressed_while_iconified() {
    let mut h = Harness::new();
    h.send(state(StateMask::ICONIFIED, StateMask::ICONIFIED));
    h.take();
    h.send(configure(0, 0, 100, 50));
    let notes = h.take();
    assert!(
        !notes
            .iter()
            .any(|n| matches!(n, Notification::Resized(..)))
    );
    assert!(notes.contains(&Notification::Moved(0, 0)));
}

#[test]
fn maximized_configure_reports_maximize_kind() {
    let mut h = Harness::new();
    h.send(state(StateMask::MAXIMIZED, StateMask::MAXIMIZED));
    h.take();
    h.send(configure(0, 0, 1920, 1080));
    assert_eq!(
        h.take()[0],
        Notification::Resized(ResizeKind::Maximize, 1920, 1080)
    );
}

#[test]
fn screen_change_is_reported_once() {
    let mut h = Harness::new();
    h.wm.platform_mut()
        .add_screen(ScreenId(7), 1920, 0, 1280, 1024);
    h.send(configure(2000, 10, 300, 200));
    assert!(h.take().contains(&Notification::MovedToScreen(ScreenId(7))));
    assert_eq!(h.wm.context(h.id).unwrap().screen(), ScreenId(7));

    h.send(configure(2100, 10, 300, 200));
    assert!(
        !h.take()
            .iter()
            .any(|n| matches!(n, Notification::MovedToScreen(_)))
    );
}

#[test]
fn state_priority_prefers_iconified() {
    let mut h = Harness::new();
    let both = StateMask::ICONIFIED | StateMask::MAXIMIZED;
    h.send(state(both, both));
    assert_eq!(
        h.take(),
        vec![Notification::StateChanged(StateChange::Minimize)]
    );
}

#[test]
fn leaving_iconified_while_maximized_reports_maximize() {
    let mut h = Harness::new();
    let both = StateMask::ICONIFIED | StateMask::MAXIMIZED;
    h.send(state(both, both));
    h.take();
    h.send(state(StateMask::ICONIFIED, StateMask::MAXIMIZED));
    assert_eq!(
        h.take(),
        vec![Notification::StateChanged(StateChange::Maximize)]
    );
}

#[test]
fn plain_restore_repaints_first() {
    let mut h = Harness::new();
    h.send(state(StateMask::ICONIFIED, StateMask::ICONIFIED));
    h.take();
    h.send(state(StateMask::ICONIFIED, StateMask::empty()));
    let notes = h.take();
    assert!(matches!(notes[0], Notification::Repaint(0, 0, _, _)));
    assert_eq!(notes[1], Notification::StateChanged(StateChange::Restore));
}

#[test]
fn fullscreen_state_is_tracked() {
    let mut h = Harness::new();
    h.wm.enter_fullscreen(h.id).unwrap();
    assert!(h.wm.context(h.id).unwrap().flags().fullscreen());
    h.wm.exit_fullscreen(h.id).unwrap();
    assert!(h.wm.context(h.id).unwrap().flags().fullscreen());
    h.send(state(StateMask::FULLSCREEN, StateMask::empty()));
    assert!(!h.wm.context(h.id).unwrap().flags().fullscreen());
    assert!(h.take().is_empty());
}

#[test]
fn close_request_ignored_when_disabled() {
    let mut h = Harness::new();
    h.wm.set_enabled(h.id, false).unwrap();
    h.send(RawEvent::Delete);
    assert!(h.take().is_empty());
    h.wm.set_enabled(h.id, true).unwrap();
    h.send(RawEvent::Delete);
    assert_eq!(h.take(), vec![Notification::Closed]);
}

#[test]
fn focus_on_disabled_window_reports_disabled() {
    let mut h = Harness::new();
    h.wm.set_enabled(h.id, false).unwrap();
    h.send(RawEvent::Focus { focus_in: true });
    h.send(RawEvent::Focus { focus_in: false });
    assert_eq!(
        h.take(),
        vec![
            Notification::Focus(FocusEvent::Disabled),
            Notification::Focus(FocusEvent::Lost),
        ]
    );
}

#[test]
fn ctrl_letters_type_control_characters() {
    let mut h = Harness::new();
    h.send(key(true, u32::from('a'), RawState::CONTROL));
    h.send(key(true, u32::from('z'), RawState::CONTROL));
    assert_eq!(typed_chars(&h.take()), vec!["\u{1}", "\u{1a}"]);
}

#[test]
fn unprintable_key_has_no_typed_event() {
    let mut h = Harness::new();
    // F1
    h.send(key(true, 0xffbe, RawState::empty()));
    h.send(key(false, 0xffbe, RawState::empty()));
    let notes = h.take();
    assert_eq!(notes.len(), 2);
    let kinds: Vec<KeyKind> = notes
        .iter()
        .filter_map(|n| match n {
            Notification::Key(k) => Some(k.kind),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec![KeyKind::Press, KeyKind::Release]);
    assert!(typed_chars(&notes).is_empty());
}

#[test]
fn modifier_key_press_includes_itself() {
    let mut h = Harness::new();
    // Shift_L
    h.send(key(true, 0xffe1, RawState::empty()));
    h.send(key(false, 0xffe1, RawState::SHIFT));
    let notes = h.take();
    let Notification::Key(down) = &notes[0] else {
        panic!("expected key press");
    };
    let Notification::Key(up) = &notes[1] else {
        panic!("expected key release");
    };
    assert_eq!(down.key_code, KeyCode::SHIFT);
    assert!(down.modifiers.contains(Modifiers::SHIFT));
    assert!(!up.modifiers.contains(Modifiers::SHIFT));
}

#[test]
fn right_press_requests_context_menu() {
    let mut h = Harness::new();
    h.send(RawEvent::ButtonPress(ButtonEvent {
        button: 3,
        pos: PointerPos::new(12.7, 8.2, 112.0, 108.0),
        state: RawState::empty(),
    }));
    let notes = h.take();
    let Notification::Mouse(down) = notes[0] else {
        panic!("expected mouse down");
    };
    assert_eq!(down.kind, MouseKind::Down);
    assert_eq!(down.button, MouseButton::Right);
    assert!(down.is_popup_trigger);
    assert!(down.modifiers.contains(Modifiers::BUTTON_SECONDARY));
    assert_eq!(
        notes[1],
        Notification::Menu(MenuRequest {
            x: 12,
            y: 8,
            root_x: 112,
            root_y: 108,
            is_keyboard: false,
        })
    );
}

#[test]
fn release_reports_state_after_event() {
    let mut h = Harness::new();
    h.send(RawEvent::ButtonRelease(ButtonEvent {
        button: 1,
        pos: PointerPos::default(),
        state: RawState::BUTTON1 | RawState::SHIFT,
    }));
    let notes = h.take();
    let Notification::Mouse(up) = notes[0] else {
        panic!("expected mouse up");
    };
    assert_eq!(up.kind, MouseKind::Up);
    assert_eq!(up.modifiers, Modifiers::SHIFT);
    assert!(!up.is_popup_trigger);
}

#[test]
fn unmapped_buttons_are_not_reported() {
    let mut h = Harness::new();
    h.send(RawEvent::ButtonPress(ButtonEvent {
        button: 6,
        pos: PointerPos::default(),
        state: RawState::empty(),
    }));
    assert!(h.take().is_empty());
}

#[test]
fn scroll_is_normalized_with_line_size() {
    let mut h = Harness::new();
    h.send(RawEvent::Scroll(ScrollEvent {
        direction: ScrollDirection::Up,
        pos: PointerPos::new(1.0, 2.0, 3.0, 4.0),
        state: RawState::SHIFT,
    }));
    let notes = h.take();
    let Notification::Scroll(scroll) = notes[0] else {
        panic!("expected scroll");
    };
    assert_eq!((scroll.dx, scroll.dy), (1.0, 0.0));
    assert_eq!((scroll.line_size_x, scroll.line_size_y), (40.0, 40.0));
    assert_eq!((scroll.x, scroll.root_y), (1, 4));
}

#[test]
fn crossing_is_reported_on_change_only() {
    let mut h = Harness::new();
    let crossing = |enter| {
        RawEvent::Crossing(CrossingEvent {
            enter,
            pos: PointerPos::default(),
            state: RawState::BUTTON1,
        })
    };
    h.send(crossing(true));
    h.send(crossing(true));
    h.send(crossing(false));
    let notes = h.take();
    assert_eq!(notes.len(), 2);
    let Notification::Mouse(enter) = notes[0] else {
        panic!("expected enter");
    };
    assert_eq!(enter.kind, MouseKind::Enter);
    assert_eq!(enter.modifiers, Modifiers::empty());
    let Notification::Mouse(exit) = notes[1] else {
        panic!("expected exit");
    };
    assert_eq!(exit.modifiers, Modifiers::BUTTON_PRIMARY);
}

#[test]
fn hide_sends_exit_when_pointer_inside() {
    let mut h = Harness::new();
    h.send(RawEvent::Crossing(CrossingEvent {
        enter: true,
        pos: PointerPos::default(),
        state: RawState::empty(),
    }));
    h.take();
    h.wm.set_visible(h.id, false).unwrap();
    let notes = h.take();
    assert!(
        matches!(notes.as_slice(), [Notification::Mouse(m)] if m.kind == MouseKind::Exit && !m.is_synthesized)
    );
    assert!(!h.wm.context(h.id).unwrap().flags().mouse_entered());
}

#[test]
fn replacing_view_sends_exit_to_old_view() {
    let mut h = Harness::new();
    h.wm.set_view(h.id, None).unwrap();
    let entries: Vec<_> = h.log.borrow().clone();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "v");
    assert!(matches!(&entries[0].1, Notification::Mouse(m) if m.kind == MouseKind::Exit));
    assert!(!h.wm.context(h.id).unwrap().has_view_peer());
}

#[test]
fn show_applies_default_size_and_gains_focus() {
    let mut h = Harness::new();
    h.wm.set_visible(h.id, true).unwrap();
    assert_eq!(
        h.take(),
        vec![
            Notification::Resized(ResizeKind::Resize, 320, 200),
            Notification::Focus(FocusEvent::Gained),
        ]
    );
    assert!(h.wm.is_visible(h.id));
    assert_eq!(
        h.wm.platform().surface(h.id).unwrap().default_size,
        Some((320, 200))
    );
}

#[test]
fn show_keeps_requested_size() {
    let mut h = Harness::new();
    h.wm.set_bounds(h.id, Bounds::size(640, 480)).unwrap();
    h.take();
    h.wm.set_visible(h.id, true).unwrap();
    assert_eq!(h.take(), vec![Notification::Focus(FocusEvent::Gained)]);
    assert_eq!(h.wm.platform().window_size(h.id), (640, 480));
}

#[test]
fn bounds_after_realize_resize_the_surface() {
    let mut h = Harness::new();
    h.send(RawEvent::Realize);
    h.wm.platform_mut().take_calls();
    h.wm.set_bounds(h.id, Bounds::size(500, 400).at(30, 40))
        .unwrap();
    let calls = h.wm.platform_mut().take_calls();
    assert!(calls.contains(&PlatformCall::Resize(h.id, 500, 400)));
    assert!(calls.contains(&PlatformCall::Move(h.id, 30, 40)));
    // the configure event will report the new size
    assert!(h.take().is_empty());
}

#[test]
fn content_size_request_is_forwarded() {
    let mut h = Harness::new();
    h.wm.set_bounds(h.id, Bounds::content(200, 100)).unwrap();
    assert!(
        h.wm.platform()
            .calls()
            .contains(&PlatformCall::ContentSize(h.id, 200, 100))
    );
}

#[test]
fn size_limits_become_geometry_hints() {
    let mut h = Harness::new();
    h.wm.set_minimum_size(h.id, 0, -3).unwrap();
    h.wm.set_maximum_size(h.id, 0, 900).unwrap();
    assert_eq!(
        h.wm.platform().surface(h.id).unwrap().hints,
        Some(GeometryHints {
            min_width: 1,
            min_height: 1,
            max_width: UNBOUNDED,
            max_height: 900,
        })
    );
}

#[test]
fn non_resizable_window_is_frozen_at_view_size() {
    let mut h = Harness::new();
    h.wm.platform_mut().resize(h.id, 300, 250);
    h.wm.set_resizable(h.id, false).unwrap();
    let expected = GeometryHints {
        min_width: 300,
        min_height: 250,
        max_width: 300,
        max_height: 250,
    };
    assert_eq!(h.wm.platform().surface(h.id).unwrap().hints, Some(expected));

    h.wm.set_resizable(h.id, true).unwrap();
    h.wm.set_enabled(h.id, false).unwrap();
    assert_eq!(h.wm.platform().surface(h.id).unwrap().hints, Some(expected));
}

#[test]
fn paint_validates_buffer_and_masks_transparent_frames() {
    let mut h = Harness::with_frame(FrameType::Transparent);
    let pixels = vec![0xff00_00ff_u32; 6];
    assert!(matches!(
        h.wm.paint(h.id, &pixels, 4, 2),
        Err(WmError::PixelBufferTooSmall { required: 8, .. })
    ));
    h.wm.paint(h.id, &pixels, 3, 2).unwrap();
    let calls = h.wm.platform().calls();
    assert!(calls.contains(&PlatformCall::ShapeMask(h.id)));
    assert!(calls.contains(&PlatformCall::Paint(h.id, 3, 2)));

    let mut titled = Harness::new();
    titled.wm.paint(titled.id, &pixels, 3, 2).unwrap();
    assert!(
        !titled
            .wm
            .platform()
            .calls()
            .contains(&PlatformCall::ShapeMask(titled.id))
    );
}

#[test]
fn paint_event_requests_full_repaint() {
    let mut h = Harness::new();
    h.wm.platform_mut().resize(h.id, 320, 200);
    h.send(RawEvent::Paint);
    assert_eq!(h.take(), vec![Notification::Repaint(0, 0, 320, 200)]);
}

#[test]
fn title_only_applies_to_titled_frames() {
    let mut h = Harness::new();
    h.wm.set_title(h.id, "Inbox").unwrap();
    assert_eq!(h.wm.platform().surface(h.id).unwrap().title, "Inbox");

    let mut bare = Harness::with_frame(FrameType::Untitled);
    bare.wm.set_title(bare.id, "Inbox").unwrap();
    assert_eq!(bare.wm.platform().surface(bare.id).unwrap().title, "");
}

#[test]
fn request_focus_presents_only_visible_windows() {
    let mut h = Harness::new();
    h.wm.request_focus(h.id).unwrap();
    assert!(!h.wm.platform().calls().contains(&PlatformCall::Present(h.id)));
    h.wm.set_visible(h.id, true).unwrap();
    h.wm.request_focus(h.id).unwrap();
    assert!(h.wm.platform().calls().contains(&PlatformCall::Present(h.id)));
}
