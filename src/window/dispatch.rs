//! Routing of raw platform events into peer notifications.

use super::{WindowId, WindowManager};
use crate::drivers::Platform;
use crate::error::WmError;
use crate::events::{
    ButtonEvent, Configure, CrossingEvent, KeyEvent, MotionEvent, PointerPos, RawEvent,
    ScrollEvent, StateMask, WindowStateEvent,
};
use crate::input::mouse::{release_ends_gesture, state_after};
use crate::input::{Modifiers, MouseButton, RawState, normalize_key, scroll_delta};
use crate::peer::{
    FocusEvent, KeyNotification, MenuRequest, MouseKind, MouseNotification, ResizeKind,
    ScrollNotification, StateChange,
};

const RIGHT_BUTTON: u32 = 3;

impl<P: Platform> WindowManager<P> {
    /// Delivers one platform event to `id`.
    ///
    /// The window is held by an event guard for the whole call, including
    /// any commands its peers queue, so destroying it from a handler only
    /// takes effect once this returns.
    pub fn dispatch(&mut self, id: WindowId, event: RawEvent) -> Result<(), WmError> {
        tracing::trace!(window_id = ?id, event = event.name(), "dispatch");
        self.with_event_guard(id, |wm| {
            match event {
                RawEvent::Realize => wm.process_realize(id),
                RawEvent::ButtonPress(ev) => wm.process_mouse_button(id, ev, true),
                RawEvent::ButtonRelease(ev) => wm.process_mouse_button(id, ev, false),
                RawEvent::Motion(ev) => wm.process_mouse_motion(id, ev),
                RawEvent::Scroll(ev) => wm.process_mouse_scroll(id, ev),
                RawEvent::Crossing(ev) => wm.process_mouse_cross(id, ev),
                RawEvent::Key(ev) => wm.process_key(id, ev),
                RawEvent::Focus { focus_in } => wm.process_focus(id, focus_in),
                RawEvent::WindowState(ev) => wm.process_state(id, ev),
                RawEvent::ConfigureView { width, height } => {
                    wm.process_configure_view(id, width, height)
                }
                RawEvent::ConfigureWindow(ev) => wm.process_configure_window(id, ev),
                RawEvent::Paint => wm.process_paint(id),
                RawEvent::Delete => wm.process_delete(id),
                RawEvent::Destroy => wm.process_destroy(id),
            }
            wm.run_commands();
        })
    }

    fn process_realize(&mut self, id: WindowId) {
        if let Some(ctx) = self.windows.get_mut(id) {
            ctx.flags.set_realized();
            tracing::debug!(window_id = ?id, "realized window");
        }
    }

    fn process_focus(&mut self, id: WindowId, focus_in: bool) {
        if !focus_in && self.grab.grab_window() == Some(id) {
            self.release_focus_grab(id);
        }
        let Some(ctx) = self.windows.get(id) else {
            return;
        };
        let event = match (focus_in, ctx.flags.enabled()) {
            (false, _) => FocusEvent::Lost,
            (true, true) => FocusEvent::Gained,
            (true, false) => FocusEvent::Disabled,
        };
        self.notify_window(id, "notify_focus", |peer| peer.notify_focus(event));
    }

    fn process_delete(&mut self, id: WindowId) {
        let enabled = self.windows.get(id).is_some_and(|ctx| ctx.flags.enabled());
        if !enabled {
            tracing::debug!(window_id = ?id, "close request ignored on disabled window");
            return;
        }
        self.notify_window(id, "notify_close", |peer| peer.notify_close());
    }

    fn process_paint(&mut self, id: WindowId) {
        let (width, height) = self.platform.window_size(id);
        self.notify_view(id, "notify_repaint", |peer| {
            peer.notify_repaint(0, 0, width, height)
        });
    }

    fn process_mouse_button(&mut self, id: WindowId, ev: ButtonEvent, press: bool) {
        let state = state_after(ev.state, ev.button, press);

        if press && self.platform.press_outside_grab() {
            tracing::trace!(window_id = ?id, "press outside grab");
            self.release_focus_grab(id);
            return;
        }

        if !press && release_ends_gesture(ev.state, state, ev.button) {
            self.ungrab_mouse_drag_focus();
        }

        let button = MouseButton::from_platform(ev.button);
        if button == MouseButton::None {
            return;
        }
        let popup_trigger = press && ev.button == RIGHT_BUTTON;
        let mut notification = mouse_notification(
            if press { MouseKind::Down } else { MouseKind::Up },
            button,
            ev.pos,
            Modifiers::from_raw(state),
        );
        notification.is_popup_trigger = popup_trigger;
        self.notify_view(id, "notify_mouse", |peer| peer.notify_mouse(notification));

        if popup_trigger {
            let request = MenuRequest {
                x: notification.x,
                y: notification.y,
                root_x: notification.root_x,
                root_y: notification.root_y,
                is_keyboard: false,
            };
            self.notify_view(id, "notify_menu", |peer| peer.notify_menu(request));
        }
    }

    fn process_mouse_motion(&mut self, id: WindowId, ev: MotionEvent) {
        let modifiers = Modifiers::from_raw(ev.state);
        let drag = modifiers.is_drag();
        // grab before reporting so the first drag event is already routed
        if drag
            && self.grab.drag_window().is_none()
            && let Err(err) = self.grab_mouse_drag_focus(id)
        {
            tracing::debug!(window_id = ?id, error = %err, "no drag grab");
        }
        let kind = if drag { MouseKind::Drag } else { MouseKind::Move };
        let notification = mouse_notification(
            kind,
            MouseButton::from_drag_state(modifiers),
            ev.pos,
            modifiers,
        );
        self.notify_view(id, "notify_mouse", |peer| peer.notify_mouse(notification));
    }

    fn process_mouse_scroll(&mut self, id: WindowId, ev: ScrollEvent) {
        let (dx, dy) = scroll_delta(ev.direction, ev.state);
        let line = self.config.scroll_line_size;
        let notification = ScrollNotification {
            x: ev.pos.x as i32,
            y: ev.pos.y as i32,
            root_x: ev.pos.root_x as i32,
            root_y: ev.pos.root_y as i32,
            dx,
            dy,
            modifiers: Modifiers::from_raw(ev.state),
            line_size_x: line,
            line_size_y: line,
        };
        self.notify_view(id, "notify_scroll", |peer| peer.notify_scroll(notification));
    }

    fn process_mouse_cross(&mut self, id: WindowId, ev: CrossingEvent) {
        let Some(ctx) = self.windows.get_mut(id) else {
            return;
        };
        if ctx.view_peer.is_none() || !ctx.flags.set_mouse_entered(ev.enter) {
            return;
        }
        let mut state = ev.state;
        // some platforms still report the button that was pressed elsewhere
        if ev.enter {
            state -= RawState::MOUSE_BUTTONS;
        }
        let kind = if ev.enter { MouseKind::Enter } else { MouseKind::Exit };
        let notification =
            mouse_notification(kind, MouseButton::None, ev.pos, Modifiers::from_raw(state));
        self.notify_view(id, "notify_mouse", |peer| peer.notify_mouse(notification));
    }

    fn process_key(&mut self, id: WindowId, ev: KeyEvent) {
        let key = normalize_key(ev.keysym, ev.state, ev.press);
        let typed = key.typed();
        let notification = KeyNotification {
            kind: key.kind,
            key_code: key.key_code,
            chars: key.chars,
            modifiers: key.modifiers,
        };
        self.notify_view(id, "notify_key", |peer| peer.notify_key(notification));
        if let Some(typed) = typed {
            let notification = KeyNotification {
                kind: typed.kind,
                key_code: typed.key_code,
                chars: typed.chars,
                modifiers: typed.modifiers,
            };
            self.notify_view(id, "notify_key", |peer| peer.notify_key(notification));
        }
    }

    fn process_state(&mut self, id: WindowId, ev: WindowStateEvent) {
        let Some(ctx) = self.windows.get_mut(id) else {
            return;
        };
        let size_state = StateMask::ICONIFIED | StateMask::MAXIMIZED;
        if ev.changed.intersects(size_state) {
            if ev.changed.contains(StateMask::ICONIFIED) {
                ctx.flags
                    .set_iconified(ev.new_state.contains(StateMask::ICONIFIED));
            }
            if ev.changed.contains(StateMask::MAXIMIZED) {
                ctx.flags
                    .set_maximized(ev.new_state.contains(StateMask::MAXIMIZED));
            }
            let change = if ctx.flags.iconified() {
                StateChange::Minimize
            } else if ctx.flags.maximized() {
                StateChange::Maximize
            } else {
                StateChange::Restore
            };
            self.notify_state(id, change);
        } else if ev.changed.contains(StateMask::ABOVE) {
            self.notify_on_top(id, ev.new_state.contains(StateMask::ABOVE));
        }

        if ev.changed.contains(StateMask::FULLSCREEN)
            && let Some(ctx) = self.windows.get_mut(id)
        {
            ctx.flags
                .set_fullscreen(ev.new_state.contains(StateMask::FULLSCREEN));
        }
    }

    /// Reports a state change. A restore is always followed by a full
    /// repaint, and a restore that leaves the window maximized is reported
    /// as a maximize.
    fn notify_state(&mut self, id: WindowId, mut change: StateChange) {
        if change == StateChange::Restore {
            if self.windows.get(id).is_some_and(|ctx| ctx.flags.maximized()) {
                change = StateChange::Maximize;
            }
            let (width, height) = self.platform.window_size(id);
            self.notify_view(id, "notify_repaint", |peer| {
                peer.notify_repaint(0, 0, width, height)
            });
        }
        tracing::debug!(window_id = ?id, ?change, "window state changed");
        self.notify_window(id, "notify_state_changed", |peer| {
            peer.notify_state_changed(change)
        });
    }

    fn process_configure_view(&mut self, id: WindowId, width: i32, height: i32) {
        if let Some(ctx) = self.windows.get_mut(id) {
            ctx.geometry.view_width = width;
            ctx.geometry.view_height = height;
        }
        tracing::trace!(window_id = ?id, width, height, "configure view");
        self.notify_view(id, "notify_resize", |peer| peer.notify_resize(width, height));
    }

    fn process_configure_window(&mut self, id: WindowId, ev: Configure) {
        let Some(ctx) = self.windows.get_mut(id) else {
            return;
        };
        ctx.geometry.x = ev.x;
        ctx.geometry.y = ev.y;
        ctx.geometry.width = ev.width;
        ctx.geometry.height = ev.height;
        let iconified = ctx.flags.iconified();
        let kind = if ctx.flags.maximized() {
            ResizeKind::Maximize
        } else {
            ResizeKind::Resize
        };
        tracing::trace!(window_id = ?id, ?ev, "configure window");

        // an iconified window must not be told to resize, the peer would
        // take it as a return to the normal state
        if !iconified {
            self.notify_window(id, "notify_resize", |peer| {
                peer.notify_resize(kind, ev.width, ev.height)
            });
        }
        self.notify_window(id, "notify_move", |peer| peer.notify_move(ev.x, ev.y));
        self.notify_view(id, "notify_moved", |peer| peer.notify_moved());

        let Some(to_screen) = self.platform.screen_at(ev.x, ev.y) else {
            return;
        };
        let Some(ctx) = self.windows.get_mut(id) else {
            return;
        };
        if ctx.screen != to_screen {
            ctx.screen = to_screen;
            tracing::debug!(window_id = ?id, screen = ?to_screen, "window moved to another screen");
            self.notify_window(id, "notify_move_to_screen", |peer| {
                peer.notify_move_to_screen(to_screen)
            });
        }
    }
}

fn mouse_notification(
    kind: MouseKind,
    button: MouseButton,
    pos: PointerPos,
    modifiers: Modifiers,
) -> MouseNotification {
    MouseNotification {
        kind,
        button,
        x: pos.x as i32,
        y: pos.y as i32,
        root_x: pos.root_x as i32,
        root_y: pos.root_y as i32,
        modifiers,
        is_popup_trigger: false,
        is_synthesized: false,
    }
}
