use std::collections::VecDeque;

use crate::drivers::Platform;
use crate::events::RawEvent;
use crate::window::{WindowId, WindowManager};

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Supplies platform events, each addressed to one window.
pub trait EventSource {
    fn next_event(&mut self) -> Option<(WindowId, RawEvent)>;
}

impl EventSource for VecDeque<(WindowId, RawEvent)> {
    fn next_event(&mut self) -> Option<(WindowId, RawEvent)> {
        self.pop_front()
    }
}

impl<T: EventSource + ?Sized> EventSource for &mut T {
    fn next_event(&mut self) -> Option<(WindowId, RawEvent)> {
        (**self).next_event()
    }
}

/// Pumps events from a source into a [`WindowManager`] on the calling
/// thread.
///
/// Each event is dispatched to its window first; the handler then sees the
/// manager and the event and decides whether to keep going. Events for
/// windows that are gone are logged and dropped.
pub struct EventLoop<S> {
    source: S,
}

impl<S: EventSource> EventLoop<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&mut self) -> &mut S {
        &mut self.source
    }

    /// Runs until the source is exhausted or the handler asks to quit.
    /// Returns the number of events dispatched.
    pub fn run<P, F>(&mut self, wm: &mut WindowManager<P>, mut handler: F) -> usize
    where
        P: Platform,
        F: FnMut(&mut WindowManager<P>, WindowId, &RawEvent) -> ControlFlow,
    {
        let mut dispatched = 0;
        while let Some((id, event)) = self.source.next_event() {
            match wm.dispatch(id, event.clone()) {
                Ok(()) => dispatched += 1,
                Err(err) => {
                    tracing::debug!(window_id = ?id, event = event.name(), error = %err, "event dropped");
                }
            }
            if let ControlFlow::Quit = handler(wm, id, &event) {
                break;
            }
        }
        dispatched
    }
}
