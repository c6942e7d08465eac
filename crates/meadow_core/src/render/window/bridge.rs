//! Native callback to [`Event`] translation
//!
//! Each native callback produces exactly one event with a freshly allocated
//! payload and hands it to the registered sink. The bridge keeps nothing
//! after the sink returns.

use super::state::WindowState;
use crate::events::{Event, EventSink};
use crate::input::{InputAction, KeyCode, MouseButton};

/// Converts native window callbacks into typed events
pub struct CallbackBridge {
    state: WindowState,
    sink: Option<EventSink>,
}

impl CallbackBridge {
    /// Create a bridge with no sink registered
    pub fn new(state: WindowState) -> Self {
        Self { state, sink: None }
    }

    /// Register the event sink
    ///
    /// Replaces any previously registered sink.
    pub fn set_event_sink(&mut self, sink: EventSink) {
        if self.sink.is_some() {
            log::debug!("Replacing window event sink");
        }
        self.sink = Some(sink);
    }

    /// Current window state
    pub fn state(&self) -> &WindowState {
        &self.state
    }

    fn emit(&mut self, event: Event) {
        match self.sink.as_mut() {
            Some(sink) => sink(event),
            None => log::trace!("No event sink registered, dropping: {event}"),
        }
    }

    /// Native resize callback
    pub fn on_resize(&mut self, width: i32, height: i32) {
        self.state.width = u32::try_from(width).unwrap_or(0);
        self.state.height = u32::try_from(height).unwrap_or(0);
        self.emit(Event::window_resize(width, height));
    }

    /// Native move callback
    pub fn on_move(&mut self, x: i32, y: i32) {
        self.state.position = (x, y);
        self.emit(Event::window_move(x, y));
    }

    /// Native close callback
    pub fn on_close(&mut self) {
        self.emit(Event::window_close());
    }

    /// Native key callback
    pub fn on_key(&mut self, key: i32, scancode: i32, action: i32) {
        let Some(action) = InputAction::from_code(action) else {
            log::warn!("Ignoring key {key} with unknown action code {action}");
            return;
        };
        self.emit(Event::key(KeyCode(key), scancode, action));
    }

    /// Native character callback
    pub fn on_char(&mut self, codepoint: u32) {
        self.emit(Event::key_typed(codepoint));
    }

    /// Native mouse button callback
    pub fn on_mouse_button(&mut self, button: i32, action: i32) {
        let Some(action) = InputAction::from_code(action) else {
            log::warn!("Ignoring mouse button {button} with unknown action code {action}");
            return;
        };
        self.emit(Event::mouse_button(MouseButton(button), action));
    }

    /// Native cursor position callback
    pub fn on_cursor_move(&mut self, x: f64, y: f64) {
        self.emit(Event::mouse_moved(x, y));
    }

    /// Native scroll callback
    pub fn on_scroll(&mut self, dx: f64, dy: f64) {
        self.emit(Event::mouse_scrolled(dx, dy));
    }
}
