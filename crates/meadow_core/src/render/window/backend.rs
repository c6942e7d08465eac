//! Backend-agnostic window management trait
//!
//! This module defines the trait that all window backends implement. The
//! application loop and the UI frame engine only ever see this trait, so tests
//! can drive them with a scripted window.

use super::state::WindowState;
use crate::events::EventSink;
use crate::input::InputSource;

/// Window backend interface
///
/// Every backend is also an [`InputSource`]: the UI polls cursor and button
/// state from the same object that owns the native window.
///
/// # Thread Safety
/// Not `Send`. GLFW requires window operations on the main thread and the
/// whole runtime runs on one logical thread per frame.
pub trait WindowBackend: InputSource {
    /// Current client area size in pixels
    fn size(&self) -> (u32, u32);

    /// Current window position on screen
    ///
    /// Returns the position of the window's top-left corner in screen
    /// coordinates.
    fn position(&self) -> (i32, i32);

    /// Move the window so its top-left corner is at `(x, y)`
    fn set_position(&mut self, x: i32, y: i32);

    /// Move the window relative to its current position
    fn move_window(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.position();
        self.set_position(x + dx, y + dy);
    }

    /// Iconify the window
    fn minimize(&mut self);

    /// Maximize the window, or restore it if already maximized
    fn toggle_maximize(&mut self);

    /// Present the back buffer and deliver pending native events
    ///
    /// Every native callback received during the pump reaches the registered
    /// sink before this returns.
    fn pump_events_and_swap_buffers(&mut self);

    /// Register the sink receiving converted events
    ///
    /// Only one sink exists at a time; registering replaces the previous one.
    fn set_event_sink(&mut self, sink: EventSink);

    /// Last known window state
    fn state(&self) -> &WindowState;
}
