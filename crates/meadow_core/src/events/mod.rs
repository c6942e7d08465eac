//! Event system for native window input
//!
//! Key principles:
//! - Closed set of event kinds, one per native callback family
//! - Payload is a single-owner byte buffer, released when the event drops
//! - Handler returns bool (true = consumed, no further dispatch succeeds)
//! - Dispatch is first-match-commits: at most one handler claims an event

use std::fmt;

use bytemuck::Pod;

use crate::input::{InputAction, KeyCode, MouseButton};

/// Event kind identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Window close requested
    WindowClose,
    /// Window client area resized
    WindowResize,
    /// Window moved on screen
    WindowMove,
    /// Key went down
    KeyPressed,
    /// Key went up
    KeyReleased,
    /// Key held long enough to auto-repeat
    KeyRepeat,
    /// Unicode character typed
    KeyTyped,
    /// Mouse button went down
    MouseButtonPressed,
    /// Mouse button went up
    MouseButtonReleased,
    /// Mouse button repeat (reported by some platforms)
    MouseButtonRepeat,
    /// Cursor moved
    MouseMoved,
    /// Scroll wheel or touchpad scrolled
    MouseScrolled,
}

impl EventKind {
    /// Key event kind for a native key action
    pub fn for_key_action(action: InputAction) -> Self {
        match action {
            InputAction::Press => Self::KeyPressed,
            InputAction::Release => Self::KeyReleased,
            InputAction::Repeat => Self::KeyRepeat,
        }
    }

    /// Mouse button event kind for a native button action
    pub fn for_button_action(action: InputAction) -> Self {
        match action {
            InputAction::Press => Self::MouseButtonPressed,
            InputAction::Release => Self::MouseButtonReleased,
            InputAction::Repeat => Self::MouseButtonRepeat,
        }
    }
}

#[cfg(test)]
thread_local! {
    static LIVE_PAYLOADS: std::cell::Cell<isize> = const { std::cell::Cell::new(0) };
}

/// Number of payloads allocated on this thread that have not been released yet
#[cfg(test)]
pub(crate) fn live_payloads() -> isize {
    LIVE_PAYLOADS.with(std::cell::Cell::get)
}

/// Owned event payload bytes
///
/// Allocated by the callback bridge and released exactly once when the
/// owning [`Event`] is dropped. Fields are plain-old-data values laid out
/// back to back in native byte order.
pub struct EventPayload {
    bytes: Box<[u8]>,
}

impl EventPayload {
    /// Allocate a payload holding the given values
    pub fn from_values<T: Pod>(values: &[T]) -> Self {
        #[cfg(test)]
        LIVE_PAYLOADS.with(|live| live.set(live.get() + 1));

        Self {
            bytes: bytemuck::cast_slice::<T, u8>(values).into(),
        }
    }

    /// Payload size in bytes
    pub fn size(&self) -> u32 {
        self.bytes.len() as u32
    }

    /// Raw payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read the `index`-th value of type `T`
    ///
    /// Returns `None` when the payload is too short.
    pub fn read<T: Pod>(&self, index: usize) -> Option<T> {
        let width = std::mem::size_of::<T>();
        let start = index.checked_mul(width)?;
        let end = start.checked_add(width)?;
        self.bytes.get(start..end).map(bytemuck::pod_read_unaligned)
    }
}

impl Drop for EventPayload {
    fn drop(&mut self) {
        #[cfg(test)]
        LIVE_PAYLOADS.with(|live| live.set(live.get() - 1));
    }
}

impl fmt::Debug for EventPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPayload").field("size", &self.size()).finish()
    }
}

/// Decoded key event payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEventData {
    /// Platform-independent key code
    pub key: KeyCode,
    /// Platform scancode
    pub scancode: i32,
    /// Native action that produced the event
    pub action: InputAction,
}

/// Decoded mouse button event payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonData {
    /// Button code
    pub button: MouseButton,
    /// Native action that produced the event
    pub action: InputAction,
}

/// A window event with its payload and consumed flag
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    payload: Option<EventPayload>,
    consumed: bool,
}

impl Event {
    /// Create an open (unconsumed) event
    pub fn new(kind: EventKind, payload: Option<EventPayload>) -> Self {
        Self {
            kind,
            payload,
            consumed: false,
        }
    }

    /// Window close event (no payload)
    pub fn window_close() -> Self {
        Self::new(EventKind::WindowClose, None)
    }

    /// Window resize event carrying `[i32 width, i32 height]`
    pub fn window_resize(width: i32, height: i32) -> Self {
        Self::new(EventKind::WindowResize, Some(EventPayload::from_values(&[width, height])))
    }

    /// Window move event carrying `[i32 x, i32 y]`
    pub fn window_move(x: i32, y: i32) -> Self {
        Self::new(EventKind::WindowMove, Some(EventPayload::from_values(&[x, y])))
    }

    /// Key event carrying `[i32 key, i32 scancode, i32 action]`
    pub fn key(key: KeyCode, scancode: i32, action: InputAction) -> Self {
        Self::new(
            EventKind::for_key_action(action),
            Some(EventPayload::from_values(&[key.0, scancode, action.code()])),
        )
    }

    /// Character typed event carrying `[u32 codepoint]`
    pub fn key_typed(codepoint: u32) -> Self {
        Self::new(EventKind::KeyTyped, Some(EventPayload::from_values(&[codepoint])))
    }

    /// Mouse button event carrying `[i32 button, i32 action]`
    pub fn mouse_button(button: MouseButton, action: InputAction) -> Self {
        Self::new(
            EventKind::for_button_action(action),
            Some(EventPayload::from_values(&[button.0, action.code()])),
        )
    }

    /// Cursor moved event carrying `[f64 x, f64 y]`
    pub fn mouse_moved(x: f64, y: f64) -> Self {
        Self::new(EventKind::MouseMoved, Some(EventPayload::from_values(&[x, y])))
    }

    /// Scroll event carrying `[f64 dx, f64 dy]`
    pub fn mouse_scrolled(dx: f64, dy: f64) -> Self {
        Self::new(EventKind::MouseScrolled, Some(EventPayload::from_values(&[dx, dy])))
    }

    /// Event kind
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Payload, if the kind carries one
    pub fn payload(&self) -> Option<&EventPayload> {
        self.payload.as_ref()
    }

    /// Payload size in bytes (0 when there is no payload)
    pub fn payload_size(&self) -> u32 {
        self.payload.as_ref().map_or(0, EventPayload::size)
    }

    /// Whether a handler already claimed this event
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn read<T: Pod>(&self, index: usize) -> Option<T> {
        self.payload.as_ref()?.read(index)
    }

    /// `(width, height)` of a resize event
    pub fn window_size(&self) -> Option<(i32, i32)> {
        if self.kind != EventKind::WindowResize {
            return None;
        }
        Some((self.read(0)?, self.read(1)?))
    }

    /// `(x, y)` of a move event
    pub fn window_position(&self) -> Option<(i32, i32)> {
        if self.kind != EventKind::WindowMove {
            return None;
        }
        Some((self.read(0)?, self.read(1)?))
    }

    /// Key data of a pressed/released/repeat event
    pub fn key_data(&self) -> Option<KeyEventData> {
        if !matches!(
            self.kind,
            EventKind::KeyPressed | EventKind::KeyReleased | EventKind::KeyRepeat
        ) {
            return None;
        }
        Some(KeyEventData {
            key: KeyCode(self.read(0)?),
            scancode: self.read(1)?,
            action: InputAction::from_code(self.read(2)?)?,
        })
    }

    /// Codepoint of a typed event
    pub fn codepoint(&self) -> Option<u32> {
        if self.kind != EventKind::KeyTyped {
            return None;
        }
        self.read(0)
    }

    /// Button data of a mouse button event
    pub fn mouse_button_data(&self) -> Option<MouseButtonData> {
        if !matches!(
            self.kind,
            EventKind::MouseButtonPressed
                | EventKind::MouseButtonReleased
                | EventKind::MouseButtonRepeat
        ) {
            return None;
        }
        Some(MouseButtonData {
            button: MouseButton(self.read(0)?),
            action: InputAction::from_code(self.read(1)?)?,
        })
    }

    /// `(x, y)` of a cursor moved event
    pub fn cursor_position(&self) -> Option<(f64, f64)> {
        if self.kind != EventKind::MouseMoved {
            return None;
        }
        Some((self.read(0)?, self.read(1)?))
    }

    /// `(dx, dy)` of a scroll event
    pub fn scroll_offset(&self) -> Option<(f64, f64)> {
        if self.kind != EventKind::MouseScrolled {
            return None;
        }
        Some((self.read(0)?, self.read(1)?))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EventKind::WindowClose => write!(f, "Window Close"),
            EventKind::WindowResize => match self.window_size() {
                Some((w, h)) => write!(f, "Window Resize to {w}x{h}"),
                None => write!(f, "Window Resize"),
            },
            EventKind::WindowMove => match self.window_position() {
                Some((x, y)) => write!(f, "Window Move to x:{x}, y:{y}"),
                None => write!(f, "Window Move"),
            },
            EventKind::KeyPressed | EventKind::KeyReleased | EventKind::KeyRepeat => {
                match self.key_data() {
                    Some(data) => write!(
                        f,
                        "{:?} {} (scancode: {})",
                        self.kind, data.key.0, data.scancode
                    ),
                    None => write!(f, "{:?}", self.kind),
                }
            }
            EventKind::KeyTyped => match self.codepoint() {
                Some(codepoint) => write!(f, "Key Typed {codepoint}"),
                None => write!(f, "Key Typed"),
            },
            EventKind::MouseButtonPressed
            | EventKind::MouseButtonReleased
            | EventKind::MouseButtonRepeat => match self.mouse_button_data() {
                Some(data) => write!(f, "{:?} {}", self.kind, data.button.0),
                None => write!(f, "{:?}", self.kind),
            },
            EventKind::MouseMoved => match self.cursor_position() {
                Some((x, y)) => write!(f, "Mouse Moved to x:{x:.2}, y:{y:.2}"),
                None => write!(f, "Mouse Moved"),
            },
            EventKind::MouseScrolled => match self.scroll_offset() {
                Some((dx, dy)) => write!(f, "Mouse Scrolled by {dx:.2},{dy:.2}"),
                None => write!(f, "Mouse Scrolled"),
            },
        }
    }
}

/// Dispatch `event` to `handler` if it is still open and of kind `wanted`
///
/// Returns true only when the handler ran and claimed the event, in which
/// case the event is marked consumed and every later dispatch is a no-op.
pub fn dispatch<F>(wanted: EventKind, event: &mut Event, handler: F) -> bool
where
    F: FnOnce(&Event) -> bool,
{
    if event.consumed || event.kind != wanted {
        return false;
    }

    if handler(&*event) {
        event.consumed = true;
        true
    } else {
        false
    }
}

/// The single receiver of bridge-produced events
pub type EventSink = Box<dyn FnMut(Event)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_invokes_handler_once_after_success() {
        let mut event = Event::window_close();
        let mut calls = 0;

        assert!(dispatch(EventKind::WindowClose, &mut event, |_| {
            calls += 1;
            true
        }));
        assert!(!dispatch(EventKind::WindowClose, &mut event, |_| {
            calls += 1;
            true
        }));

        assert_eq!(calls, 1);
        assert!(event.is_consumed());
    }

    #[test]
    fn test_dispatch_kind_mismatch_skips_handler() {
        let mut event = Event::window_resize(640, 480);
        let mut called = false;

        assert!(!dispatch(EventKind::WindowMove, &mut event, |_| {
            called = true;
            true
        }));
        assert!(!called);
        assert!(!event.is_consumed());
    }

    #[test]
    fn test_declined_event_stays_open_for_other_handlers() {
        let mut event = Event::key(KeyCode::D, 32, InputAction::Press);

        assert!(!dispatch(EventKind::KeyPressed, &mut event, |_| false));
        assert!(!event.is_consumed());
        assert!(dispatch(EventKind::KeyPressed, &mut event, |e| {
            e.key_data().map(|d| d.key) == Some(KeyCode::D)
        }));
        assert!(event.is_consumed());
    }

    #[test]
    fn test_payload_layouts() {
        let resize = Event::window_resize(1280, 720);
        assert_eq!(resize.payload_size(), 8);
        assert_eq!(resize.window_size(), Some((1280, 720)));

        let key = Event::key(KeyCode::R, 19, InputAction::Repeat);
        assert_eq!(key.kind(), EventKind::KeyRepeat);
        assert_eq!(key.payload_size(), 12);
        assert_eq!(key.key_data().map(|d| d.scancode), Some(19));

        let typed = Event::key_typed('é' as u32);
        assert_eq!(typed.payload_size(), 4);
        assert_eq!(typed.codepoint(), Some(0xE9));

        let button = Event::mouse_button(MouseButton::RIGHT, InputAction::Release);
        assert_eq!(button.kind(), EventKind::MouseButtonReleased);
        assert_eq!(button.payload_size(), 8);

        let moved = Event::mouse_moved(10.5, -3.25);
        assert_eq!(moved.payload_size(), 16);
        assert_eq!(moved.cursor_position(), Some((10.5, -3.25)));

        let close = Event::window_close();
        assert_eq!(close.payload_size(), 0);
        assert!(close.payload().is_none());
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let scroll = Event::mouse_scrolled(0.0, 1.0);
        assert!(scroll.cursor_position().is_none());
        assert!(scroll.window_size().is_none());
        assert_eq!(scroll.scroll_offset(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_unclaimed_event_releases_payload_on_drop() {
        let before = live_payloads();
        {
            let mut event = Event::mouse_scrolled(1.0, 2.0);
            assert_eq!(live_payloads(), before + 1);
            assert!(!dispatch(EventKind::KeyPressed, &mut event, |_| true));
            assert!(!dispatch(EventKind::WindowResize, &mut event, |_| true));
        }
        assert_eq!(live_payloads(), before);
    }

    #[test]
    fn test_display_describes_event() {
        assert_eq!(Event::window_resize(800, 600).to_string(), "Window Resize to 800x600");
        assert_eq!(Event::window_close().to_string(), "Window Close");
    }
}
