//! Input codes and polled input state
//!
//! Codes follow the GLFW numbering so native values travel through event
//! payloads unchanged.

/// Key code (GLFW key numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub i32);

impl KeyCode {
    /// Space bar
    pub const SPACE: Self = Self(32);
    /// A key
    pub const A: Self = Self(65);
    /// D key
    pub const D: Self = Self(68);
    /// F key
    pub const F: Self = Self(70);
    /// Q key
    pub const Q: Self = Self(81);
    /// R key
    pub const R: Self = Self(82);
    /// S key
    pub const S: Self = Self(83);
    /// W key
    pub const W: Self = Self(87);
    /// Escape key
    pub const ESCAPE: Self = Self(256);
    /// Enter key
    pub const ENTER: Self = Self(257);
    /// Tab key
    pub const TAB: Self = Self(258);
    /// Backspace key
    pub const BACKSPACE: Self = Self(259);
    /// F5 function key
    pub const F5: Self = Self(294);
    /// Left shift
    pub const LEFT_SHIFT: Self = Self(340);
    /// Left control
    pub const LEFT_CONTROL: Self = Self(341);
}

/// Mouse button code (GLFW button numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButton(pub i32);

impl MouseButton {
    /// Left mouse button
    pub const LEFT: Self = Self(0);
    /// Right mouse button
    pub const RIGHT: Self = Self(1);
    /// Middle mouse button
    pub const MIDDLE: Self = Self(2);
}

/// Native key/button action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Released
    Release,
    /// Pressed
    Press,
    /// Held and auto-repeated
    Repeat,
}

impl InputAction {
    /// Decode a GLFW action code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }

    /// GLFW action code
    pub fn code(self) -> i32 {
        match self {
            Self::Release => 0,
            Self::Press => 1,
            Self::Repeat => 2,
        }
    }
}

/// Polled keyboard and mouse state
///
/// Queried on demand by the UI frame loop rather than accumulated from
/// events. Cursor coordinates are relative to the window's client area.
pub trait InputSource {
    /// Current cursor position in window coordinates
    fn cursor_position(&self) -> (f64, f64);

    /// Whether `key` is currently held (pressed or repeating)
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Whether `button` is currently held
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;
}
