//! Window state shared with the UI and renderer

/// Last known window geometry
///
/// Written only by the [`CallbackBridge`](super::CallbackBridge) when native
/// resize/move callbacks arrive; read by the UI and renderer during the frame
/// after the event pump has drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Top-left corner in screen coordinates
    pub position: (i32, i32),
}

impl WindowState {
    /// Create state for a freshly created window
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            position: (0, 0),
        }
    }

    /// `(width, height)` as floats, for layout and projection math
    pub fn size_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}
