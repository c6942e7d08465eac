//! Window management subsystem
//!
//! The window subsystem is layered so UI and renderer code never touch the
//! native windowing library directly:
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │  Application / UIManager        │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ WindowBackend   │ ← Collaborator trait (backend.rs)
//!      │ + InputSource   │
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ opengl::GlfwWindow    │ ← Concrete backend (backends/opengl/window.rs)
//!   └───────────┬───────────┘
//!               │ Forwards native callbacks to
//!      ┌────────▼────────┐
//!      │ CallbackBridge  │ ← Native callback → Event (bridge.rs)
//!      └─────────────────┘
//! ```

pub mod backend;
pub mod bridge;
pub mod state;

pub use backend::WindowBackend;
pub use bridge::CallbackBridge;
pub use state::WindowState;

use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialized
    #[error("Windowing library initialization failed: {0}")]
    InitializationFailed(String),

    /// The native window or its GL context could not be created
    #[error("Window creation failed: {title} ({width}x{height})")]
    CreationFailed {
        /// Requested title
        title: String,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;
