//! OpenGL backend
//!
//! [`GlfwWindow`] owns the native window and its GL context; [`GlDevice`]
//! issues GL calls against that context once its function pointers are
//! loaded through the window.

pub mod device;
pub mod window;

pub use device::GlDevice;
pub use window::GlfwWindow;
