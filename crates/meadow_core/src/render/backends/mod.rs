//! Backend implementations for the render module
//!
//! Currently only OpenGL (through GLFW) is supported.

/// OpenGL device and GLFW window
#[allow(unsafe_code)]
pub mod opengl;
