//! Rendering API
//!
//! Device-level traits and handle types shared by the renderer, the shader
//! library and the backends.

pub mod gpu_device;

pub use gpu_device::{
    GpuDevice, GpuError, GpuResult, ProgramHandle, ScissorRect, TextureFormat, TextureHandle,
    UniformValue,
};
