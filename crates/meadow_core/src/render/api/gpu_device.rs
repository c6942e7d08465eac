//! GPU device abstraction
//!
//! The command interpreter and shader library talk to the GPU only through
//! [`GpuDevice`]. The production implementation is the OpenGL device in
//! `render::backends::opengl`; tests use a recording double.

use thiserror::Error;

/// GPU device errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// A shader stage failed to compile
    #[error("{stage} shader compilation failed: {log}")]
    CompileFailed {
        /// Stage name ("vertex" or "fragment")
        stage: &'static str,
        /// Driver info log
        log: String,
    },

    /// Program linking failed
    #[error("Program link failed: {0}")]
    LinkFailed(String),

    /// Texture creation failed
    #[error("Texture creation failed: {0}")]
    TextureCreationFailed(String),
}

/// Result type for device operations
pub type GpuResult<T> = Result<T, GpuError>;

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Handle to a texture stored on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Pixel layout of uploaded texture data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA
    Rgba8,
    /// Single 8-bit channel (glyph coverage)
    R8,
}

impl TextureFormat {
    /// Bytes per pixel
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::R8 => 1,
        }
    }
}

/// Scissor rectangle in framebuffer coordinates (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

/// Value uploaded to a uniform location
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Integer (sampler slots)
    Int(i32),
    /// Scalar float
    Float(f32),
    /// 2-component vector
    Vec2([f32; 2]),
    /// 3-component vector
    Vec3([f32; 3]),
    /// 4-component vector
    Vec4([f32; 4]),
    /// Column-major 4x4 matrix
    Mat4([[f32; 4]; 4]),
}

/// Minimal device interface for drawing UI quads
pub trait GpuDevice {
    /// Compile and link a program from vertex and fragment sources
    fn compile_program(&mut self, vertex: &str, fragment: &str) -> GpuResult<ProgramHandle>;

    /// Release a program
    fn delete_program(&mut self, program: ProgramHandle);

    /// Make `program` the active program
    fn use_program(&mut self, program: ProgramHandle);

    /// Look up a uniform location, `None` when the program has no such uniform
    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<i32>;

    /// Upload a value to a location of the active program
    fn upload_uniform(&mut self, location: i32, value: UniformValue);

    /// Create a texture from tightly packed pixel rows
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: &[u8],
    ) -> GpuResult<TextureHandle>;

    /// Bind `texture` to sampler slot `slot`
    fn bind_texture(&mut self, slot: u32, texture: TextureHandle);

    /// Draw the unit quad with the active program
    fn draw_quad(&mut self);

    /// Restrict drawing to `rect`, or disable scissoring with `None`
    fn set_scissor(&mut self, rect: Option<ScissorRect>);

    /// Resize the viewport
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear color and depth for a new frame
    fn begin_frame(&mut self, clear_color: [f32; 4]);
}
