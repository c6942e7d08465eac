//! # Rendering System
//!
//! Turns the UI's ordered draw commands into GPU work.
//!
//! ## Architecture
//!
//! - **api**: the [`GpuDevice`] collaborator trait and its handle types
//! - **window**: the [`WindowBackend`] collaborator trait and native callback bridge
//! - **backends**: OpenGL device and GLFW window
//! - **shader**: shader source parsing and the per-role [`ShaderLibrary`]
//! - **texture**: named textures decoded with `image`
//! - **text**: text measurement and `fontdue` glyph textures
//! - **renderer**: the [`CommandRenderer`] interpreting draw commands

pub mod api;
pub mod backends;
pub mod renderer;
pub mod shader;
pub mod text;
pub mod texture;
pub mod window;

pub use api::{GpuDevice, GpuError, ProgramHandle, TextureHandle, UniformValue};
pub use backends::opengl::{GlDevice, GlfwWindow};
pub use renderer::{CommandRenderer, DEFAULT_CLEAR_COLOR};
pub use shader::{ShaderError, ShaderLibrary, ShaderRole};
pub use text::{FontAtlas, FontError, MonospaceMeasurer, TextMeasurer};
pub use texture::{TextureError, TextureName, TextureRegistry};
pub use window::{WindowBackend, WindowError, WindowState};
