//! Shader loading and the per-role shader library
//!
//! - **source**: splits `#shader vertex` / `#shader fragment` files
//! - **library**: one program per UI draw role, active program tracking and
//!   memoized uniform locations

pub mod library;
pub mod source;

pub use library::{ShaderLibrary, ShaderRole, UniformLocation, MAX_CACHED_UNIFORMS};
pub use source::ShaderSource;

use std::path::PathBuf;

use thiserror::Error;

use crate::render::api::GpuError;

/// Shader loading and compilation errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Source file could not be read
    #[error("Failed to read shader {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A stage marker is absent
    #[error("Shader {name} is missing the '{marker}' marker")]
    MissingMarker {
        /// Shader name or path
        name: String,
        /// The marker that was not found
        marker: &'static str,
    },

    /// The fragment marker precedes the vertex marker
    #[error("Shader {0} declares the fragment stage before the vertex stage")]
    MarkersOutOfOrder(String),

    /// Device rejected the sources
    #[error("Shader {name} failed to build: {source}")]
    Build {
        /// Shader name
        name: String,
        /// Device error
        #[source]
        source: GpuError,
    },

    /// No shader with this name is loaded
    #[error("Unknown shader: {0}")]
    UnknownShader(String),

    /// No source was configured for a draw role
    #[error("No shader configured for role {0:?}")]
    MissingRole(ShaderRole),
}

/// Result type for shader operations
pub type ShaderResult<T> = Result<T, ShaderError>;
