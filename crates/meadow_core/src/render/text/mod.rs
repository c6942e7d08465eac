//! Text measurement and glyph rendering data

pub mod font_atlas;
pub mod measure;

pub use font_atlas::{FontAtlas, Glyph};
pub use measure::{MonospaceMeasurer, PlacedGlyph, TextDimensions, TextMeasurer};

use std::path::PathBuf;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Font file could not be read
    #[error("Failed to read font {path}: {source}")]
    Io {
        /// Font path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse font data
    #[error("Failed to load font: {0}")]
    LoadError(String),

    /// Glyph bitmap had unusable dimensions
    #[error("Failed to rasterize glyph '{0}'")]
    RasterizeError(char),

    /// Failed to upload a glyph texture
    #[error("Failed to create glyph texture: {0}")]
    AtlasCreationError(String),

    /// Requested character was not rasterized
    #[error("Character '{0}' not found in atlas")]
    GlyphNotFound(char),
}
