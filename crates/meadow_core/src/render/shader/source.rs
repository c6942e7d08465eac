//! Marker-delimited shader source files
//!
//! One file carries both stages:
//!
//! ```text
//! #shader vertex
//! ...vertex stage...
//! #shader fragment
//! ...fragment stage...
//! ```

use std::path::Path;

use super::{ShaderError, ShaderResult};

/// Marker opening the vertex stage
pub const VERTEX_MARKER: &str = "#shader vertex";
/// Marker opening the fragment stage
pub const FRAGMENT_MARKER: &str = "#shader fragment";

/// Vertex and fragment stage sources split out of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Text between the vertex and fragment markers
    pub vertex: String,
    /// Text after the fragment marker
    pub fragment: String,
}

impl ShaderSource {
    /// Split `text` at the stage markers
    ///
    /// `name` is only used in error messages.
    pub fn parse(name: &str, text: &str) -> ShaderResult<Self> {
        let vertex_at = text.find(VERTEX_MARKER).ok_or_else(|| ShaderError::MissingMarker {
            name: name.to_string(),
            marker: VERTEX_MARKER,
        })?;
        let fragment_at = text.find(FRAGMENT_MARKER).ok_or_else(|| ShaderError::MissingMarker {
            name: name.to_string(),
            marker: FRAGMENT_MARKER,
        })?;

        let vertex_start = vertex_at + VERTEX_MARKER.len();
        if fragment_at < vertex_start {
            return Err(ShaderError::MarkersOutOfOrder(name.to_string()));
        }

        Ok(Self {
            vertex: text[vertex_start..fragment_at].to_string(),
            fragment: text[fragment_at + FRAGMENT_MARKER.len()..].to_string(),
        })
    }

    /// Read and split a shader file
    pub fn load(path: &Path) -> ShaderResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&path.display().to_string(), &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_at_markers() {
        let text = "#shader vertex\nvoid main() {}\n#shader fragment\nout vec4 c;\n";
        let source = ShaderSource::parse("quad", text).unwrap();

        assert_eq!(source.vertex, "\nvoid main() {}\n");
        assert_eq!(source.fragment, "\nout vec4 c;\n");
    }

    #[test]
    fn test_text_before_vertex_marker_is_ignored() {
        let text = "// header\n#shader vertex\nV\n#shader fragment\nF";
        let source = ShaderSource::parse("quad", text).unwrap();

        assert_eq!(source.vertex.trim(), "V");
        assert_eq!(source.fragment.trim(), "F");
    }

    #[test]
    fn test_missing_marker_is_an_error() {
        let err = ShaderSource::parse("quad", "#shader vertex\nV").unwrap_err();
        assert!(matches!(
            err,
            ShaderError::MissingMarker { marker: FRAGMENT_MARKER, .. }
        ));

        let err = ShaderSource::parse("quad", "#shader fragment\nF").unwrap_err();
        assert!(matches!(
            err,
            ShaderError::MissingMarker { marker: VERTEX_MARKER, .. }
        ));
    }

    #[test]
    fn test_fragment_before_vertex_is_rejected() {
        let err = ShaderSource::parse("quad", "#shader fragment\nF\n#shader vertex\nV").unwrap_err();
        assert!(matches!(err, ShaderError::MarkersOutOfOrder(_)));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = ShaderSource::load(Path::new("definitely/not/here.glsl")).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
    }
}
