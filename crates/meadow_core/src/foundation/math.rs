//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the pixel-space projection used by the
//! renderer.

pub use nalgebra::{Matrix4, Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Orthographic projection for a top-left-origin pixel space
///
/// `x` spans `[0, width]` left to right, `y` spans `[0, height]` top to
/// bottom, and `z` in `[-depth, depth]` maps to NDC so that larger `z` is
/// closer to the viewer.
pub fn ortho_top_left(width: f32, height: f32, depth: f32) -> Mat4 {
    Mat4::new_orthographic(0.0, width, height, 0.0, -depth, depth)
}

/// Column-major element arrays, the layout GL uniform uploads expect
pub fn to_columns(matrix: &Mat4) -> [[f32; 4]; 4] {
    (*matrix).into()
}
