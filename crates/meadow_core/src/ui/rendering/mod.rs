//! UI rendering module
//!
//! Backend-agnostic draw command model produced by the layout engine.

pub mod commands;

pub use commands::{BorderWidth, BoundingBox, Color, CornerRadius, DrawCommand};
