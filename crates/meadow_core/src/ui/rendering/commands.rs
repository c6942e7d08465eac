//! UI draw commands
//!
//! The layout engine emits one [`DrawCommand`] per paint instruction.
//! Sequence order is paint order.

use std::fmt;

use crate::render::texture::TextureName;

/// Linear RGBA color, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque white
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Construct from components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Components as an array
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Axis-aligned box in window pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingBox {
    /// Construct from position and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `(px, py)` lies inside the box (edges inclusive on the top-left)
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width && py < self.y + self.height
    }

    /// Overlap of two boxes, zero-sized when disjoint
    pub fn intersect(&self, other: &Self) -> Self {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

/// Per-corner radius in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadius {
    /// Top-left
    pub top_left: f32,
    /// Top-right
    pub top_right: f32,
    /// Bottom-left
    pub bottom_left: f32,
    /// Bottom-right
    pub bottom_right: f32,
}

impl CornerRadius {
    /// Same radius on every corner
    pub const fn all(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    /// Corners as `[top_left, top_right, bottom_left, bottom_right]`
    pub const fn to_array(self) -> [f32; 4] {
        [self.top_left, self.top_right, self.bottom_left, self.bottom_right]
    }
}

/// Per-side border width in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderWidth {
    /// Left
    pub left: u16,
    /// Right
    pub right: u16,
    /// Top
    pub top: u16,
    /// Bottom
    pub bottom: u16,
}

impl BorderWidth {
    /// Same width on every side
    pub const fn all(width: u16) -> Self {
        Self {
            left: width,
            right: width,
            top: width,
            bottom: width,
        }
    }

    /// Whether every side is zero
    pub const fn is_zero(self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }

    /// Sides as `[left, right, top, bottom]` floats
    pub fn to_array(self) -> [f32; 4] {
        [
            f32::from(self.left),
            f32::from(self.right),
            f32::from(self.top),
            f32::from(self.bottom),
        ]
    }
}

/// One paint instruction for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled, optionally rounded rectangle
    Rectangle {
        /// Target box
        bounds: BoundingBox,
        /// Fill color
        color: Color,
        /// Corner rounding
        corner_radius: CornerRadius,
    },
    /// Rectangle outline
    Border {
        /// Target box
        bounds: BoundingBox,
        /// Outline color
        color: Color,
        /// Per-side widths
        width: BorderWidth,
        /// Corner rounding
        corner_radius: CornerRadius,
    },
    /// Text span starting at the box's top-left
    Text {
        /// Target box
        bounds: BoundingBox,
        /// Characters to draw
        text: String,
        /// Font size in pixels
        font_size: u16,
        /// Text color
        color: Color,
    },
    /// Textured quad
    Image {
        /// Target box
        bounds: BoundingBox,
        /// Texture to sample
        texture: TextureName,
        /// Tint multiplied with the texture
        tint: Color,
        /// Corner rounding
        corner_radius: CornerRadius,
    },
    /// Start clipping subsequent draws to `bounds`
    ClipStart {
        /// Clip box
        bounds: BoundingBox,
    },
    /// Restore the clip that enclosed the matching [`DrawCommand::ClipStart`]
    ClipEnd {
        /// Box of the element that opened the clip
        bounds: BoundingBox,
    },
    /// Application-defined command, ignored by the built-in renderer
    Custom {
        /// Target box
        bounds: BoundingBox,
        /// Application tag
        tag: u32,
    },
}

impl DrawCommand {
    /// Box the command paints into
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Self::Rectangle { bounds, .. }
            | Self::Border { bounds, .. }
            | Self::Text { bounds, .. }
            | Self::Image { bounds, .. }
            | Self::ClipStart { bounds }
            | Self::ClipEnd { bounds }
            | Self::Custom { bounds, .. } => *bounds,
        }
    }

    /// Short uppercase kind name for tracing
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "RECTANGLE",
            Self::Border { .. } => "BORDER",
            Self::Text { .. } => "TEXT",
            Self::Image { .. } => "IMAGE",
            Self::ClipStart { .. } => "SCISSOR_START",
            Self::ClipEnd { .. } => "SCISSOR_END",
            Self::Custom { .. } => "CUSTOM",
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bounds();
        write!(
            f,
            "{} [{}, {}, {}x{}]",
            self.kind_name(),
            b.x,
            b.y,
            b.width,
            b.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let b = BoundingBox::new(10.0, 10.0, 20.0, 5.0);
        assert!(b.contains(10.0, 10.0));
        assert!(b.contains(29.9, 14.9));
        assert!(!b.contains(30.0, 12.0));
        assert!(!b.contains(15.0, 15.0));
    }

    #[test]
    fn test_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(50.0, 20.0, 100.0, 30.0);
        assert_eq!(a.intersect(&b), BoundingBox::new(50.0, 20.0, 50.0, 30.0));

        let far = BoundingBox::new(500.0, 500.0, 10.0, 10.0);
        let none = a.intersect(&far);
        assert_eq!(none.width, 0.0);
        assert_eq!(none.height, 0.0);
    }

    #[test]
    fn test_display_names_kind_and_box() {
        let cmd = DrawCommand::ClipStart {
            bounds: BoundingBox::new(1.0, 2.0, 3.0, 4.0),
        };
        assert_eq!(cmd.to_string(), "SCISSOR_START [1, 2, 3x4]");
    }
}
