//! Core UI element declarations
//!
//! Shared types describing one element of the per-frame UI tree: sizing,
//! direction, alignment and visual configuration.

use crate::render::texture::TextureName;
use crate::ui::rendering::{BorderWidth, Color, CornerRadius};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

fn fnv1a(seed: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(seed, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME))
}

/// Stable identifier of a UI element across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Id derived from a label
    pub fn new(label: &str) -> Self {
        Self(fnv1a(FNV_OFFSET, label.as_bytes()))
    }

    /// Id derived from a label and an index, for repeated elements
    pub fn indexed(label: &str, index: u32) -> Self {
        Self(fnv1a(Self::new(label).0, &index.to_le_bytes()))
    }

    /// Id of the `index`-th anonymous child of `parent`
    pub fn child(parent: Self, index: usize) -> Self {
        Self(fnv1a(parent.0 ^ FNV_PRIME, &(index as u64).to_le_bytes()))
    }
}

/// How an element sizes itself along one axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Sizing {
    /// Wrap the children (plus padding and gaps)
    #[default]
    Fit,
    /// Take an even share of the parent's remaining space
    Grow,
    /// Exactly this many pixels
    Fixed(f32),
    /// Fraction (`0.0..=1.0`) of the parent's inner size
    Percent(f32),
}

/// Axis children are stacked along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    /// Horizontal stacking
    #[default]
    LeftToRight,
    /// Vertical stacking
    TopToBottom,
}

/// Horizontal placement of children inside the content box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignX {
    /// Flush left
    #[default]
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

/// Vertical placement of children inside the content box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignY {
    /// Flush top
    #[default]
    Top,
    /// Centered
    Center,
    /// Flush bottom
    Bottom,
}

/// Child alignment on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildAlignment {
    /// Horizontal
    pub x: AlignX,
    /// Vertical
    pub y: AlignY,
}

/// Inner spacing in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    /// Left
    pub left: f32,
    /// Right
    pub right: f32,
    /// Top
    pub top: f32,
    /// Bottom
    pub bottom: f32,
}

impl Padding {
    /// Same padding on every side
    pub const fn all(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

/// Border drawn after an element's children
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderConfig {
    /// Outline color
    pub color: Color,
    /// Per-side widths
    pub width: BorderWidth,
}

/// Clipping and scrolling of an element's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipConfig {
    /// Clip and scroll horizontally
    pub horizontal: bool,
    /// Clip and scroll vertically
    pub vertical: bool,
}

/// Text leaf styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextConfig {
    /// Font size in pixels
    pub font_size: u16,
    /// Text color
    pub color: Color,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: 16,
            color: Color::WHITE,
        }
    }
}

/// Declaration of one element for the current frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementDeclaration {
    /// Label the id was derived from, empty for anonymous elements
    pub label: String,
    /// Explicit id, `None` for anonymous elements
    pub id: Option<ElementId>,
    /// Width sizing
    pub width: Sizing,
    /// Height sizing
    pub height: Sizing,
    /// Inner spacing
    pub padding: Padding,
    /// Gap between consecutive children
    pub child_gap: f32,
    /// Stacking axis
    pub direction: LayoutDirection,
    /// Child placement
    pub child_alignment: ChildAlignment,
    /// Fill color, not drawn when fully transparent
    pub background: Color,
    /// Corner rounding for fill, image and border
    pub corner_radius: CornerRadius,
    /// Outline
    pub border: Option<BorderConfig>,
    /// Texture filling the element
    pub image: Option<TextureName>,
    /// Child clipping and scrolling
    pub clip: Option<ClipConfig>,
}

impl ElementDeclaration {
    /// Element identified by `label`
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            id: Some(ElementId::new(label)),
            ..Self::default()
        }
    }

    /// Element without an explicit id
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Set width sizing
    pub fn width(mut self, sizing: Sizing) -> Self {
        self.width = sizing;
        self
    }

    /// Set height sizing
    pub fn height(mut self, sizing: Sizing) -> Self {
        self.height = sizing;
        self
    }

    /// Set both sizings
    pub fn size(self, width: Sizing, height: Sizing) -> Self {
        self.width(width).height(height)
    }

    /// Set padding
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set the gap between children
    pub fn child_gap(mut self, gap: f32) -> Self {
        self.child_gap = gap;
        self
    }

    /// Set the stacking axis
    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set child alignment
    pub fn align(mut self, x: AlignX, y: AlignY) -> Self {
        self.child_alignment = ChildAlignment { x, y };
        self
    }

    /// Set the fill color
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set corner rounding
    pub fn corner_radius(mut self, radius: CornerRadius) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the outline
    pub fn border(mut self, color: Color, width: BorderWidth) -> Self {
        self.border = Some(BorderConfig { color, width });
        self
    }

    /// Fill the element with a texture
    pub fn image(mut self, texture: TextureName) -> Self {
        self.image = Some(texture);
        self
    }

    /// Clip and scroll children
    pub fn clip(mut self, horizontal: bool, vertical: bool) -> Self {
        self.clip = Some(ClipConfig { horizontal, vertical });
        self
    }
}
