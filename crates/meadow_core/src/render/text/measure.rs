//! Text measurement and glyph placement

use std::rc::Rc;

use crate::render::api::TextureHandle;
use crate::ui::rendering::BoundingBox;

/// Pixel extent of a laid out string
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextDimensions {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

/// One glyph quad positioned in window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// Glyph coverage texture, `None` for untextured placeholder quads
    pub texture: Option<TextureHandle>,
    /// Quad in window pixels
    pub bounds: BoundingBox,
}

/// Measures strings for layout and places glyph quads for rendering
pub trait TextMeasurer {
    /// Size of `text` rendered at `font_size` pixels
    fn measure(&self, text: &str, font_size: u16) -> TextDimensions;

    /// Glyph quads for `text` with its box's top-left at `origin`
    ///
    /// Whitespace advances the pen but produces no quad.
    fn place_glyphs(&self, text: &str, font_size: u16, origin: (f32, f32)) -> Vec<PlacedGlyph>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Rc<T> {
    fn measure(&self, text: &str, font_size: u16) -> TextDimensions {
        (**self).measure(text, font_size)
    }

    fn place_glyphs(&self, text: &str, font_size: u16, origin: (f32, f32)) -> Vec<PlacedGlyph> {
        (**self).place_glyphs(text, font_size, origin)
    }
}

/// Fixed-cell measurer: every character is a `font_size` square
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasurer;

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size: u16) -> TextDimensions {
        let size = f32::from(font_size);
        TextDimensions {
            width: text.chars().count() as f32 * size,
            height: size,
        }
    }

    fn place_glyphs(&self, text: &str, font_size: u16, origin: (f32, f32)) -> Vec<PlacedGlyph> {
        let size = f32::from(font_size);
        text.chars()
            .enumerate()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(i, _)| PlacedGlyph {
                texture: None,
                bounds: BoundingBox::new(origin.0 + i as f32 * size, origin.1, size, size),
            })
            .collect()
    }
}
