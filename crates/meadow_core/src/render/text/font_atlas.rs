//! Glyph textures rasterized with `fontdue`
//!
//! Printable ASCII glyphs are rasterized once at a base pixel size and
//! uploaded as one single-channel texture each. Layout scales the base
//! metrics to the requested font size.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings};

use super::measure::{PlacedGlyph, TextDimensions, TextMeasurer};
use super::{FontError, FontResult};
use crate::foundation::math::Vec2;
use crate::render::api::{GpuDevice, TextureFormat, TextureHandle};
use crate::ui::rendering::BoundingBox;

/// Metrics and texture for one glyph at the atlas base size
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Coverage texture, `None` for empty glyphs such as space
    pub texture: Option<TextureHandle>,
    /// Bitmap size in pixels
    pub size: Vec2,
    /// Offset from the pen to the bitmap (x = left, y = top above baseline)
    pub bearing: Vec2,
    /// Horizontal pen advance in pixels
    pub advance: f32,
}

/// Glyph set for one font
#[derive(Debug)]
pub struct FontAtlas {
    glyphs: HashMap<char, Glyph>,
    base_size: f32,
    ascent: f32,
}

impl FontAtlas {
    /// Load a TrueType/OpenType file and upload its ASCII glyphs
    pub fn load<D: GpuDevice>(device: &mut D, path: &Path, base_size: f32) -> FontResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(device, &bytes, base_size)
    }

    /// Rasterize and upload glyphs from font file bytes
    pub fn from_bytes<D: GpuDevice>(device: &mut D, font_data: &[u8], base_size: f32) -> FontResult<Self> {
        const ASCII_START: u8 = 32;
        const ASCII_END: u8 = 126;

        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::LoadError(e.to_string()))?;

        let ascent = font
            .horizontal_line_metrics(base_size)
            .map_or(base_size, |metrics| metrics.ascent);

        let mut glyphs = HashMap::with_capacity(usize::from(ASCII_END - ASCII_START) + 1);
        for ch in (ASCII_START..=ASCII_END).map(char::from) {
            let (metrics, bitmap) = font.rasterize(ch, base_size);

            let texture = if metrics.width == 0 || metrics.height == 0 {
                None
            } else {
                let width = u32::try_from(metrics.width).map_err(|_| FontError::RasterizeError(ch))?;
                let height = u32::try_from(metrics.height).map_err(|_| FontError::RasterizeError(ch))?;
                Some(
                    device
                        .create_texture(width, height, TextureFormat::R8, &bitmap)
                        .map_err(|e| FontError::AtlasCreationError(e.to_string()))?,
                )
            };

            glyphs.insert(
                ch,
                Glyph {
                    texture,
                    size: Vec2::new(metrics.width as f32, metrics.height as f32),
                    bearing: Vec2::new(metrics.xmin as f32, (metrics.ymin + metrics.height as i32) as f32),
                    advance: metrics.advance_width,
                },
            );
        }

        log::info!("Font atlas ready: {} glyphs at {base_size}px", glyphs.len());
        Ok(Self::from_glyphs(glyphs, base_size, ascent))
    }

    /// Build an atlas from prepared glyphs
    pub fn from_glyphs(glyphs: HashMap<char, Glyph>, base_size: f32, ascent: f32) -> Self {
        Self {
            glyphs,
            base_size,
            ascent,
        }
    }

    /// Glyph for `ch`
    pub fn glyph(&self, ch: char) -> FontResult<&Glyph> {
        self.glyphs.get(&ch).ok_or(FontError::GlyphNotFound(ch))
    }

    /// Pixel size glyphs were rasterized at
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    fn scale(&self, font_size: u16) -> f32 {
        if self.base_size > 0.0 {
            f32::from(font_size) / self.base_size
        } else {
            1.0
        }
    }
}

impl TextMeasurer for FontAtlas {
    fn measure(&self, text: &str, font_size: u16) -> TextDimensions {
        let scale = self.scale(font_size);
        let width = text
            .chars()
            .filter_map(|ch| self.glyphs.get(&ch))
            .map(|glyph| glyph.advance * scale)
            .sum();
        TextDimensions {
            width,
            height: f32::from(font_size),
        }
    }

    fn place_glyphs(&self, text: &str, font_size: u16, origin: (f32, f32)) -> Vec<PlacedGlyph> {
        let scale = self.scale(font_size);
        let baseline = origin.1 + self.ascent * scale;
        let mut pen = origin.0;
        let mut placed = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let Some(glyph) = self.glyphs.get(&ch) else {
                log::trace!("No glyph for {ch:?}");
                continue;
            };
            if glyph.texture.is_some() {
                placed.push(PlacedGlyph {
                    texture: glyph.texture,
                    bounds: BoundingBox::new(
                        pen + glyph.bearing.x * scale,
                        baseline - glyph.bearing.y * scale,
                        glyph.size.x * scale,
                        glyph.size.y * scale,
                    ),
                });
            }
            pen += glyph.advance * scale;
        }
        placed
    }
}
