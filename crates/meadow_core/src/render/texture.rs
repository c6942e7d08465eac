//! Named UI textures
//!
//! Textures are decoded with the `image` crate at startup and uploaded once.
//! A missing file never stops startup: its slot points at the fallback
//! texture, and the fallback itself is a generated checker when its own file
//! is unavailable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::api::{GpuDevice, GpuError, TextureFormat, TextureHandle};

/// Texture loading errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// File missing or not decodable
    #[error("Failed to load image {path}: {source}")]
    Decode {
        /// Image path
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// Upload failed
    #[error("Texture upload failed: {0}")]
    Upload(#[from] GpuError),
}

/// Textures referenced by the UI description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureName {
    /// Application icon in the title bar
    Icon,
    /// UV checker used as the fallback
    UvChecker,
    /// Minimize button glyph
    Minimize,
    /// Maximize button glyph
    Maximize,
    /// Close button glyph
    Close,
}

/// Decoded RGBA8 pixels ready for upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Tightly packed RGBA rows
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image file into RGBA8
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Loaded image {width}x{height} from {}", path.display());

        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Solid color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }

    /// Two-tone checkerboard with `cell`-pixel squares
    pub fn checker(size: u32, cell: u32) -> Self {
        const LIGHT: [u8; 4] = [230, 230, 230, 255];
        const DARK: [u8; 4] = [200, 40, 160, 255];

        let cell = cell.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let light = ((x / cell) + (y / cell)) % 2 == 0;
                data.extend_from_slice(if light { &LIGHT } else { &DARK });
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }

    fn upload<D: GpuDevice>(&self, device: &mut D) -> Result<TextureHandle, TextureError> {
        Ok(device.create_texture(self.width, self.height, TextureFormat::Rgba8, &self.data)?)
    }
}

/// Uploaded textures looked up by [`TextureName`]
#[derive(Debug)]
pub struct TextureRegistry {
    textures: HashMap<TextureName, TextureHandle>,
    fallback: TextureHandle,
}

impl TextureRegistry {
    /// Decode and upload every listed texture
    ///
    /// Entries whose file cannot be decoded share the fallback texture.
    /// Only device upload failures are errors.
    pub fn load<D: GpuDevice>(
        device: &mut D,
        entries: &[(TextureName, PathBuf)],
        fallback_path: &Path,
    ) -> Result<Self, TextureError> {
        let fallback_image = ImageData::from_file(fallback_path).unwrap_or_else(|err| {
            log::warn!("{err}; using generated checker as fallback texture");
            ImageData::checker(64, 8)
        });
        let fallback = fallback_image.upload(device)?;

        let mut textures = HashMap::with_capacity(entries.len());
        for (name, path) in entries {
            let handle = match ImageData::from_file(path) {
                Ok(image) => image.upload(device)?,
                Err(err) => {
                    log::warn!("{err}; texture {name:?} uses the fallback");
                    fallback
                }
            };
            textures.insert(*name, handle);
        }

        log::info!("Loaded {} textures", textures.len());
        Ok(Self { textures, fallback })
    }

    /// Handle for `name`, or the fallback when it was never registered
    pub fn get(&self, name: TextureName) -> TextureHandle {
        self.textures.get(&name).copied().unwrap_or_else(|| {
            log::warn!("Texture {name:?} not found, using fallback");
            self.fallback
        })
    }

    /// Fallback texture handle
    pub fn fallback(&self) -> TextureHandle {
        self.fallback
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether no names are registered
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DeviceCall, RecordingDevice};

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.data.len(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_checker_alternates_cells() {
        let img = ImageData::checker(4, 2);
        let pixel = |x: usize, y: usize| img.data[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4].to_vec();
        assert_eq!(pixel(0, 0), pixel(1, 1));
        assert_ne!(pixel(0, 0), pixel(2, 0));
        assert_eq!(pixel(0, 0), pixel(2, 2));
    }

    #[test]
    fn test_missing_files_share_the_fallback() {
        let mut device = RecordingDevice::new();
        let entries = vec![
            (TextureName::Icon, PathBuf::from("missing/icon.png")),
            (TextureName::Close, PathBuf::from("missing/close.png")),
        ];

        let registry = TextureRegistry::load(&mut device, &entries, Path::new("missing/uv.png")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(TextureName::Icon), registry.fallback());
        assert_eq!(registry.get(TextureName::Close), registry.fallback());
        let uploads = device
            .calls
            .iter()
            .filter(|call| matches!(call, DeviceCall::CreateTexture { .. }))
            .count();
        assert_eq!(uploads, 1);
    }

    #[test]
    fn test_unregistered_name_falls_back() {
        let mut device = RecordingDevice::new();
        let registry = TextureRegistry::load(&mut device, &[], Path::new("missing/uv.png")).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.get(TextureName::Maximize), registry.fallback());
    }

    #[test]
    fn test_upload_failure_is_an_error() {
        let mut device = RecordingDevice::new();
        device.fail_textures = true;
        let err = TextureRegistry::load(&mut device, &[], Path::new("missing/uv.png")).unwrap_err();
        assert!(matches!(err, TextureError::Upload(_)));
    }
}
