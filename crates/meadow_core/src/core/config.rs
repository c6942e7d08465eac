//! # Application Configuration
//!
//! Every tunable of the runtime in one serializable tree, loadable from TOML
//! or RON through [`Config`].
//!
//! ## Configuration Categories
//!
//! - **Engine**: logging
//! - **Window**: title, size, decorations, vsync
//! - **UI**: gesture timing, shell metrics, debug overlay
//! - **Shaders**: one source file per draw role
//! - **Assets**: textures, fallback texture, font

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::render::shader::ShaderRole;
use crate::render::texture::TextureName;
use crate::ui::input::DEFAULT_DOUBLE_CLICK_THRESHOLD_MS;

/// # Engine Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used unless `RUST_LOG` is set
    pub log_level: String,
}

impl EngineConfig {
    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial client width in pixels
    pub width: u32,
    /// Initial client height in pixels
    pub height: u32,
    /// Native title bar and borders; the shell draws its own when `false`
    pub decorated: bool,
    /// Sync buffer swaps to the display refresh
    pub vsync: bool,
}

impl WindowConfig {
    /// Validate the window settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("window title cannot be empty".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Meadow".to_string(),
            width: 1280,
            height: 720,
            decorated: false,
            vsync: true,
        }
    }
}

/// # UI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Maximum time between the presses of a double click
    pub double_click_threshold_ms: f32,
    /// Height of the shell title bar in pixels
    pub title_bar_height: f32,
    /// Font size of shell labels
    pub font_size: u16,
    /// Start with the layout debug overlay drawn
    pub debug_overlay: bool,
}

impl UiConfig {
    /// Validate the UI settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.double_click_threshold_ms <= 0.0 || !self.double_click_threshold_ms.is_finite() {
            return Err(ConfigError::Validation(format!(
                "double click threshold must be positive, got {}",
                self.double_click_threshold_ms
            )));
        }
        if self.title_bar_height <= 0.0 {
            return Err(ConfigError::Validation("title bar height must be positive".to_string()));
        }
        if self.font_size == 0 {
            return Err(ConfigError::Validation("font size must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            double_click_threshold_ms: DEFAULT_DOUBLE_CLICK_THRESHOLD_MS,
            title_bar_height: 64.0,
            font_size: 16,
            debug_overlay: false,
        }
    }
}

/// # Shader Configuration
///
/// One `#shader vertex` / `#shader fragment` source file per draw role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Rectangle and border shader
    pub rectangle: PathBuf,
    /// Textured quad shader
    pub image: PathBuf,
    /// Glyph shader
    pub text: PathBuf,
}

impl ShaderConfig {
    /// Source path for every role
    pub fn sources(&self) -> Vec<(ShaderRole, PathBuf)> {
        vec![
            (ShaderRole::Rectangle, self.rectangle.clone()),
            (ShaderRole::Image, self.image.clone()),
            (ShaderRole::Text, self.text.clone()),
        ]
    }

    /// Name the shader library gives the rectangle shader
    pub fn rectangle_name(&self) -> String {
        self.rectangle
            .file_name()
            .map_or_else(|| self.rectangle.display().to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Resolve relative paths against `base`
    pub fn resolved(&self, base: &Path) -> Self {
        Self {
            rectangle: base.join(&self.rectangle),
            image: base.join(&self.image),
            text: base.join(&self.text),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            rectangle: PathBuf::from("content/shaders/Rectangle.glsl"),
            image: PathBuf::from("content/shaders/Texture.glsl"),
            text: PathBuf::from("content/shaders/Text.glsl"),
        }
    }
}

/// A named texture and the file it is decoded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureEntry {
    /// Name draw commands refer to
    pub name: TextureName,
    /// Image file
    pub path: PathBuf,
}

impl TextureEntry {
    fn new(name: TextureName, path: &str) -> Self {
        Self {
            name,
            path: PathBuf::from(path),
        }
    }
}

/// # Asset Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Textures loaded at startup
    pub textures: Vec<TextureEntry>,
    /// Texture used when a file is missing or a name is unknown
    pub fallback_texture: PathBuf,
    /// Font file; block glyphs are drawn when unset
    pub font: Option<PathBuf>,
    /// Pixel size glyphs are rasterized at
    pub font_base_size: f32,
}

impl AssetConfig {
    /// Texture table as `(name, path)` pairs resolved against `base`
    pub fn texture_table(&self, base: &Path) -> Vec<(TextureName, PathBuf)> {
        self.textures
            .iter()
            .map(|entry| (entry.name, base.join(&entry.path)))
            .collect()
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            textures: vec![
                TextureEntry::new(TextureName::Icon, "content/textures/Icon.png"),
                TextureEntry::new(TextureName::UvChecker, "content/textures/UvChecker.png"),
                TextureEntry::new(TextureName::Minimize, "content/textures/Minimize.png"),
                TextureEntry::new(TextureName::Maximize, "content/textures/Maximize.png"),
                TextureEntry::new(TextureName::Close, "content/textures/Close.png"),
            ],
            fallback_texture: PathBuf::from("content/textures/UvChecker.png"),
            font: None,
            font_base_size: 48.0,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Window configuration
    pub window: WindowConfig,
    /// UI configuration
    pub ui: UiConfig,
    /// Shader sources
    pub shaders: ShaderConfig,
    /// Asset configuration
    pub assets: AssetConfig,
}

impl ApplicationConfig {
    /// Create a configuration with defaults and the given window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                ..WindowConfig::default()
            },
            ..Self::default()
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.ui.validate()?;
        if self.assets.font_base_size <= 0.0 {
            return Err(ConfigError::Validation("font base size must be positive".to_string()));
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_temp_file;

    #[test]
    fn test_defaults_are_valid() {
        let config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.double_click_threshold_ms, 510.0);
        assert!(!config.window.decorated);
        assert_eq!(config.shaders.rectangle_name(), "Rectangle.glsl");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ApplicationConfig::new("  ");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.window.title = "Meadow".to_string();
        config.window.width = 0;
        assert!(config.validate().is_err());

        config.window.width = 800;
        config.ui.double_click_threshold_ms = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let path = write_temp_file(
            "config/partial.toml",
            "[window]\ntitle = \"Custom\"\nwidth = 640\n\n[ui]\ndebug_overlay = true\n",
        );
        let config = ApplicationConfig::load_from_file(&path).unwrap();

        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
        assert!(config.ui.debug_overlay);
        assert_eq!(config.assets.textures.len(), 5);
    }

    #[test]
    fn test_ron_file_loads() {
        let path = write_temp_file(
            "config/app.ron",
            "(window: (title: \"From Ron\", vsync: false), ui: (font_size: 20))",
        );
        let config = ApplicationConfig::load_from_file(&path).unwrap();
        assert_eq!(config.window.title, "From Ron");
        assert!(!config.window.vsync);
        assert_eq!(config.ui.font_size, 20);
    }

    #[test]
    fn test_saved_toml_loads_back() {
        let path = write_temp_file("config/saved.toml", "");
        let mut config = ApplicationConfig::new("Saved");
        config.assets.font = Some(PathBuf::from("fonts/Inter.ttf"));
        config.save_to_file(&path).unwrap();

        assert_eq!(ApplicationConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let path = write_temp_file("config/app.yaml", "window: {}");
        assert!(matches!(
            ApplicationConfig::load_from_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_paths_resolve_against_base() {
        let shaders = ShaderConfig::default().resolved(Path::new("/opt/meadow"));
        assert_eq!(shaders.rectangle, PathBuf::from("/opt/meadow/content/shaders/Rectangle.glsl"));
        let table = AssetConfig::default().texture_table(Path::new("/opt/meadow"));
        assert_eq!(table[0], (TextureName::Icon, PathBuf::from("/opt/meadow/content/textures/Icon.png")));
    }
}
