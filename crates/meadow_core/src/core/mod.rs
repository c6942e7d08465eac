//! # Core Module
//!
//! Shared configuration used by every subsystem.
//!
//! ## Organization
//!
//! - **Config**: application configuration tree and its file loading

pub mod config;

// Re-export foundation for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig, AssetConfig, Config, ConfigError, EngineConfig, ShaderConfig, TextureEntry,
    UiConfig, WindowConfig,
};
