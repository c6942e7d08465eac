//! # Meadow Core
//!
//! Runtime core of a desktop UI shell: native window events become typed
//! [`events::Event`]s, an immediate-mode layout engine rebuilds the UI every
//! frame, and the resulting draw commands are rendered with OpenGL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use meadow_core::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     let config = ApplicationConfig::new("Meadow");
//!     let mut window = GlfwWindow::new(&config.window)?;
//!     let mut device = GlDevice::load_with(|symbol| window.proc_address(symbol));
//!
//!     let shaders = ShaderLibrary::load(&mut device, &config.shaders.sources())?;
//!     let textures = TextureRegistry::load(
//!         &mut device,
//!         &config.assets.texture_table(std::path::Path::new(".")),
//!         &config.assets.fallback_texture,
//!     )?;
//!     let text = Rc::new(MonospaceMeasurer);
//!
//!     let (width, height) = window.size();
//!     let renderer =
//!         CommandRenderer::new(device, shaders, textures, Box::new(Rc::clone(&text)), width, height);
//!     let ui = UIManager::new(
//!         width as f32,
//!         height as f32,
//!         Box::new(text),
//!         Box::new(WindowShell::default()),
//!     );
//!
//!     Application::new(window, renderer, ui).run()
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod input;
pub mod render;
pub mod ui;

mod application;

#[cfg(test)]
mod testing;

pub use application::{AppError, Application, LoopState};

/// Common imports for runtime users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, AssetConfig, ShaderConfig, UiConfig, WindowConfig},
        config::Config,
        events::{dispatch, Event, EventKind},
        foundation::{logging, time::FrameTimer},
        input::{InputAction, InputSource, KeyCode, MouseButton},
        render::{
            CommandRenderer, FontAtlas, GlDevice, GlfwWindow, GpuDevice, MonospaceMeasurer,
            ShaderLibrary, TextMeasurer, TextureRegistry, WindowBackend,
        },
        ui::{ShellStyle, UIManager, UiBuilder, UiDescription, UiRequest, WindowShell},
        AppError, Application, LoopState,
    };
}
