//! Meadow desktop shell
//!
//! Loads `meadow.toml` (or the path given as the first argument), opens an
//! undecorated window and runs the default shell UI until it is closed.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use meadow_core::prelude::*;

const CONFIG_FILE: &str = "meadow.toml";

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(err) => {
            logging::init_with_level("info");
            log::error!("Failed to load {}: {err}", config_path.display());
            std::process::exit(1);
        }
    };
    logging::init_with_level(&config.engine.log_level);

    let base = config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    if let Err(err) = run(&config, &base) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn load_config(path: &Path) -> Result<ApplicationConfig, AppError> {
    let config = if path.exists() {
        ApplicationConfig::load_from_file(path)?
    } else {
        ApplicationConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn run(config: &ApplicationConfig, base: &Path) -> Result<(), AppError> {
    log::info!("Starting {}", config.window.title);

    let mut window = GlfwWindow::new(&config.window)?;
    let mut device = GlDevice::load_with(|symbol| window.proc_address(symbol));

    let shaders = ShaderLibrary::load(&mut device, &config.shaders.resolved(base).sources())?;
    let textures = TextureRegistry::load(
        &mut device,
        &config.assets.texture_table(base),
        &base.join(&config.assets.fallback_texture),
    )?;

    let text: Rc<dyn TextMeasurer> = match &config.assets.font {
        Some(font) => Rc::new(FontAtlas::load(
            &mut device,
            &base.join(font),
            config.assets.font_base_size,
        )?),
        None => {
            log::info!("No font configured, text is drawn as block glyphs");
            Rc::new(MonospaceMeasurer)
        }
    };

    let (width, height) = window.size();
    let renderer = CommandRenderer::new(
        device,
        shaders,
        textures,
        Box::new(Rc::clone(&text)),
        width,
        height,
    );

    let style = ShellStyle {
        title_bar_height: config.ui.title_bar_height,
        font_size: config.ui.font_size,
        ..ShellStyle::default()
    };
    let ui = UIManager::new(
        width as f32,
        height as f32,
        Box::new(text),
        Box::new(WindowShell::new(style)),
    )
    .with_double_click_threshold(config.ui.double_click_threshold_ms)
    .with_debug_mode(config.ui.debug_overlay)
    .with_recompile_target(config.shaders.rectangle_name());

    Application::new(window, renderer, ui).run()
}
