//! Application loop and lifecycle management
//!
//! [`Application`] owns the window, the command renderer and the UI manager
//! and drives them frame by frame until the window is closed or the UI asks
//! to quit.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::config::ConfigError;
use crate::events::{dispatch, Event, EventKind};
use crate::foundation::time::FrameTimer;
use crate::render::api::{GpuDevice, GpuError};
use crate::render::shader::ShaderError;
use crate::render::text::FontError;
use crate::render::texture::TextureError;
use crate::render::window::{WindowBackend, WindowError};
use crate::render::CommandRenderer;
use crate::ui::{UIManager, UiRequest};

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Window or context creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Device-level failure
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// A shader could not be loaded or built
    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    /// A texture could not be uploaded
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    /// The configured font could not be loaded
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// `run` was called after the loop stopped
    #[error("Application already stopped")]
    AlreadyStopped,
}

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created, `run` not called yet
    NotStarted,
    /// Inside the frame loop
    Running,
    /// Terminal
    Stopped,
}

/// Frame loop tying the window, renderer and UI together
pub struct Application<W: WindowBackend, D: GpuDevice> {
    window: W,
    renderer: CommandRenderer<D>,
    ui: UIManager,
    timer: FrameTimer,
    queue: Rc<RefCell<Vec<Event>>>,
    state: LoopState,
}

impl<W: WindowBackend, D: GpuDevice> Application<W, D> {
    /// Wire the collaborators together and register the event sink
    pub fn new(mut window: W, renderer: CommandRenderer<D>, ui: UIManager) -> Self {
        let queue = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&queue);
        window.set_event_sink(Box::new(move |event: Event| sink.borrow_mut().push(event)));

        Self {
            window,
            renderer,
            ui,
            timer: FrameTimer::new(),
            queue,
            state: LoopState::NotStarted,
        }
    }

    /// Run frames until the window closes or the UI requests exit
    ///
    /// GPU resources are released when the loop ends; a stopped application
    /// cannot be run again.
    pub fn run(&mut self) -> Result<(), AppError> {
        if self.state == LoopState::Stopped {
            return Err(AppError::AlreadyStopped);
        }

        self.state = LoopState::Running;
        log::info!("Starting main loop");

        while self.state == LoopState::Running {
            self.run_frame();
        }

        self.shutdown();
        Ok(())
    }

    /// Execute one frame of the loop
    ///
    /// Returns whether the application is still running afterwards.
    pub fn run_frame(&mut self) -> bool {
        if self.state == LoopState::NotStarted {
            self.state = LoopState::Running;
        }
        if self.state != LoopState::Running {
            return false;
        }

        let delta_ms = self.timer.tick();

        self.renderer.begin_frame();
        self.ui.update(delta_ms, &mut self.window, &mut self.renderer);
        self.renderer.end_frame();

        self.window.pump_events_and_swap_buffers();

        let events = std::mem::take(&mut *self.queue.borrow_mut());
        for mut event in events {
            self.handle_event(&mut event);
            self.apply_requests();
        }

        self.state == LoopState::Running
    }

    /// Request the loop to end after the current frame
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::info!("Application stop requested");
            self.state = LoopState::Stopped;
        }
    }

    fn handle_event(&mut self, event: &mut Event) {
        log::trace!("{event}");

        let state = &mut self.state;
        dispatch(EventKind::WindowClose, event, |_| {
            *state = LoopState::Stopped;
            true
        });

        self.renderer.on_event(event);
        self.ui.on_event(event);
    }

    fn apply_requests(&mut self) {
        for request in self.ui.drain_requests() {
            log::debug!("UI request: {request:?}");
            match request {
                UiRequest::MinimizeWindow => self.window.minimize(),
                UiRequest::ToggleMaximize => self.window.toggle_maximize(),
                UiRequest::CloseApplication => self.state = LoopState::Stopped,
                UiRequest::RecompileShader(name) => match self.renderer.recompile_shader(&name) {
                    Ok(()) => log::info!("Recompiled shader {name}"),
                    Err(err) => log::error!("{err}"),
                },
            }
        }
    }

    fn shutdown(&mut self) {
        log::info!(
            "Shutting down after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        self.renderer.shutdown();
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The window backend
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Mutable access to the window backend
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// The command renderer
    pub fn renderer(&self) -> &CommandRenderer<D> {
        &self.renderer
    }

    /// The UI manager
    pub fn ui(&self) -> &UIManager {
        &self.ui
    }

    /// Frame timing
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}
