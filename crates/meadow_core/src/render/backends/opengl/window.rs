//! Window management using GLFW
//!
//! Creates an OpenGL 3.3 core window and forwards every native event
//! through the [`CallbackBridge`] during [`pump_events_and_swap_buffers`].
//!
//! [`pump_events_and_swap_buffers`]: WindowBackend::pump_events_and_swap_buffers

use std::ffi::c_void;

use glfw::Context;

use crate::core::config::WindowConfig;
use crate::events::EventSink;
use crate::input::{InputAction, InputSource, KeyCode, MouseButton};
use crate::render::window::{
    CallbackBridge, WindowBackend, WindowError, WindowResult, WindowState,
};

/// GLFW window with a current OpenGL context
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    bridge: CallbackBridge,
}

impl GlfwWindow {
    /// Create the window described by `config` and make its context current
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|err| WindowError::InitializationFailed(format!("{err:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Decorated(config.decorated));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| WindowError::CreationFailed {
                title: config.title.clone(),
                width: config.width,
                height: config.height,
            })?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_size_polling(true);
        window.set_pos_polling(true);
        window.set_close_polling(true);
        window.set_key_polling(true);
        window.set_char_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);

        let mut state = WindowState::new(config.title.clone(), config.width, config.height);
        state.position = window.get_pos();

        log::info!(
            "Created window '{}' ({}x{}, decorated: {})",
            config.title,
            config.width,
            config.height,
            config.decorated
        );

        Ok(Self {
            glfw,
            window,
            events,
            bridge: CallbackBridge::new(state),
        })
    }

    /// Resolve an OpenGL function pointer for the window's context
    pub fn proc_address(&mut self, name: &str) -> *const c_void {
        self.window.get_proc_address(name) as *const c_void
    }

    fn forward(&mut self, event: glfw::WindowEvent) {
        use glfw::WindowEvent as W;
        match event {
            W::Size(width, height) => self.bridge.on_resize(width, height),
            W::Pos(x, y) => self.bridge.on_move(x, y),
            W::Close => self.bridge.on_close(),
            W::Key(key, scancode, action, _) => self.bridge.on_key(key as i32, scancode, action as i32),
            W::Char(ch) => self.bridge.on_char(u32::from(ch)),
            W::MouseButton(button, action, _) => self.bridge.on_mouse_button(button as i32, action as i32),
            W::CursorPos(x, y) => self.bridge.on_cursor_move(x, y),
            W::Scroll(dx, dy) => self.bridge.on_scroll(dx, dy),
            other => log::trace!("Ignoring native event {other:?}"),
        }
    }
}

impl InputSource for GlfwWindow {
    fn cursor_position(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        // glfw::Key has no from_i32, so raw key codes go through the C API
        let state = unsafe { glfw::ffi::glfwGetKey(self.window.window_ptr(), key.0) };
        state == InputAction::Press.code()
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        glfw::MouseButton::from_i32(button.0)
            .is_some_and(|button| self.window.get_mouse_button(button) == glfw::Action::Press)
    }
}

impl WindowBackend for GlfwWindow {
    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn position(&self) -> (i32, i32) {
        self.window.get_pos()
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_pos(x, y);
    }

    fn minimize(&mut self) {
        self.window.iconify();
    }

    fn toggle_maximize(&mut self) {
        if self.window.is_maximized() {
            self.window.restore();
        } else {
            self.window.maximize();
        }
    }

    fn pump_events_and_swap_buffers(&mut self) {
        self.window.swap_buffers();
        self.glfw.poll_events();
        let pending: Vec<_> = glfw::flush_messages(&self.events).map(|(_, event)| event).collect();
        for event in pending {
            self.forward(event);
        }
    }

    fn set_event_sink(&mut self, sink: EventSink) {
        self.bridge.set_event_sink(sink);
    }

    fn state(&self) -> &WindowState {
        self.bridge.state()
    }
}
