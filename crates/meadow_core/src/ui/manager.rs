//! UI Manager
//!
//! Per-frame UI engine: rebuilds the tree from a [`UiDescription`], keeps
//! pointer and gesture state between frames, and turns resolved clicks and
//! hotkeys into [`UiRequest`]s for the application to carry out.

use super::backend::UIRenderBackend;
use super::builder::{UiBuilder, UiDescription};
use super::input::{ClickGesture, DoubleClickTracker, DragState, PendingClickQueue};
use super::widgets::LayoutEngine;
use super::UiRequest;
use crate::events::{dispatch, Event, EventKind};
use crate::input::{KeyCode, MouseButton};
use crate::render::text::TextMeasurer;
use crate::render::window::WindowBackend;

/// Shader recompiled by the `R` hotkey unless configured otherwise
pub const DEFAULT_RECOMPILE_TARGET: &str = "Rectangle.glsl";

/// Central UI frame engine
pub struct UIManager {
    /// Layout engine rebuilt every frame
    layout: LayoutEngine,

    /// Hover-registered click targets for the current frame
    clicks: PendingClickQueue,

    /// Double click timer
    double_click: DoubleClickTracker,

    /// Drag-to-move state
    drag: DragState,

    /// Tree emitted every frame
    description: Box<dyn UiDescription>,

    /// Requests waiting for the application
    outbox: Vec<UiRequest>,

    /// Shader name sent with the recompile hotkey
    recompile_target: String,

    /// Frames built so far
    frame_counter: u64,

    /// Draw commands produced by the last frame
    last_command_count: usize,
}

impl UIManager {
    /// Create a UI manager for a `width` x `height` surface
    pub fn new(
        width: f32,
        height: f32,
        measurer: Box<dyn TextMeasurer>,
        description: Box<dyn UiDescription>,
    ) -> Self {
        Self {
            layout: LayoutEngine::new(width, height, measurer),
            clicks: PendingClickQueue::new(),
            double_click: DoubleClickTracker::default(),
            drag: DragState::default(),
            description,
            outbox: Vec::new(),
            recompile_target: DEFAULT_RECOMPILE_TARGET.to_string(),
            frame_counter: 0,
            last_command_count: 0,
        }
    }

    /// Use a different double click threshold
    pub fn with_double_click_threshold(mut self, threshold_ms: f32) -> Self {
        self.double_click = DoubleClickTracker::new(threshold_ms);
        self
    }

    /// Start with the debug overlay on or off
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.layout.set_debug_mode(enabled);
        self
    }

    /// Shader name requested by the recompile hotkey
    pub fn with_recompile_target(mut self, name: impl Into<String>) -> Self {
        self.recompile_target = name.into();
        self
    }

    /// Build, lay out and render one frame
    ///
    /// The pointer state fed to the layout engine is polled at the end of the
    /// frame, so hover queries during the build see the previous frame's
    /// pointer against the previous frame's boxes.
    pub fn update<W, R>(&mut self, delta_ms: f32, window: &mut W, renderer: &mut R)
    where
        W: WindowBackend + ?Sized,
        R: UIRenderBackend + ?Sized,
    {
        self.clicks.reset();
        self.double_click.advance(delta_ms);

        let left_down = window.is_mouse_button_down(MouseButton::LEFT);
        let cursor = window.cursor_position();
        if let Some((x, y)) = self.drag.update(window.position(), cursor, left_down) {
            window.set_position(x, y);
        }

        self.layout.begin_layout();
        let mut ui = UiBuilder::new(&mut self.layout, &mut self.clicks, &mut self.drag, left_down);
        self.description.build(&mut ui);
        let commands = self.layout.end_layout();

        renderer.render(&commands);
        self.last_command_count = commands.len();
        self.frame_counter += 1;

        let (x, y) = window.cursor_position();
        let left_down = window.is_mouse_button_down(MouseButton::LEFT);
        self.layout.set_pointer_state((x as f32, y as f32), left_down);
    }

    /// Route one event through the UI handlers
    ///
    /// Returns whether the event was consumed.
    pub fn on_event(&mut self, event: &mut Event) -> bool {
        let layout = &mut self.layout;
        dispatch(EventKind::WindowResize, event, |e| {
            if let Some((width, height)) = e.window_size() {
                layout.set_dimensions(width as f32, height as f32);
            }
            false
        });

        dispatch(EventKind::MouseScrolled, event, |e| {
            if let Some((dx, dy)) = e.scroll_offset() {
                layout.update_scroll_containers((dx as f32, dy as f32));
            }
            true
        });

        let outbox = &mut self.outbox;
        let recompile_target = &self.recompile_target;
        dispatch(EventKind::KeyPressed, event, |e| match e.key_data().map(|data| data.key) {
            Some(KeyCode::D) => {
                let enabled = !layout.debug_mode();
                layout.set_debug_mode(enabled);
                log::info!("UI debug overlay {}", if enabled { "on" } else { "off" });
                true
            }
            Some(KeyCode::R) => {
                outbox.push(UiRequest::RecompileShader(recompile_target.clone()));
                true
            }
            _ => false,
        });

        let clicks = &mut self.clicks;
        let double_click = &mut self.double_click;
        dispatch(EventKind::MouseButtonPressed, event, |e| {
            let Some(data) = e.mouse_button_data() else {
                return false;
            };
            let Some(click) = clicks.pop_matching(data.button) else {
                return false;
            };
            log::debug!("Resolved {click:?}");
            match click.gesture {
                ClickGesture::Single(action) => outbox.push(action.into()),
                ClickGesture::DoubleClick(action) => {
                    if double_click.register_press() {
                        outbox.push(action.into());
                    }
                }
            }
            true
        });

        event.is_consumed()
    }

    /// Take every pending request
    pub fn drain_requests(&mut self) -> std::vec::Drain<'_, UiRequest> {
        self.outbox.drain(..)
    }

    /// Whether requests are waiting
    pub fn has_requests(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Layout engine
    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Mutable layout engine
    pub fn layout_mut(&mut self) -> &mut LayoutEngine {
        &mut self.layout
    }

    /// Click targets registered by the last frame
    pub fn pending_clicks(&self) -> &PendingClickQueue {
        &self.clicks
    }

    /// Double click timer
    pub fn double_click(&self) -> &DoubleClickTracker {
        &self.double_click
    }

    /// Drag-to-move state
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Whether the debug overlay is drawn
    pub fn debug_mode(&self) -> bool {
        self.layout.debug_mode()
    }

    /// Frames built so far
    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    /// Draw commands produced by the last frame
    pub fn last_command_count(&self) -> usize {
        self.last_command_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputAction;
    use crate::render::text::MonospaceMeasurer;
    use crate::testing::MockWindow;
    use crate::ui::input::DeferredAction;
    use crate::ui::rendering::DrawCommand;
    use crate::ui::widgets::{ElementDeclaration, Sizing};

    #[derive(Default)]
    struct CapturingRenderer {
        frames: Vec<Vec<DrawCommand>>,
        size: (u32, u32),
    }

    impl UIRenderBackend for CapturingRenderer {
        fn render(&mut self, commands: &[DrawCommand]) {
            self.frames.push(commands.to_vec());
        }

        fn set_screen_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn screen_size(&self) -> (u32, u32) {
            self.size
        }
    }

    /// Full-window element with configurable interactions
    #[derive(Default)]
    struct Fixture {
        outer_click: Option<(MouseButton, DeferredAction)>,
        inner_click: Option<(MouseButton, DeferredAction)>,
        inner_first: bool,
        double_click: Option<DeferredAction>,
        drag: bool,
    }

    impl UiDescription for Fixture {
        fn build(&mut self, ui: &mut UiBuilder<'_>) {
            ui.open(ElementDeclaration::new("Outer").size(Sizing::Grow, Sizing::Grow));
            if !self.inner_first {
                if let Some((button, action)) = self.outer_click {
                    ui.on_click(button, action);
                }
            }
            if let Some(action) = self.double_click {
                ui.on_double_click(action);
            }
            ui.element(
                ElementDeclaration::new("Inner").size(Sizing::Fixed(100.0), Sizing::Fixed(100.0)),
                |ui| {
                    if let Some((button, action)) = self.inner_click {
                        ui.on_click(button, action);
                    }
                    if self.drag {
                        ui.drag_region();
                    }
                },
            );
            if self.inner_first {
                if let Some((button, action)) = self.outer_click {
                    ui.on_click(button, action);
                }
            }
            ui.close();
        }
    }

    fn manager(fixture: Fixture) -> UIManager {
        UIManager::new(800.0, 600.0, Box::new(MonospaceMeasurer), Box::new(fixture))
    }

    fn press(button: MouseButton) -> Event {
        Event::mouse_button(button, InputAction::Press)
    }

    fn requests(ui: &mut UIManager) -> Vec<UiRequest> {
        ui.drain_requests().collect()
    }

    #[test]
    fn test_update_renders_every_frame() {
        let mut ui = manager(Fixture::default());
        let mut window = MockWindow::new(800, 600);
        let mut renderer = CapturingRenderer::default();

        ui.update(16.0, &mut window, &mut renderer);
        ui.update(16.0, &mut window, &mut renderer);

        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(ui.frame_count(), 2);
        assert_eq!(ui.last_command_count(), renderer.frames[1].len());
    }

    #[test]
    fn test_pointer_state_lags_one_frame() {
        let mut ui = manager(Fixture::default());
        let mut window = MockWindow::new(800, 600);
        let mut renderer = CapturingRenderer::default();
        window.cursor = (12.0, 34.0);
        window.set_button(MouseButton::LEFT, true);

        ui.update(16.0, &mut window, &mut renderer);

        assert_eq!(ui.layout().pointer_state(), ((12.0, 34.0), true));
    }

    #[test]
    fn test_clicks_resolve_last_pushed_first() {
        for inner_first in [false, true] {
            let mut ui = manager(Fixture {
                outer_click: Some((MouseButton::LEFT, DeferredAction::MinimizeWindow)),
                inner_click: Some((MouseButton::LEFT, DeferredAction::CloseApplication)),
                inner_first,
                ..Fixture::default()
            });
            let mut window = MockWindow::new(800, 600);
            let mut renderer = CapturingRenderer::default();
            window.cursor = (10.0, 10.0);
            ui.update(16.0, &mut window, &mut renderer);
            ui.update(16.0, &mut window, &mut renderer);
            assert_eq!(ui.pending_clicks().len(), 2);

            let mut event = press(MouseButton::LEFT);
            assert!(ui.on_event(&mut event));

            let expected = if inner_first {
                UiRequest::MinimizeWindow
            } else {
                UiRequest::CloseApplication
            };
            assert_eq!(requests(&mut ui), vec![expected]);
            assert_eq!(ui.pending_clicks().len(), 1);
        }
    }

    #[test]
    fn test_mismatched_button_leaves_event_open() {
        let mut ui = manager(Fixture {
            outer_click: Some((MouseButton::LEFT, DeferredAction::MinimizeWindow)),
            ..Fixture::default()
        });
        let mut window = MockWindow::new(800, 600);
        let mut renderer = CapturingRenderer::default();
        window.cursor = (500.0, 500.0);
        ui.update(16.0, &mut window, &mut renderer);
        ui.update(16.0, &mut window, &mut renderer);

        let mut event = press(MouseButton::RIGHT);
        assert!(!ui.on_event(&mut event));
        assert!(!event.is_consumed());
        assert!(!ui.has_requests());
        assert_eq!(ui.pending_clicks().len(), 1);
    }

    #[test]
    fn test_press_with_empty_queue_is_not_consumed() {
        let mut ui = manager(Fixture::default());
        let mut event = press(MouseButton::LEFT);
        assert!(!ui.on_event(&mut event));
    }

    #[test]
    fn test_double_click_fires_inside_threshold() {
        let mut ui = manager(Fixture {
            double_click: Some(DeferredAction::ToggleMaximize),
            ..Fixture::default()
        });
        let mut window = MockWindow::new(800, 600);
        let mut renderer = CapturingRenderer::default();
        window.cursor = (400.0, 300.0);
        ui.update(16.0, &mut window, &mut renderer);
        ui.update(16.0, &mut window, &mut renderer);

        assert!(ui.on_event(&mut press(MouseButton::LEFT)));
        assert!(!ui.has_requests());
        assert!(ui.double_click().is_awaiting());

        ui.update(200.0, &mut window, &mut renderer);
        assert!(ui.on_event(&mut press(MouseButton::LEFT)));
        assert_eq!(requests(&mut ui), vec![UiRequest::ToggleMaximize]);
        assert!(!ui.double_click().is_awaiting());
    }

    #[test]
    fn test_slow_second_click_restarts_tracking() {
        let mut ui = manager(Fixture {
            double_click: Some(DeferredAction::ToggleMaximize),
            ..Fixture::default()
        })
        .with_double_click_threshold(510.0);
        let mut window = MockWindow::new(800, 600);
        let mut renderer = CapturingRenderer::default();
        window.cursor = (400.0, 300.0);
        ui.update(16.0, &mut window, &mut renderer);
        ui.update(16.0, &mut window, &mut renderer);
        ui.on_event(&mut press(MouseButton::LEFT));

        ui.update(511.0, &mut window, &mut renderer);
        assert!(!ui.double_click().is_awaiting());
        ui.on_event(&mut press(MouseButton::LEFT));

        assert!(!ui.has_requests());
        assert!(ui.double_click().is_awaiting());
    }

    #[test]
    fn test_drag_moves_window_with_cursor() {
        let mut ui = manager(Fixture {
            drag: true,
            ..Fixture::default()
        });
        let mut window = MockWindow::new(800, 600);
        let mut renderer = CapturingRenderer::default();
        window.set_position(100, 100);
        window.cursor = (50.0, 50.0);
        window.set_button(MouseButton::LEFT, true);

        ui.update(16.0, &mut window, &mut renderer);
        ui.update(16.0, &mut window, &mut renderer);
        assert!(ui.drag().is_active());
        ui.update(16.0, &mut window, &mut renderer);
        assert_eq!(ui.drag().anchor(), Some((50.0, 50.0)));

        window.cursor = (60.0, 55.0);
        ui.update(16.0, &mut window, &mut renderer);
        assert_eq!(window.position(), (110, 105));

        window.set_button(MouseButton::LEFT, false);
        ui.update(16.0, &mut window, &mut renderer);
        assert!(!ui.drag().is_active());
        assert_eq!(window.position(), (110, 105));
    }

    #[test]
    fn test_debug_hotkey_toggles_overlay() {
        let mut ui = manager(Fixture::default());

        let mut event = Event::key(KeyCode::D, 40, InputAction::Press);
        assert!(ui.on_event(&mut event));
        assert!(ui.debug_mode());

        ui.on_event(&mut Event::key(KeyCode::D, 40, InputAction::Press));
        assert!(!ui.debug_mode());

        let mut released = Event::key(KeyCode::D, 40, InputAction::Release);
        assert!(!ui.on_event(&mut released));
        assert!(!ui.debug_mode());
    }

    #[test]
    fn test_recompile_hotkey_requests_shader() {
        let mut ui = manager(Fixture::default()).with_recompile_target("Custom.glsl");

        assert!(ui.on_event(&mut Event::key(KeyCode::R, 19, InputAction::Press)));
        assert_eq!(requests(&mut ui), vec![UiRequest::RecompileShader("Custom.glsl".to_string())]);

        assert!(!ui.on_event(&mut Event::key(KeyCode::A, 30, InputAction::Press)));
        assert!(!ui.has_requests());
    }

    #[test]
    fn test_resize_updates_layout_without_consuming() {
        let mut ui = manager(Fixture::default());
        let mut event = Event::window_resize(1024, 768);

        assert!(!ui.on_event(&mut event));
        assert_eq!(ui.layout().dimensions(), (1024.0, 768.0));
    }

    #[test]
    fn test_scroll_is_consumed() {
        let mut ui = manager(Fixture::default());
        let mut event = Event::mouse_scrolled(0.0, -1.0);
        assert!(ui.on_event(&mut event));
    }
}
