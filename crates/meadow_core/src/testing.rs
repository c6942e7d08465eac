//! Test doubles for the window and GPU collaborators

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use crate::events::{Event, EventSink};
use crate::input::{InputSource, KeyCode, MouseButton};
use crate::render::api::{
    GpuDevice, GpuError, GpuResult, ProgramHandle, ScissorRect, TextureFormat, TextureHandle,
    UniformValue,
};
use crate::render::window::{WindowBackend, WindowState};

/// Write `contents` under a per-process temp directory and return the path
pub fn write_temp_file(relative: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join(format!("meadow_tests_{}", std::process::id()))
        .join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CompileProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    Upload(i32, UniformValue),
    CreateTexture {
        handle: TextureHandle,
        width: u32,
        height: u32,
        format: TextureFormat,
    },
    BindTexture(u32, TextureHandle),
    DrawQuad,
    Scissor(Option<ScissorRect>),
    Viewport(u32, u32),
    BeginFrame([f32; 4]),
}

/// [`GpuDevice`] that records every call
///
/// Uniform locations are unique across programs so uploads can be mapped
/// back to uniform names.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub calls: Vec<DeviceCall>,
    pub fail_compiles: bool,
    pub fail_textures: bool,
    missing_uniforms: Vec<String>,
    next_id: u32,
    live: HashSet<u32>,
    next_location: i32,
    locations: HashMap<(ProgramHandle, String), i32>,
    location_names: HashMap<i32, String>,
    queries: usize,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `name` as absent from every program
    pub fn without_uniform(mut self, name: &str) -> Self {
        self.missing_uniforms.push(name.to_string());
        self
    }

    pub fn uniform_queries(&self) -> usize {
        self.queries
    }

    pub fn live_programs(&self) -> usize {
        self.live.len()
    }

    pub fn draw_count(&self) -> usize {
        self.calls.iter().filter(|call| **call == DeviceCall::DrawQuad).count()
    }

    /// Every value uploaded to uniforms called `name`, in call order
    pub fn uploads_to(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::Upload(location, value)
                    if self.location_names.get(location).map(String::as_str) == Some(name) =>
                {
                    Some(*value)
                }
                _ => None,
            })
            .collect()
    }

    pub fn scissors(&self) -> Vec<Option<ScissorRect>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::Scissor(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn next_handle(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GpuDevice for RecordingDevice {
    fn compile_program(&mut self, _vertex: &str, _fragment: &str) -> GpuResult<ProgramHandle> {
        if self.fail_compiles {
            return Err(GpuError::CompileFailed {
                stage: "vertex",
                log: "scripted failure".to_string(),
            });
        }
        let program = ProgramHandle(self.next_handle());
        self.live.insert(program.0);
        self.calls.push(DeviceCall::CompileProgram(program));
        Ok(program)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.live.remove(&program.0);
        self.calls.push(DeviceCall::DeleteProgram(program));
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.calls.push(DeviceCall::UseProgram(program));
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<i32> {
        self.queries += 1;
        if self.missing_uniforms.iter().any(|missing| missing == name) {
            return None;
        }
        let key = (program, name.to_string());
        if let Some(location) = self.locations.get(&key) {
            return Some(*location);
        }
        let location = self.next_location;
        self.next_location += 1;
        self.locations.insert(key, location);
        self.location_names.insert(location, name.to_string());
        Some(location)
    }

    fn upload_uniform(&mut self, location: i32, value: UniformValue) {
        self.calls.push(DeviceCall::Upload(location, value));
    }

    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
        _pixels: &[u8],
    ) -> GpuResult<TextureHandle> {
        if self.fail_textures {
            return Err(GpuError::TextureCreationFailed("scripted failure".to_string()));
        }
        let handle = TextureHandle(self.next_handle());
        self.calls.push(DeviceCall::CreateTexture {
            handle,
            width,
            height,
            format,
        });
        Ok(handle)
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureHandle) {
        self.calls.push(DeviceCall::BindTexture(slot, texture));
    }

    fn draw_quad(&mut self) {
        self.calls.push(DeviceCall::DrawQuad);
    }

    fn set_scissor(&mut self, rect: Option<ScissorRect>) {
        self.calls.push(DeviceCall::Scissor(rect));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(DeviceCall::Viewport(width, height));
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.calls.push(DeviceCall::BeginFrame(clear_color));
    }
}

/// Scriptable [`WindowBackend`]
///
/// Each pump emits the next scripted batch of events to the sink.
pub struct MockWindow {
    state: WindowState,
    pub cursor: (f64, f64),
    pub buttons_down: HashSet<i32>,
    pub keys_down: HashSet<i32>,
    pub positions: Vec<(i32, i32)>,
    pub minimize_calls: u32,
    pub maximize_toggles: u32,
    pub pumps: u32,
    script: VecDeque<Vec<Event>>,
    sink: Option<EventSink>,
}

impl MockWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: WindowState::new("mock", width, height),
            cursor: (0.0, 0.0),
            buttons_down: HashSet::new(),
            keys_down: HashSet::new(),
            positions: Vec::new(),
            minimize_calls: 0,
            maximize_toggles: 0,
            pumps: 0,
            script: VecDeque::new(),
            sink: None,
        }
    }

    /// Queue events delivered on a future pump, one batch per pump
    pub fn script_frame(&mut self, events: Vec<Event>) {
        self.script.push_back(events);
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        if down {
            self.buttons_down.insert(button.0);
        } else {
            self.buttons_down.remove(&button.0);
        }
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }
}

impl InputSource for MockWindow {
    fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key.0)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button.0)
    }
}

impl WindowBackend for MockWindow {
    fn size(&self) -> (u32, u32) {
        (self.state.width, self.state.height)
    }

    fn position(&self) -> (i32, i32) {
        self.state.position
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.state.position = (x, y);
        self.positions.push((x, y));
    }

    fn minimize(&mut self) {
        self.minimize_calls += 1;
    }

    fn toggle_maximize(&mut self) {
        self.maximize_toggles += 1;
    }

    fn pump_events_and_swap_buffers(&mut self) {
        self.pumps += 1;
        let batch = self.script.pop_front().unwrap_or_default();
        for event in batch {
            if let Some((w, h)) = event.window_size() {
                self.state.width = w as u32;
                self.state.height = h as u32;
            }
            if let Some(sink) = self.sink.as_mut() {
                sink(event);
            }
        }
    }

    fn set_event_sink(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }

    fn state(&self) -> &WindowState {
        &self.state
    }
}
