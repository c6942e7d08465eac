//! Draw command interpreter
//!
//! Walks one frame's ordered [`DrawCommand`]s and turns each into shader
//! binds, uniform uploads and unit-quad draws on a [`GpuDevice`]. Paint
//! order becomes depth: every opaque draw takes the next depth index, and
//! the orthographic projection maps higher indices closer to the viewer.
//!
//! Uniforms shared by the quad shaders:
//!
//! | uniform            | value                                  |
//! |--------------------|----------------------------------------|
//! | `uViewProjection`  | pixel-space orthographic projection    |
//! | `uPosition`        | top-left corner and depth `(x, y, z)`  |
//! | `uSize`            | quad size in pixels                    |
//! | `uColor`           | fill, border or image tint color       |
//! | `uCornerRadius`    | per-corner radius (tl, tr, bl, br)     |
//! | `uBorderThickness` | per-side width (l, r, t, b), 0 = fill  |
//! | `uTexture`         | sampler slot for image and glyph quads |
//! | `uTextColor`       | glyph color                            |
//! | `uUseTexture`      | 0 for untextured placeholder glyphs    |


use super::api::{GpuDevice, ScissorRect, UniformValue};
use super::shader::{ShaderLibrary, ShaderResult, ShaderRole};
use super::text::TextMeasurer;
use super::texture::{TextureName, TextureRegistry};
use crate::events::{dispatch, Event, EventKind};
use crate::foundation::math::{ortho_top_left, to_columns, Mat4};
use crate::ui::backend::UIRenderBackend;
use crate::ui::rendering::{BorderWidth, BoundingBox, Color, CornerRadius, DrawCommand};

/// Depth range covered by the projection, in draws per frame
pub const MAX_DEPTH: f32 = 10_000.0;

/// Color the framebuffer is cleared to
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

const TEXTURE_SLOT: u32 = 0;

/// Pixel-space orthographic projection with the origin at the top-left
pub fn pixel_projection(width: u32, height: u32) -> Mat4 {
    ortho_top_left(width as f32, height as f32, MAX_DEPTH)
}

/// Convert a top-left-origin box into a bottom-left-origin scissor rectangle
pub fn scissor_rect(bounds: &BoundingBox, framebuffer_height: u32) -> ScissorRect {
    let height = bounds.height.max(0.0).round() as i32;
    ScissorRect {
        x: bounds.x.round() as i32,
        y: framebuffer_height as i32 - (bounds.y.round() as i32 + height),
        width: bounds.width.max(0.0).round() as i32,
        height,
    }
}

/// Quad parameters uploaded before one draw
struct Quad {
    bounds: BoundingBox,
    color: Color,
    corner_radius: CornerRadius,
    border: BorderWidth,
}

/// Interprets draw commands against a GPU device
pub struct CommandRenderer<D: GpuDevice> {
    device: D,
    shaders: ShaderLibrary,
    textures: TextureRegistry,
    text: Box<dyn TextMeasurer>,
    projection: Mat4,
    size: (u32, u32),
    depth: u32,
    clip_stack: Vec<BoundingBox>,
    clear_color: [f32; 4],
}

impl<D: GpuDevice> CommandRenderer<D> {
    /// Create a renderer for a `width` x `height` framebuffer
    pub fn new(
        mut device: D,
        shaders: ShaderLibrary,
        textures: TextureRegistry,
        text: Box<dyn TextMeasurer>,
        width: u32,
        height: u32,
    ) -> Self {
        device.set_viewport(width, height);
        log::info!("Command renderer created ({width}x{height})");
        Self {
            device,
            shaders,
            textures,
            text,
            projection: pixel_projection(width.max(1), height.max(1)),
            size: (width, height),
            depth: 0,
            clip_stack: Vec::new(),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }

    /// Use a different clear color
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Start a frame: clear, reset depth and clipping
    pub fn begin_frame(&mut self) {
        self.depth = 0;
        self.clip_stack.clear();
        self.device.set_scissor(None);
        self.device.begin_frame(self.clear_color);
    }

    /// Finish a frame
    pub fn end_frame(&mut self) {
        if !self.clip_stack.is_empty() {
            log::warn!("{} clip region(s) left open at end of frame", self.clip_stack.len());
            self.clip_stack.clear();
            self.device.set_scissor(None);
        }
    }

    /// Route one event; resizes update projection and viewport
    ///
    /// Never consumes the event.
    pub fn on_event(&mut self, event: &mut Event) -> bool {
        dispatch(EventKind::WindowResize, event, |e| {
            if let Some((width, height)) = e.window_size() {
                self.resize(width.max(0) as u32, height.max(0) as u32);
            }
            false
        })
    }

    /// Resize the framebuffer
    ///
    /// A zero width or height (an iconified window) is recorded but keeps the
    /// previous projection and viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        if width == 0 || height == 0 {
            log::debug!("Keeping previous projection for empty framebuffer {width}x{height}");
            return;
        }
        self.projection = pixel_projection(width, height);
        self.device.set_viewport(width, height);
        log::debug!("Renderer resized to {width}x{height}");
    }

    /// Rebuild the named shader from its source file
    pub fn recompile_shader(&mut self, name: &str) -> ShaderResult<()> {
        self.shaders.recompile(&mut self.device, name)
    }

    /// Execute one command
    pub fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Rectangle {
                bounds,
                color,
                corner_radius,
            } => self.draw_rectangle(Quad {
                bounds: *bounds,
                color: *color,
                corner_radius: *corner_radius,
                border: BorderWidth::default(),
            }),
            DrawCommand::Border {
                bounds,
                color,
                width,
                corner_radius,
            } => self.draw_rectangle(Quad {
                bounds: *bounds,
                color: *color,
                corner_radius: *corner_radius,
                border: *width,
            }),
            DrawCommand::Image {
                bounds,
                texture,
                tint,
                corner_radius,
            } => self.draw_image(*texture, Quad {
                bounds: *bounds,
                color: *tint,
                corner_radius: *corner_radius,
                border: BorderWidth::default(),
            }),
            DrawCommand::Text {
                bounds,
                text,
                font_size,
                color,
            } => self.draw_text(bounds, text, *font_size, *color),
            DrawCommand::ClipStart { bounds } => self.push_clip(bounds),
            DrawCommand::ClipEnd { .. } => self.pop_clip(),
            DrawCommand::Custom { tag, .. } => {
                log::trace!("Skipping custom draw command {tag}");
            }
        }
    }

    fn next_depth(&mut self) -> f32 {
        let depth = self.depth as f32;
        self.depth += 1;
        depth
    }

    fn upload(&mut self, name: &str, value: UniformValue) {
        self.shaders.upload(&mut self.device, name, value);
    }

    fn upload_quad(&mut self, quad: &Quad) {
        let depth = self.next_depth();
        let projection = to_columns(&self.projection);
        self.upload("uViewProjection", UniformValue::Mat4(projection));
        self.upload("uPosition", UniformValue::Vec3([quad.bounds.x, quad.bounds.y, depth]));
        self.upload("uSize", UniformValue::Vec2([quad.bounds.width, quad.bounds.height]));
        self.upload("uColor", UniformValue::Vec4(quad.color.to_array()));
        self.upload("uCornerRadius", UniformValue::Vec4(quad.corner_radius.to_array()));
        self.upload("uBorderThickness", UniformValue::Vec4(quad.border.to_array()));
    }

    fn draw_rectangle(&mut self, quad: Quad) {
        self.shaders.set_active(&mut self.device, ShaderRole::Rectangle);
        self.upload_quad(&quad);
        self.device.draw_quad();
    }

    fn draw_image(&mut self, texture: TextureName, quad: Quad) {
        self.shaders.set_active(&mut self.device, ShaderRole::Image);
        self.upload_quad(&quad);
        self.upload("uTexture", UniformValue::Int(TEXTURE_SLOT as i32));
        let handle = self.textures.get(texture);
        self.device.bind_texture(TEXTURE_SLOT, handle);
        self.device.draw_quad();
    }

    fn draw_text(&mut self, bounds: &BoundingBox, text: &str, font_size: u16, color: Color) {
        self.shaders.set_active(&mut self.device, ShaderRole::Text);
        self.upload("uTextColor", UniformValue::Vec4(color.to_array()));
        self.upload("uTexture", UniformValue::Int(TEXTURE_SLOT as i32));

        for glyph in self.text.place_glyphs(text, font_size, (bounds.x, bounds.y)) {
            if let Some(texture) = glyph.texture {
                self.device.bind_texture(TEXTURE_SLOT, texture);
            }
            self.upload("uUseTexture", UniformValue::Int(i32::from(glyph.texture.is_some())));
            self.upload_quad(&Quad {
                bounds: glyph.bounds,
                color,
                corner_radius: CornerRadius::default(),
                border: BorderWidth::default(),
            });
            self.device.draw_quad();
        }
    }

    fn push_clip(&mut self, bounds: &BoundingBox) {
        let clip = match self.clip_stack.last() {
            Some(enclosing) => enclosing.intersect(bounds),
            None => *bounds,
        };
        self.clip_stack.push(clip);
        self.device.set_scissor(Some(scissor_rect(&clip, self.size.1)));
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("Clip end without a matching clip start");
            return;
        }
        let restored = self.clip_stack.last().map(|clip| scissor_rect(clip, self.size.1));
        self.device.set_scissor(restored);
    }

    /// Depth index the next draw will take
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Current view-projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Shader library
    pub fn shaders(&self) -> &ShaderLibrary {
        &self.shaders
    }

    /// Texture registry
    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Underlying device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable underlying device
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Release GPU programs
    pub fn shutdown(&mut self) {
        self.shaders.shutdown(&mut self.device);
        log::info!("Command renderer shut down");
    }
}

impl<D: GpuDevice> UIRenderBackend for CommandRenderer<D> {
    fn render(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.execute(command);
        }
    }

    fn set_screen_size(&mut self, width: u32, height: u32) {
        self.resize(width, height);
    }

    fn screen_size(&self) -> (u32, u32) {
        self.size
    }
}
