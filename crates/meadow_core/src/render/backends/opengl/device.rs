//! OpenGL implementation of [`GpuDevice`]
//!
//! Every draw is the same unit quad (`[0, 1]²`, six indices); shaders place
//! and size it from uniforms. Depth testing is enabled so paint order can be
//! expressed through the depth coordinate.

use std::ffi::{c_void, CString};

use crate::render::api::{
    GpuDevice, GpuError, GpuResult, ProgramHandle, ScissorRect, TextureFormat, TextureHandle,
    UniformValue,
};

const QUAD_VERTICES: [f32; 12] = [
    1.0, 0.0, 0.0, // top right
    1.0, 1.0, 0.0, // bottom right
    0.0, 1.0, 0.0, // bottom left
    0.0, 0.0, 0.0, // top left
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// GL object names of the shared unit quad
#[derive(Debug)]
struct UnitQuad {
    vao: u32,
    vbo: u32,
    ibo: u32,
}

/// OpenGL device bound to the current context
#[derive(Debug)]
pub struct GlDevice {
    quad: UnitQuad,
    textures: Vec<u32>,
}

impl GlDevice {
    /// Load GL function pointers and create the shared quad
    ///
    /// The context the loader resolves against must be current on this
    /// thread for the lifetime of the device.
    pub fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let quad = unsafe { create_unit_quad() };
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LEQUAL);
            gl::Enable(gl::BLEND);
            gl::BlendFuncSeparate(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA, gl::ONE, gl::ONE_MINUS_SRC_ALPHA);
        }

        log::info!("OpenGL device ready: {}", gl_string(gl::VERSION));
        Self {
            quad,
            textures: Vec::new(),
        }
    }
}

impl Drop for GlDevice {
    fn drop(&mut self) {
        unsafe {
            if !self.textures.is_empty() {
                gl::DeleteTextures(self.textures.len() as i32, self.textures.as_ptr());
            }
            gl::DeleteBuffers(1, &self.quad.ibo);
            gl::DeleteBuffers(1, &self.quad.vbo);
            gl::DeleteVertexArrays(1, &self.quad.vao);
        }
        log::debug!("OpenGL device released {} textures", self.textures.len());
    }
}

impl GpuDevice for GlDevice {
    fn compile_program(&mut self, vertex: &str, fragment: &str) -> GpuResult<ProgramHandle> {
        unsafe { link_program(vertex, fragment) }.map(ProgramHandle)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        unsafe { gl::DeleteProgram(program.0) };
    }

    fn use_program(&mut self, program: ProgramHandle) {
        unsafe { gl::UseProgram(program.0) };
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<i32> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(program.0, name.as_ptr()) };
        (location >= 0).then_some(location)
    }

    fn upload_uniform(&mut self, location: i32, value: UniformValue) {
        unsafe {
            match value {
                UniformValue::Int(v) => gl::Uniform1i(location, v),
                UniformValue::Float(v) => gl::Uniform1f(location, v),
                UniformValue::Vec2([x, y]) => gl::Uniform2f(location, x, y),
                UniformValue::Vec3([x, y, z]) => gl::Uniform3f(location, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => gl::Uniform4f(location, x, y, z, w),
                UniformValue::Mat4(columns) => {
                    gl::UniformMatrix4fv(location, 1, gl::FALSE, columns.as_ptr().cast());
                }
            }
        }
    }

    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: &[u8],
    ) -> GpuResult<TextureHandle> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(GpuError::TextureCreationFailed(format!(
                "{width}x{height} {format:?} needs {expected} bytes, got {}",
                pixels.len()
            )));
        }

        let (internal, layout) = match format {
            TextureFormat::Rgba8 => (gl::RGBA8, gl::RGBA),
            TextureFormat::R8 => (gl::R8, gl::RED),
        };

        let mut texture = 0u32;
        unsafe {
            gl::GenTextures(1, &mut texture);
            if texture == 0 {
                return Err(GpuError::TextureCreationFailed("glGenTextures returned 0".to_string()));
            }
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                internal as i32,
                width as i32,
                height as i32,
                0,
                layout,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr().cast(),
            );
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        self.textures.push(texture);
        Ok(TextureHandle(texture))
    }

    fn bind_texture(&mut self, slot: u32, texture: TextureHandle) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + slot);
            gl::BindTexture(gl::TEXTURE_2D, texture.0);
        }
    }

    fn draw_quad(&mut self) {
        unsafe {
            gl::BindVertexArray(self.quad.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                QUAD_INDICES.len() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }
    }

    fn set_scissor(&mut self, rect: Option<ScissorRect>) {
        unsafe {
            match rect {
                Some(rect) => {
                    gl::Enable(gl::SCISSOR_TEST);
                    gl::Scissor(rect.x, rect.y, rect.width, rect.height);
                }
                None => gl::Disable(gl::SCISSOR_TEST),
            }
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        let [r, g, b, a] = clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }
}

unsafe fn create_unit_quad() -> UnitQuad {
    let (mut vao, mut vbo, mut ibo) = (0u32, 0u32, 0u32);
    gl::GenVertexArrays(1, &mut vao);
    gl::BindVertexArray(vao);

    gl::GenBuffers(1, &mut vbo);
    gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
    gl::BufferData(
        gl::ARRAY_BUFFER,
        std::mem::size_of_val(&QUAD_VERTICES) as isize,
        QUAD_VERTICES.as_ptr().cast(),
        gl::STATIC_DRAW,
    );

    gl::GenBuffers(1, &mut ibo);
    gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
    gl::BufferData(
        gl::ELEMENT_ARRAY_BUFFER,
        std::mem::size_of_val(&QUAD_INDICES) as isize,
        QUAD_INDICES.as_ptr().cast(),
        gl::STATIC_DRAW,
    );

    gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, 3 * std::mem::size_of::<f32>() as i32, std::ptr::null());
    gl::EnableVertexAttribArray(0);
    gl::BindVertexArray(0);

    UnitQuad { vao, vbo, ibo }
}

unsafe fn link_program(vertex: &str, fragment: &str) -> GpuResult<u32> {
    let vs = compile_stage(gl::VERTEX_SHADER, "vertex", vertex)?;
    let fs = match compile_stage(gl::FRAGMENT_SHADER, "fragment", fragment) {
        Ok(fs) => fs,
        Err(err) => {
            gl::DeleteShader(vs);
            return Err(err);
        }
    };

    let program = gl::CreateProgram();
    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);
    gl::LinkProgram(program);
    gl::DeleteShader(vs);
    gl::DeleteShader(fs);

    let mut ok = 0i32;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut ok);
    if ok == 0 {
        let mut len = 0i32;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), buf.as_mut_ptr().cast());
        gl::DeleteProgram(program);
        return Err(GpuError::LinkFailed(info_log(&buf)));
    }
    Ok(program)
}

unsafe fn compile_stage(kind: u32, stage: &'static str, source: &str) -> GpuResult<u32> {
    let source = CString::new(source).map_err(|_| GpuError::CompileFailed {
        stage,
        log: "source contains an interior NUL byte".to_string(),
    })?;

    let shader = gl::CreateShader(kind);
    gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
    gl::CompileShader(shader);

    let mut ok = 0i32;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut ok);
    if ok == 0 {
        let mut len = 0i32;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), buf.as_mut_ptr().cast());
        gl::DeleteShader(shader);
        return Err(GpuError::CompileFailed {
            stage,
            log: info_log(&buf),
        });
    }
    Ok(shader)
}

fn info_log(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).trim_end_matches('\0').trim().to_string()
}

fn gl_string(name: u32) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "unknown".to_string();
    }
    unsafe { std::ffi::CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}
