//! Per-role shader programs with memoized uniform locations

use std::path::{Path, PathBuf};

use super::source::ShaderSource;
use super::{ShaderError, ShaderResult};
use crate::render::api::{GpuDevice, ProgramHandle, UniformValue};

/// Upper bound on cached uniform locations per shader
pub const MAX_CACHED_UNIFORMS: usize = 16;

/// Draw role a shader program serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderRole {
    /// Solid and rounded rectangles, borders
    Rectangle,
    /// Textured quads
    Image,
    /// Glyph quads
    Text,
}

impl ShaderRole {
    /// Every role, in initialization order
    pub const ALL: [Self; 3] = [Self::Rectangle, Self::Image, Self::Text];
}

/// Result of a uniform lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformLocation {
    /// Location on the active program
    Found(i32),
    /// The active program has no such uniform; uploads are skipped
    NotFound,
}

#[derive(Debug)]
struct Shader {
    name: String,
    source_path: PathBuf,
    role: ShaderRole,
    program: ProgramHandle,
    uniform_cache: Vec<(String, i32)>,
}

impl Shader {
    fn cached(&self, name: &str) -> Option<i32> {
        self.uniform_cache
            .iter()
            .find(|(cached, _)| cached == name)
            .map(|&(_, location)| location)
    }
}

/// Shader programs for every draw role
///
/// Exactly one program is active at a time; role switches go through
/// [`set_active`](Self::set_active) so redundant binds are skipped.
#[derive(Debug)]
pub struct ShaderLibrary {
    shaders: Vec<Shader>,
    active: Option<ShaderRole>,
}

fn build_program<D: GpuDevice>(device: &mut D, name: &str, path: &Path) -> ShaderResult<ProgramHandle> {
    let source = ShaderSource::load(path)?;
    device
        .compile_program(&source.vertex, &source.fragment)
        .map_err(|source| ShaderError::Build {
            name: name.to_string(),
            source,
        })
}

fn shader_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

impl ShaderLibrary {
    /// Compile one program per role and activate the rectangle shader
    ///
    /// Shader names are the file names of their source paths
    /// (`Rectangle.glsl`). Any failure is fatal and already-built programs
    /// are released.
    pub fn load<D: GpuDevice>(device: &mut D, sources: &[(ShaderRole, PathBuf)]) -> ShaderResult<Self> {
        let mut library = Self {
            shaders: Vec::with_capacity(ShaderRole::ALL.len()),
            active: None,
        };

        for role in ShaderRole::ALL {
            let Some((_, path)) = sources.iter().find(|(r, _)| *r == role) else {
                library.release(device);
                return Err(ShaderError::MissingRole(role));
            };

            let name = shader_name(path);
            let program = match build_program(device, &name, path) {
                Ok(program) => program,
                Err(err) => {
                    library.release(device);
                    return Err(err);
                }
            };

            log::debug!("Shader program compiled: {name} ({})", path.display());
            library.shaders.push(Shader {
                name,
                source_path: path.clone(),
                role,
                program,
                uniform_cache: Vec::with_capacity(MAX_CACHED_UNIFORMS),
            });
        }

        library.set_active(device, ShaderRole::Rectangle);
        log::info!("Shader library initialized with {} programs", library.shaders.len());
        Ok(library)
    }

    fn shader(&self, role: ShaderRole) -> Option<&Shader> {
        self.shaders.iter().find(|shader| shader.role == role)
    }

    /// Role of the bound program
    pub fn active_role(&self) -> Option<ShaderRole> {
        self.active
    }

    /// Program currently serving `role`
    pub fn program(&self, role: ShaderRole) -> Option<ProgramHandle> {
        self.shader(role).map(|shader| shader.program)
    }

    /// Number of uniform locations cached for `role`
    pub fn cached_uniform_count(&self, role: ShaderRole) -> usize {
        self.shader(role).map_or(0, |shader| shader.uniform_cache.len())
    }

    /// Bind the program for `role` unless it is already active
    pub fn set_active<D: GpuDevice>(&mut self, device: &mut D, role: ShaderRole) {
        if self.active == Some(role) {
            return;
        }
        let Some(program) = self.program(role) else {
            log::warn!("No shader loaded for role {role:?}");
            return;
        };
        device.use_program(program);
        self.active = Some(role);
    }

    /// Resolve `name` on the active program
    ///
    /// Cached locations are returned without touching the device. Misses are
    /// queried and memoized; unknown uniforms yield [`UniformLocation::NotFound`].
    pub fn uniform_location<D: GpuDevice>(&mut self, device: &mut D, name: &str) -> UniformLocation {
        let Some(role) = self.active else {
            log::warn!("Uniform {name} requested with no active shader");
            return UniformLocation::NotFound;
        };
        let Some(shader) = self.shaders.iter_mut().find(|shader| shader.role == role) else {
            return UniformLocation::NotFound;
        };

        if let Some(location) = shader.cached(name) {
            return UniformLocation::Found(location);
        }

        let Some(location) = device.uniform_location(shader.program, name) else {
            log::warn!("Could not find uniform {name} in shader {}", shader.name);
            return UniformLocation::NotFound;
        };

        debug_assert!(
            shader.uniform_cache.len() < MAX_CACHED_UNIFORMS,
            "uniform cache of {} is full",
            shader.name
        );
        if shader.uniform_cache.len() < MAX_CACHED_UNIFORMS {
            shader.uniform_cache.push((name.to_string(), location));
        } else {
            log::error!(
                "Uniform cache of {} is full ({MAX_CACHED_UNIFORMS}), not caching {name}",
                shader.name
            );
        }
        UniformLocation::Found(location)
    }

    /// Upload `value` to `name` on the active program
    ///
    /// Silently skipped when the uniform does not exist.
    pub fn upload<D: GpuDevice>(&mut self, device: &mut D, name: &str, value: UniformValue) {
        if let UniformLocation::Found(location) = self.uniform_location(device, name) {
            device.upload_uniform(location, value);
        }
    }

    /// Rebuild the shader called `name` from its source file
    ///
    /// On success the old program is deleted, the uniform cache cleared and
    /// the new program rebound if it was active. On failure the previous
    /// program and cache are kept.
    pub fn recompile<D: GpuDevice>(&mut self, device: &mut D, name: &str) -> ShaderResult<()> {
        let active = self.active;
        let Some(shader) = self.shaders.iter_mut().find(|shader| shader.name == name) else {
            return Err(ShaderError::UnknownShader(name.to_string()));
        };

        let program = build_program(device, &shader.name, &shader.source_path)?;

        device.delete_program(shader.program);
        shader.program = program;
        shader.uniform_cache.clear();
        if active == Some(shader.role) {
            device.use_program(program);
        }

        log::info!("Recompiled shader {name}");
        Ok(())
    }

    fn release<D: GpuDevice>(&mut self, device: &mut D) {
        for shader in self.shaders.drain(..) {
            device.delete_program(shader.program);
        }
        self.active = None;
    }

    /// Delete every program
    pub fn shutdown<D: GpuDevice>(&mut self, device: &mut D) {
        self.release(device);
        log::debug!("Shader library shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{write_temp_file, DeviceCall, RecordingDevice};

    const VALID: &str = "#shader vertex\nvoid main() {}\n#shader fragment\nvoid main() {}\n";

    fn sources(tag: &str) -> Vec<(ShaderRole, PathBuf)> {
        vec![
            (ShaderRole::Rectangle, write_temp_file(&format!("{tag}/Rectangle.glsl"), VALID)),
            (ShaderRole::Image, write_temp_file(&format!("{tag}/Texture.glsl"), VALID)),
            (ShaderRole::Text, write_temp_file(&format!("{tag}/Text.glsl"), VALID)),
        ]
    }

    #[test]
    fn test_load_builds_every_role_and_activates_rectangle() {
        let mut device = RecordingDevice::new();
        let library = ShaderLibrary::load(&mut device, &sources("load")).unwrap();

        assert_eq!(library.active_role(), Some(ShaderRole::Rectangle));
        for role in ShaderRole::ALL {
            assert!(library.program(role).is_some());
        }
        let rect = library.program(ShaderRole::Rectangle).unwrap();
        assert_eq!(device.calls.last(), Some(&DeviceCall::UseProgram(rect)));
    }

    #[test]
    fn test_missing_role_fails_and_releases_programs() {
        let mut device = RecordingDevice::new();
        let mut partial = sources("missing");
        partial.retain(|(role, _)| *role != ShaderRole::Text);

        let err = ShaderLibrary::load(&mut device, &partial).unwrap_err();
        assert!(matches!(err, ShaderError::MissingRole(ShaderRole::Text)));
        assert_eq!(device.live_programs(), 0);
    }

    #[test]
    fn test_set_active_skips_redundant_binds() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("bind")).unwrap();
        device.calls.clear();

        library.set_active(&mut device, ShaderRole::Rectangle);
        assert!(device.calls.is_empty());

        library.set_active(&mut device, ShaderRole::Image);
        library.set_active(&mut device, ShaderRole::Image);
        assert_eq!(device.calls.len(), 1);
        assert_eq!(library.active_role(), Some(ShaderRole::Image));
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("cache")).unwrap();

        let first = library.uniform_location(&mut device, "uColor");
        let queries = device.uniform_queries();
        let second = library.uniform_location(&mut device, "uColor");

        assert!(matches!(first, UniformLocation::Found(_)));
        assert_eq!(first, second);
        assert_eq!(device.uniform_queries(), queries);
        assert_eq!(library.cached_uniform_count(ShaderRole::Rectangle), 1);
    }

    #[test]
    fn test_unknown_uniform_skips_upload() {
        let mut device = RecordingDevice::new().without_uniform("uMissing");
        let mut library = ShaderLibrary::load(&mut device, &sources("unknown")).unwrap();
        device.calls.clear();

        library.upload(&mut device, "uMissing", UniformValue::Float(1.0));

        assert_eq!(
            library.uniform_location(&mut device, "uMissing"),
            UniformLocation::NotFound
        );
        assert!(!device.calls.iter().any(|call| matches!(call, DeviceCall::Upload(..))));
        assert_eq!(library.cached_uniform_count(ShaderRole::Rectangle), 0);
    }

    #[test]
    fn test_caches_are_per_program() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("per_program")).unwrap();

        library.uniform_location(&mut device, "uColor");
        library.set_active(&mut device, ShaderRole::Text);
        library.uniform_location(&mut device, "uColor");

        assert_eq!(library.cached_uniform_count(ShaderRole::Rectangle), 1);
        assert_eq!(library.cached_uniform_count(ShaderRole::Text), 1);
        assert_eq!(device.uniform_queries(), 2);
    }

    #[test]
    fn test_recompile_success_replaces_program_and_clears_cache() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("recompile_ok")).unwrap();
        library.uniform_location(&mut device, "uColor");
        let old = library.program(ShaderRole::Rectangle).unwrap();

        library.recompile(&mut device, "Rectangle.glsl").unwrap();

        let new = library.program(ShaderRole::Rectangle).unwrap();
        assert_ne!(old, new);
        assert_eq!(library.cached_uniform_count(ShaderRole::Rectangle), 0);
        assert!(device.calls.contains(&DeviceCall::DeleteProgram(old)));
        assert_eq!(device.calls.last(), Some(&DeviceCall::UseProgram(new)));
    }

    #[test]
    fn test_recompile_inactive_shader_does_not_rebind() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("recompile_inactive")).unwrap();
        device.calls.clear();

        library.recompile(&mut device, "Text.glsl").unwrap();

        assert!(!device.calls.iter().any(|call| matches!(call, DeviceCall::UseProgram(_))));
        assert_eq!(library.active_role(), Some(ShaderRole::Rectangle));
    }

    #[test]
    fn test_recompile_failure_keeps_program_and_cache() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("recompile_fail")).unwrap();
        library.uniform_location(&mut device, "uColor");
        let old = library.program(ShaderRole::Rectangle).unwrap();

        device.fail_compiles = true;
        let err = library.recompile(&mut device, "Rectangle.glsl").unwrap_err();

        assert!(matches!(err, ShaderError::Build { .. }));
        assert_eq!(library.program(ShaderRole::Rectangle), Some(old));
        assert_eq!(library.cached_uniform_count(ShaderRole::Rectangle), 1);
        assert!(!device.calls.contains(&DeviceCall::DeleteProgram(old)));
    }

    #[test]
    fn test_recompile_with_broken_source_keeps_program() {
        let mut device = RecordingDevice::new();
        let paths = sources("recompile_broken");
        let mut library = ShaderLibrary::load(&mut device, &paths).unwrap();
        let old = library.program(ShaderRole::Image).unwrap();

        write_temp_file("recompile_broken/Texture.glsl", "#shader vertex\nno fragment here");
        let err = library.recompile(&mut device, "Texture.glsl").unwrap_err();

        assert!(matches!(err, ShaderError::MissingMarker { .. }));
        assert_eq!(library.program(ShaderRole::Image), Some(old));
    }

    #[test]
    fn test_recompile_unknown_name() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("recompile_unknown")).unwrap();
        assert!(matches!(
            library.recompile(&mut device, "Nope.glsl"),
            Err(ShaderError::UnknownShader(_))
        ));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_full_cache_returns_location_without_caching() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("overflow")).unwrap();
        for i in 0..MAX_CACHED_UNIFORMS {
            library.uniform_location(&mut device, &format!("u{i}"));
        }

        let extra = library.uniform_location(&mut device, "uExtra");

        assert!(matches!(extra, UniformLocation::Found(_)));
        assert_eq!(library.cached_uniform_count(ShaderRole::Rectangle), MAX_CACHED_UNIFORMS);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "uniform cache")]
    fn test_full_cache_asserts_in_debug() {
        let mut device = RecordingDevice::new();
        let mut library = ShaderLibrary::load(&mut device, &sources("overflow_debug")).unwrap();
        for i in 0..=MAX_CACHED_UNIFORMS {
            library.uniform_location(&mut device, &format!("u{i}"));
        }
    }
}
