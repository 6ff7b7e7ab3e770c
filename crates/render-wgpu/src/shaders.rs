use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::stage::Stage;

/// Vertex positions passed straight through, filled solid red.
pub const FLAT_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> @builtin(position) vec4<f32> {
    return vec4<f32>(vertex.position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

/// Positions transformed by the MVP uniform, filled solid red.
pub const MVP_SHADER: &str = r#"
struct Mvp {
    transform: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> MVP: Mvp;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> @builtin(position) vec4<f32> {
    return MVP.transform * vec4<f32>(vertex.position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

/// Positions transformed by the MVP uniform, per-vertex color interpolated.
pub const COLORED_SHADER: &str = r#"
struct Mvp {
    transform: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> MVP: Mvp;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = MVP.transform * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// Entry points every stage shader must define.
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// The built-in shader programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Flat,
    Mvp,
    Colored,
}

impl ShaderKind {
    pub fn builtin_source(self) -> &'static str {
        match self {
            ShaderKind::Flat => FLAT_SHADER,
            ShaderKind::Mvp => MVP_SHADER,
            ShaderKind::Colored => COLORED_SHADER,
        }
    }
}

/// Where stage shader source comes from: compiled-in WGSL, or `<stage>.wgsl`
/// files in a directory.
#[derive(Debug, Clone, Default)]
pub struct ShaderLibrary {
    dir: Option<PathBuf>,
}

impl ShaderLibrary {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Path a stage's shader is read from, if a directory is configured.
    pub fn path_for(&self, stage: Stage) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.wgsl", stage.name())))
    }

    /// WGSL source for `stage`.
    pub fn source(&self, stage: Stage) -> Result<Cow<'static, str>, RenderError> {
        let Some(path) = self.path_for(stage) else {
            return Ok(Cow::Borrowed(stage.shader().builtin_source()));
        };

        let text = std::fs::read_to_string(&path).map_err(|source| RenderError::ShaderNotFound {
            path: path.clone(),
            source,
        })?;
        if text.trim().is_empty() {
            return Err(RenderError::EmptyShader { path });
        }
        tracing::info!(path = %path.display(), "loaded shader override");
        Ok(Cow::Owned(text))
    }
}
