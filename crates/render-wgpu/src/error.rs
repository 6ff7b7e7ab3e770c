use std::path::PathBuf;

/// Errors from GPU setup and stage construction. All of them are fatal at
/// startup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not read shader {path}: {source}")]
    ShaderNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader {path} is empty")]
    EmptyShader { path: PathBuf },
    #[error("shader compile error in {label}: {message}")]
    ShaderCompile { label: String, message: String },
    #[error("pipeline creation failed for {label}: {message}")]
    Pipeline { label: String, message: String },
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
