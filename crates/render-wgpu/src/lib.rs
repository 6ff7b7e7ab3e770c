//! wgpu render backend for the freelook stages.
//!
//! Each [`Stage`] is one step of the progression: a flat triangle, the same
//! triangle through an MVP transform, an indexed colored cube with depth
//! testing, and that cube seen through the free-look camera.
//!
//! # Invariants
//! - The renderer never mutates camera state; it only receives an MVP matrix.
//! - GPU handles are owned values and are released on drop, including on
//!   early-return error paths during construction.

mod error;
mod gpu;
mod mesh;
mod shaders;
mod stage;

pub use error::RenderError;
pub use gpu::{GpuContext, MSAA_SAMPLES, StageRenderer};
pub use mesh::{MeshBuffers, MeshData, Vertex, cube_mesh, triangle_mesh};
pub use shaders::{ShaderKind, ShaderLibrary};
pub use stage::Stage;
