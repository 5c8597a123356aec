//! Rendering: shader loading, the camera, meshes and the per-lesson pipeline.
pub mod camera;
pub mod driver;
pub mod mesh;
pub mod pipeline;
pub mod shaders;

pub use camera::Camera;
pub use driver::{GlDriver, ProgramHandle, ShaderDriver, StageHandle, StageKind};
pub use mesh::{GpuMesh, MeshData, Primitive};
pub use pipeline::RenderPipeline;
pub use shaders::{ProgramReport, ShaderProgramLoader, ShaderSource, SourcePolicy};
