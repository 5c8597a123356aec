pub mod app;
pub mod cli;
pub mod config;
pub mod lesson;
pub mod render;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use app::{run, FrameLimiter};
pub use config::AppConfig;
pub use lesson::Lesson;
pub use render::driver::{GlDriver, ProgramHandle, ShaderDriver, StageHandle, StageKind};
pub use render::shaders::{ProgramReport, ShaderProgramLoader, ShaderSource, SourcePolicy};
pub use utils::error::{ConfigError, LessonError, ShaderError, WindowError};
pub use window::GlWindow;
