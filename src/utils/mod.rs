pub mod error;

pub use error::{ConfigError, LessonError, ShaderError, WindowError};
