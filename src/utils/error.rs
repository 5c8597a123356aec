use std::path::PathBuf;
use thiserror::Error;

use crate::render::driver::StageKind;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Driver refused to allocate a shader object: {0}")]
    Driver(String),

    #[error("Shader source not found: {path}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader compilation failed ({}): {log}", path.display())]
    Compilation {
        stage: StageKind,
        path: PathBuf,
        log: String,
    },

    #[error("Program linking failed: {0}")]
    Linking(String),
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to open window: {0}")]
    Display(String),

    #[error("Display builder returned no window")]
    NoWindow,

    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),
}

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("Unknown lesson: {0}")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
