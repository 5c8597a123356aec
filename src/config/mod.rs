pub mod core;
pub mod rendering;

pub use self::core::AppConfig;
pub use self::rendering::{CameraConfig, RenderConfig, ShaderConfig, WindowConfig};
