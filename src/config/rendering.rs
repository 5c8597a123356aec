use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::lesson::Lesson;
use crate::render::shaders::SourcePolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Upper bound on MSAA samples; the best config at or below it wins.
    pub samples: u8,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mai First Play".to_string(),
            width: 1024,
            height: 768,
            samples: 4,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub lesson: Lesson,
    pub clear_color: [f32; 4],
    pub frame_interval_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            lesson: Lesson::Triangle,
            clear_color: [0.0, 0.0, 0.4, 0.0],
            frame_interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
    /// Vertex stage used by lessons that apply the MVP matrix.
    pub transform_vertex: PathBuf,
    pub policy: SourcePolicy,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/simple.vert.glsl"),
            fragment: PathBuf::from("shaders/simple.frag.glsl"),
            transform_vertex: PathBuf::from("shaders/transform.vert.glsl"),
            policy: SourcePolicy::Lenient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            eye: [4.0, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}
