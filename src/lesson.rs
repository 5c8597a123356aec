//! The tutorial progression. Each lesson adds one idea on top of the last.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::ShaderConfig;
use crate::render::mesh::MeshData;
use crate::utils::error::LessonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lesson {
    /// Open a window and clear it.
    Window,
    /// Draw one triangle in clip space.
    Triangle,
    /// Draw the triangle through a model-view-projection matrix.
    TriangleMvp,
    /// Draw a triangle strip in clip space.
    Strip,
    /// Draw the strip through an MVP that tracks the window's aspect ratio.
    StripWindow,
}

impl Lesson {
    pub const ALL: [Lesson; 5] = [
        Lesson::Window,
        Lesson::Triangle,
        Lesson::TriangleMvp,
        Lesson::Strip,
        Lesson::StripWindow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Lesson::Window => "window",
            Lesson::Triangle => "triangle",
            Lesson::TriangleMvp => "triangle-mvp",
            Lesson::Strip => "strip",
            Lesson::StripWindow => "strip-window",
        }
    }

    pub fn mesh(self) -> Option<MeshData> {
        match self {
            Lesson::Window => None,
            Lesson::Triangle | Lesson::TriangleMvp => Some(MeshData::triangle()),
            Lesson::Strip | Lesson::StripWindow => Some(MeshData::strip()),
        }
    }

    pub fn uses_camera(self) -> bool {
        matches!(self, Lesson::TriangleMvp | Lesson::StripWindow)
    }

    pub fn follows_window_aspect(self) -> bool {
        matches!(self, Lesson::StripWindow)
    }

    pub fn vertex_shader(self, shaders: &ShaderConfig) -> &Path {
        if self.uses_camera() {
            &shaders.transform_vertex
        } else {
            &shaders.vertex
        }
    }

    pub fn fragment_shader(self, shaders: &ShaderConfig) -> &Path {
        &shaders.fragment
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lesson {
    type Err = LessonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lesson::ALL
            .into_iter()
            .find(|lesson| lesson.name() == s)
            .ok_or_else(|| LessonError::Unknown(s.to_string()))
    }
}
