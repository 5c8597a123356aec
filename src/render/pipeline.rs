use anyhow::{anyhow, Result};
use glam::Mat4;
use glow::HasContext;
use log::{error, info, warn};

use super::camera::Camera;
use super::driver::{GlDriver, ProgramHandle, ShaderDriver};
use super::mesh::GpuMesh;
use super::shaders::ShaderProgramLoader;
use crate::config::AppConfig;
use crate::lesson::Lesson;

pub const MVP_UNIFORM: &str = "MVP";

/// Everything one lesson draws each frame.
pub struct RenderPipeline {
    lesson: Lesson,
    program: Option<ProgramHandle>,
    mesh: Option<GpuMesh>,
    camera: Option<Camera>,
    mvp_location: Option<glow::UniformLocation>,
    model: Mat4,
}

impl RenderPipeline {
    pub fn new(driver: &mut GlDriver, lesson: Lesson, config: &AppConfig, aspect_ratio: f32) -> Result<Self> {
        let [r, g, b, a] = config.render.clear_color;
        unsafe { driver.gl().clear_color(r, g, b, a) };

        let Some(data) = lesson.mesh() else {
            info!("Lesson '{}' draws nothing", lesson);
            return Ok(Self {
                lesson,
                program: None,
                mesh: None,
                camera: None,
                mvp_location: None,
                model: Mat4::IDENTITY,
            });
        };

        let report = ShaderProgramLoader::new(driver)
            .with_policy(config.shaders.policy)
            .load(
                lesson.vertex_shader(&config.shaders),
                lesson.fragment_shader(&config.shaders),
            )?;
        if !report.is_ok() {
            error!("Shader program for lesson '{}' is unusable, output will be undefined", lesson);
        }
        let program = report.program;

        let mesh = GpuMesh::upload(driver.gl(), &data).map_err(|err| {
            driver.release_program(program);
            anyhow!("vertex upload failed: {err}")
        })?;

        let (camera, mvp_location) = if lesson.uses_camera() {
            let location = unsafe { driver.gl().get_uniform_location(program.native(), MVP_UNIFORM) };
            if location.is_none() {
                warn!("Uniform '{}' not found in shader", MVP_UNIFORM);
            }
            (Some(Camera::from_config(&config.camera, aspect_ratio)), location)
        } else {
            (None, None)
        };

        Ok(Self {
            lesson,
            program: Some(program),
            mesh: Some(mesh),
            camera,
            mvp_location,
            model: Mat4::IDENTITY,
        })
    }

    pub fn lesson(&self) -> Lesson {
        self.lesson
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.lesson.follows_window_aspect() {
            return;
        }
        if let Some(camera) = &mut self.camera {
            camera.set_viewport(width, height);
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let (Some(program), Some(mesh)) = (self.program, &self.mesh) else {
            return;
        };

        unsafe {
            gl.use_program(Some(program.native()));
            if let (Some(camera), Some(location)) = (&self.camera, &self.mvp_location) {
                let mvp = camera.mvp(self.model);
                gl.uniform_matrix_4_f32_slice(Some(location), false, &mvp.to_cols_array());
            }
        }
        mesh.draw(gl);
        unsafe { gl.use_program(None) };
    }

    pub fn release(mut self, driver: &mut GlDriver) {
        if let Some(mesh) = self.mesh.take() {
            mesh.release(driver.gl());
        }
        if let Some(program) = self.program.take() {
            driver.release_program(program);
        }
    }
}
