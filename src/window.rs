//! Window, OpenGL context and surface creation.

use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glow::HasContext;
use glutin_winit::{DisplayBuilder, GlWindow as _};
use log::{info, warn};
use raw_window_handle::HasRawWindowHandle;
use std::num::NonZeroU32;
use std::sync::Arc;
use winit::{dpi::LogicalSize, event_loop::EventLoop, window::Window, window::WindowBuilder};

use crate::config::WindowConfig;
use crate::utils::error::WindowError;

/// A window with a current OpenGL 3.3 core context.
// Fields drop top to bottom: the surface and context go before the window.
pub struct GlWindow {
    gl: Arc<glow::Context>,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl GlWindow {
    pub fn new(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Self, WindowError> {
        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let max_samples = config.samples;
        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| pick_config(configs, max_samples))
            .map_err(|err| WindowError::Display(err.to_string()))?;
        let window = window.ok_or(WindowError::NoWindow)?;
        info!("Picked a GL config with {} samples", gl_config.num_samples());

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(window.raw_window_handle()));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
        let gl_context = not_current.make_current(&gl_surface)?;

        if config.vsync {
            if let Err(err) = gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN)) {
                warn!("Could not enable vsync: {}", err);
            }
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol)) };

        Ok(Self {
            gl: Arc::new(gl),
            gl_surface,
            gl_context,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn gl(&self) -> Arc<glow::Context> {
        Arc::clone(&self.gl)
    }

    /// Zero sizes (minimised windows) are ignored.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return false;
        };
        self.gl_surface.resize(&self.gl_context, w, h);
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        true
    }

    pub fn aspect_ratio(&self) -> f32 {
        let size = self.window.inner_size();
        if size.height == 0 {
            return 1.0;
        }
        size.width as f32 / size.height as f32
    }

    pub fn swap_buffers(&self) -> Result<(), WindowError> {
        self.gl_surface.swap_buffers(&self.gl_context)?;
        Ok(())
    }
}

// The most samples not above the requested maximum; glutin never hands over
// an empty set.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>, max_samples: u8) -> Config {
    configs
        .reduce(|best, candidate| {
            let samples = candidate.num_samples();
            if samples <= max_samples && (samples > best.num_samples() || best.num_samples() > max_samples) {
                candidate
            } else {
                best
            }
        })
        .expect("glutin offers at least one config")
}
