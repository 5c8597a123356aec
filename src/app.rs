use anyhow::Result;
use log::{error, info};
use std::time::{Duration, Instant};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    keyboard::{Key, NamedKey},
};

use crate::config::AppConfig;
use crate::lesson::Lesson;
use crate::render::{GlDriver, RenderPipeline};
use crate::utils::error::WindowError;
use crate::window::GlWindow;

/// Caps redraws to one per `interval`.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: None,
        }
    }

    pub fn ready(&self, now: Instant) -> bool {
        match self.last_frame {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    pub fn next_deadline(&self, now: Instant) -> Instant {
        match self.last_frame {
            Some(last) => (last + self.interval).max(now),
            None => now,
        }
    }
}

/// Opens the window and runs `lesson` until ESC or the window is closed.
pub fn run(lesson: Lesson, config: AppConfig) -> Result<()> {
    let event_loop = EventLoopBuilder::new().build().map_err(WindowError::from)?;
    let window = GlWindow::new(&event_loop, &config.window)?;
    let mut driver = GlDriver::new(window.gl());

    let mut pipeline = Some(RenderPipeline::new(&mut driver, lesson, &config, window.aspect_ratio())?);
    let mut limiter = FrameLimiter::new(Duration::from_millis(config.render.frame_interval_ms));
    info!("Running lesson '{}'", lesson);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => elwt.exit(),
            WindowEvent::Resized(size) => {
                if window.resize(size.width, size.height) {
                    if let Some(pipeline) = &mut pipeline {
                        pipeline.resize(size.width, size.height);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(pipeline) = &pipeline {
                    pipeline.draw(driver.gl());
                }
                if let Err(err) = window.swap_buffers() {
                    error!("Failed to present frame: {}", err);
                    elwt.exit();
                }
            }
            _ => (),
        },
        Event::AboutToWait => {
            let now = Instant::now();
            if limiter.ready(now) {
                limiter.mark(now);
                window.window().request_redraw();
            }
            elwt.set_control_flow(ControlFlow::WaitUntil(limiter.next_deadline(now)));
        }
        Event::LoopExiting => {
            if let Some(pipeline) = pipeline.take() {
                pipeline.release(&mut driver);
            }
            info!("Lesson '{}' finished", lesson);
        }
        _ => (),
    })
    .map_err(WindowError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_immediate() {
        let limiter = FrameLimiter::new(Duration::from_millis(16));
        let now = Instant::now();
        assert!(limiter.ready(now));
        assert_eq!(limiter.next_deadline(now), now);
    }

    #[test]
    fn test_one_frame_per_interval() {
        let mut limiter = FrameLimiter::new(Duration::from_millis(16));
        let start = Instant::now();
        limiter.mark(start);

        assert!(!limiter.ready(start + Duration::from_millis(5)));
        assert_eq!(
            limiter.next_deadline(start + Duration::from_millis(5)),
            start + Duration::from_millis(16)
        );
        assert!(limiter.ready(start + Duration::from_millis(16)));
    }

    #[test]
    fn test_late_deadline_never_in_the_past() {
        let mut limiter = FrameLimiter::new(Duration::from_millis(16));
        let start = Instant::now();
        limiter.mark(start);

        let late = start + Duration::from_millis(100);
        assert_eq!(limiter.next_deadline(late), late);
    }
}
