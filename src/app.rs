//! Frame loop: poll input, move the camera, render, blit

use crate::camera::{Action, CameraSpeeds, CameraState};
use crate::raster::GlyphGrid;
use crate::renderer::{FrameStats, Renderer};
use crate::terminal::{DisplaySink, InputSource};
use std::io;
use std::time::Instant;

/// Log frame stats every this many frames
const STATS_INTERVAL: u64 = 120;

/// Result of stepping the app by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered(FrameStats),
    Quit,
}

/// Interactive state threaded from frame to frame
pub struct App {
    renderer: Renderer,
    camera: CameraState,
    speeds: CameraSpeeds,
    /// Animation time driving the spin; stands still while paused
    time: f64,
    paused: bool,
    frames: u64,
}

impl App {
    pub fn new(renderer: Renderer, speeds: CameraSpeeds) -> Self {
        Self {
            renderer,
            camera: CameraState::default(),
            speeds,
            time: 0.0,
            paused: false,
            frames: 0,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Advance by one frame given this frame's input and the seconds since
    /// the previous one
    pub fn frame(&mut self, action: Action, dt: f64) -> FrameOutcome {
        match action {
            Action::Quit => return FrameOutcome::Quit,
            Action::Reset => {
                tracing::info!("Camera reset");
                self.camera = CameraState::default();
            }
            Action::Pause => {
                self.paused = !self.paused;
                tracing::info!(paused = self.paused, "Spin toggled");
            }
            _ => self.camera = self.camera.advance(action, dt, &self.speeds),
        }

        if !self.paused {
            self.time += dt;
        }

        let stats = self.renderer.render(self.time, &self.camera);
        self.frames += 1;
        if self.frames % STATS_INTERVAL == 0 {
            tracing::trace!(
                frame = self.frames,
                written = stats.written,
                occluded = stats.occluded,
                behind_camera = stats.behind_camera,
                off_screen = stats.off_screen,
                "Frame stats"
            );
        }

        FrameOutcome::Rendered(stats)
    }

    pub fn glyphs(&self) -> GlyphGrid {
        self.renderer.to_glyphs()
    }

    /// One-line camera readout shown above the frame
    pub fn status_line(&self, fps: f64) -> String {
        let p = self.camera.position;
        format!(
            "pos ({:.1}, {:.1}, {:.1}) yaw {:.2} pitch {:.2} | {:.0} fps{} | [wasd] move [qe] up/down [ijkl] look [r]eset [space] pause [esc] quit",
            p.x,
            p.y,
            p.z,
            self.camera.yaw,
            self.camera.pitch,
            fps,
            if self.paused { " (paused)" } else { "" }
        )
    }

    /// Run until the input source asks to quit. dt comes from the wall clock
    /// and there is no frame pacing.
    pub fn run<T>(&mut self, terminal: &mut T) -> io::Result<()>
    where
        T: InputSource + DisplaySink,
    {
        let mut last = Instant::now();
        tracing::info!("Render loop started");

        loop {
            let action = match terminal.poll_action() {
                Ok(action) => action,
                Err(e) => {
                    tracing::warn!(error = %e, "Input error");
                    Action::None
                }
            };

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;

            if let FrameOutcome::Quit = self.frame(action, dt) {
                break;
            }

            let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
            if let Err(e) = terminal.blit(&self.glyphs(), &self.status_line(fps)) {
                if e.kind() == io::ErrorKind::BrokenPipe {
                    tracing::warn!("Output closed");
                    break;
                }
                return Err(e);
            }
        }

        tracing::info!(frames = self.frames, "Render loop finished");
        Ok(())
    }
}
