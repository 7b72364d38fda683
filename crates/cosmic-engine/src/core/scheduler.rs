//! Frame scheduling.
//!
//! The host's refresh signal calls [`FrameDriver::tick`] with a raw frame
//! delta; the driver converts it into fixed simulation steps, applies the
//! scene's per-frame clear policy, and repaints. One driver owns one
//! scene and one surface; swapping scenes swaps drivers.

use crate::api::types::SceneEvent;
use crate::input::queue::InputEvent;
use crate::render::color::Rgba;
use crate::render::surface::Surface;

use super::time::FrameTimer;

/// How the surface is prepared before each repaint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearMode {
    /// Blend a translucent color over the previous frame, leaving motion
    /// trails. The cosmic backdrop runs this way.
    Fade(Rgba),
    /// Wipe to transparent. The drawing view does this and re-composites
    /// the persistent artwork on top.
    Clear,
}

/// A running simulation that the driver schedules.
pub trait Scene {
    /// Surface dimensions changed; regenerate anything size-dependent.
    fn resize(&mut self, width: u32, height: u32);
    /// One pointer event, delivered in arrival order before the update.
    fn handle_input(&mut self, event: InputEvent);
    /// One fixed simulation step.
    fn update(&mut self, dt: f32, events: &mut Vec<SceneEvent>);
    /// Repaint onto the prepared surface.
    fn draw(&mut self, surface: &mut Surface);
    fn clear_mode(&self) -> ClearMode;
}

pub struct FrameDriver<S> {
    scene: S,
    surface: Surface,
    timer: FrameTimer,
    running: bool,
}

impl<S: Scene> FrameDriver<S> {
    pub fn new(scene: S, fixed_dt: f32) -> Self {
        FrameDriver {
            scene,
            surface: Surface::new(0, 0),
            timer: FrameTimer::new(fixed_dt),
            running: true,
        }
    }

    /// Resize between ticks. Banked frame time is dropped so the first
    /// tick at the new size does not run a catch-up burst.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.scene.resize(width, height);
        self.timer.reset();
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.scene.handle_input(event);
    }

    /// One host frame: run the due fixed steps, then clear and repaint.
    /// Collected scene events are appended to `events`.
    ///
    /// Nothing happens while cancelled or before the first resize, and
    /// the tick is safe to call either way.
    pub fn tick(&mut self, frame_dt: f32, events: &mut Vec<SceneEvent>) {
        if !self.running || self.surface.is_empty() {
            return;
        }
        let steps = self.timer.advance(frame_dt);
        for _ in 0..steps {
            self.scene.update(self.timer.step(), events);
        }
        if steps > 0 {
            match self.scene.clear_mode() {
                ClearMode::Fade(color) => self.surface.fill(color),
                ClearMode::Clear => self.surface.clear(),
            }
            self.scene.draw(&mut self.surface);
        }
    }

    /// Stop scheduling without tearing anything down.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Resume after a cancel. Banked time is dropped, not replayed.
    pub fn resume(&mut self) {
        if !self.running {
            self.running = true;
            self.timer.reset();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}
