/// Fixed timestep accumulator.
///
/// The host hands over whatever frame delta its refresh signal produced;
/// the simulations only ever see whole fixed steps, so behavior does not
/// drift with display refresh rate.
pub struct FrameTimer {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FrameTimer {
    pub const DEFAULT_STEP: f32 = 1.0 / 60.0;

    pub fn new(step: f32) -> Self {
        FrameTimer {
            step,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    /// Feed a frame delta; returns how many fixed steps to run now.
    /// The accumulator is capped so a long stall (tab in background)
    /// cannot snowball into an unbounded catch-up burst.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.step * self.max_steps as f32);
        let steps = (self.accumulator / self.step) as u32;
        self.accumulator -= steps as f32 * self.step;
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Drop any banked time, e.g. after a resize reinitialization.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_step_yields_one() {
        let mut t = FrameTimer::default();
        assert_eq!(t.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn partial_deltas_accumulate() {
        let mut t = FrameTimer::default();
        assert_eq!(t.advance(0.008), 0);
        assert_eq!(t.advance(0.010), 1);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut t = FrameTimer::default();
        assert_eq!(t.advance(2.0), 10);
    }

    #[test]
    fn negative_delta_ignored() {
        let mut t = FrameTimer::default();
        assert_eq!(t.advance(-1.0), 0);
        assert_eq!(t.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn reset_discards_banked_time() {
        let mut t = FrameTimer::default();
        t.advance(0.015);
        t.reset();
        assert_eq!(t.advance(0.001), 0);
    }
}
