//! Fixed-step clock
//!
//! Turns variable frame times into whole simulation steps of `SIM_DT`.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct StepClock {
    accumulator: f32,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time and return how many steps to run.
    ///
    /// Long frames are capped so a stall can't trigger a burst of catch-up
    /// steps.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }

    /// Time carried over to the next frame
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_frame_one_step() {
        let mut clock = StepClock::new();
        assert_eq!(clock.advance(SIM_DT), 1);
        assert!(clock.remainder() < 1e-6);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = StepClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.6), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert!((clock.remainder() - SIM_DT * 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = StepClock::new();
        let steps = clock.advance(5.0);
        assert!((5..=6).contains(&steps));
        assert!(steps <= MAX_SUBSTEPS);
        assert!(clock.remainder() < SIM_DT);
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut clock = StepClock::new();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.remainder(), 0.0);
    }
}
