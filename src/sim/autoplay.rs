//! Demo mode - the slingshot fires itself
//!
//! Picks a random draw in the lower-left quadrant of the anchor, holds the
//! drag for a few ticks, releases, then waits for the shot to play out.
//! Seeded so a run can be replayed exactly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::GameState;
use super::tick::TickInput;

/// Ticks spent dragging before release
const AIM_TICKS: u32 = 10;
/// Ticks to wait after a shot (3 seconds at 60 Hz)
const SETTLE_TICKS: u32 = 180;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Aiming { target: Vec2, ticks_left: u32 },
    Settling { ticks_left: u32 },
}

/// Seeded input generator
#[derive(Debug, Clone)]
pub struct Autoplay {
    rng: Pcg32,
    phase: Phase,
}

impl Autoplay {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Settling { ticks_left: 0 },
        }
    }

    /// Offset from the anchor to drag to (world units)
    fn pick_draw(&mut self, max_distance: f32) -> Vec2 {
        let distance = self.rng.random_range(max_distance * 0.3..=max_distance);
        let angle = self.rng.random_range(0.0..=std::f32::consts::FRAC_PI_2);
        -Vec2::new(angle.cos(), angle.sin()) * distance
    }

    /// Input for the next tick
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        match self.phase {
            Phase::Settling { ticks_left } if ticks_left > 0 => {
                self.phase = Phase::Settling {
                    ticks_left: ticks_left - 1,
                };
                TickInput::default()
            }
            Phase::Settling { .. } => {
                let reach = state.slingshot.max_distance();
                let target = state.slingshot.anchor() + self.pick_draw(reach);
                log::debug!("Autoplay aiming at ({:.1}, {:.1})", target.x, target.y);
                self.phase = Phase::Aiming {
                    target,
                    ticks_left: AIM_TICKS,
                };
                TickInput {
                    drag: Some(state.viewport.project(target)),
                    release: false,
                }
            }
            Phase::Aiming { target, ticks_left } if ticks_left > 1 => {
                self.phase = Phase::Aiming {
                    target,
                    ticks_left: ticks_left - 1,
                };
                TickInput {
                    drag: Some(state.viewport.project(target)),
                    release: false,
                }
            }
            Phase::Aiming { .. } => {
                self.phase = Phase::Settling {
                    ticks_left: SETTLE_TICKS,
                };
                TickInput {
                    drag: None,
                    release: true,
                }
            }
        }
    }
}
