//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Bodies are destroyed between steps, never inside a collision callback
//! - No rendering or platform dependencies

pub mod aim;
pub mod autoplay;
pub mod clock;
pub mod impact;
pub mod state;
pub mod tick;
pub mod world;

pub use aim::{Aim, Launch, Slingshot, aim_at, clamp_angle, firing_position};
pub use autoplay::Autoplay;
pub use clock::StepClock;
pub use impact::{ImpactResolver, PendingRemovals};
pub use state::GameState;
pub use tick::{TickInput, tick};
pub use world::{BodyDesc, BodyKind, BodyShape, BodyTag, PhysicsWorld};
