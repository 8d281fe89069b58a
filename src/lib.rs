//! Nutty - a slingshot physics game
//!
//! Core modules:
//! - `sim`: Simulation (aiming, launching, impacts, physics stepping)
//! - `level`: Level object layers and the body builder
//! - `viewport`: Screen/world coordinate conversion
//! - `tuning`: Data-driven game balance
//! - `error`: Crate error type

pub mod error;
pub mod level;
pub mod sim;
pub mod tuning;
pub mod viewport;

pub use error::{NuttyError, Result};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions in world units (pixels)
    pub const WORLD_WIDTH: f32 = 960.0;
    pub const WORLD_HEIGHT: f32 = 544.0;
    /// World units per physics metre
    pub const UNITS_PER_METER: f32 = 32.0;

    /// Aim angles outside (0, LOWER_ANGLE] collapse onto LOWER_ANGLE or 0
    pub const LOWER_ANGLE: f32 = PI / 2.0;
    pub const UPPER_ANGLE: f32 = 3.0 * PI / 2.0;
    /// Divisor turning aim distance into a launch strength fraction
    pub const LAUNCH_DISTANCE_SCALE: f32 = 100.0;

    /// Slingshot defaults
    pub const MAX_STRENGTH: f32 = 15.0;
    pub const MAX_DISTANCE: f32 = 100.0;

    /// Projectile defaults (metres, kg/m²)
    pub const PROJECTILE_RADIUS: f32 = 0.5;
    pub const PROJECTILE_DENSITY: f32 = 1.0;

    /// Minimum |Δv.x| (m/s) at the contact point that knocks out an enemy
    pub const IMPACT_THRESHOLD: f32 = 1.0;

    /// Gravity (m/s²)
    pub const GRAVITY_Y: f32 = -10.0;
}

/// Convert a world-unit point to metres
#[inline]
pub fn point_to_meters(point: Vec2) -> Vec2 {
    point / consts::UNITS_PER_METER
}

/// Convert a point in metres to world units
#[inline]
pub fn point_to_units(point: Vec2) -> Vec2 {
    point * consts::UNITS_PER_METER
}
