//! Slingshot aiming and launch velocity
//!
//! The pointer is dragged away from a fixed anchor. The resulting aim is a
//! (distance, angle) pair clamped to the slingshot's reach and to a narrow
//! band of angles. On release the aim becomes a launch velocity.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::consts::{LAUNCH_DISTANCE_SCALE, LOWER_ANGLE, UPPER_ANGLE};

/// Clamped aim relative to the anchor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aim {
    /// Draw distance (world units), at most the slingshot's max distance
    pub distance: f32,
    /// Draw angle (radians), in [0, LOWER_ANGLE]
    pub angle: f32,
}

impl Aim {
    /// Launch velocity (m/s) for this aim.
    ///
    /// Both components are taken as absolute values, so a launch always
    /// travels up and to the right.
    pub fn launch_velocity(&self, max_strength: f32) -> Vec2 {
        let strength = self.distance / LAUNCH_DISTANCE_SCALE;
        Vec2::new(
            (max_strength * -self.angle.cos() * strength).abs(),
            (max_strength * -self.angle.sin() * strength).abs(),
        )
    }
}

/// Angle from `pointer` to `anchor`, in [0, 2π)
pub fn raw_angle(anchor: Vec2, pointer: Vec2) -> f32 {
    let mut angle = (anchor.y - pointer.y).atan2(anchor.x - pointer.x);
    angle %= TAU;
    if angle < 0.0 {
        angle += TAU;
    }
    angle
}

/// Euclidean distance between anchor and pointer
#[inline]
pub fn raw_distance(anchor: Vec2, pointer: Vec2) -> f32 {
    anchor.distance(pointer)
}

/// Collapse angles above LOWER_ANGLE: up to UPPER_ANGLE they become
/// LOWER_ANGLE, beyond it they wrap to 0.
pub fn clamp_angle(angle: f32) -> f32 {
    if angle > LOWER_ANGLE {
        if angle > UPPER_ANGLE { 0.0 } else { LOWER_ANGLE }
    } else {
        angle
    }
}

/// Compute the clamped aim for a pointer position
pub fn aim_at(anchor: Vec2, pointer: Vec2, max_distance: f32) -> Aim {
    let distance = raw_distance(anchor, pointer).min(max_distance);
    let angle = clamp_angle(raw_angle(anchor, pointer));
    Aim { distance, angle }
}

/// Point the projectile is drawn back to for a given aim
pub fn firing_position(anchor: Vec2, aim: Aim) -> Vec2 {
    Vec2::new(
        anchor.x + aim.distance * -aim.angle.cos(),
        anchor.y + aim.distance * -aim.angle.sin(),
    )
}

/// A projectile ready to be spawned (world units / m/s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Slingshot state: fixed anchor, current firing position and last aim
#[derive(Debug, Clone)]
pub struct Slingshot {
    anchor: Vec2,
    firing_position: Vec2,
    aim: Aim,
    max_distance: f32,
    max_strength: f32,
}

impl Slingshot {
    /// Negative or NaN limits are treated as zero
    pub fn new(anchor: Vec2, max_distance: f32, max_strength: f32) -> Self {
        Self {
            anchor,
            firing_position: anchor,
            aim: Aim::default(),
            max_distance: max_distance.max(0.0),
            max_strength: max_strength.max(0.0),
        }
    }

    /// Longest draw from the anchor (world units)
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn firing_position(&self) -> Vec2 {
        self.firing_position
    }

    pub fn aim(&self) -> Aim {
        self.aim
    }

    /// Re-aim toward a pointer position (world units)
    pub fn drag(&mut self, pointer: Vec2) {
        self.aim = aim_at(self.anchor, pointer, self.max_distance);
        self.firing_position = firing_position(self.anchor, self.aim);
        log::debug!(
            "Aim: distance {:.1}, angle {:.3} -> firing position ({:.1}, {:.1})",
            self.aim.distance,
            self.aim.angle,
            self.firing_position.x,
            self.firing_position.y
        );
    }

    /// Release the slingshot.
    ///
    /// Returns the launch from the current firing position and resets the
    /// firing position to the anchor. The aim is kept until the next drag.
    pub fn release(&mut self) -> Launch {
        let launch = Launch {
            position: self.firing_position,
            velocity: self.aim.launch_velocity(self.max_strength),
        };
        self.firing_position = self.anchor;
        launch
    }
}
