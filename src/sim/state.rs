//! Game state
//!
//! Owns the physics world, the slingshot and the queue of bodies waiting to
//! be destroyed.

use std::sync::{Mutex, PoisonError};

use rapier2d::prelude::RigidBodyHandle;

use super::aim::{Launch, Slingshot};
use super::impact::{ImpactResolver, PendingRemovals};
use super::world::{BodyDesc, BodyTag, PhysicsWorld};
use crate::error::Result;
use crate::level::{LevelBodies, LevelMap, build_level};
use crate::point_to_meters;
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Complete game state
pub struct GameState {
    pub tuning: Tuning,
    pub world: PhysicsWorld,
    pub slingshot: Slingshot,
    pub viewport: Viewport,
    /// Bodies created from the level
    pub level: LevelBodies,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub shots_fired: u32,
    pub enemies_removed: u32,
    /// Filled by collision callbacks, emptied before each step
    pending: Mutex<PendingRemovals<RigidBodyHandle>>,
}

impl GameState {
    /// Build the world for a level
    pub fn new(tuning: Tuning, map: &LevelMap) -> Result<Self> {
        let mut world = PhysicsWorld::new(tuning.gravity);
        let level = build_level(map, &mut world)?;
        let slingshot = Slingshot::new(tuning.anchor(), tuning.max_distance, tuning.max_strength);

        Ok(Self {
            tuning,
            world,
            slingshot,
            viewport: Viewport::default(),
            level,
            time_ticks: 0,
            shots_fired: 0,
            enemies_removed: 0,
            pending: Mutex::new(PendingRemovals::new()),
        })
    }

    /// Create a projectile for a launch (firing position in world units)
    pub fn spawn_projectile(&mut self, launch: Launch) -> RigidBodyHandle {
        let desc = BodyDesc::circle(
            point_to_meters(launch.position),
            self.tuning.projectile_radius,
            BodyTag::Projectile,
        )
        .with_density(self.tuning.projectile_density)
        .with_velocity(launch.velocity);

        let handle = self.world.insert(&desc);
        self.shots_fired += 1;
        log::info!(
            "Shot {} from ({:.2}, {:.2}) m at ({:.2}, {:.2}) m/s",
            self.shots_fired,
            desc.position.x,
            desc.position.y,
            launch.velocity.x,
            launch.velocity.y
        );
        handle
    }

    /// Destroy every body queued by the last step and empty the queue
    pub fn clear_dead_bodies(&mut self) -> usize {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        let world = &mut self.world;
        let mut destroyed = 0;
        pending.flush(|handle| {
            if world.remove(handle) {
                destroyed += 1;
            }
        });

        if destroyed > 0 {
            self.enemies_removed += destroyed;
            log::info!(
                "Destroyed {} enemies ({} left)",
                destroyed,
                self.enemies_left()
            );
        }
        destroyed as usize
    }

    /// Advance physics one step, queueing knocked-out enemies
    pub fn step_physics(&mut self, dt: f32) {
        let resolver = ImpactResolver::new(&self.pending, self.tuning.impact_threshold);
        self.world.step(dt, &resolver);
    }

    fn with_pending<T>(&self, f: impl FnOnce(&PendingRemovals<RigidBodyHandle>) -> T) -> T {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        f(&*pending)
    }

    pub fn pending_count(&self) -> usize {
        self.with_pending(|p| p.len())
    }

    pub fn is_pending(&self, handle: RigidBodyHandle) -> bool {
        self.with_pending(|p| p.contains(handle))
    }

    pub fn enemies_left(&self) -> usize {
        self.world.count_tagged(BodyTag::Enemy)
    }

    pub fn projectile_count(&self) -> usize {
        self.world.count_tagged(BodyTag::Projectile)
    }

    /// All enemies destroyed
    pub fn is_cleared(&self) -> bool {
        self.enemies_left() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_state_from_default_level() {
        let map = LevelMap::default_level().unwrap();
        let state = GameState::new(Tuning::default(), &map).unwrap();

        assert_eq!(state.enemies_left(), state.level.birds.len());
        assert_eq!(state.projectile_count(), 0);
        assert_eq!(state.pending_count(), 0);
        assert_eq!(state.slingshot.anchor(), Vec2::new(96.0, 192.0));
        assert_eq!(state.slingshot.firing_position(), state.slingshot.anchor());
    }

    #[test]
    fn test_spawn_projectile_in_metres() {
        let map = LevelMap::default_level().unwrap();
        let mut state = GameState::new(Tuning::default(), &map).unwrap();

        let handle = state.spawn_projectile(Launch {
            position: Vec2::new(64.0, 160.0),
            velocity: Vec2::new(3.0, 2.0),
        });
        assert_eq!(state.world.position(handle), Some(Vec2::new(2.0, 5.0)));
        assert_eq!(state.world.velocity(handle), Some(Vec2::new(3.0, 2.0)));
        assert_eq!(state.world.tag(handle), Some(BodyTag::Projectile));
        assert_eq!(state.shots_fired, 1);
    }

    #[test]
    fn test_clear_dead_bodies_with_nothing_pending() {
        let map = LevelMap::default_level().unwrap();
        let mut state = GameState::new(Tuning::default(), &map).unwrap();
        let before = state.world.body_count();

        assert_eq!(state.clear_dead_bodies(), 0);
        assert_eq!(state.world.body_count(), before);
        assert_eq!(state.enemies_removed, 0);
    }
}
