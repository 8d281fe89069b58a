//! Fixed timestep simulation tick
//!
//! Applies input, destroys bodies knocked out during the previous step, then
//! advances physics. Removal happens here, between steps, because collision
//! callbacks only see a read-only world.

use glam::Vec2;

use super::state::GameState;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer drag position in screen pixels (y-down)
    pub drag: Option<Vec2>,
    /// Pointer released: fire the slingshot
    pub release: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(screen) = input.drag {
        let pointer = state.viewport.unproject(screen);
        state.slingshot.drag(pointer);
    }

    if input.release {
        let launch = state.slingshot.release();
        state.spawn_projectile(launch);
    }

    state.clear_dead_bodies();
    state.step_physics(dt);
    state.time_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::SIM_DT;
    use crate::level::LevelMap;
    use crate::sim::world::BodyTag;

    /// Empty building and floor layers plus one enemy at (5 m, 6 m),
    /// level with the anchor
    const TARGET_MAP: &str = r#"{
        "width": 30, "height": 17, "tilewidth": 32, "tileheight": 32,
        "layers": [
            { "type": "objectgroup", "name": "Physics_Buildings", "objects": [] },
            { "type": "objectgroup", "name": "Physics_Floor", "objects": [] },
            { "type": "objectgroup", "name": "Physics_Birds", "objects": [
                { "id": 1, "x": 144, "y": 336, "width": 32, "height": 32, "ellipse": true }
            ]}
        ]
    }"#;

    fn floating_state() -> GameState {
        let map = LevelMap::from_json(TARGET_MAP).unwrap();
        let tuning = Tuning {
            gravity: Vec2::ZERO,
            ..Default::default()
        };
        GameState::new(tuning, &map).unwrap()
    }

    /// Drag to a world point, then release on the following tick
    fn shoot(state: &mut GameState, world_pointer: Vec2) {
        let drag = TickInput {
            drag: Some(state.viewport.project(world_pointer)),
            release: false,
        };
        tick(state, &drag, SIM_DT);
        let release = TickInput {
            drag: None,
            release: true,
        };
        tick(state, &release, SIM_DT);
    }

    #[test]
    fn test_drag_moves_firing_position() {
        let mut state = floating_state();
        let input = TickInput {
            drag: Some(state.viewport.project(Vec2::new(50.0, 150.0))),
            release: false,
        };
        tick(&mut state, &input, SIM_DT);

        let pos = state.slingshot.firing_position();
        assert!((pos - Vec2::new(50.0, 150.0)).length() < 1e-3);
        assert_eq!(state.projectile_count(), 0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_release_spawns_one_projectile_and_resets() {
        let mut state = floating_state();
        shoot(&mut state, Vec2::new(50.0, 150.0));

        assert_eq!(state.projectile_count(), 1);
        assert_eq!(state.shots_fired, 1);
        assert_eq!(state.slingshot.firing_position(), state.slingshot.anchor());

        let projectile = state.world.tagged(BodyTag::Projectile)[0];
        let vel = state.world.velocity(projectile).unwrap();
        let expected = state.slingshot.aim().launch_velocity(state.tuning.max_strength);
        assert!((vel - expected).length() < 1e-3);
        assert!(vel.x > 0.0 && vel.y > 0.0);
    }

    #[test]
    fn test_hard_hit_removes_enemy_on_next_tick() {
        let mut state = floating_state();
        let enemy = state.level.birds[0];

        // Full draw straight left of the anchor: 15 m/s along +x
        shoot(&mut state, Vec2::new(-4.0, 192.0));

        let idle = TickInput::default();
        let mut queued = false;
        for _ in 0..120 {
            tick(&mut state, &idle, SIM_DT);
            if state.pending_count() > 0 {
                queued = true;
                break;
            }
        }
        assert!(queued, "enemy was never hit");

        // Queued but still alive until the next tick starts
        assert!(state.is_pending(enemy));
        assert!(state.world.contains(enemy));

        tick(&mut state, &idle, SIM_DT);
        assert!(!state.world.contains(enemy));
        assert!(!state.is_pending(enemy));
        assert_eq!(state.pending_count(), 0);
        assert_eq!(state.enemies_removed, 1);
        assert!(state.is_cleared());
    }

    #[test]
    fn test_gentle_hit_leaves_enemy() {
        let mut state = floating_state();
        let enemy = state.level.birds[0];

        // Short draw: 0.75 m/s, under the knockout threshold
        shoot(&mut state, Vec2::new(91.0, 192.0));

        let idle = TickInput::default();
        for _ in 0..240 {
            tick(&mut state, &idle, SIM_DT);
            assert_eq!(state.pending_count(), 0);
        }
        assert!(state.world.contains(enemy));
        assert_eq!(state.enemies_left(), 1);
    }
}
