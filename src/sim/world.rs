//! Rigid-body world
//!
//! Owns the rapier2d sets and pipeline. Bodies are described with
//! [`BodyDesc`] in metres; each body gets a single collider whose user data
//! carries a [`BodyTag`].

use glam::Vec2;
use rapier2d::prelude::*;

/// Role of a body, stored in its collider's user data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyTag {
    #[default]
    Untagged,
    Building,
    Floor,
    Enemy,
    Projectile,
}

impl BodyTag {
    pub fn user_data(self) -> u128 {
        match self {
            BodyTag::Untagged => 0,
            BodyTag::Building => 1,
            BodyTag::Floor => 2,
            BodyTag::Enemy => 3,
            BodyTag::Projectile => 4,
        }
    }

    pub fn from_user_data(data: u128) -> Self {
        match data {
            1 => BodyTag::Building,
            2 => BodyTag::Floor,
            3 => BodyTag::Enemy,
            4 => BodyTag::Projectile,
            _ => BodyTag::Untagged,
        }
    }
}

/// Whether a body is simulated or fixed in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Static,
}

/// Collision shape (metres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Cuboid { half_extents: Vec2 },
    Circle { radius: f32 },
}

/// Everything needed to create a body with one collider
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub shape: BodyShape,
    /// Centre of the body (metres)
    pub position: Vec2,
    /// Initial linear velocity (m/s)
    pub velocity: Vec2,
    pub density: f32,
    pub tag: BodyTag,
}

impl BodyDesc {
    /// Dynamic circle with unit density
    pub fn circle(position: Vec2, radius: f32, tag: BodyTag) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape: BodyShape::Circle { radius },
            position,
            velocity: Vec2::ZERO,
            density: 1.0,
            tag,
        }
    }

    /// Dynamic box with unit density
    pub fn rect(position: Vec2, half_extents: Vec2, tag: BodyTag) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape: BodyShape::Cuboid { half_extents },
            position,
            velocity: Vec2::ZERO,
            density: 1.0,
            tag,
        }
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }
}

#[inline]
pub(crate) fn to_glam(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

#[inline]
pub(crate) fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

/// The physics world and everything rapier needs to step it
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Create a body and its collider
    pub fn insert(&mut self, desc: &BodyDesc) -> RigidBodyHandle {
        let builder = match desc.kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Static => RigidBodyBuilder::fixed(),
        };
        let body = builder
            .translation(to_na(desc.position))
            .linvel(to_na(desc.velocity))
            .build();

        let collider = match desc.shape {
            BodyShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            }
            BodyShape::Circle { radius } => ColliderBuilder::ball(radius),
        }
        .density(desc.density)
        .user_data(desc.tag.user_data())
        // Every contact start is reported, like a world-wide contact listener
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build();

        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        log::trace!("Inserted {:?} body {:?}", desc.tag, handle);
        handle
    }

    /// Advance the simulation by `dt`, reporting collisions to `events`
    pub fn step(&mut self, dt: f32, events: &dyn EventHandler) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            events,
        );
    }

    /// Destroy a body and its colliders. Returns false if it was already gone.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Tag of a body, read from its first collider
    pub fn tag(&self, handle: RigidBodyHandle) -> Option<BodyTag> {
        let body = self.bodies.get(handle)?;
        let collider = self.colliders.get(*body.colliders().first()?)?;
        Some(BodyTag::from_user_data(collider.user_data))
    }

    /// Handles of all bodies with the given tag
    pub fn tagged(&self, tag: BodyTag) -> Vec<RigidBodyHandle> {
        self.colliders
            .iter()
            .filter(|(_, c)| BodyTag::from_user_data(c.user_data) == tag)
            .filter_map(|(_, c)| c.parent())
            .collect()
    }

    pub fn count_tagged(&self, tag: BodyTag) -> usize {
        self.tagged(tag).len()
    }

    /// Body centre (metres)
    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| to_glam(b.translation()))
    }

    /// Linear velocity (m/s)
    pub fn velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| to_glam(b.linvel()))
    }
}
