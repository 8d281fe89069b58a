//! Impact resolution and deferred body removal
//!
//! Collision callbacks run inside the physics step and may only read the
//! world. Enemies hit hard enough are queued in [`PendingRemovals`] and
//! destroyed at the start of the next step.

use std::sync::{Mutex, PoisonError};

use glam::Vec2;
use rapier2d::prelude::*;

use super::world::{BodyTag, to_glam};

/// Bodies waiting to be destroyed, in the order they were hit
#[derive(Debug, Clone)]
pub struct PendingRemovals<H> {
    handles: Vec<H>,
}

impl<H> Default for PendingRemovals<H> {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
        }
    }
}

impl<H: Copy + PartialEq> PendingRemovals<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a body. Returns false if it was already pending.
    pub fn push(&mut self, handle: H) -> bool {
        if self.handles.contains(&handle) {
            return false;
        }
        self.handles.push(handle);
        true
    }

    pub fn contains(&self, handle: H) -> bool {
        self.handles.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Hand every pending body to `destroy` once, in queue order, and empty
    /// the queue. Returns how many bodies were handed over.
    pub fn flush(&mut self, mut destroy: impl FnMut(H)) -> usize {
        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            destroy(handle);
        }
        count
    }
}

/// Which collider of a contact pair is the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSide {
    First,
    Second,
}

/// Find the enemy side of a contact. The second collider is checked first.
pub fn enemy_side(first: BodyTag, second: BodyTag) -> Option<ContactSide> {
    match (first, second) {
        (_, BodyTag::Enemy) => Some(ContactSide::Second),
        (BodyTag::Enemy, _) => Some(ContactSide::First),
        _ => None,
    }
}

/// Relative velocity of the attacker against the defender at the contact
#[inline]
pub fn impact_velocity(attacker: Vec2, defender: Vec2) -> Vec2 {
    attacker - defender
}

/// Only the horizontal component of the impact counts
#[inline]
pub fn is_knockout(impact: Vec2, threshold: f32) -> bool {
    impact.x.abs() > threshold
}

/// Collision listener that queues knocked-out enemies
pub struct ImpactResolver<'a> {
    pending: &'a Mutex<PendingRemovals<RigidBodyHandle>>,
    threshold: f32,
}

impl<'a> ImpactResolver<'a> {
    pub fn new(pending: &'a Mutex<PendingRemovals<RigidBodyHandle>>, threshold: f32) -> Self {
        Self { pending, threshold }
    }

    fn resolve(&self, bodies: &RigidBodySet, colliders: &ColliderSet, pair: &ContactPair) {
        let (Some(first), Some(second)) =
            (colliders.get(pair.collider1), colliders.get(pair.collider2))
        else {
            return;
        };

        let side = enemy_side(
            BodyTag::from_user_data(first.user_data),
            BodyTag::from_user_data(second.user_data),
        );
        let (attacker, defender) = match side {
            Some(ContactSide::Second) => (first, second),
            Some(ContactSide::First) => (second, first),
            None => return,
        };
        let Some(defender_body) = defender.parent() else {
            return;
        };
        let Some(point) = first_contact_point(pair) else {
            return;
        };

        let attacker_vel = velocity_at(bodies, attacker.parent(), &point);
        let defender_vel = velocity_at(bodies, Some(defender_body), &point);
        let impact = impact_velocity(attacker_vel, defender_vel);

        if is_knockout(impact, self.threshold) {
            let queued = self
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(defender_body);
            if queued {
                log::debug!(
                    "Enemy {:?} knocked out (impact {:.2}, {:.2})",
                    defender_body,
                    impact.x,
                    impact.y
                );
            }
        }
    }
}

impl EventHandler for ImpactResolver<'_> {
    fn handle_collision_event(
        &self,
        bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        if !event.started() {
            return;
        }
        // Sensor events carry no contact pair
        if let Some(pair) = contact_pair {
            self.resolve(bodies, colliders, pair);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// First world-space contact point of the pair.
///
/// A `Started` event is only emitted once the narrow phase has produced a
/// solver contact, so the solver contacts are the source of truth here.
fn first_contact_point(pair: &ContactPair) -> Option<Point<Real>> {
    pair.manifolds
        .iter()
        .find_map(|manifold| manifold.data.solver_contacts.first())
        .map(|contact| contact.point)
}

/// Velocity of a body at a world point; colliders without a body are at rest
fn velocity_at(
    bodies: &RigidBodySet,
    handle: Option<RigidBodyHandle>,
    point: &Point<Real>,
) -> Vec2 {
    handle
        .and_then(|h| bodies.get(h))
        .map(|body| to_glam(&body.velocity_at_point(point)))
        .unwrap_or(Vec2::ZERO)
}
