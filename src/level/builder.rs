//! Turns level objects into physics bodies
//!
//! Objects are in pixels; bodies are in metres at one tile (32 px) per metre.

use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;

use super::{BIRDS_LAYER, BUILDINGS_LAYER, FLOOR_LAYER, LevelMap, ObjectShape, PixelRect};
use crate::error::{NuttyError, Result};
use crate::sim::world::{BodyDesc, BodyKind, BodyTag, PhysicsWorld};

const PIXELS_PER_TILE: f32 = 32.0;
const HALF: f32 = 0.5;

/// Box centre and half extents (metres) for a pixel rectangle
pub fn rectangle_shape(rect: PixelRect) -> (Vec2, Vec2) {
    let center = Vec2::new(
        (rect.x + rect.width * HALF) / PIXELS_PER_TILE,
        (rect.y + rect.height * HALF) / PIXELS_PER_TILE,
    );
    let half_extents = Vec2::new(
        rect.width * HALF / PIXELS_PER_TILE,
        rect.height * HALF / PIXELS_PER_TILE,
    );
    (center, half_extents)
}

/// Circle centre and radius (metres) for a pixel ellipse; the radius
/// follows the ellipse width
pub fn circle_shape(rect: PixelRect) -> (Vec2, f32) {
    let center = Vec2::new(
        (rect.x + rect.width * HALF) / PIXELS_PER_TILE,
        (rect.y + rect.height * HALF) / PIXELS_PER_TILE,
    );
    (center, rect.width * HALF / PIXELS_PER_TILE)
}

/// Bounds of every object in a layer, checking each has the expected shape
fn layer_bounds(map: &LevelMap, layer: &str, expected: ObjectShape) -> Result<Vec<PixelRect>> {
    map.object_layer(layer)?
        .objects
        .iter()
        .map(|object| {
            if object.shape() == expected {
                Ok(map.bounds(object))
            } else {
                Err(NuttyError::UnexpectedShape {
                    layer: layer.to_string(),
                    object_id: object.id,
                    expected: expected.as_str(),
                })
            }
        })
        .collect()
}

/// Dynamic boxes for the building layer
pub fn building_bodies(map: &LevelMap) -> Result<Vec<BodyDesc>> {
    Ok(layer_bounds(map, BUILDINGS_LAYER, ObjectShape::Rectangle)?
        .into_iter()
        .map(|rect| {
            let (center, half_extents) = rectangle_shape(rect);
            BodyDesc::rect(center, half_extents, BodyTag::Building)
        })
        .collect())
}

/// Static boxes for the floor layer
pub fn floor_bodies(map: &LevelMap) -> Result<Vec<BodyDesc>> {
    Ok(layer_bounds(map, FLOOR_LAYER, ObjectShape::Rectangle)?
        .into_iter()
        .map(|rect| {
            let (center, half_extents) = rectangle_shape(rect);
            BodyDesc::rect(center, half_extents, BodyTag::Floor).with_kind(BodyKind::Static)
        })
        .collect())
}

/// Dynamic enemy circles for the birds layer
pub fn bird_bodies(map: &LevelMap) -> Result<Vec<BodyDesc>> {
    Ok(layer_bounds(map, BIRDS_LAYER, ObjectShape::Ellipse)?
        .into_iter()
        .map(|rect| {
            let (center, radius) = circle_shape(rect);
            BodyDesc::circle(center, radius, BodyTag::Enemy)
        })
        .collect())
}

/// Handles of the bodies created for a level
#[derive(Debug, Clone, Default)]
pub struct LevelBodies {
    pub buildings: Vec<RigidBodyHandle>,
    pub floors: Vec<RigidBodyHandle>,
    pub birds: Vec<RigidBodyHandle>,
}

fn insert_all(world: &mut PhysicsWorld, descs: &[BodyDesc]) -> Vec<RigidBodyHandle> {
    descs.iter().map(|desc| world.insert(desc)).collect()
}

/// Build every physics layer of a level into the world.
///
/// All layers are validated before anything is inserted, so a bad level
/// leaves the world untouched.
pub fn build_level(map: &LevelMap, world: &mut PhysicsWorld) -> Result<LevelBodies> {
    let buildings = building_bodies(map)?;
    let floors = floor_bodies(map)?;
    let birds = bird_bodies(map)?;

    let bodies = LevelBodies {
        buildings: insert_all(world, &buildings),
        floors: insert_all(world, &floors),
        birds: insert_all(world, &birds),
    };

    log::info!(
        "Built level: {} buildings, {} floors, {} birds",
        bodies.buildings.len(),
        bodies.floors.len(),
        bodies.birds.len()
    );
    Ok(bodies)
}
