//! Level description
//!
//! Levels are Tiled maps exported as JSON. Only object layers matter here:
//! - `Physics_Buildings`: rectangles, become dynamic boxes
//! - `Physics_Floor`: rectangles, become static boxes
//! - `Physics_Birds`: ellipses, become enemy circles
//!
//! Tiled places objects with a y-down origin at the top-left of the map.
//! [`LevelMap::bounds`] flips them into the y-up world.

pub mod builder;

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{NuttyError, Result};

pub use builder::{LevelBodies, build_level};

pub const BUILDINGS_LAYER: &str = "Physics_Buildings";
pub const FLOOR_LAYER: &str = "Physics_Floor";
pub const BIRDS_LAYER: &str = "Physics_Birds";

/// Level shipped with the game
pub const DEFAULT_LEVEL: &str = include_str!("../../levels/nutty.json");

/// A Tiled map (JSON export)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMap {
    /// Map width in tiles
    pub width: u32,
    /// Map height in tiles
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Map layers. Only object groups are read; everything else is carried along.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    ObjectGroup(ObjectLayer),
    TileLayer { name: String },
    #[serde(other)]
    Other,
}

/// A named layer of map objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectLayer {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

/// Polygon vertex relative to the object origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolyPoint {
    pub x: f32,
    pub y: f32,
}

/// One object as Tiled stores it (pixels, y-down)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapObject {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub ellipse: bool,
    #[serde(default)]
    pub point: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<PolyPoint>>,
}

/// What kind of shape an object is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectShape {
    Rectangle,
    Ellipse,
    Point,
    Polygon,
}

impl ObjectShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectShape::Rectangle => "rectangle",
            ObjectShape::Ellipse => "ellipse",
            ObjectShape::Point => "point",
            ObjectShape::Polygon => "polygon",
        }
    }
}

impl MapObject {
    pub fn shape(&self) -> ObjectShape {
        if self.ellipse {
            ObjectShape::Ellipse
        } else if self.point {
            ObjectShape::Point
        } else if self.polygon.is_some() {
            ObjectShape::Polygon
        } else {
            ObjectShape::Rectangle
        }
    }
}

/// Axis-aligned bounds in y-up pixel space (`x`, `y` is the bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

impl LevelMap {
    /// Parse a Tiled JSON map
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a Tiled JSON map from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let map = Self::from_json(&json)?;
        log::info!(
            "Loaded level {} ({}x{} tiles, {} layers)",
            path.display(),
            map.width,
            map.height,
            map.layers.len()
        );
        Ok(map)
    }

    /// The level shipped with the game
    pub fn default_level() -> Result<Self> {
        Self::from_json(DEFAULT_LEVEL)
    }

    /// Map height in pixels
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tileheight as f32
    }

    /// Map width in pixels
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tilewidth as f32
    }

    /// Find an object layer by name
    pub fn object_layer(&self, name: &str) -> Result<&ObjectLayer> {
        self.layers
            .iter()
            .find_map(|layer| match layer {
                Layer::ObjectGroup(objects) if objects.name == name => Some(objects),
                _ => None,
            })
            .ok_or_else(|| NuttyError::MissingLayer(name.to_string()))
    }

    /// Object bounds flipped into y-up pixel space
    pub fn bounds(&self, object: &MapObject) -> PixelRect {
        PixelRect::new(
            object.x,
            self.pixel_height() - object.y - object.height,
            object.width,
            object.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = r#"{
        "width": 10, "height": 5, "tilewidth": 32, "tileheight": 32,
        "layers": [
            { "type": "tilelayer", "name": "Background", "data": [0, 0, 0] },
            { "type": "imagelayer", "name": "Sky", "image": "sky.png" },
            { "type": "objectgroup", "name": "Physics_Floor", "objects": [
                { "id": 1, "x": 0, "y": 128, "width": 320, "height": 32 }
            ]},
            { "type": "objectgroup", "name": "Physics_Birds", "objects": [
                { "id": 2, "x": 64, "y": 96, "width": 32, "height": 32, "ellipse": true },
                { "id": 3, "x": 10, "y": 10, "point": true }
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_layers() {
        let map = LevelMap::from_json(SMALL_MAP).unwrap();
        assert_eq!(map.layers.len(), 4);
        assert!(matches!(&map.layers[0], Layer::TileLayer { name } if name == "Background"));
        assert!(matches!(map.layers[1], Layer::Other));
        assert_eq!(map.pixel_width(), 320.0);
        assert_eq!(map.pixel_height(), 160.0);

        let birds = map.object_layer(BIRDS_LAYER).unwrap();
        assert_eq!(birds.objects.len(), 2);
        assert_eq!(birds.objects[0].shape(), ObjectShape::Ellipse);
        assert_eq!(birds.objects[1].shape(), ObjectShape::Point);
    }

    #[test]
    fn test_missing_layer() {
        let map = LevelMap::from_json(SMALL_MAP).unwrap();
        let err = map.object_layer(BUILDINGS_LAYER).unwrap_err();
        assert!(matches!(err, NuttyError::MissingLayer(name) if name == BUILDINGS_LAYER));
    }

    #[test]
    fn test_bounds_flip_y() {
        let map = LevelMap::from_json(SMALL_MAP).unwrap();
        let floor = &map.object_layer(FLOOR_LAYER).unwrap().objects[0];
        // Bottom row of the map ends up at the world origin
        assert_eq!(map.bounds(floor), PixelRect::new(0.0, 0.0, 320.0, 32.0));

        let bird = &map.object_layer(BIRDS_LAYER).unwrap().objects[0];
        let rect = map.bounds(bird);
        assert_eq!(rect.y, 32.0);
        assert_eq!(rect.center(), Vec2::new(80.0, 48.0));
    }

    #[test]
    fn test_huge_map_dimensions_do_not_overflow() {
        let map = LevelMap::from_json(
            r#"{ "width": 100000, "height": 100000, "tilewidth": 100000, "tileheight": 100000,
                 "layers": [] }"#,
        )
        .unwrap();
        assert_eq!(map.pixel_height(), 1.0e10);
        assert_eq!(map.pixel_width(), 1.0e10);
    }

    #[test]
    fn test_default_level_has_all_layers() {
        let map = LevelMap::default_level().unwrap();
        for name in [BUILDINGS_LAYER, FLOOR_LAYER, BIRDS_LAYER] {
            assert!(!map.object_layer(name).unwrap().objects.is_empty());
        }
    }
}
