//! Data-driven game balance
//!
//! Loaded from an optional JSON file. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{NuttyError, Result};
use crate::point_to_units;

/// Slingshot, projectile and world balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Slingshot ===
    /// Launch speed (m/s) at full draw
    pub max_strength: f32,
    /// Maximum draw distance from the anchor (world units)
    pub max_distance: f32,
    /// Slingshot pivot in metres
    pub anchor_meters: Vec2,

    // === Projectile ===
    pub projectile_radius: f32,
    pub projectile_density: f32,

    // === Impacts ===
    /// |Δv.x| (m/s) above which an enemy is knocked out
    pub impact_threshold: f32,

    // === World ===
    pub gravity: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_strength: MAX_STRENGTH,
            max_distance: MAX_DISTANCE,
            anchor_meters: Vec2::new(3.0, 6.0),

            projectile_radius: PROJECTILE_RADIUS,
            projectile_density: PROJECTILE_DENSITY,

            impact_threshold: IMPACT_THRESHOLD,

            gravity: Vec2::new(0.0, GRAVITY_Y),
        }
    }
}

impl Tuning {
    /// Slingshot anchor in world units
    pub fn anchor(&self) -> Vec2 {
        point_to_units(self.anchor_meters)
    }

    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_distance", self.max_distance),
            ("projectile_radius", self.projectile_radius),
            ("projectile_density", self.projectile_density),
        ];
        let non_negative = [
            ("max_strength", self.max_strength),
            ("impact_threshold", self.impact_threshold),
        ];

        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(NuttyError::InvalidTuning { field, value });
            }
        }
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(NuttyError::InvalidTuning { field, value });
            }
        }
        Ok(())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Save tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Tuning saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_anchor_in_world_units() {
        let tuning = Tuning::default();
        assert_eq!(tuning.anchor(), Vec2::new(96.0, 192.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_strength": 20.0 }"#).unwrap();
        assert_eq!(tuning.max_strength, 20.0);
        assert_eq!(tuning.max_distance, MAX_DISTANCE);
        assert_eq!(tuning.gravity, Vec2::new(0.0, GRAVITY_Y));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, NuttyError::Json(_)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = Tuning::from_json(r#"{ "max_distance": -50.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            NuttyError::InvalidTuning {
                field: "max_distance",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "projectile_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            NuttyError::InvalidTuning {
                field: "projectile_radius",
                ..
            }
        ));

        // Zero threshold is allowed: every enemy contact knocks out
        assert!(Tuning::from_json(r#"{ "impact_threshold": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("nutty_tuning_{}.json", std::process::id()));
        let tuning = Tuning {
            impact_threshold: 2.5,
            ..Default::default()
        };
        tuning.save(&path).unwrap();
        let loaded = Tuning::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, tuning);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/nonexistent/nutty/tuning.json").unwrap_err();
        assert!(matches!(err, NuttyError::Io(_)));
    }
}
