use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::LayerMask;

/// Errors raised while loading or validating a [`MovementConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid movement config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
}

/// Tuning constants for the movement resolver.
///
/// Distances are world units per frame, matching the velocity accumulator.
/// Loaded from JSON alongside the rest of an actor's data; every field has a
/// default so partial files work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Gravity acceleration added to the gravity accumulator each second.
    pub gravity: Vec2,
    /// Lower edge of the snap band. Snapping runs while the vertical
    /// velocity lies in `[snap_ground_check_threshold, 0]`.
    pub snap_ground_check_threshold: f32,
    /// How far below the body the ground snap looks.
    pub snap_ground_distance: f32,
    /// Offset of the snap box from the collider centre.
    pub snap_ground_offset_origin: Vec2,
    /// Extra size added to the snap box.
    pub snap_ground_offset_size: Vec2,
    /// Height removed from the box for horizontal casts, so the floor and
    /// ceiling are not hit at the corners.
    pub horizontal_cast_shrink: f32,
    /// Width removed from the box for vertical casts, so adjacent walls are
    /// not hit at the corners.
    pub vertical_cast_shrink: f32,
    /// Horizontal hits at or below this height above the feet are steps the
    /// body walks over instead of walls.
    pub ignore_horizontal_step_height: f32,
    /// Layers the body collides with.
    pub layer_mask: LayerMask,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -30.0),
            snap_ground_check_threshold: -0.1,
            snap_ground_distance: 0.1,
            snap_ground_offset_origin: Vec2::ZERO,
            snap_ground_offset_size: Vec2::ZERO,
            horizontal_cast_shrink: 0.1,
            vertical_cast_shrink: 0.1,
            ignore_horizontal_step_height: 0.25,
            layer_mask: LayerMask::ALL,
        }
    }
}

impl MovementConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MovementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the constants the resolver relies on.
    ///
    /// Legal but unusual values are logged, not rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("snap_ground_check_threshold", self.snap_ground_check_threshold),
            ("snap_ground_distance", self.snap_ground_distance),
            ("horizontal_cast_shrink", self.horizontal_cast_shrink),
            ("vertical_cast_shrink", self.vertical_cast_shrink),
            ("ignore_horizontal_step_height", self.ignore_horizontal_step_height),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let vectors = [
            ("gravity", self.gravity),
            ("snap_ground_offset_origin", self.snap_ground_offset_origin),
            ("snap_ground_offset_size", self.snap_ground_offset_size),
        ];
        for (field, value) in vectors {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let non_negative = [
            ("snap_ground_distance", self.snap_ground_distance),
            ("horizontal_cast_shrink", self.horizontal_cast_shrink),
            ("vertical_cast_shrink", self.vertical_cast_shrink),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.snap_ground_check_threshold > 0.0 {
            log::warn!(
                "snap_ground_check_threshold is positive ({}); the snap band is empty",
                self.snap_ground_check_threshold
            );
        }
        if self.layer_mask == LayerMask::NONE {
            log::warn!("layer_mask is empty; bodies will pass through all geometry");
        }

        Ok(())
    }
}
