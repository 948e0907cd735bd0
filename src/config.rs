//! Simulation Configuration
//!
//! Every tunable the host can set: movement, collision, pointer
//! classification, orbit sensitivity and camera follow. Validated once at
//! load time; the simulation itself never re-checks or silently clamps
//! (the documented pitch and camera-height clamps excepted).

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::vec3::Vec3;

/// Configuration error raised by [`SimConfig::validate`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite")]
    NotFinite {
        /// Offending field name
        field: &'static str,
    },

    /// A field that must be strictly positive is not.
    #[error("{field} must be positive (got {value})")]
    NotPositive {
        /// Offending field name
        field: &'static str,
        /// Rejected value
        value: f32,
    },

    /// A field that must not be negative is.
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Offending field name
        field: &'static str,
        /// Rejected value
        value: f32,
    },

    /// A field is outside its allowed range.
    #[error("{field} must be in {range} (got {value})")]
    OutOfRange {
        /// Offending field name
        field: &'static str,
        /// Human-readable allowed range
        range: &'static str,
        /// Rejected value
        value: f32,
    },

    /// The click arrival threshold is smaller than one frame step.
    #[error(
        "click_arrival_threshold ({threshold}) must be at least movement_speed ({speed}) \
         or click-to-move oscillates around the target"
    )]
    ArrivalBelowStep {
        /// Configured arrival threshold
        threshold: f32,
        /// Configured per-frame movement speed
        speed: f32,
    },
}

/// All externally settable simulation parameters.
///
/// Defaults reproduce the shipped world tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Avatar movement speed, world units per frame.
    pub movement_speed: f32,

    /// Avatar collision sphere radius.
    pub avatar_radius: f32,

    /// Distance at which click-to-move counts as arrived.
    /// Must be at least `movement_speed`.
    pub click_arrival_threshold: f32,

    /// Pointer presses shorter than this (milliseconds) are clicks;
    /// longer presses are orbit drags.
    pub click_hold_threshold_ms: u64,

    /// Orbit radians per pointer pixel while dragging.
    pub drag_sensitivity: f32,

    /// Orbit radians per pointer pixel while not dragging.
    pub passive_look_sensitivity: f32,

    /// Whether pointer movement orbits the camera when not dragging.
    pub passive_look_enabled: bool,

    /// Orbit pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,

    /// Per-frame camera position lerp factor in (0, 1]. Applied per
    /// rendered frame, not scaled by elapsed time, so camera
    /// responsiveness tracks frame rate.
    pub camera_smoothing: f32,

    /// Camera offset from the avatar before orbit rotation.
    pub camera_offset: Vec3,

    /// Minimum height of the rotated camera offset above the avatar.
    pub camera_min_height: f32,

    /// Rotation between the avatar model's forward axis and world +Z,
    /// subtracted when facing is derived from movement.
    pub avatar_forward_offset: f32,

    /// Reset orbit yaw/pitch to zero when entering a new area.
    /// When false the orbit carries over.
    pub reset_orbit_on_area_change: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            movement_speed: 0.8,
            avatar_radius: 5.0,
            click_arrival_threshold: 0.8,
            click_hold_threshold_ms: 150,
            drag_sensitivity: 0.0008,
            passive_look_sensitivity: 0.000_05,
            passive_look_enabled: true,
            pitch_limit: FRAC_PI_2,
            camera_smoothing: 0.1,
            camera_offset: Vec3::new(400.0, 300.0, 400.0),
            camera_min_height: 10.0,
            avatar_forward_offset: 0.0,
            reset_orbit_on_area_change: false,
        }
    }
}

impl SimConfig {
    /// Validate the configuration, failing fast with a descriptive error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_fields = [
            ("movement_speed", self.movement_speed),
            ("avatar_radius", self.avatar_radius),
            ("click_arrival_threshold", self.click_arrival_threshold),
            ("drag_sensitivity", self.drag_sensitivity),
            ("passive_look_sensitivity", self.passive_look_sensitivity),
            ("pitch_limit", self.pitch_limit),
            ("camera_smoothing", self.camera_smoothing),
            ("camera_min_height", self.camera_min_height),
            ("avatar_forward_offset", self.avatar_forward_offset),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        if !self.camera_offset.is_finite() {
            return Err(ConfigError::NotFinite { field: "camera_offset" });
        }

        if self.movement_speed <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "movement_speed",
                value: self.movement_speed,
            });
        }
        if self.avatar_radius <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "avatar_radius",
                value: self.avatar_radius,
            });
        }
        if self.drag_sensitivity < 0.0 {
            return Err(ConfigError::Negative {
                field: "drag_sensitivity",
                value: self.drag_sensitivity,
            });
        }
        if self.passive_look_sensitivity < 0.0 {
            return Err(ConfigError::Negative {
                field: "passive_look_sensitivity",
                value: self.passive_look_sensitivity,
            });
        }
        if self.pitch_limit <= 0.0 || self.pitch_limit > FRAC_PI_2 {
            return Err(ConfigError::OutOfRange {
                field: "pitch_limit",
                range: "(0, pi/2]",
                value: self.pitch_limit,
            });
        }
        if self.camera_smoothing <= 0.0 || self.camera_smoothing > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "camera_smoothing",
                range: "(0, 1]",
                value: self.camera_smoothing,
            });
        }
        if self.click_arrival_threshold < self.movement_speed {
            return Err(ConfigError::ArrivalBelowStep {
                threshold: self.click_arrival_threshold,
                speed: self.movement_speed,
            });
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        SimConfig::default().validate().expect("defaults must validate");
    }

    #[test]
    fn test_rejects_negative_radius() {
        let cfg = SimConfig {
            avatar_radius: -5.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { field: "avatar_radius", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_offset() {
        let cfg = SimConfig {
            camera_offset: Vec3::new(400.0, f32::NAN, 400.0),
            ..SimConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotFinite { field: "camera_offset" })
        ));
    }

    #[test]
    fn test_rejects_zero_smoothing() {
        let cfg = SimConfig {
            camera_smoothing: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_rejects_arrival_below_step() {
        let cfg = SimConfig {
            movement_speed: 1.0,
            click_arrival_threshold: 0.5,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ArrivalBelowStep { .. })));
    }

    #[test]
    fn test_arrival_equal_to_step_is_valid() {
        let cfg = SimConfig {
            movement_speed: 1.0,
            click_arrival_threshold: 1.0,
            ..SimConfig::default()
        };
        cfg.validate().expect("equality is the shipped tuning");
    }

    #[test]
    fn test_rejects_excessive_pitch_limit() {
        let cfg = SimConfig {
            pitch_limit: 3.0,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let cfg = SimConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.movement_speed, cfg.movement_speed);
        assert_eq!(back.camera_offset, cfg.camera_offset);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: SimConfig = serde_json::from_str(r#"{"movement_speed": 2.0}"#).unwrap();
        assert_eq!(cfg.movement_speed, 2.0);
        assert_eq!(cfg.avatar_radius, 5.0);
    }
}
