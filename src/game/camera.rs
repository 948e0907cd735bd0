//! Camera Rig
//!
//! Third-person follow camera driven by avatar position and user orbit
//! input, never by avatar facing. Orbit yaw is unbounded; pitch is
//! clamped. The pose lerps toward the desired position with a fixed
//! per-frame factor while the look target snaps to the avatar every frame.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::core::vec3::Vec3;
use crate::game::input::OrbitDelta;

/// Orbit angles plus the smoothed camera pose.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraRig {
    orbit_yaw: f32,
    orbit_pitch: f32,
    position: Vec3,
    look_at: Vec3,
}

impl CameraRig {
    /// Create a rig at the unrotated offset behind the avatar.
    pub fn new(avatar_position: Vec3, config: &SimConfig) -> Self {
        let mut rig = Self {
            orbit_yaw: 0.0,
            orbit_pitch: 0.0,
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        };
        rig.snap_to(avatar_position, config);
        rig
    }

    /// Current orbit yaw, radians.
    pub fn orbit_yaw(&self) -> f32 {
        self.orbit_yaw
    }

    /// Current orbit pitch, radians.
    pub fn orbit_pitch(&self) -> f32 {
        self.orbit_pitch
    }

    /// Smoothed camera position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current look target (always the avatar's last known position).
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Zero the orbit angles.
    pub fn reset_orbit(&mut self) {
        self.orbit_yaw = 0.0;
        self.orbit_pitch = 0.0;
    }

    /// Jump the pose straight to the desired offset, skipping smoothing.
    /// Used at area entry so the camera does not sweep across the world.
    pub fn snap_to(&mut self, avatar_position: Vec3, config: &SimConfig) {
        self.position = avatar_position + self.rotated_offset(config);
        self.look_at = avatar_position;
    }

    /// Advance the rig one frame.
    ///
    /// Integrates the consumed orbit delta (pitch clamped), rotates the
    /// base offset, clamps its height, lerps the position toward the
    /// desired pose and points the look target at the avatar.
    pub fn update(&mut self, delta: OrbitDelta, avatar_position: Vec3, config: &SimConfig) {
        self.orbit_yaw += delta.yaw;
        self.orbit_pitch =
            (self.orbit_pitch + delta.pitch).clamp(-config.pitch_limit, config.pitch_limit);

        let desired = avatar_position + self.rotated_offset(config);
        self.position = self.position.lerp(desired, config.camera_smoothing);
        self.look_at = avatar_position;
    }

    /// The camera's forward direction projected on the ground plane.
    ///
    /// Zero when the camera sits directly above the look target.
    pub fn horizontal_forward(&self) -> Vec3 {
        (self.look_at - self.position).flattened().normalize()
    }

    /// Base offset rotated by the orbit angles in intrinsic Y-X-Z order
    /// (pitch about x applied first, then yaw about world-up), with the
    /// vertical component floored so the camera never dips underground.
    fn rotated_offset(&self, config: &SimConfig) -> Vec3 {
        let mut offset = config
            .camera_offset
            .rotated_x(self.orbit_pitch)
            .rotated_y(self.orbit_yaw);
        if offset.y < config.camera_min_height {
            offset.y = config.camera_min_height;
        }
        offset
    }
}

// =============================================================================
// TESTS
// =============================================================================
