//! Motion Resolution
//!
//! Turns an input snapshot into one frame's intended displacement, in
//! world space with the y component always zero (movement is planar).
//!
//! Two mutually exclusive modes per frame: directional keyboard movement
//! relative to the camera, or steering toward a clicked ground point.
//! Directional input always wins; pressing a movement key cancels an
//! in-flight click move immediately.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::core::vec3::Vec3;
use crate::game::input::{DirectionKey, InputSnapshot};

/// Which mode produced a frame's displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionMode {
    /// No movement requested
    Idle,
    /// Keyboard movement relative to the camera
    Directional,
    /// Steering toward a clicked ground point
    ClickToMove,
}

/// One frame's intended motion, before collision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionIntent {
    /// Candidate displacement for the frame (y is always zero)
    pub displacement: Vec3,
    /// Mode that produced it
    pub mode: MotionMode,
    /// The click target was reached this frame (and cleared)
    pub target_reached: bool,
    /// A pending click target was cancelled by directional input
    pub target_cancelled: bool,
}

impl MotionIntent {
    fn idle() -> Self {
        Self {
            displacement: Vec3::ZERO,
            mode: MotionMode::Idle,
            target_reached: false,
            target_cancelled: false,
        }
    }
}

/// Resolves per-frame motion and owns the persistent click target.
///
/// The target survives across frames until arrival, cancellation by
/// directional input, or a collision abort; there is no expiry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MotionResolver {
    target: Option<Vec3>,
}

impl MotionResolver {
    /// Create a resolver with no active click target.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active click target, if any.
    pub fn active_target(&self) -> Option<Vec3> {
        self.target
    }

    /// Drop the active click target (collision abort, area switch).
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Compute the frame's candidate displacement.
    ///
    /// `camera_forward` is the camera's current forward vector; only its
    /// horizontal components matter.
    pub fn resolve(
        &mut self,
        snapshot: &InputSnapshot,
        avatar_position: Vec3,
        camera_forward: Vec3,
        config: &SimConfig,
    ) -> MotionIntent {
        // A fresh click overrides whatever target was in flight.
        if let Some(requested) = snapshot.click_target {
            self.target = Some(requested);
        }

        if !snapshot.held.is_empty() {
            let cancelled = self.target.take().is_some();
            let displacement = directional_displacement(snapshot, camera_forward, config);
            return MotionIntent {
                displacement,
                mode: MotionMode::Directional,
                target_reached: false,
                target_cancelled: cancelled,
            };
        }

        if let Some(target) = self.target {
            let to_target = (target - avatar_position).flattened();
            if to_target.length() > config.click_arrival_threshold {
                return MotionIntent {
                    displacement: to_target.normalize().scale(config.movement_speed),
                    mode: MotionMode::ClickToMove,
                    target_reached: false,
                    target_cancelled: false,
                };
            }
            // Close enough: no snap, just stop and clear.
            self.target = None;
            return MotionIntent {
                target_reached: true,
                ..MotionIntent::idle()
            };
        }

        MotionIntent::idle()
    }
}

/// Sum the held keys' camera-relative unit directions and scale by speed.
///
/// Contributions are summed without renormalizing, so two perpendicular
/// keys move the avatar ~1.41x faster on the diagonal. That matches the
/// shipped behavior and is kept as-is.
fn directional_displacement(
    snapshot: &InputSnapshot,
    camera_forward: Vec3,
    config: &SimConfig,
) -> Vec3 {
    let forward = camera_forward.flattened().normalize();
    let mut combined = Vec3::ZERO;

    if snapshot.held.contains(DirectionKey::Forward) {
        combined = combined + forward;
    }
    if snapshot.held.contains(DirectionKey::Back) {
        combined = combined + (-forward);
    }
    if snapshot.held.contains(DirectionKey::Left) {
        // Forward rotated a quarter turn about world-up
        combined = combined + Vec3::new(forward.z, 0.0, -forward.x).normalize();
    }
    if snapshot.held.contains(DirectionKey::Right) {
        combined = combined + Vec3::new(-forward.z, 0.0, forward.x).normalize();
    }

    combined.scale(config.movement_speed)
}

// =============================================================================
// TESTS
// =============================================================================
