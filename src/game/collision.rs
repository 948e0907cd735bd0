//! Collision Resolution
//!
//! Validates a candidate displacement against the active area's static
//! volumes. The avatar is a sphere of configured radius; a blocked move
//! slides along the wall when a usable tangential component remains.
//!
//! Scanning is first-match in volume list order, not closest-match. That
//! is inherited behavior the rest of the world tuning depends on.

use crate::config::SimConfig;
use crate::core::vec3::Vec3;
use crate::core::volume::Volume;

/// Rejections shorter than this are treated as a dead stop rather than
/// amplified to a full-speed slide.
const SLIDE_EPSILON: f32 = 1e-3;

/// Outcome of resolving one frame's candidate displacement.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution<'a> {
    /// Displacement the avatar may actually take this frame
    pub displacement: Vec3,
    /// Volume that blocked or deflected the candidate, if any
    pub volume_id: Option<&'a str>,
}

impl<'a> Resolution<'a> {
    fn accepted(displacement: Vec3) -> Self {
        Self {
            displacement,
            volume_id: None,
        }
    }
}

/// First volume intersecting a sphere at `center`, in list order.
fn first_hit<'a>(
    volumes: &'a [Volume],
    center: Vec3,
    radius: f32,
    exclude: Option<&str>,
) -> Option<&'a Volume> {
    volumes
        .iter()
        .filter(|volume| exclude != Some(volume.id.as_str()))
        .find(|volume| volume.intersects_sphere(center, radius))
}

/// Resolve a candidate displacement against the area's volumes.
///
/// Returns the accepted displacement and the id of the volume that got in
/// the way, if any. Never fails: an unresolvable frame yields zero
/// displacement, and a zero candidate is always accepted (standing still
/// never collides, even when the avatar already overlaps geometry).
pub fn resolve<'a>(
    position: Vec3,
    candidate: Vec3,
    volumes: &'a [Volume],
    exclude: Option<&str>,
    config: &SimConfig,
) -> Resolution<'a> {
    if candidate.length_squared() == 0.0 {
        return Resolution::accepted(Vec3::ZERO);
    }

    let candidate_position = position + candidate;
    let Some(blocker) = first_hit(volumes, candidate_position, config.avatar_radius, exclude)
    else {
        return Resolution::accepted(candidate);
    };

    // Surface normal at the contact, flattened so sliding stays planar.
    let closest = blocker.closest_point(candidate_position);
    let normal = (candidate_position - closest).normalize().flattened();

    let slide = candidate.project_on_plane(normal);
    if slide.length() <= SLIDE_EPSILON {
        // Head-on: nothing tangential to salvage.
        return Resolution {
            displacement: Vec3::ZERO,
            volume_id: Some(&blocker.id),
        };
    }

    // Re-test the slide at full speed, ignoring the wall being slid along
    // so it cannot veto its own slide.
    let slide_displacement = slide.normalize().scale(config.movement_speed);
    let slid_position = position + slide_displacement;
    if first_hit(volumes, slid_position, config.avatar_radius, Some(&blocker.id)).is_some() {
        return Resolution {
            displacement: Vec3::ZERO,
            volume_id: Some(&blocker.id),
        };
    }

    Resolution {
        displacement: slide_displacement,
        volume_id: Some(&blocker.id),
    }
}

// =============================================================================
// TESTS
// =============================================================================
