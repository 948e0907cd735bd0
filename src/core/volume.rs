//! Collision Volumes
//!
//! Static geometry the avatar collides with and the regions doorway zones
//! cover. One polymorphic volume type with box and sphere variants; mesh
//! hitboxes are authored as precomputed box lists at area load.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;

/// Geometric shape of a volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box.
    Box {
        /// Minimum corner
        min: Vec3,
        /// Maximum corner
        max: Vec3,
    },
    /// Sphere.
    Sphere {
        /// Center point
        center: Vec3,
        /// Radius
        radius: f32,
    },
}

/// A static volume tagged with an opaque identifier (e.g. which wall).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Opaque identifier, unique within an area
    pub id: String,
    /// Geometric shape
    pub shape: Shape,
}

impl Volume {
    /// Create an axis-aligned box volume.
    pub fn aabb(id: impl Into<String>, min: Vec3, max: Vec3) -> Self {
        Self {
            id: id.into(),
            shape: Shape::Box { min, max },
        }
    }

    /// Create a sphere volume.
    pub fn sphere(id: impl Into<String>, center: Vec3, radius: f32) -> Self {
        Self {
            id: id.into(),
            shape: Shape::Sphere { center, radius },
        }
    }

    /// Test intersection against a sphere of `radius` centered at `center`.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        match self.shape {
            Shape::Box { .. } => {
                let closest = self.closest_point(center);
                closest.distance_squared(center) <= radius * radius
            }
            Shape::Sphere { center: c, radius: r } => {
                let combined = r + radius;
                c.distance_squared(center) <= combined * combined
            }
        }
    }

    /// Closest point on the volume's surface (or interior, for boxes) to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        match self.shape {
            Shape::Box { min, max } => Vec3::new(
                point.x.clamp(min.x, max.x),
                point.y.clamp(min.y, max.y),
                point.z.clamp(min.z, max.z),
            ),
            Shape::Sphere { center, radius } => {
                let dir = (point - center).normalize();
                // A query at the exact center has no direction; the center
                // itself is returned and the caller sees a zero normal.
                center + dir.scale(radius)
            }
        }
    }

    /// Test whether `point` lies inside the volume.
    pub fn contains_point(&self, point: Vec3) -> bool {
        match self.shape {
            Shape::Box { min, max } => {
                point.x >= min.x
                    && point.x <= max.x
                    && point.y >= min.y
                    && point.y <= max.y
                    && point.z >= min.z
                    && point.z <= max.z
            }
            Shape::Sphere { center, radius } => {
                center.distance_squared(point) <= radius * radius
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
