//! Doorway Zones
//!
//! Trigger regions that offer an area transition while the avatar stands
//! inside them. Occupancy is a point test against the avatar position,
//! scanned in the supplied order so results are deterministic.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::core::volume::Volume;

/// A doorway region and the area it leads to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier, unique within an area
    pub id: String,
    /// Region the avatar must stand in
    pub region: Volume,
    /// Area entered when the zone is activated
    pub target_area: String,
}

impl Zone {
    /// Create a zone.
    pub fn new(id: impl Into<String>, region: Volume, target_area: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            region,
            target_area: target_area.into(),
        }
    }
}

/// Ids of the zones containing `position`, in the supplied zone order.
pub fn occupied_zones<'a>(zones: &'a [Zone], position: Vec3) -> Vec<&'a str> {
    zones
        .iter()
        .filter(|zone| zone.region.contains_point(position))
        .map(|zone| zone.id.as_str())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_box(id: &str, min: Vec3, max: Vec3) -> Zone {
        Zone::new(id, Volume::aabb(id, min, max), "showcase")
    }

    #[test]
    fn test_empty_outside_all_zones() {
        let zones = vec![zone_box(
            "projects",
            Vec3::new(105.0, -50.0, 132.0),
            Vec3::new(188.0, 50.0, 408.0),
        )];
        assert!(occupied_zones(&zones, Vec3::new(0.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_single_zone_occupancy() {
        let zones = vec![zone_box(
            "projects",
            Vec3::new(105.0, -50.0, 132.0),
            Vec3::new(188.0, 50.0, 408.0),
        )];
        let inside = Vec3::new(140.0, 0.0, 200.0);
        assert_eq!(occupied_zones(&zones, inside), vec!["projects"]);
    }

    #[test]
    fn test_overlapping_zones_keep_supplied_order() {
        let zones = vec![
            zone_box("skills", Vec3::new(365.0, -50.0, -60.0), Vec3::new(504.0, 50.0, 20.0)),
            zone_box("shop", Vec3::new(365.0, -50.0, -60.0), Vec3::new(504.0, 50.0, 20.0)),
        ];
        let inside = Vec3::new(400.0, 0.0, -20.0);
        assert_eq!(occupied_zones(&zones, inside), vec!["skills", "shop"]);

        let reversed: Vec<Zone> = zones.into_iter().rev().collect();
        assert_eq!(occupied_zones(&reversed, inside), vec!["shop", "skills"]);
    }
}
