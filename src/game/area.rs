//! World Areas
//!
//! Static data per playable area: collision volumes, spawn point and
//! doorway zones. Volume lists are built once here, not per frame.

use crate::core::vec3::Vec3;
use crate::core::volume::Volume;
use crate::game::zones::Zone;

/// The open-world plaza the avatar starts in.
pub const PLAZA: &str = "plaza";

/// The interior every doorway leads to.
pub const SHOWCASE: &str = "showcase";

/// Supplies per-area static data to the simulation.
///
/// Implementations own the data; the core borrows it for the current
/// frame only. Unknown area ids yield empty data, never errors.
pub trait AreaSource {
    /// Static collision volumes for an area.
    fn collision_volumes(&self, area_id: &str) -> &[Volume];

    /// Spawn point for an area.
    fn spawn_point(&self, area_id: &str) -> Vec3;

    /// Doorway zones for an area, in authored (deterministic) order.
    fn zones(&self, area_id: &str) -> &[Zone];
}

#[derive(Clone, Debug)]
struct AreaDef {
    id: &'static str,
    spawn: Vec3,
    volumes: Vec<Volume>,
    zones: Vec<Zone>,
}

/// Built-in catalog of the portfolio world's areas.
#[derive(Clone, Debug)]
pub struct PortfolioWorld {
    areas: Vec<AreaDef>,
}

impl PortfolioWorld {
    /// Build the authored world data.
    pub fn new() -> Self {
        let plaza_volumes = vec![
            Volume::aabb(
                "right-wall",
                Vec3::new(0.0, -21.0, -190.0),
                Vec3::new(560.0, 31.0, -190.0),
            ),
            Volume::aabb(
                "left-wall",
                Vec3::new(70.0, -21.0, -300.0),
                Vec3::new(70.0, 31.0, 104.0),
            ),
        ];

        let plaza_zones = vec![
            Zone::new(
                "projects",
                Volume::aabb(
                    "projects-door",
                    Vec3::new(105.0, -50.0, 132.0),
                    Vec3::new(188.0, 50.0, 408.0),
                ),
                SHOWCASE,
            ),
            Zone::new(
                "about-me",
                Volume::aabb(
                    "about-me-door",
                    Vec3::new(105.0, -50.0, -46.0),
                    Vec3::new(188.0, 50.0, 86.0),
                ),
                SHOWCASE,
            ),
            Zone::new(
                "experience",
                Volume::aabb(
                    "experience-door",
                    Vec3::new(117.0, -50.0, -60.0),
                    Vec3::new(292.0, 50.0, 20.0),
                ),
                SHOWCASE,
            ),
            Zone::new(
                "skills",
                Volume::aabb(
                    "skills-door",
                    Vec3::new(365.0, -50.0, -60.0),
                    Vec3::new(504.0, 50.0, 20.0),
                ),
                SHOWCASE,
            ),
            // The shop shares the skills doorway footprint in the
            // authored data; both ids report when the avatar stands there.
            Zone::new(
                "shop",
                Volume::aabb(
                    "shop-door",
                    Vec3::new(365.0, -50.0, -60.0),
                    Vec3::new(504.0, 50.0, 20.0),
                ),
                SHOWCASE,
            ),
        ];

        let areas = vec![
            AreaDef {
                id: PLAZA,
                spawn: Vec3::new(93.0, -8.0, -134.0),
                volumes: plaza_volumes,
                zones: plaza_zones,
            },
            AreaDef {
                id: SHOWCASE,
                spawn: Vec3::new(0.0, 20.0, 0.0),
                volumes: Vec::new(),
                zones: Vec::new(),
            },
        ];

        Self { areas }
    }

    fn area(&self, area_id: &str) -> Option<&AreaDef> {
        self.areas.iter().find(|area| area.id == area_id)
    }
}

impl Default for PortfolioWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaSource for PortfolioWorld {
    fn collision_volumes(&self, area_id: &str) -> &[Volume] {
        self.area(area_id).map(|a| a.volumes.as_slice()).unwrap_or(&[])
    }

    fn spawn_point(&self, area_id: &str) -> Vec3 {
        self.area(area_id).map(|a| a.spawn).unwrap_or(Vec3::ZERO)
    }

    fn zones(&self, area_id: &str) -> &[Zone] {
        self.area(area_id).map(|a| a.zones.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::zones::occupied_zones;

    #[test]
    fn test_plaza_data_is_authored() {
        let world = PortfolioWorld::new();
        assert_eq!(world.collision_volumes(PLAZA).len(), 2);
        assert_eq!(world.zones(PLAZA).len(), 5);
        assert_eq!(world.spawn_point(PLAZA), Vec3::new(93.0, -8.0, -134.0));
    }

    #[test]
    fn test_showcase_is_open() {
        let world = PortfolioWorld::new();
        assert!(world.collision_volumes(SHOWCASE).is_empty());
        assert!(world.zones(SHOWCASE).is_empty());
    }

    #[test]
    fn test_unknown_area_yields_empty_data() {
        let world = PortfolioWorld::new();
        assert!(world.collision_volumes("attic").is_empty());
        assert!(world.zones("attic").is_empty());
        assert_eq!(world.spawn_point("attic"), Vec3::ZERO);
    }

    #[test]
    fn test_skills_and_shop_doorways_overlap() {
        let world = PortfolioWorld::new();
        let standing = Vec3::new(400.0, 0.0, -20.0);
        let occupied = occupied_zones(world.zones(PLAZA), standing);
        assert_eq!(occupied, vec!["skills", "shop"]);
    }

    #[test]
    fn test_spawn_does_not_touch_the_walls() {
        let world = PortfolioWorld::new();
        let spawn = world.spawn_point(PLAZA);
        for volume in world.collision_volumes(PLAZA) {
            assert!(!volume.intersects_sphere(spawn, 5.0), "spawn overlaps {}", volume.id);
        }
    }
}
