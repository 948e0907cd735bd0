//! World State
//!
//! Authoritative simulation state: the avatar transform, the camera rig
//! and per-area bookkeeping. Owned by the core and mutated once per frame
//! by the tick; rendering reads from it, never the reverse.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimConfig;
use crate::core::vec3::Vec3;
use crate::game::area::AreaSource;
use crate::game::camera::CameraRig;
use crate::game::events::WorldEvent;
use crate::game::motion::MotionResolver;

// =============================================================================
// AVATAR STATE
// =============================================================================

/// The avatar's simulation transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    /// World position
    pub position: Vec3,

    /// Rotation about the vertical axis, radians
    pub facing_angle: f32,

    /// Unit direction of the last non-zero accepted displacement.
    /// Defaults to world forward.
    pub last_valid_direction: Vec3,
}

impl AvatarState {
    /// Create an avatar at a spawn position, facing world forward.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            facing_angle: 0.0,
            last_valid_direction: Vec3::FORWARD,
        }
    }

    /// Apply an accepted (post-collision) displacement.
    ///
    /// A non-zero displacement moves the avatar, turns it to face the
    /// travel direction (minus the model's forward offset) and records
    /// the direction. A zero displacement changes nothing: the avatar
    /// keeps its last facing while stationary.
    pub fn apply_displacement(&mut self, displacement: Vec3, forward_offset: f32) {
        if displacement.length_squared() == 0.0 {
            return;
        }
        self.position = self.position + displacement;
        self.facing_angle = displacement.x.atan2(displacement.z) - forward_offset;
        self.last_valid_direction = displacement.normalize();
    }
}

// =============================================================================
// WORLD STATE
// =============================================================================

/// Complete state of the walkable world session.
///
/// Created at startup with an area id; the avatar and camera appear when
/// the host's asset loading resolves ([`WorldState::attach_avatar`]).
/// Until then every update is a no-op.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// Active area id
    pub area_id: String,

    /// Frame counter, advanced once per tick
    pub frame: u64,

    /// Avatar transform, absent until assets resolve
    pub avatar: Option<AvatarState>,

    /// Camera rig, absent until assets resolve
    pub camera: Option<CameraRig>,

    /// Motion resolver holding the in-flight click target
    pub(crate) motion: MotionResolver,

    /// Zone ids currently containing the avatar, authored order
    pub(crate) occupied: Vec<String>,

    /// Events generated since the last drain
    #[serde(skip)]
    pending_events: Vec<WorldEvent>,
}

impl WorldState {
    /// Create a world in the given area, before assets have loaded.
    pub fn new(area_id: impl Into<String>) -> Self {
        Self {
            area_id: area_id.into(),
            frame: 0,
            avatar: None,
            camera: None,
            motion: MotionResolver::new(),
            occupied: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Whether the avatar and camera are present and updates do work.
    pub fn is_ready(&self) -> bool {
        self.avatar.is_some() && self.camera.is_some()
    }

    /// One-shot handoff from the host's asset loader.
    ///
    /// Spawns the avatar at the active area's spawn point and puts the
    /// camera at its base offset. Safe to drive the world before this is
    /// called; ticks simply do nothing.
    pub fn attach_avatar(&mut self, areas: &impl AreaSource, config: &SimConfig) {
        let spawn = areas.spawn_point(&self.area_id);
        self.avatar = Some(AvatarState::new(spawn));
        self.camera = Some(CameraRig::new(spawn, config));
        info!("Avatar attached in '{}' at {}", self.area_id, spawn);
        self.push_event(WorldEvent::area_entered(self.frame, self.area_id.clone()));
    }

    /// The in-flight click target, if any.
    pub fn active_click_target(&self) -> Option<Vec3> {
        self.motion.active_target()
    }

    /// Zone ids currently containing the avatar.
    pub fn occupied_zones(&self) -> &[String] {
        &self.occupied
    }

    /// Confirm a doorway and switch to its target area.
    ///
    /// Proximity alone never switches areas; this is the explicit confirm
    /// action. Only zones the avatar currently occupies can be activated;
    /// anything else returns false and changes nothing.
    pub fn activate_zone(
        &mut self,
        zone_id: &str,
        areas: &impl AreaSource,
        config: &SimConfig,
    ) -> bool {
        if !self.occupied.iter().any(|id| id == zone_id) {
            return false;
        }
        let Some(zone) = areas.zones(&self.area_id).iter().find(|z| z.id == zone_id) else {
            return false;
        };
        let target_area = zone.target_area.clone();
        info!("Doorway '{}' activated, entering '{}'", zone_id, target_area);
        self.push_event(WorldEvent::zone_activated(self.frame, zone_id, target_area.clone()));
        self.enter_area(&target_area, areas, config);
        true
    }

    /// Switch to an area.
    ///
    /// Resets the avatar to the area's spawn point, drops any click
    /// target, clears zone occupancy (notifying if it was non-empty) and
    /// snaps the camera behind the new spawn. Orbit angles carry over
    /// unless [`SimConfig::reset_orbit_on_area_change`] is set.
    pub fn enter_area(&mut self, area_id: &str, areas: &impl AreaSource, config: &SimConfig) {
        self.area_id = area_id.to_string();
        self.motion.clear_target();

        if !self.occupied.is_empty() {
            self.occupied.clear();
            self.push_event(WorldEvent::zone_occupancy_changed(self.frame, Vec::new()));
        }

        let spawn = areas.spawn_point(area_id);
        if let Some(avatar) = self.avatar.as_mut() {
            *avatar = AvatarState::new(spawn);
        }
        if let Some(camera) = self.camera.as_mut() {
            if config.reset_orbit_on_area_change {
                camera.reset_orbit();
            }
            camera.snap_to(spawn, config);
        }

        self.push_event(WorldEvent::area_entered(self.frame, area_id));
    }

    /// Queue an event for the host.
    pub fn push_event(&mut self, event: WorldEvent) {
        self.pending_events.push(event);
    }

    /// Drain queued events (consumes them).
    pub fn take_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    use crate::core::volume::Volume;
    use crate::game::events::WorldEventData;
    use crate::game::input::OrbitDelta;
    use crate::game::zones::Zone;

    struct TwoRooms;

    impl AreaSource for TwoRooms {
        fn collision_volumes(&self, _area_id: &str) -> &[Volume] {
            &[]
        }

        fn spawn_point(&self, area_id: &str) -> Vec3 {
            match area_id {
                "plaza" => Vec3::new(93.0, -8.0, -134.0),
                "showcase" => Vec3::new(0.0, 20.0, 0.0),
                _ => Vec3::ZERO,
            }
        }

        fn zones(&self, area_id: &str) -> &[Zone] {
            static DOOR: std::sync::OnceLock<Vec<Zone>> = std::sync::OnceLock::new();
            if area_id != "plaza" {
                return &[];
            }
            DOOR.get_or_init(|| {
                vec![Zone::new(
                    "projects",
                    Volume::aabb(
                        "projects-door",
                        Vec3::new(50.0, -50.0, -200.0),
                        Vec3::new(150.0, 50.0, -100.0),
                    ),
                    "showcase",
                )]
            })
        }
    }

    #[test]
    fn test_avatar_facing_follows_displacement() {
        let mut avatar = AvatarState::new(Vec3::ZERO);

        avatar.apply_displacement(Vec3::new(1.0, 0.0, 0.0), 0.0);
        assert!((avatar.facing_angle - FRAC_PI_2).abs() < 1e-5);
        assert!(avatar.last_valid_direction.distance(Vec3::RIGHT) < 1e-5);
        assert_eq!(avatar.position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_avatar_forward_offset_subtracted() {
        let mut avatar = AvatarState::new(Vec3::ZERO);
        avatar.apply_displacement(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_4);
        assert!((avatar.facing_angle - (FRAC_PI_2 - FRAC_PI_4)).abs() < 1e-5);
    }

    #[test]
    fn test_avatar_keeps_facing_when_stationary() {
        let mut avatar = AvatarState::new(Vec3::ZERO);
        avatar.apply_displacement(Vec3::new(0.0, 0.0, -1.0), 0.0);
        let facing = avatar.facing_angle;

        avatar.apply_displacement(Vec3::ZERO, 0.0);
        assert_eq!(avatar.facing_angle, facing);
        assert!(avatar.last_valid_direction.distance(Vec3::new(0.0, 0.0, -1.0)) < 1e-5);
    }

    #[test]
    fn test_world_starts_not_ready() {
        let world = WorldState::new("plaza");
        assert!(!world.is_ready());
        assert_eq!(world.frame, 0);
    }

    #[test]
    fn test_attach_avatar_spawns_and_notifies() {
        let cfg = SimConfig::default();
        let areas = TwoRooms;
        let mut world = WorldState::new("plaza");

        world.attach_avatar(&areas, &cfg);

        assert!(world.is_ready());
        let avatar = world.avatar.as_ref().unwrap();
        assert_eq!(avatar.position, Vec3::new(93.0, -8.0, -134.0));

        let events = world.take_events();
        assert!(events.iter().any(|e| matches!(
            &e.data,
            WorldEventData::AreaEntered { area_id } if area_id == "plaza"
        )));
    }

    #[test]
    fn test_activate_zone_requires_occupancy() {
        let cfg = SimConfig::default();
        let areas = TwoRooms;
        let mut world = WorldState::new("plaza");
        world.attach_avatar(&areas, &cfg);

        assert!(!world.activate_zone("projects", &areas, &cfg));
        assert_eq!(world.area_id, "plaza");
    }

    #[test]
    fn test_activate_zone_switches_area() {
        let cfg = SimConfig::default();
        let areas = TwoRooms;
        let mut world = WorldState::new("plaza");
        world.attach_avatar(&areas, &cfg);
        world.take_events();

        world.occupied = vec!["projects".to_string()];
        assert!(world.activate_zone("projects", &areas, &cfg));

        assert_eq!(world.area_id, "showcase");
        let avatar = world.avatar.as_ref().unwrap();
        assert_eq!(avatar.position, Vec3::new(0.0, 20.0, 0.0));
        assert!(world.occupied_zones().is_empty());
        assert_eq!(world.active_click_target(), None);

        let events = world.take_events();
        let kinds: Vec<&WorldEventData> = events.iter().map(|e| &e.data).collect();
        assert!(matches!(kinds[0], WorldEventData::ZoneActivated { zone_id, .. } if zone_id == "projects"));
        assert!(kinds.iter().any(|d| matches!(
            d,
            WorldEventData::ZoneOccupancyChanged { occupied } if occupied.is_empty()
        )));
        assert!(kinds.iter().any(|d| matches!(
            d,
            WorldEventData::AreaEntered { area_id } if area_id == "showcase"
        )));
    }

    #[test]
    fn test_orbit_preserved_across_areas_by_default() {
        let cfg = SimConfig::default();
        let areas = TwoRooms;
        let mut world = WorldState::new("plaza");
        world.attach_avatar(&areas, &cfg);

        let camera = world.camera.as_mut().unwrap();
        camera.update(OrbitDelta { yaw: 1.0, pitch: 0.25 }, Vec3::ZERO, &cfg);

        world.enter_area("showcase", &areas, &cfg);
        let camera = world.camera.as_ref().unwrap();
        assert!((camera.orbit_yaw() - 1.0).abs() < 1e-6);
        assert!((camera.orbit_pitch() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_reset_when_configured() {
        let cfg = SimConfig {
            reset_orbit_on_area_change: true,
            ..SimConfig::default()
        };
        let areas = TwoRooms;
        let mut world = WorldState::new("plaza");
        world.attach_avatar(&areas, &cfg);

        let camera = world.camera.as_mut().unwrap();
        camera.update(OrbitDelta { yaw: 1.0, pitch: 0.25 }, Vec3::ZERO, &cfg);

        world.enter_area("showcase", &areas, &cfg);
        let camera = world.camera.as_ref().unwrap();
        assert_eq!(camera.orbit_yaw(), 0.0);
        assert_eq!(camera.orbit_pitch(), 0.0);
    }
}
