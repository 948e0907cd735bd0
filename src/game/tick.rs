//! Frame Tick
//!
//! One simulation update per rendered frame, driven by the host's
//! display-synced loop. Order per frame: input snapshot -> motion ->
//! collision -> apply to avatar -> zone occupancy -> camera. Nothing here
//! blocks, suspends or reads the clock.

use crate::config::SimConfig;
use crate::core::vec3::Vec3;
use crate::game::area::AreaSource;
use crate::game::collision;
use crate::game::events::WorldEvent;
use crate::game::input::InputSnapshot;
use crate::game::motion::MotionMode;
use crate::game::state::WorldState;
use crate::game::zones::occupied_zones;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct FrameResult {
    /// Events generated this tick
    pub events: Vec<WorldEvent>,
    /// Displacement actually applied to the avatar
    pub displacement: Vec3,
    /// Volume that blocked or deflected the avatar, if any
    pub collided_volume: Option<String>,
}

/// Run one simulation frame.
///
/// Before the asset handoff ([`WorldState::attach_avatar`]) the world has
/// no avatar or camera and the tick is a no-op apart from the frame
/// counter.
pub fn tick(
    world: &mut WorldState,
    snapshot: &InputSnapshot,
    areas: &impl AreaSource,
    config: &SimConfig,
) -> FrameResult {
    // 0. Advance frame counter
    world.frame += 1;
    let frame = world.frame;

    let (avatar_position, camera_forward) = match (&world.avatar, &world.camera) {
        (Some(avatar), Some(camera)) => (avatar.position, camera.horizontal_forward()),
        // Assets still loading: nothing to update
        _ => {
            return FrameResult {
                events: world.take_events(),
                ..FrameResult::default()
            };
        }
    };

    let mut events = Vec::new();

    // 1. Surface a fresh click request before resolving motion
    if let Some(target) = snapshot.click_target {
        events.push(WorldEvent::move_target_set(frame, target));
    }

    // 2. Motion: candidate displacement for the frame
    let intent = world
        .motion
        .resolve(snapshot, avatar_position, camera_forward, config);
    if intent.target_cancelled {
        events.push(WorldEvent::move_target_aborted(frame));
    }
    if intent.target_reached {
        events.push(WorldEvent::move_target_reached(frame));
    }

    // 3. Collision: validate or slide the candidate
    let area_id = world.area_id.clone();
    let volumes = areas.collision_volumes(&area_id);
    let resolution = collision::resolve(avatar_position, intent.displacement, volumes, None, config);
    let collided_volume = resolution.volume_id.map(str::to_string);

    let mut accepted = resolution.displacement;
    if intent.mode == MotionMode::ClickToMove && collided_volume.is_some() {
        // Click moves do not slide; a blocked step aborts the whole move
        accepted = Vec3::ZERO;
        world.motion.clear_target();
        events.push(WorldEvent::move_target_aborted(frame));
    }

    // 4. Apply the accepted displacement and update facing
    if let Some(avatar) = world.avatar.as_mut() {
        avatar.apply_displacement(accepted, config.avatar_forward_offset);
    }
    let avatar_position = match &world.avatar {
        Some(avatar) => avatar.position,
        None => avatar_position,
    };

    // 5. Zone occupancy, deduplicated against the last frame
    let occupied: Vec<String> = occupied_zones(areas.zones(&area_id), avatar_position)
        .into_iter()
        .map(str::to_string)
        .collect();
    if occupied != world.occupied {
        world.occupied = occupied.clone();
        events.push(WorldEvent::zone_occupancy_changed(frame, occupied));
    }

    // 6. Camera: consume the orbit delta and follow the avatar
    if let Some(camera) = world.camera.as_mut() {
        camera.update(snapshot.orbit_delta, avatar_position, config);
    }

    for event in events {
        world.push_event(event);
    }

    FrameResult {
        events: world.take_events(),
        displacement: accepted,
        collided_volume,
    }
}

// =============================================================================
// TESTS
// =============================================================================
