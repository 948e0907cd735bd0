//! Cloudwalk Demo Driver
//!
//! Scripted walkthrough of the portfolio world: orbit the camera, walk
//! with the keyboard, click-to-move into a doorway and enter a showcase.
//! Stands in for the rendering host; everything it does goes through the
//! same interfaces a real frontend would use.

use std::f32::consts::FRAC_PI_2;
use std::fs;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cloudwalk::{
    game::{
        area::{PortfolioWorld, PLAZA},
        events::WorldEventData,
        input::InputState,
        state::WorldState,
        tick::tick,
    },
    AreaSource, SimConfig, Vec3, WorldEvent, VERSION,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Cloudwalk Sim v{}", VERSION);

    let config = load_config()?;
    config.validate().context("invalid configuration")?;

    demo_walk(&config);
    Ok(())
}

/// Load configuration from the JSON file given as the first argument,
/// or fall back to the shipped tuning.
fn load_config() -> anyhow::Result<SimConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            let config: SimConfig =
                serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))?;
            info!("Loaded config from {}", path);
            Ok(config)
        }
        None => Ok(SimConfig {
            // The shipped cloud model's forward axis is a quarter turn
            // off world +z.
            avatar_forward_offset: FRAC_PI_2,
            ..SimConfig::default()
        }),
    }
}

/// Demo function to walk the world end to end.
fn demo_walk(config: &SimConfig) {
    info!("=== Starting Demo Walk ===");

    let areas = PortfolioWorld::new();
    let mut world = WorldState::new(PLAZA);
    let mut input = InputState::new();

    // Drive a few frames before assets resolve; these must be no-ops
    for _ in 0..3 {
        tick(&mut world, &input.snapshot(), &areas, config);
    }
    info!("{} frames ticked while loading", world.frame);

    world.attach_avatar(&areas, config);

    // Orbit drag: hold the pointer and sweep it sideways
    input.record_pointer_down(0);
    for _ in 0..30 {
        input.record_pointer_move(12.0, -2.0, config);
        let result = tick(&mut world, &input.snapshot(), &areas, config);
        log_events(&result.events);
    }
    input.record_pointer_up(500, None, config);
    if let Some(camera) = &world.camera {
        info!(
            "Orbit after drag: yaw {:.3} rad, pitch {:.3} rad",
            camera.orbit_yaw(),
            camera.orbit_pitch()
        );
    }

    // Keyboard walk
    input.record_key_down("w");
    for _ in 0..60 {
        let result = tick(&mut world, &input.snapshot(), &areas, config);
        log_events(&result.events);
    }
    input.record_key_up("w");
    if let Some(avatar) = &world.avatar {
        info!("After keyboard walk: {}", avatar.position);
    }

    // Click-to-move into the doorway strip east of the plaza
    let doorway_point = Vec3::new(146.0, -8.0, 18.0);
    input.record_pointer_down(1_000);
    input.record_pointer_up(1_080, Some(doorway_point), config);

    let mut arrived = false;
    for _ in 0..600 {
        let result = tick(&mut world, &input.snapshot(), &areas, config);
        log_events(&result.events);
        if result
            .events
            .iter()
            .any(|e| matches!(e.data, WorldEventData::MoveTargetReached))
        {
            arrived = true;
            break;
        }
        if result
            .events
            .iter()
            .any(|e| matches!(e.data, WorldEventData::MoveTargetAborted))
        {
            info!("Move aborted against {:?}", result.collided_volume);
            break;
        }
    }
    info!(
        "Click walk {} after {} frames",
        if arrived { "arrived" } else { "ended" },
        world.frame
    );

    // Confirm the first doorway on offer
    let offered = world.occupied_zones().first().cloned();
    match offered {
        Some(zone_id) => {
            world.activate_zone(&zone_id, &areas, config);
            for _ in 0..30 {
                let result = tick(&mut world, &input.snapshot(), &areas, config);
                log_events(&result.events);
            }
        }
        None => info!("No doorway underfoot; staying in the plaza"),
    }

    info!("=== Demo Results ===");
    info!("Area: {}", world.area_id);
    if let Some(avatar) = &world.avatar {
        info!(
            "Avatar at {} facing {:.3} rad",
            avatar.position, avatar.facing_angle
        );
    }
    if let Some(camera) = &world.camera {
        info!("Camera at {} looking at {}", camera.position(), camera.look_at());
    }
    info!("Total frames: {}", world.frame);
    info!("Spawn point on file: {}", areas.spawn_point(&world.area_id));
}

/// Log the events a frame produced.
fn log_events(events: &[WorldEvent]) {
    for event in events {
        match &event.data {
            WorldEventData::ZoneOccupancyChanged { occupied } => {
                if occupied.is_empty() {
                    info!("[frame {}] Left all doorways", event.frame);
                } else {
                    info!("[frame {}] Standing in doorways: {:?}", event.frame, occupied);
                }
            }
            WorldEventData::ZoneActivated { zone_id, target_area } => {
                info!("[frame {}] Doorway '{}' -> '{}'", event.frame, zone_id, target_area);
            }
            WorldEventData::AreaEntered { area_id } => {
                info!("[frame {}] Entered area '{}'", event.frame, area_id);
            }
            WorldEventData::MoveTargetSet { target } => {
                info!("[frame {}] Move target set: {}", event.frame, target);
            }
            WorldEventData::MoveTargetReached => {
                info!("[frame {}] Move target reached", event.frame);
            }
            WorldEventData::MoveTargetAborted => {
                info!("[frame {}] Move target aborted", event.frame);
            }
        }
    }
}
