//! # Cloudwalk Simulation Core
//!
//! Movement, collision and camera-follow core for the Cloudwalk portfolio
//! world: a player-controlled avatar walks a small open world, doorway
//! zones offer entry into portfolio sections, and an orbit-style camera
//! follows the avatar.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CLOUDWALK SIM CORE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Geometric primitives                      │
//! │  ├── vec3.rs     - f32 world-space vectors                   │
//! │  └── volume.rs   - Box/sphere collision volumes              │
//! │                                                              │
//! │  game/           - Frame-driven logic                        │
//! │  ├── input.rs    - Device event capture, snapshots           │
//! │  ├── motion.rs   - Keyboard and click-to-move resolution     │
//! │  ├── collision.rs- Wall sliding and rejection                │
//! │  ├── camera.rs   - Orbit follow camera                       │
//! │  ├── zones.rs    - Doorway occupancy                         │
//! │  ├── area.rs     - Per-area static data                      │
//! │  ├── state.rs    - Avatar and world state                    │
//! │  ├── tick.rs     - Frame orchestration                       │
//! │  └── events.rs   - UI / scene-switch notifications           │
//! │                                                              │
//! │  config.rs       - Validated tuning surface                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frame Contract
//!
//! The host's display-synced loop drives [`game::tick::tick`] once per
//! rendered frame with a snapshot from its [`game::input::InputState`].
//! Everything is single-threaded: device events buffer between ticks, all
//! mutation happens inside the tick, and the renderer only reads the
//! resulting state. The core never reads the clock; pointer timestamps
//! are supplied by the host.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use config::{ConfigError, SimConfig};
pub use self::core::vec3::Vec3;
pub use self::core::volume::{Shape, Volume};
pub use game::area::{AreaSource, PortfolioWorld, PLAZA, SHOWCASE};
pub use game::camera::CameraRig;
pub use game::events::{WorldEvent, WorldEventData};
pub use game::input::{InputSnapshot, InputState};
pub use game::state::{AvatarState, WorldState};
pub use game::tick::{tick, FrameResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
