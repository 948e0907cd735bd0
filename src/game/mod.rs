//! Game Logic Module
//!
//! Everything the frame loop drives, one update per rendered frame.
//!
//! ## Module Structure
//!
//! - `input`: Device event capture, per-frame snapshots
//! - `motion`: Directional and click-to-move displacement
//! - `collision`: Sphere-vs-volume resolution with wall sliding
//! - `camera`: Orbit follow camera
//! - `zones`: Doorway occupancy
//! - `area`: Per-area static data behind a provider trait
//! - `state`: Avatar and world state, area transitions
//! - `tick`: Frame orchestration
//! - `events`: Notifications for the UI and scene-switch layers

pub mod area;
pub mod camera;
pub mod collision;
pub mod events;
pub mod input;
pub mod motion;
pub mod state;
pub mod tick;
pub mod zones;

// Re-export key types
pub use area::{AreaSource, PortfolioWorld, PLAZA, SHOWCASE};
pub use camera::CameraRig;
pub use events::{WorldEvent, WorldEventData};
pub use input::{DirectionKey, DirectionSet, InputSnapshot, InputState, OrbitDelta};
pub use motion::{MotionIntent, MotionMode, MotionResolver};
pub use state::{AvatarState, WorldState};
pub use tick::{tick, FrameResult};
pub use zones::Zone;
