//! World Events
//!
//! Notifications the core emits for the host's UI and scene-switch
//! layers. Occupancy changes are deduplicated: an event fires only when
//! the occupied set actually changes, never every frame.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WorldEventData {
    /// The set of doorway zones containing the avatar changed.
    ZoneOccupancyChanged {
        /// Occupied zone ids, in authored order
        occupied: Vec<String>,
    },

    /// A doorway zone was confirmed and the area switch begins.
    ZoneActivated {
        /// Activated zone
        zone_id: String,
        /// Destination area
        target_area: String,
    },

    /// The avatar entered an area (initial handoff or zone activation).
    AreaEntered {
        /// Entered area
        area_id: String,
    },

    /// A click set a new move target (host shows its ground marker).
    MoveTargetSet {
        /// Requested ground point
        target: Vec3,
    },

    /// The avatar arrived at the click target.
    MoveTargetReached,

    /// The click move was cancelled by directional input or a collision.
    MoveTargetAborted,
}

/// A world event stamped with the frame it occurred on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    /// Frame counter value when the event fired
    pub frame: u64,
    /// Event payload
    pub data: WorldEventData,
}

impl WorldEvent {
    /// Create an occupancy-changed event.
    pub fn zone_occupancy_changed(frame: u64, occupied: Vec<String>) -> Self {
        Self {
            frame,
            data: WorldEventData::ZoneOccupancyChanged { occupied },
        }
    }

    /// Create a zone-activated event.
    pub fn zone_activated(
        frame: u64,
        zone_id: impl Into<String>,
        target_area: impl Into<String>,
    ) -> Self {
        Self {
            frame,
            data: WorldEventData::ZoneActivated {
                zone_id: zone_id.into(),
                target_area: target_area.into(),
            },
        }
    }

    /// Create an area-entered event.
    pub fn area_entered(frame: u64, area_id: impl Into<String>) -> Self {
        Self {
            frame,
            data: WorldEventData::AreaEntered { area_id: area_id.into() },
        }
    }

    /// Create a move-target-set event.
    pub fn move_target_set(frame: u64, target: Vec3) -> Self {
        Self {
            frame,
            data: WorldEventData::MoveTargetSet { target },
        }
    }

    /// Create a move-target-reached event.
    pub fn move_target_reached(frame: u64) -> Self {
        Self {
            frame,
            data: WorldEventData::MoveTargetReached,
        }
    }

    /// Create a move-target-aborted event.
    pub fn move_target_aborted(frame: u64) -> Self {
        Self {
            frame,
            data: WorldEventData::MoveTargetAborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_round_trip_through_json() {
        let event = WorldEvent::zone_activated(42, "projects", "showcase");
        let json = serde_json::to_string(&event).unwrap();
        let back: WorldEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_occupancy_event_preserves_order() {
        let event =
            WorldEvent::zone_occupancy_changed(1, vec!["skills".into(), "shop".into()]);
        match event.data {
            WorldEventData::ZoneOccupancyChanged { occupied } => {
                assert_eq!(occupied, vec!["skills", "shop"]);
            }
            _ => panic!("wrong variant"),
        }
    }
}
