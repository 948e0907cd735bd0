//! Input Capture and Buffering
//!
//! Raw device events arrive asynchronously relative to the frame tick and
//! possibly several times per frame. [`InputState`] accumulates them
//! between ticks; [`InputState::snapshot`] hands the frame driver one
//! stable [`InputSnapshot`] per frame.
//!
//! Rapid key toggling within a frame collapses to the final state:
//! last-state-wins is the required semantics, not an accident of the
//! representation.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::core::vec3::Vec3;

// =============================================================================
// DIRECTION KEYS
// =============================================================================

/// Logical movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DirectionKey {
    /// Toward where the camera looks
    Forward = 0,
    /// Away from where the camera looks
    Back = 1,
    /// Camera-relative left
    Left = 2,
    /// Camera-relative right
    Right = 3,
}

impl DirectionKey {
    /// Map a raw key name to a logical direction.
    ///
    /// Accepts the WASD and arrow-key bindings, case-insensitively.
    /// Returns `None` for anything else; unknown keys are not an error.
    pub fn from_key_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "w" | "arrowup" => Some(Self::Forward),
            "s" | "arrowdown" => Some(Self::Back),
            "a" | "arrowleft" => Some(Self::Left),
            "d" | "arrowright" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Set of held direction keys (packed bits).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// Empty set.
    pub const EMPTY: Self = Self(0);

    #[inline]
    fn flag(key: DirectionKey) -> u8 {
        1 << (key as u8)
    }

    /// Mark a direction held or released.
    #[inline]
    pub fn set(&mut self, key: DirectionKey, held: bool) {
        if held {
            self.0 |= Self::flag(key);
        } else {
            self.0 &= !Self::flag(key);
        }
    }

    /// Check whether a direction is held.
    #[inline]
    pub fn contains(self, key: DirectionKey) -> bool {
        self.0 & Self::flag(key) != 0
    }

    /// Check whether no direction is held.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Release every direction.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

// =============================================================================
// ORBIT DELTA
// =============================================================================

/// Orbit rotation accumulated from pointer movement, radians.
///
/// Consume-once: draining the accumulator into a snapshot resets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitDelta {
    /// Rotation about world-up
    pub yaw: f32,
    /// Rotation toward/away from overhead
    pub pitch: f32,
}

impl OrbitDelta {
    /// True when both components are zero.
    pub fn is_zero(self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Frame-stable view of what the player wants to do right now.
///
/// Rebuilt every frame by [`InputState::snapshot`]; never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Directions held at snapshot time
    pub held: DirectionSet,
    /// Ground point requested by a click since the last snapshot
    pub click_target: Option<Vec3>,
    /// Orbit rotation accumulated since the last snapshot
    pub orbit_delta: OrbitDelta,
    /// Whether the pointer is currently held down
    pub is_dragging: bool,
}

// =============================================================================
// INPUT STATE
// =============================================================================

/// Accumulates raw device events between frame ticks.
///
/// Owned by the frame driver and injected into the tick; there are no
/// process-wide input globals.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: DirectionSet,
    press_started_at: Option<u64>,
    orbit_delta: OrbitDelta,
    pending_click: Option<Vec3>,
}

impl InputState {
    /// Create an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Unknown key names are ignored.
    pub fn record_key_down(&mut self, name: &str) {
        if let Some(key) = DirectionKey::from_key_name(name) {
            self.held.set(key, true);
        }
    }

    /// Record a key release. Unknown key names are ignored.
    pub fn record_key_up(&mut self, name: &str) {
        if let Some(key) = DirectionKey::from_key_name(name) {
            self.held.set(key, false);
        }
    }

    /// Record a pointer press at a host-supplied timestamp (milliseconds).
    ///
    /// The press starts a drag; whether it also counts as a click is
    /// decided at release from the hold duration.
    pub fn record_pointer_down(&mut self, timestamp_ms: u64) {
        self.press_started_at = Some(timestamp_ms);
    }

    /// Record a pointer release.
    ///
    /// A hold shorter than [`SimConfig::click_hold_threshold_ms`] is a
    /// click; when the host resolved the click to a ground point (its
    /// raycast hit walkable floor), that point becomes the pending click
    /// target. A release with no matching press is a no-op.
    pub fn record_pointer_up(
        &mut self,
        timestamp_ms: u64,
        ground_point: Option<Vec3>,
        config: &SimConfig,
    ) {
        let Some(started) = self.press_started_at.take() else {
            return;
        };
        let duration = timestamp_ms.saturating_sub(started);
        if duration < config.click_hold_threshold_ms {
            if let Some(point) = ground_point {
                self.pending_click = Some(point);
            }
        }
    }

    /// Record pointer movement in pixels.
    ///
    /// While the pointer is held, movement orbits at the drag sensitivity;
    /// otherwise at the passive-look sensitivity when that is enabled.
    /// Positive deltas rotate yaw/pitch negative, matching a camera that
    /// follows the pointer.
    pub fn record_pointer_move(&mut self, delta_x: f32, delta_y: f32, config: &SimConfig) {
        let sensitivity = if self.press_started_at.is_some() {
            config.drag_sensitivity
        } else if config.passive_look_enabled {
            config.passive_look_sensitivity
        } else {
            return;
        };
        self.orbit_delta.yaw -= delta_x * sensitivity;
        self.orbit_delta.pitch -= delta_y * sensitivity;
    }

    /// Release all held keys. Called on window blur so focus loss never
    /// leaves a key stuck down. Pending clicks and accumulated orbit are
    /// kept.
    pub fn clear_all(&mut self) {
        self.held.clear();
    }

    /// Produce this frame's snapshot.
    ///
    /// Drains the orbit-delta accumulator and the pending click request;
    /// held-key state persists until the keys are released.
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held,
            click_target: self.pending_click.take(),
            orbit_delta: std::mem::take(&mut self.orbit_delta),
            is_dragging: self.press_started_at.is_some(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name_mapping() {
        assert_eq!(DirectionKey::from_key_name("w"), Some(DirectionKey::Forward));
        assert_eq!(DirectionKey::from_key_name("ArrowUp"), Some(DirectionKey::Forward));
        assert_eq!(DirectionKey::from_key_name("s"), Some(DirectionKey::Back));
        assert_eq!(DirectionKey::from_key_name("arrowleft"), Some(DirectionKey::Left));
        assert_eq!(DirectionKey::from_key_name("D"), Some(DirectionKey::Right));
        assert_eq!(DirectionKey::from_key_name("x"), None);
        assert_eq!(DirectionKey::from_key_name("Escape"), None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputState::new();
        input.record_key_down("Escape");
        input.record_key_down("q");
        assert!(input.snapshot().held.is_empty());
    }

    #[test]
    fn test_last_state_wins_within_frame() {
        let mut input = InputState::new();
        input.record_key_down("w");
        input.record_key_up("w");
        input.record_key_down("w");
        input.record_key_up("w");
        assert!(input.snapshot().held.is_empty());

        input.record_key_up("a");
        input.record_key_down("a");
        let snap = input.snapshot();
        assert!(snap.held.contains(DirectionKey::Left));
    }

    #[test]
    fn test_held_keys_persist_across_snapshots() {
        let mut input = InputState::new();
        input.record_key_down("w");
        assert!(input.snapshot().held.contains(DirectionKey::Forward));
        assert!(input.snapshot().held.contains(DirectionKey::Forward));
        input.record_key_up("w");
        assert!(input.snapshot().held.is_empty());
    }

    #[test]
    fn test_short_press_is_click() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();
        let point = Vec3::new(10.0, 20.0, -30.0);

        input.record_pointer_down(1_000);
        input.record_pointer_up(1_100, Some(point), &cfg);

        let snap = input.snapshot();
        assert_eq!(snap.click_target, Some(point));
        assert!(!snap.is_dragging);
    }

    #[test]
    fn test_long_press_is_drag_not_click() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();

        input.record_pointer_down(1_000);
        input.record_pointer_up(1_200, Some(Vec3::ZERO), &cfg);

        assert_eq!(input.snapshot().click_target, None);
    }

    #[test]
    fn test_click_without_ground_point_requests_nothing() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();

        input.record_pointer_down(0);
        input.record_pointer_up(50, None, &cfg);

        assert_eq!(input.snapshot().click_target, None);
    }

    #[test]
    fn test_pointer_up_without_down_is_noop() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();
        input.record_pointer_up(500, Some(Vec3::ZERO), &cfg);
        let snap = input.snapshot();
        assert_eq!(snap.click_target, None);
        assert!(!snap.is_dragging);
    }

    #[test]
    fn test_drag_sensitivity_applied_while_held() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();

        input.record_pointer_down(0);
        input.record_pointer_move(100.0, 50.0, &cfg);

        let snap = input.snapshot();
        assert!(snap.is_dragging);
        assert!((snap.orbit_delta.yaw - (-100.0 * cfg.drag_sensitivity)).abs() < 1e-7);
        assert!((snap.orbit_delta.pitch - (-50.0 * cfg.drag_sensitivity)).abs() < 1e-7);
    }

    #[test]
    fn test_passive_look_applied_while_released() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();

        input.record_pointer_move(100.0, 0.0, &cfg);

        let delta = input.snapshot().orbit_delta;
        assert!((delta.yaw - (-100.0 * cfg.passive_look_sensitivity)).abs() < 1e-9);
    }

    #[test]
    fn test_passive_look_can_be_disabled() {
        let cfg = SimConfig {
            passive_look_enabled: false,
            ..SimConfig::default()
        };
        let mut input = InputState::new();
        input.record_pointer_move(100.0, 100.0, &cfg);
        assert!(input.snapshot().orbit_delta.is_zero());
    }

    #[test]
    fn test_orbit_delta_is_consume_once() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();

        input.record_pointer_down(0);
        input.record_pointer_move(10.0, 10.0, &cfg);

        assert!(!input.snapshot().orbit_delta.is_zero());
        assert!(input.snapshot().orbit_delta.is_zero());
    }

    #[test]
    fn test_clear_all_releases_keys_only() {
        let cfg = SimConfig::default();
        let mut input = InputState::new();

        input.record_key_down("w");
        input.record_key_down("d");
        input.record_pointer_down(0);
        input.record_pointer_up(50, Some(Vec3::new(1.0, 0.0, 1.0)), &cfg);
        input.record_pointer_move(40.0, 0.0, &cfg);

        input.clear_all();

        let snap = input.snapshot();
        assert!(snap.held.is_empty());
        assert!(snap.click_target.is_some());
        assert!(!snap.orbit_delta.is_zero());
    }
}
