// THEORY:
// The `watch_pair` module defines the unit of tracked state: one (observer,
// target) relationship with its own configuration, its continuous perception
// accumulator, and its last recorded discrete state. A `WatchPair` is a plain
// data record: it holds state and knows nothing about how visibility is
// sampled or when transitions fire; that logic lives in the tick driver.
//
// Two pairs are considered "the same" iff their targets are the same scene
// node, regardless of observer. The registry enforces at most one pair per
// target, so the target pointer is the sole dedup key.

use crate::core_modules::scene::SceneRef;
use crate::core_modules::signal::{ChannelRef, WatchChannel};

pub const DEFAULT_CONE_ANGLE_DEGREES: f32 = 30.0;
pub const DEFAULT_MAX_DISTANCE: f32 = 1000.0;

/// The discrete attention state recorded for a watch pair.
///
/// `Undetermined` is the freshly-created state for continuous watches; a
/// transition into it never fires a notification, and once left it is never
/// re-entered. Only `Captured` <-> `Lost` transitions notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionState {
    Undetermined,
    Captured,
    Lost,
}

/// Immutable per-pair configuration, fixed at creation. A later registration
/// call on the same target never overwrites it.
#[derive(Debug, Clone, Copy)]
pub struct WatchConfig {
    /// Half-angle of the visibility cone, in degrees.
    pub cone_angle_degrees: f32,
    /// Maximum detection range. Zero or negative disables the distance check.
    pub max_distance: f32,
    /// Whether the occlusion query must additionally report a clear line.
    pub consider_occlusion: bool,
    /// One-shot pairs remove themselves after their first fired transition.
    pub one_shot: bool,
    /// Perception gain per second while visible. Zero or negative means a
    /// single visible sample saturates perception instantly.
    pub capture_rate: f32,
    /// Perception decay per second while not visible. Same zero semantics.
    pub lose_rate: f32,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            cone_angle_degrees: DEFAULT_CONE_ANGLE_DEGREES,
            max_distance: DEFAULT_MAX_DISTANCE,
            consider_occlusion: false,
            one_shot: false,
            capture_rate: 0.0,
            lose_rate: 0.0,
        }
    }
}

/// One tracked (observer, target) relationship.
pub struct WatchPair {
    /// Weak back-reference to the observing camera node. Not owned.
    pub observer: SceneRef,
    /// Weak back-reference to the watched node. Not owned; sole dedup key.
    pub target: SceneRef,
    pub config: WatchConfig,
    /// Last recorded discrete state. One-shot pairs are seeded with the
    /// opposite terminal value at creation so their first qualifying
    /// transition fires.
    pub state: AttentionState,
    /// Continuous perception accumulator, clamped to [0, 1] after every
    /// integration step.
    pub perception: f32,
    /// The pair's notification channel. Never absent while the pair is in the
    /// registry.
    pub channel: ChannelRef,
}

impl WatchPair {
    pub fn new(observer: SceneRef, target: SceneRef, config: WatchConfig) -> Self {
        Self {
            observer,
            target,
            config,
            state: AttentionState::Undetermined,
            perception: 0.0,
            channel: WatchChannel::new(),
        }
    }
}
