// THEORY:
// The `checker` module is the final, top-level API for the attention engine.
// It owns the registry of watch pairs and runs the per-frame pass that drives
// them: sample visibility, integrate perception, classify, and notify on
// state transitions. Its purpose is to give embedding code a single object to
// register watches against and a single `tick` to call from its frame loop.
//
// Key architectural principles:
// 1.  **Registry owns everything it tracks**: Watch pairs and their channels
//     are created here and die here. Scene nodes are never owned — every
//     stored reference is weak, and a dead reference prunes its pair on the
//     next pass rather than being an error.
// 2.  **Dedup by target**: At most one pair per target exists. A second
//     registration call on a watched target returns the existing pair's
//     channel and only grows its subscriber sets; the call's configuration
//     is discarded.
// 3.  **Reverse-index pass**: `tick` walks the pair list from last to first
//     so pairs can be removed in place — pruned or self-removed one-shots —
//     without skipping or double-visiting anything.
// 4.  **Gated transitions**: A notification fires only when the previous and
//     the newly classified state are both determined and differ. A freshly
//     created continuous watch therefore stays silent on its first
//     classification; one-shot watches are seeded with the opposite terminal
//     state precisely so their first qualifying classification fires.
// 5.  **Single-threaded by contract**: Registration and ticking happen on the
//     frame-loop thread. The engine takes no locks; an embedding that needs
//     cross-thread access must serialize around it.

use crate::core_modules::perception::perception;
use crate::core_modules::scene::{self, SceneHandle, SceneRef};
use crate::core_modules::visibility::visibility::check_cone_visibility;
use crate::core_modules::visibility::{NoOcclusion, OcclusionQuery};
use std::rc::Rc;
use tracing::debug;

// Re-export key data structures for the public API.
pub use crate::core_modules::scene::SceneNode;
pub use crate::core_modules::signal::{ChannelRef, SubscriberFn, SubscriptionId, WatchChannel};
pub use crate::core_modules::watch_pair::{AttentionState, WatchConfig, WatchPair};

/// Receipt for a registration call: the pair's channel plus the ids of the
/// callbacks this call added, for later removal via [`AttentionChecker::unwatch`].
pub struct Registration {
    pub channel: ChannelRef,
    pub capture_subscription: Option<SubscriptionId>,
    pub lose_subscription: Option<SubscriptionId>,
}

/// The attention engine: a registry of watch pairs plus the per-frame driver.
pub struct AttentionChecker {
    /// The designated observer, stamped into every pair this engine creates.
    observer: SceneRef,
    /// All live watch pairs, in insertion order.
    watch_pairs: Vec<WatchPair>,
    /// Line-of-sight backend consulted for pairs with `consider_occlusion`.
    occlusion_query: Box<dyn OcclusionQuery>,
}

impl AttentionChecker {
    /// Creates an engine for the given observer with no occlusion backend:
    /// visibility is purely geometric.
    pub fn new(observer: &SceneHandle) -> Self {
        Self::with_occlusion_query(observer, Box::new(NoOcclusion))
    }

    /// Creates an engine with a custom line-of-sight backend.
    pub fn with_occlusion_query(
        observer: &SceneHandle,
        occlusion_query: Box<dyn OcclusionQuery>,
    ) -> Self {
        Self {
            observer: Rc::downgrade(observer),
            watch_pairs: Vec::new(),
            occlusion_query,
        }
    }

    /// Registers a continuous watch on `target`. Fires `on_capture` each time
    /// perception saturates to captured and `on_lose` each time it drains to
    /// lost, for as long as anyone stays subscribed.
    pub fn watch(
        &mut self,
        target: &SceneHandle,
        on_capture: Option<SubscriberFn>,
        on_lose: Option<SubscriberFn>,
        max_distance: f32,
        consider_occlusion: bool,
    ) -> Registration {
        let config = WatchConfig {
            max_distance,
            consider_occlusion,
            ..WatchConfig::default()
        };
        self.get_or_create(target, config, AttentionState::Undetermined, on_capture, on_lose)
    }

    /// Registers a one-shot watch that fires `on_detected` the first time the
    /// target becomes visible, then removes itself.
    pub fn detect_visible(
        &mut self,
        target: &SceneHandle,
        on_detected: Option<SubscriberFn>,
        max_distance: f32,
        consider_occlusion: bool,
    ) -> Registration {
        let config = WatchConfig {
            max_distance,
            consider_occlusion,
            one_shot: true,
            ..WatchConfig::default()
        };
        // Seeded to Lost so the first rise to Captured counts as a change.
        self.get_or_create(target, config, AttentionState::Lost, on_detected, None)
    }

    /// Registers a one-shot watch that fires `on_detected` the first time the
    /// target stops being visible, then removes itself.
    pub fn detect_invisible(
        &mut self,
        target: &SceneHandle,
        on_detected: Option<SubscriberFn>,
        max_distance: f32,
        consider_occlusion: bool,
    ) -> Registration {
        let config = WatchConfig {
            max_distance,
            consider_occlusion,
            one_shot: true,
            ..WatchConfig::default()
        };
        self.get_or_create(target, config, AttentionState::Captured, None, on_detected)
    }

    /// Returns the channel of the pair watching `target`, if one exists.
    pub fn find(&self, target: &SceneHandle) -> Option<ChannelRef> {
        self.watch_pairs
            .iter()
            .find(|pair| scene::refers_to(&pair.target, target))
            .map(|pair| Rc::clone(&pair.channel))
    }

    /// The current perception level for `target`, if it is being watched.
    pub fn perception_of(&self, target: &SceneHandle) -> Option<f32> {
        self.watch_pairs
            .iter()
            .find(|pair| scene::refers_to(&pair.target, target))
            .map(|pair| pair.perception)
    }

    /// The last recorded attention state for `target`, if it is being watched.
    pub fn state_of(&self, target: &SceneHandle) -> Option<AttentionState> {
        self.watch_pairs
            .iter()
            .find(|pair| scene::refers_to(&pair.target, target))
            .map(|pair| pair.state)
    }

    /// Removes the given subscriptions from the pair watching `target`.
    ///
    /// Does not remove the pair itself; a pair whose channel has gone silent
    /// is pruned lazily on the next tick.
    pub fn unwatch(
        &mut self,
        target: &SceneHandle,
        capture_subscription: Option<SubscriptionId>,
        lose_subscription: Option<SubscriptionId>,
    ) -> Option<ChannelRef> {
        let channel = self.find(target)?;
        {
            let mut channel = channel.borrow_mut();
            if let Some(id) = capture_subscription {
                channel.on_capture.unsubscribe(id);
            }
            if let Some(id) = lose_subscription {
                channel.on_lose.unsubscribe(id);
            }
        }
        Some(channel)
    }

    /// The per-frame pass. `dt` is the elapsed frame time in seconds.
    ///
    /// For every live pair: prune if dead or unheard, sample visibility,
    /// integrate perception, and fire a notification if the discrete state
    /// changed between two determined values. One-shot pairs remove
    /// themselves after firing.
    pub fn tick(&mut self, dt: f32) {
        // Last-to-first so in-place removal never skips a pair.
        for i in (0..self.watch_pairs.len()).rev() {
            let pair = &self.watch_pairs[i];

            let upgraded = (pair.observer.upgrade(), pair.target.upgrade());
            let (Some(observer), Some(target)) = upgraded else {
                debug!(index = i, "pruning watch pair with dead scene reference");
                self.watch_pairs.remove(i);
                continue;
            };
            if !pair.channel.borrow().has_subscribers() {
                debug!(index = i, "pruning watch pair with no subscribers");
                self.watch_pairs.remove(i);
                continue;
            }

            let config = pair.config;
            let mut visible = check_cone_visibility(
                &observer.borrow(),
                &target.borrow(),
                config.cone_angle_degrees,
                config.max_distance,
            );
            if visible && config.consider_occlusion {
                visible &= !self
                    .occlusion_query
                    .is_occluded(&observer.borrow(), &target.borrow());
            }

            let pair = &mut self.watch_pairs[i];
            perception::integrate(pair, visible, dt);

            // Both thresholds are checked independently; at the degenerate
            // boundary where both hold, Lost wins.
            let mut candidate = AttentionState::Undetermined;
            if pair.perception >= 1.0 {
                candidate = AttentionState::Captured;
            }
            if pair.perception <= 0.0 {
                candidate = AttentionState::Lost;
            }

            if candidate != AttentionState::Undetermined && candidate != pair.state {
                // The first determined classification after creation only
                // anchors the state; notifying requires a prior determined
                // state that differs.
                let anchored = pair.state != AttentionState::Undetermined;
                pair.state = candidate;

                if anchored {
                    let channel = Rc::clone(&pair.channel);
                    let one_shot = pair.config.one_shot;

                    debug!(?candidate, one_shot, "attention state changed");

                    match candidate {
                        AttentionState::Captured => {
                            channel.borrow_mut().on_capture.broadcast(&target)
                        }
                        AttentionState::Lost => channel.borrow_mut().on_lose.broadcast(&target),
                        AttentionState::Undetermined => {}
                    }

                    if one_shot {
                        self.watch_pairs.remove(i);
                    }
                }
            }
        }
    }

    /// Drops every watch pair, returning the engine to its freshly
    /// constructed state. Channels held by registrants stay alive but will
    /// never fire again.
    pub fn reset(&mut self) {
        debug!(pairs = self.watch_pairs.len(), "resetting attention checker");
        self.watch_pairs.clear();
    }

    /// The number of live watch pairs.
    pub fn pair_count(&self) -> usize {
        self.watch_pairs.len()
    }

    /// Looks up the pair for `target`, creating it with `config` and
    /// `seed_state` if absent, then adds the given callbacks to its channel.
    /// An existing pair keeps its original configuration; the new one is
    /// discarded.
    fn get_or_create(
        &mut self,
        target: &SceneHandle,
        config: WatchConfig,
        seed_state: AttentionState,
        on_capture: Option<SubscriberFn>,
        on_lose: Option<SubscriberFn>,
    ) -> Registration {
        let channel = match self
            .watch_pairs
            .iter()
            .find(|pair| scene::refers_to(&pair.target, target))
        {
            Some(existing) => Rc::clone(&existing.channel),
            None => {
                let mut pair =
                    WatchPair::new(self.observer.clone(), Rc::downgrade(target), config);
                pair.state = seed_state;
                let channel = Rc::clone(&pair.channel);
                debug!(
                    target_ptr = ?Rc::as_ptr(target),
                    one_shot = config.one_shot,
                    "watch pair created"
                );
                self.watch_pairs.push(pair);
                channel
            }
        };

        // TODO: Consider rejecting repeat subscriptions of an already-bound
        // callback; today each registration call adds another copy.
        let capture_subscription;
        let lose_subscription;
        {
            let mut borrowed = channel.borrow_mut();
            capture_subscription = on_capture.map(|cb| borrowed.on_capture.subscribe(cb));
            lose_subscription = on_lose.map(|cb| borrowed.on_lose.subscribe(cb));
        }

        Registration {
            channel,
            capture_subscription,
            lose_subscription,
        }
    }
}
