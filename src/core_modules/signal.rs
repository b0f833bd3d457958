// THEORY:
// The `signal` module is the notification layer of the engine. A `Signal` is a
// minimal ordered multicast list: subscribers are closures keyed by an opaque
// `SubscriptionId`, broadcast runs them in subscription order, and removal is
// by id rather than by comparing closures (closures have no useful equality).
//
// A `WatchChannel` bundles the two independent signals every watch pair
// carries — one for capture events, one for lose events. The channel lives
// behind an `Rc<RefCell<_>>` so it is held jointly by the registry's pair and
// by whoever registered the watch; the pair being pruned does not invalidate a
// registrant's handle, it just means the channel will never fire again.

use crate::core_modules::scene::SceneHandle;
use std::cell::RefCell;
use std::rc::Rc;

/// Opaque handle identifying one subscription on one signal.
pub type SubscriptionId = u64;

/// A subscriber callback. Receives the target whose attention state changed.
pub type SubscriberFn = Box<dyn FnMut(&SceneHandle)>;

/// An ordered multicast subscriber list.
///
/// The same closure may be subscribed more than once; each call returns a
/// fresh id and each copy fires on broadcast.
#[derive(Default)]
pub struct Signal {
    subscribers: Vec<(SubscriptionId, SubscriberFn)>,
    next_id: SubscriptionId,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber and returns the id needed to remove it later.
    pub fn subscribe(&mut self, callback: SubscriberFn) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    /// Removes the subscription with the given id. Returns false if no such
    /// subscription exists (already removed, or from another signal).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Invokes every subscriber in subscription order.
    ///
    /// Subscribers must not re-enter the channel they are registered on; the
    /// channel is borrowed for the duration of the broadcast.
    pub fn broadcast(&mut self, target: &SceneHandle) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(target);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}

/// The per-pair notification channel: two independent subscriber lists, one
/// per direction of attention change.
#[derive(Default)]
pub struct WatchChannel {
    pub on_capture: Signal,
    pub on_lose: Signal,
}

/// A jointly-owned handle to a pair's channel.
pub type ChannelRef = Rc<RefCell<WatchChannel>>;

impl WatchChannel {
    pub fn new() -> ChannelRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// True if anyone is listening on either signal. A channel with no
    /// subscribers makes its pair eligible for pruning.
    pub fn has_subscribers(&self) -> bool {
        !self.on_capture.is_empty() || !self.on_lose.is_empty()
    }
}
