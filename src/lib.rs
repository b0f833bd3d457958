// THEORY:
// This file is the main entry point for the `attention_checker` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the
// public API that will be exposed to external consumers (the embedding game
// or simulation loop).
//
// The primary goal is to export the `AttentionChecker` and its associated
// data structures (`SceneNode`, `Registration`, the channel types) as the
// clean, high-level interface for the engine. The internal modules
// (`core_modules`) stay encapsulated behind it: embedding code registers
// watches and calls `tick`, and never needs to know how visibility sampling,
// perception integration, or pruning are layered underneath.

pub mod checker;
pub mod core_modules;

pub use checker::{
    AttentionChecker, AttentionState, ChannelRef, Registration, SceneNode, SubscriberFn,
    SubscriptionId, WatchChannel, WatchConfig,
};
pub use core_modules::scene::{SceneHandle, SceneRef};
pub use core_modules::visibility::{NoOcclusion, OcclusionQuery};
