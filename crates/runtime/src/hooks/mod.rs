//! Round-end hook management for the encounter worker.
//!
//! Hooks implement [`combat_core::RoundEndHook`]; the runtime only orders them
//! and hands them to the engine.

mod registry;

pub use combat_core::RoundEndHook;
pub use registry::HookRegistry;
