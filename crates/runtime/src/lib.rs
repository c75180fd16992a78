//! Async host for encounter turn resolution.
//!
//! This crate owns one [`combat_core::EncounterState`] per [`Runtime`] inside a
//! single worker task, serialises every mutation through a command queue and
//! fans committed transitions out over a topic-based [`EventBus`]. Consumers
//! drive the encounter through the cloneable [`EncounterHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`operators`] tracks operator presence and relays participant requests
//! - [`hooks`] holds the round-end hooks handed to the engine
//! - [`snapshot`] encodes and restores encounter state
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod hooks;
pub mod operators;
pub mod runtime;
pub mod snapshot;

mod workers;

pub use api::{EncounterHandle, Result, RuntimeError};
pub use events::{Event, EventBus, OperatorId, RelayEvent, Topic};
pub use hooks::HookRegistry;
pub use operators::OperatorRegistry;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
