//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and the worker.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::EncounterHandle;
