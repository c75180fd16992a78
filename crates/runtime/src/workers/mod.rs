//! Worker tasks that back the runtime orchestration.
//!
//! The encounter worker is the single writer of an encounter's state.

mod encounter;

pub use encounter::{Command, EncounterWorker, Operation};
