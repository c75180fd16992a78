//! Deterministic turn resolution for two-phase tabletop combat.
//!
//! `combat-core` defines the encounter rules (phases, per-combatant statuses,
//! initiative, interruptions) and exposes pure APIs that hosts drive from
//! whatever transport they use. All state mutation flows through
//! [`engine::EncounterEngine`]; observers learn about committed transitions
//! through the [`events::Announcer`] boundary.
pub mod engine;
pub mod error;
pub mod events;
pub mod initiative;
pub mod phase;
pub mod state;

pub use engine::{
    EncounterEngine, NoRelay, OperationContext, OperatorRelay, OperatorRequest, RequestOutcome,
    RoundEndHook,
};
pub use error::{CombatError, ErrorCategory};
pub use events::{Announcer, EncounterEvent, EventKind, EventLog, NullAnnouncer};
pub use initiative::{InitiativeKey, can_interrupt, compare_initiative};
pub use phase::{ActionStatus, Phase, SelectionStatus};
pub use state::{CombatantId, CombatantState, EncounterState, InvariantViolation, SelectedManeuver};
