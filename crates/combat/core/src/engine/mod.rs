//! Turn-resolution state machine.
//!
//! The [`EncounterEngine`] is the authoritative reducer for [`EncounterState`].
//! Every mutating transition takes an [`OperationContext`] and rejects
//! callers without the operator role with [`CombatError::Unauthorized`].
//! Guards run before any mutation, so a rejected transition leaves the state
//! exactly as it was.
//!
//! The engine is not thread-safe against concurrent mutation; hosts must
//! serialise calls per encounter (the runtime does so with a single worker
//! task).

mod hook;
mod phases;
mod requests;
mod roster;
mod turns;


use std::sync::Arc;

pub use hook::RoundEndHook;
pub use requests::{NoRelay, OperatorRelay, OperatorRequest, RequestOutcome};

use crate::error::CombatError;
use crate::events::{Announcer, EncounterEvent};
use crate::state::EncounterState;

/// Caller role, supplied per call by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationContext {
    pub is_operator: bool,
}

impl OperationContext {
    /// The privileged role allowed to drive transitions.
    pub const OPERATOR: Self = Self { is_operator: true };

    /// Any other participant.
    pub const PARTICIPANT: Self = Self { is_operator: false };

    pub const fn new(is_operator: bool) -> Self {
        Self { is_operator }
    }

    pub fn require_operator(self) -> Result<(), CombatError> {
        if self.is_operator {
            Ok(())
        } else {
            Err(CombatError::Unauthorized)
        }
    }
}

/// Engine driving phase changes, turn advancement and interruptions.
pub struct EncounterEngine<'a> {
    state: &'a mut EncounterState,
    announcer: &'a dyn Announcer,
    hooks: &'a [Arc<dyn RoundEndHook>],
}

impl<'a> EncounterEngine<'a> {
    /// Creates an engine over `state` that reports to `announcer`.
    pub fn new(state: &'a mut EncounterState, announcer: &'a dyn Announcer) -> Self {
        Self {
            state,
            announcer,
            hooks: &[],
        }
    }

    /// Attaches the hooks invoked when a round ends.
    #[must_use]
    pub fn with_hooks(mut self, hooks: &'a [Arc<dyn RoundEndHook>]) -> Self {
        self.hooks = hooks;
        self
    }

    /// Read-only view of the encounter.
    pub fn state(&self) -> &EncounterState {
        self.state
    }

    fn announce(&self, event: EncounterEvent) {
        self.announcer.announce(event);
    }

    /// Verifies structural invariants after a committed transition.
    fn post_validate(&self) {
        debug_assert_eq!(
            self.state.validate(),
            Ok(()),
            "encounter invariant violated after transition"
        );
    }
}
