//! Structural invariants of [`EncounterState`].
//!
//! The engine checks these after every committed transition in debug builds;
//! hosts call [`EncounterState::validate`] on restored snapshots.

use std::collections::BTreeSet;

use crate::phase::{ActionStatus, SelectionStatus};

use super::{CombatantId, EncounterState};

/// A broken structural invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("current actor {0} is not in the roster")]
    UnknownCurrentActor(CombatantId),

    #[error("current actor {combatant} has status {status}")]
    CurrentActorNotActive {
        combatant: CombatantId,
        status: ActionStatus,
    },

    #[error("{combatant} is {status} but is not the current actor")]
    StrayActiveCombatant {
        combatant: CombatantId,
        status: ActionStatus,
    },

    #[error("stacked combatant {0} is not in the roster")]
    UnknownStackedCombatant(CombatantId),

    #[error("stacked combatant {combatant} has status {status}")]
    StackedNotInterrupted {
        combatant: CombatantId,
        status: ActionStatus,
    },

    #[error("{0} appears more than once in the interruption stack")]
    DuplicateStackEntry(CombatantId),

    #[error("{0} is ready without a selected maneuver")]
    ReadyWithoutManeuver(CombatantId),
}

impl EncounterState {
    /// Checks every structural invariant, returning the first violation.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if let Some(current) = self.current_acting {
            let combatant = self
                .combatants
                .get(&current)
                .ok_or(InvariantViolation::UnknownCurrentActor(current))?;
            if !combatant.action_status.is_active() {
                return Err(InvariantViolation::CurrentActorNotActive {
                    combatant: current,
                    status: combatant.action_status,
                });
            }
        }

        for combatant in self.combatants.values() {
            if combatant.action_status.is_active() && self.current_acting != Some(combatant.id) {
                return Err(InvariantViolation::StrayActiveCombatant {
                    combatant: combatant.id,
                    status: combatant.action_status,
                });
            }
            if combatant.selection_status == SelectionStatus::Ready
                && combatant.selected_maneuver.is_none()
            {
                return Err(InvariantViolation::ReadyWithoutManeuver(combatant.id));
            }
        }

        let mut seen = BTreeSet::new();
        for &stacked in &self.interruption_stack {
            if !seen.insert(stacked) {
                return Err(InvariantViolation::DuplicateStackEntry(stacked));
            }
            let combatant = self
                .combatants
                .get(&stacked)
                .ok_or(InvariantViolation::UnknownStackedCombatant(stacked))?;
            if combatant.action_status != ActionStatus::Interrupted {
                return Err(InvariantViolation::StackedNotInterrupted {
                    combatant: stacked,
                    status: combatant.action_status,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CombatantState;

    fn with_combatant(status: ActionStatus) -> EncounterState {
        let mut state = EncounterState::new();
        let mut combatant = CombatantState::new(CombatantId(1), "Sagat");
        combatant.action_status = status;
        state.combatants.insert(CombatantId(1), combatant);
        state
    }

    #[test]
    fn fresh_state_is_valid() {
        assert_eq!(EncounterState::new().validate(), Ok(()));
    }

    #[test]
    fn detects_acting_combatant_without_pointer() {
        let state = with_combatant(ActionStatus::Acting);
        assert_eq!(
            state.validate(),
            Err(InvariantViolation::StrayActiveCombatant {
                combatant: CombatantId(1),
                status: ActionStatus::Acting,
            })
        );
    }

    #[test]
    fn detects_pointer_to_finished_combatant() {
        let mut state = with_combatant(ActionStatus::Completed);
        state.current_acting = Some(CombatantId(1));
        assert!(matches!(
            state.validate(),
            Err(InvariantViolation::CurrentActorNotActive { .. })
        ));
    }

    #[test]
    fn detects_stack_entry_that_is_not_interrupted() {
        let mut state = with_combatant(ActionStatus::Pending);
        state.interruption_stack.push(CombatantId(1));
        assert!(matches!(
            state.validate(),
            Err(InvariantViolation::StackedNotInterrupted { .. })
        ));

        state.interruption_stack = vec![CombatantId(9)];
        assert_eq!(
            state.validate(),
            Err(InvariantViolation::UnknownStackedCombatant(CombatantId(9)))
        );
    }
}
