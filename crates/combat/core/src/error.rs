//! Error taxonomy for encounter transitions.
//!
//! Every failure here is non-fatal and user-correctable: a rejected transition
//! leaves the encounter untouched and the caller may retry once the
//! precondition holds. Nothing in this crate panics on a missing lookup.

use crate::phase::Phase;
use crate::state::CombatantId;

/// Broad classification of a [`CombatError`], used for routing and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller lacks the privileged operator role.
    Authorization,

    /// A guard on a specific transition did not hold.
    Precondition,

    /// A participant request could not reach any operator.
    Relay,
}

/// Errors returned by encounter transitions and request dispatch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("operation requires the operator role")]
    Unauthorized,

    #[error("not every active combatant has selected a maneuver")]
    SelectionsIncomplete,

    #[error("not every active combatant has finished acting")]
    ActionsIncomplete,

    #[error("interruption needs a known interruptor and an acting combatant")]
    InvalidInterruption,

    #[error("{interruptor} may not interrupt {target}")]
    InterruptNotAllowed {
        interruptor: CombatantId,
        target: CombatantId,
    },

    #[error("{combatant} has already completed their action")]
    ActionAlreadyCompleted { combatant: CombatantId },

    #[error("{combatant} has no maneuver selected")]
    NoManeuverSelected { combatant: CombatantId },

    #[error("no operator is available to handle the request")]
    NoOperatorAvailable,

    #[error("operation requires the {expected} phase (currently {current})")]
    WrongPhase { expected: Phase, current: Phase },

    #[error("combatant {0} is not part of the encounter")]
    CombatantNotFound(CombatantId),

    #[error("combatant {0} is already part of the encounter")]
    DuplicateCombatant(CombatantId),

    #[error("{combatant} is not the acting combatant")]
    NotCurrentActor { combatant: CombatantId },
}

impl CombatError {
    /// Returns the taxonomy bucket of this error.
    pub const fn category(&self) -> ErrorCategory {
        use CombatError::*;
        match self {
            Unauthorized => ErrorCategory::Authorization,
            NoOperatorAvailable => ErrorCategory::Relay,
            SelectionsIncomplete
            | ActionsIncomplete
            | InvalidInterruption
            | InterruptNotAllowed { .. }
            | ActionAlreadyCompleted { .. }
            | NoManeuverSelected { .. }
            | WrongPhase { .. }
            | CombatantNotFound(_)
            | DuplicateCombatant(_)
            | NotCurrentActor { .. } => ErrorCategory::Precondition,
        }
    }

    /// Returns a stable identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            Unauthorized => "COMBAT_UNAUTHORIZED",
            SelectionsIncomplete => "COMBAT_SELECTIONS_INCOMPLETE",
            ActionsIncomplete => "COMBAT_ACTIONS_INCOMPLETE",
            InvalidInterruption => "COMBAT_INVALID_INTERRUPTION",
            InterruptNotAllowed { .. } => "COMBAT_INTERRUPT_NOT_ALLOWED",
            ActionAlreadyCompleted { .. } => "COMBAT_ACTION_ALREADY_COMPLETED",
            NoManeuverSelected { .. } => "COMBAT_NO_MANEUVER_SELECTED",
            NoOperatorAvailable => "COMBAT_NO_OPERATOR_AVAILABLE",
            WrongPhase { .. } => "COMBAT_WRONG_PHASE",
            CombatantNotFound(_) => "COMBAT_COMBATANT_NOT_FOUND",
            DuplicateCombatant(_) => "COMBAT_DUPLICATE_COMBATANT",
            NotCurrentActor { .. } => "COMBAT_NOT_CURRENT_ACTOR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            CombatError::Unauthorized.category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            CombatError::NoOperatorAvailable.category(),
            ErrorCategory::Relay
        );
        assert_eq!(
            CombatError::NoManeuverSelected {
                combatant: CombatantId(3)
            }
            .category(),
            ErrorCategory::Precondition
        );
    }

    #[test]
    fn messages_name_the_combatants() {
        let error = CombatError::InterruptNotAllowed {
            interruptor: CombatantId(1),
            target: CombatantId(2),
        };
        assert_eq!(error.to_string(), "#1 may not interrupt #2");
        assert_eq!(error.error_code(), "COMBAT_INTERRUPT_NOT_ALLOWED");
    }
}
