//! Inbound request boundary.
//!
//! Participants without the operator role cannot mutate shared state. Their
//! requests are handed to an [`OperatorRelay`], which forwards them to an
//! available operator. Operator requests execute immediately.

use crate::error::CombatError;
use crate::state::CombatantId;

use super::{EncounterEngine, OperationContext};

/// A state change a participant may ask an operator to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatorRequest {
    Interrupt { interruptor: CombatantId },
    CompleteAction,
    SkipAction,
    RevealManeuver { combatant: CombatantId },
}

/// How a submitted request was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestOutcome {
    /// Applied to the encounter synchronously.
    Executed,
    /// Handed to an operator; the outcome arrives as an event.
    Relayed,
}

/// Delivers participant requests to a privileged operator.
pub trait OperatorRelay {
    /// Fails with [`CombatError::NoOperatorAvailable`] when nobody can take
    /// the request.
    fn relay(&self, request: OperatorRequest) -> Result<(), CombatError>;
}

/// Relay for hosts without any operator to forward to.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRelay;

impl OperatorRelay for NoRelay {
    fn relay(&self, _request: OperatorRequest) -> Result<(), CombatError> {
        Err(CombatError::NoOperatorAvailable)
    }
}

impl EncounterEngine<'_> {
    /// Executes `request` directly through the matching transition.
    pub fn apply_request(
        &mut self,
        ctx: OperationContext,
        request: &OperatorRequest,
    ) -> Result<(), CombatError> {
        match *request {
            OperatorRequest::Interrupt { interruptor } => {
                self.handle_interruption(ctx, interruptor)
            }
            OperatorRequest::CompleteAction => self.complete_current_action(ctx),
            OperatorRequest::SkipAction => self.skip_current_action(ctx),
            OperatorRequest::RevealManeuver { combatant } => self.reveal_maneuver(ctx, combatant),
        }
    }

    /// Executes operator requests in place and relays everything else.
    pub fn submit_request(
        &mut self,
        ctx: OperationContext,
        request: OperatorRequest,
        relay: &dyn OperatorRelay,
    ) -> Result<RequestOutcome, CombatError> {
        if ctx.is_operator {
            self.apply_request(ctx, &request)?;
            Ok(RequestOutcome::Executed)
        } else {
            relay.relay(request)?;
            Ok(RequestOutcome::Relayed)
        }
    }
}
