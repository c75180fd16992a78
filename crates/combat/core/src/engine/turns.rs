//! Turn advancement within the execution phase.
//!
//! Control passes in initiative order except when an interruption is
//! pending: finishing an action always resumes the most recently interrupted
//! combatant before anyone else gets a turn.

use crate::error::CombatError;
use crate::events::EncounterEvent;
use crate::phase::ActionStatus;
use crate::state::CombatantId;

use super::{EncounterEngine, OperationContext};

impl EncounterEngine<'_> {
    /// Lets `interruptor_id` cut into the current combatant's action.
    ///
    /// The interrupted combatant is pushed onto the interruption stack and
    /// resumes once the interrupting action is finished.
    pub fn handle_interruption(
        &mut self,
        ctx: OperationContext,
        interruptor_id: CombatantId,
    ) -> Result<(), CombatError> {
        ctx.require_operator()?;

        let (Some(interruptor), Some(current)) = (
            self.state.combatant(interruptor_id),
            self.state.current_acting(),
        ) else {
            return Err(CombatError::InvalidInterruption);
        };
        if !interruptor.can_interrupt(current) {
            return Err(CombatError::InterruptNotAllowed {
                interruptor: interruptor_id,
                target: current.id(),
            });
        }
        if current.action_status() == ActionStatus::Completed {
            return Err(CombatError::ActionAlreadyCompleted {
                combatant: current.id(),
            });
        }

        let interrupted_id = current.id();
        self.state.interruption_stack.push(interrupted_id);
        if let Some(interrupted) = self.state.combatants.get_mut(&interrupted_id) {
            interrupted.action_status = ActionStatus::Interrupted;
            interrupted.interrupted_by = Some(interruptor_id);
        }
        self.set_acting(interruptor_id);

        self.announce(EncounterEvent::Interruption {
            interruptor: interruptor_id,
            interrupted: interrupted_id,
        });
        self.post_validate();
        Ok(())
    }

    /// Finishes the current action, revealing the maneuver if it is still
    /// hidden. No-op when nobody is acting.
    ///
    /// Fails with [`CombatError::NoManeuverSelected`] if the actor has
    /// nothing to reveal; such an actor can only skip.
    pub fn complete_current_action(&mut self, ctx: OperationContext) -> Result<(), CombatError> {
        ctx.require_operator()?;
        let Some(current) = self.state.current_acting else {
            return Ok(());
        };
        let Some(combatant) = self.state.combatants.get_mut(&current) else {
            return Err(CombatError::CombatantNotFound(current));
        };

        let revealed = if combatant.maneuver_revealed {
            None
        } else {
            combatant.reveal_maneuver()?;
            combatant.selected_maneuver.clone()
        };
        combatant.action_status = ActionStatus::Completed;

        if let Some(maneuver) = revealed {
            self.announce(EncounterEvent::ManeuverRevealed {
                combatant: current,
                maneuver,
            });
        }

        self.resume_or_advance(current);
        self.post_validate();
        Ok(())
    }

    /// Passes on the current action without revealing the maneuver.
    /// No-op when nobody is acting.
    pub fn skip_current_action(&mut self, ctx: OperationContext) -> Result<(), CombatError> {
        ctx.require_operator()?;
        let Some(current) = self.state.current_acting else {
            return Ok(());
        };
        let Some(combatant) = self.state.combatants.get_mut(&current) else {
            return Err(CombatError::CombatantNotFound(current));
        };
        combatant.action_status = ActionStatus::Skipped;

        self.resume_or_advance(current);
        self.post_validate();
        Ok(())
    }

    /// Reveals the acting combatant's maneuver ahead of completion.
    pub fn reveal_maneuver(
        &mut self,
        ctx: OperationContext,
        combatant_id: CombatantId,
    ) -> Result<(), CombatError> {
        ctx.require_operator()?;
        if !self.state.combatants.contains_key(&combatant_id) {
            return Err(CombatError::CombatantNotFound(combatant_id));
        }
        if self.state.current_acting != Some(combatant_id) {
            return Err(CombatError::NotCurrentActor {
                combatant: combatant_id,
            });
        }
        let Some(combatant) = self.state.combatants.get_mut(&combatant_id) else {
            return Err(CombatError::CombatantNotFound(combatant_id));
        };
        if combatant.maneuver_revealed {
            return Ok(());
        }

        combatant.reveal_maneuver()?;
        let maneuver = combatant.selected_maneuver.clone();

        if let Some(maneuver) = maneuver {
            self.announce(EncounterEvent::ManeuverRevealed {
                combatant: combatant_id,
                maneuver,
            });
        }
        self.post_validate();
        Ok(())
    }

    /// Hands the turn to `id`, demoting whoever was acting before.
    pub(super) fn set_acting(&mut self, id: CombatantId) {
        self.demote_previous_actor(id);

        self.state.current_acting = Some(id);
        if let Some(combatant) = self.state.combatants.get_mut(&id) {
            combatant.action_status = ActionStatus::Acting;
        }

        self.announce(EncounterEvent::TurnStarted {
            combatant: id,
            round: self.state.round,
        });
    }

    /// Interrupts a still-active previous actor so it resumes later.
    fn demote_previous_actor(&mut self, next: CombatantId) {
        let Some(previous) = self.state.current_acting.filter(|&id| id != next) else {
            return;
        };
        if let Some(combatant) = self.state.combatants.get_mut(&previous)
            && combatant.action_status.is_active()
        {
            combatant.action_status = ActionStatus::Interrupted;
            combatant.interrupted_by = Some(next);
            self.state.interruption_stack.push(previous);
        }
    }

    /// Resumes the latest interrupted combatant, or advances in initiative
    /// order once the stack is empty.
    pub(super) fn resume_or_advance(&mut self, finished: CombatantId) {
        match self.successor_of(finished) {
            Some(next) => self.set_acting(next),
            None => self.state.current_acting = None,
        }
    }

    /// Picks who acts once `finished` is done.
    pub(super) fn successor_of(&mut self, finished: CombatantId) -> Option<CombatantId> {
        // A defeated stack entry has left the order, so the scan restarts.
        let anchor = self
            .state
            .interruption_stack
            .last()
            .copied()
            .unwrap_or(finished);
        self.pop_resumable()
            .or_else(|| self.state.next_pending_after(anchor))
    }

    /// Pops the most recently interrupted combatant that is still standing.
    /// Defeated entries are skipped for the rest of the round.
    fn pop_resumable(&mut self) -> Option<CombatantId> {
        while let Some(id) = self.state.interruption_stack.pop() {
            match self.state.combatants.get_mut(&id) {
                Some(combatant) if combatant.defeated => {
                    combatant.action_status = ActionStatus::Skipped;
                }
                Some(_) => return Some(id),
                None => {}
            }
        }
        None
    }
}
