//! Phase transitions: selection, execution, and round rollover.

use crate::error::CombatError;
use crate::events::EncounterEvent;
use crate::phase::Phase;

use super::{EncounterEngine, OperationContext};

impl EncounterEngine<'_> {
    /// Opens the selection phase for the current round.
    ///
    /// On the encounter's first turn the round counter is advanced first.
    /// Every combatant's per-round flags are reset, the acting pointer and
    /// interruption stack are cleared.
    pub fn start_selection_phase(&mut self, ctx: OperationContext) -> Result<(), CombatError> {
        ctx.require_operator()?;
        self.begin_selection();
        Ok(())
    }

    /// Moves to execution and hands the turn to the first combatant in
    /// initiative order.
    pub fn start_execution_phase(&mut self, ctx: OperationContext) -> Result<(), CombatError> {
        ctx.require_operator()?;
        if !self.state.all_selections_complete() {
            return Err(CombatError::SelectionsIncomplete);
        }
        if self.state.phase != Phase::Selection {
            return Err(CombatError::WrongPhase {
                expected: Phase::Selection,
                current: self.state.phase,
            });
        }

        self.state.phase = Phase::Execution;
        self.announce(EncounterEvent::PhaseChanged {
            phase: Phase::Execution,
            round: self.state.round,
        });

        let first = self
            .state
            .combatants_by_initiative()
            .first()
            .map(|combatant| combatant.id());
        if let Some(first) = first {
            self.set_acting(first);
        }

        self.post_validate();
        Ok(())
    }

    /// Closes the round once everybody has acted and opens the next
    /// selection phase.
    pub fn advance_to_next_turn(&mut self, ctx: OperationContext) -> Result<(), CombatError> {
        ctx.require_operator()?;
        if !self.state.all_actions_complete() {
            return Err(CombatError::ActionsIncomplete);
        }

        let round = self.state.round;
        for combatant in self.state.combatants_by_initiative() {
            for hook in self.hooks {
                hook.on_round_end(combatant, round);
            }
        }

        self.state.round = self.state.round.saturating_add(1);
        self.begin_selection();
        Ok(())
    }

    fn begin_selection(&mut self) {
        if self.state.is_first_turn() {
            self.state.round = 1;
        }

        for combatant in self.state.combatants.values_mut() {
            combatant.reset_turn_flags();
        }

        self.state.phase = Phase::Selection;
        self.state.turn_started = true;
        self.state.current_acting = None;
        self.state.interruption_stack.clear();

        self.post_validate();
        self.announce(EncounterEvent::PhaseChanged {
            phase: Phase::Selection,
            round: self.state.round,
        });
    }
}
