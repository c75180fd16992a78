//! Roster lifecycle and per-combatant selection.

use crate::error::CombatError;
use crate::phase::Phase;
use crate::state::{CombatantId, CombatantState, SelectedManeuver};

use super::{EncounterEngine, OperationContext};

impl EncounterEngine<'_> {
    /// Adds a participant with default per-round flags.
    ///
    /// Joining is closed while maneuvers resolve: a newcomer could neither
    /// select nor be reached by the initiative scan.
    pub fn add_combatant(
        &mut self,
        ctx: OperationContext,
        id: CombatantId,
        name: impl Into<String>,
    ) -> Result<(), CombatError> {
        ctx.require_operator()?;
        if self.state.phase == Phase::Execution {
            return Err(CombatError::WrongPhase {
                expected: Phase::Selection,
                current: Phase::Execution,
            });
        }
        if self.state.combatants.contains_key(&id) {
            return Err(CombatError::DuplicateCombatant(id));
        }
        self.state
            .combatants
            .insert(id, CombatantState::new(id, name));
        self.post_validate();
        Ok(())
    }

    /// Removes a participant and every reference to it.
    ///
    /// Removing the acting combatant passes the turn on exactly as if its
    /// action had finished.
    pub fn remove_combatant(
        &mut self,
        ctx: OperationContext,
        id: CombatantId,
    ) -> Result<(), CombatError> {
        ctx.require_operator()?;
        if !self.state.combatants.contains_key(&id) {
            return Err(CombatError::CombatantNotFound(id));
        }

        let was_acting = self.state.current_acting == Some(id);
        let successor = if was_acting {
            self.successor_of(id)
        } else {
            None
        };

        self.state.combatants.remove(&id);
        self.state.interruption_stack.retain(|&stacked| stacked != id);
        for combatant in self.state.combatants.values_mut() {
            if combatant.interrupted_by == Some(id) {
                combatant.interrupted_by = None;
            }
        }

        if was_acting {
            self.state.current_acting = None;
            if let Some(next) = successor {
                self.set_acting(next);
            }
        }

        self.post_validate();
        Ok(())
    }

    /// Records the externally derived defeat flag for a combatant.
    ///
    /// Called by the actor/resource collaborator; not operator gated.
    pub fn set_defeated(&mut self, id: CombatantId, defeated: bool) -> Result<(), CombatError> {
        let combatant = self
            .state
            .combatants
            .get_mut(&id)
            .ok_or(CombatError::CombatantNotFound(id))?;
        combatant.defeated = defeated;
        Ok(())
    }

    /// Locks in a maneuver for `id` during the selection phase.
    ///
    /// Each participant owns their own selection, so this is not operator
    /// gated.
    pub fn select_maneuver(
        &mut self,
        id: CombatantId,
        maneuver: SelectedManeuver,
    ) -> Result<(), CombatError> {
        self.require_phase(Phase::Selection)?;
        let combatant = self
            .state
            .combatants
            .get_mut(&id)
            .ok_or(CombatError::CombatantNotFound(id))?;
        combatant.record_selection(maneuver);
        Ok(())
    }

    /// Withdraws `id`'s selection during the selection phase.
    pub fn clear_selection(&mut self, id: CombatantId) -> Result<(), CombatError> {
        self.require_phase(Phase::Selection)?;
        let combatant = self
            .state
            .combatants
            .get_mut(&id)
            .ok_or(CombatError::CombatantNotFound(id))?;
        combatant.clear_selection();
        Ok(())
    }

    fn require_phase(&self, expected: Phase) -> Result<(), CombatError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(CombatError::WrongPhase {
                expected,
                current: self.state.phase,
            })
        }
    }
}
