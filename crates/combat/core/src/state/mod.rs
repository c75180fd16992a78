//! Authoritative encounter state representation.
//!
//! This module owns the data structures that describe the roster, per-round
//! combatant flags, and the execution bookkeeping (current actor plus the
//! interruption stack). Hosts clone or query this state but mutate it
//! exclusively through [`EncounterEngine`](crate::engine::EncounterEngine).
mod combatant;
mod common;
mod invariants;
mod maneuver;

use std::collections::BTreeMap;

pub use combatant::CombatantState;
pub use common::CombatantId;
pub use invariants::InvariantViolation;
pub use maneuver::SelectedManeuver;

use crate::initiative::compare_initiative;
use crate::phase::{ActionStatus, Phase, SelectionStatus};

/// Canonical snapshot of one ongoing encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    pub(crate) phase: Phase,

    /// Round counter. Zero until the first selection phase starts.
    pub(crate) round: u32,

    pub(crate) turn_started: bool,

    /// Combatant whose action is resolving, if any.
    pub(crate) current_acting: Option<CombatantId>,

    /// Interrupted combatants, most recent interruption last.
    pub(crate) interruption_stack: Vec<CombatantId>,

    /// Roster keyed by id. Never iterate this for turn order; use
    /// [`EncounterState::combatants_by_initiative`].
    pub(crate) combatants: BTreeMap<CombatantId, CombatantState>,
}

impl EncounterState {
    /// Creates an empty encounter in the setup phase.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn_started(&self) -> bool {
        self.turn_started
    }

    /// Returns true until the first selection phase has advanced the round.
    pub fn is_first_turn(&self) -> bool {
        self.round == 0
    }

    pub fn current_acting_id(&self) -> Option<CombatantId> {
        self.current_acting
    }

    pub fn current_acting(&self) -> Option<&CombatantState> {
        self.current_acting.and_then(|id| self.combatants.get(&id))
    }

    /// Interrupted combatants from oldest to most recent.
    pub fn interruption_stack(&self) -> &[CombatantId] {
        &self.interruption_stack
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.combatants.get(&id)
    }

    pub fn combatants(&self) -> impl Iterator<Item = &CombatantState> {
        self.combatants.values()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// True iff every non-defeated combatant has a maneuver locked in.
    pub fn all_selections_complete(&self) -> bool {
        self.active_combatants()
            .all(|c| c.selection_status == SelectionStatus::Ready)
    }

    /// True iff every non-defeated combatant has completed or skipped.
    pub fn all_actions_complete(&self) -> bool {
        self.active_combatants()
            .all(|c| c.action_status.is_finished())
    }

    /// Non-defeated combatants in execution order.
    pub fn combatants_by_initiative(&self) -> Vec<&CombatantState> {
        let mut ordered: Vec<_> = self.active_combatants().collect();
        ordered.sort_by(|a, b| compare_initiative(&a.initiative_key(), &b.initiative_key()));
        ordered
    }

    fn active_combatants(&self) -> impl Iterator<Item = &CombatantState> {
        self.combatants.values().filter(|c| !c.defeated)
    }

    /// First pending combatant in initiative order after `after`.
    ///
    /// Scans from the start when `after` is not in the order.
    pub(crate) fn next_pending_after(&self, after: CombatantId) -> Option<CombatantId> {
        let ordered = self.combatants_by_initiative();
        let start = ordered
            .iter()
            .position(|c| c.id == after)
            .map_or(0, |index| index + 1);

        ordered[start..]
            .iter()
            .find(|c| c.id != after && c.action_status == ActionStatus::Pending)
            .map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(entries: &[(u32, &str, Option<i32>)]) -> EncounterState {
        let mut state = EncounterState::new();
        for &(id, name, speed) in entries {
            let mut combatant = CombatantState::new(CombatantId(id), name);
            if let Some(speed) = speed {
                combatant.record_selection(SelectedManeuver::new("m", "Maneuver", speed));
            }
            state.combatants.insert(CombatantId(id), combatant);
        }
        state
    }

    fn ids(ordered: &[&CombatantState]) -> Vec<u32> {
        ordered.iter().map(|c| c.id().0).collect()
    }

    #[test]
    fn initiative_is_ascending_speed_then_name() {
        let state = roster(&[
            (1, "Vega", Some(4)),
            (2, "chun-li", Some(2)),
            (3, "Blanka", Some(4)),
            (4, "Dhalsim", Some(1)),
        ]);

        let first = ids(&state.combatants_by_initiative());
        assert_eq!(first, vec![4, 2, 3, 1]);
        assert_eq!(ids(&state.combatants_by_initiative()), first);
    }

    #[test]
    fn initiative_excludes_defeated() {
        let mut state = roster(&[(1, "A", Some(1)), (2, "B", Some(2))]);
        state.combatants.get_mut(&CombatantId(1)).unwrap().defeated = true;
        assert_eq!(ids(&state.combatants_by_initiative()), vec![2]);
    }

    #[test]
    fn completeness_ignores_defeated_combatants() {
        let mut state = roster(&[(1, "A", Some(1)), (2, "B", None)]);
        assert!(!state.all_selections_complete());

        state.combatants.get_mut(&CombatantId(2)).unwrap().defeated = true;
        assert!(state.all_selections_complete());

        assert!(!state.all_actions_complete());
        state.combatants.get_mut(&CombatantId(1)).unwrap().action_status =
            ActionStatus::Skipped;
        assert!(state.all_actions_complete());
    }

    #[test]
    fn empty_roster_is_vacuously_complete() {
        let state = EncounterState::new();
        assert!(state.all_selections_complete());
        assert!(state.all_actions_complete());
        assert!(state.is_first_turn());
    }

    #[test]
    fn next_pending_scans_after_given_combatant() {
        let mut state = roster(&[(1, "A", Some(1)), (2, "B", Some(2)), (3, "C", Some(3))]);
        assert_eq!(state.next_pending_after(CombatantId(1)), Some(CombatantId(2)));

        state.combatants.get_mut(&CombatantId(2)).unwrap().action_status =
            ActionStatus::Completed;
        assert_eq!(state.next_pending_after(CombatantId(1)), Some(CombatantId(3)));
        assert_eq!(state.next_pending_after(CombatantId(3)), None);
    }
}
