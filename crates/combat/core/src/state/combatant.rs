use crate::error::CombatError;
use crate::initiative::{self, InitiativeKey};
use crate::phase::{ActionStatus, SelectionStatus};

use super::{CombatantId, SelectedManeuver};

/// Per-round state of one participant in an encounter.
///
/// Owned exclusively by its [`EncounterState`](super::EncounterState).
/// `interrupted_by` is a lookup reference only.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub(crate) id: CombatantId,
    pub(crate) name: String,
    pub(crate) selection_status: SelectionStatus,
    pub(crate) selected_maneuver: Option<SelectedManeuver>,
    pub(crate) action_status: ActionStatus,
    pub(crate) maneuver_revealed: bool,
    pub(crate) interrupted_by: Option<CombatantId>,
    /// Supplied by the actor/resource collaborator; never derived here.
    pub(crate) defeated: bool,
}

impl CombatantState {
    /// Creates a combatant with default per-round flags.
    pub fn new(id: CombatantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            selection_status: SelectionStatus::Pending,
            selected_maneuver: None,
            action_status: ActionStatus::Pending,
            maneuver_revealed: false,
            interrupted_by: None,
            defeated: false,
        }
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selection_status(&self) -> SelectionStatus {
        self.selection_status
    }

    pub fn selected_maneuver(&self) -> Option<&SelectedManeuver> {
        self.selected_maneuver.as_ref()
    }

    pub fn action_status(&self) -> ActionStatus {
        self.action_status
    }

    pub fn maneuver_revealed(&self) -> bool {
        self.maneuver_revealed
    }

    pub fn interrupted_by(&self) -> Option<CombatantId> {
        self.interrupted_by
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Speed of the selected maneuver.
    pub fn speed(&self) -> Option<i32> {
        self.selected_maneuver.as_ref().map(SelectedManeuver::speed)
    }

    pub fn initiative_key(&self) -> InitiativeKey<'_> {
        InitiativeKey {
            speed: self.speed(),
            name: &self.name,
            id: self.id,
        }
    }

    /// Locks in a maneuver. Re-selecting overwrites the previous choice.
    pub fn record_selection(&mut self, maneuver: SelectedManeuver) {
        self.selected_maneuver = Some(maneuver);
        self.selection_status = SelectionStatus::Ready;
    }

    pub fn clear_selection(&mut self) {
        self.selected_maneuver = None;
        self.selection_status = SelectionStatus::Pending;
    }

    /// Makes the selected maneuver public.
    ///
    /// Announcing the reveal is the engine's job; this only flips state.
    pub fn reveal_maneuver(&mut self) -> Result<(), CombatError> {
        if self.selected_maneuver.is_none() {
            return Err(CombatError::NoManeuverSelected { combatant: self.id });
        }
        self.maneuver_revealed = true;
        self.action_status = ActionStatus::Revealed;
        Ok(())
    }

    /// Restores every per-round field to its default for a new round.
    pub fn reset_turn_flags(&mut self) {
        self.selection_status = SelectionStatus::Pending;
        self.selected_maneuver = None;
        self.action_status = ActionStatus::Pending;
        self.maneuver_revealed = false;
        self.interrupted_by = None;
    }

    /// Returns true if this combatant may cut into `target`'s action.
    pub fn can_interrupt(&self, target: &CombatantState) -> bool {
        if self.id == target.id
            || self.defeated
            || self.action_status.is_finished()
            || !target.action_status.is_active()
        {
            return false;
        }

        match (self.speed(), target.speed()) {
            (Some(own), Some(theirs)) => initiative::can_interrupt(own, theirs),
            _ => false,
        }
    }
}
