//! Closed vocabulary of encounter phases and per-combatant statuses.

/// Encounter-wide phase.
///
/// Progresses `Setup → Selection → Execution`; finishing a round returns the
/// encounter to `Selection`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Phase {
    /// Combatants are being gathered; no round has started.
    #[default]
    Setup,
    /// Every combatant secretly picks a maneuver.
    Selection,
    /// Maneuvers resolve in initiative order.
    Execution,
}

/// Whether a combatant has locked in a maneuver for the round.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SelectionStatus {
    #[default]
    Pending,
    /// A maneuver is selected. Never set without one.
    Ready,
}

/// Progress of a combatant's action within the execution phase.
///
/// `Pending → Acting → Revealed → {Completed | Skipped}`, with the side
/// transition `Acting | Revealed → Interrupted → Acting` while a faster
/// combatant cuts in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionStatus {
    #[default]
    Pending,
    Acting,
    Revealed,
    Interrupted,
    Completed,
    Skipped,
}

impl ActionStatus {
    /// Returns true for the statuses held by the currently acting combatant.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Acting | Self::Revealed)
    }

    /// Returns true once the combatant is done for the round.
    #[inline]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_are_initial_states() {
        assert_eq!(Phase::default(), Phase::Setup);
        assert_eq!(SelectionStatus::default(), SelectionStatus::Pending);
        assert_eq!(ActionStatus::default(), ActionStatus::Pending);
    }

    #[test]
    fn active_and_finished_are_disjoint() {
        for status in [
            ActionStatus::Pending,
            ActionStatus::Acting,
            ActionStatus::Revealed,
            ActionStatus::Interrupted,
            ActionStatus::Completed,
            ActionStatus::Skipped,
        ] {
            assert!(!(status.is_active() && status.is_finished()), "{status}");
        }
        assert!(ActionStatus::Revealed.is_active());
        assert!(!ActionStatus::Interrupted.is_active());
        assert!(ActionStatus::Skipped.is_finished());
    }

    #[test]
    fn labels_are_snake_case() {
        assert_eq!(Phase::Execution.to_string(), "execution");
        assert_eq!(
            ActionStatus::from_str("INTERRUPTED").unwrap(),
            ActionStatus::Interrupted
        );
    }
}
