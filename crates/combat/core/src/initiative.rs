//! Initiative ordering and interruption eligibility.
//!
//! Two rules live here and they point in opposite numeric directions:
//!
//! - **Execution order** is ascending speed: the lowest number acts first.
//! - **Interruption** requires the interruptor's speed to be strictly
//!   *greater* than the target's.
//!
//! Both are ruleset semantics and must not be unified.

use std::cmp::Ordering;

use crate::state::CombatantId;

/// Sort key for one combatant in initiative order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitiativeKey<'a> {
    /// Speed of the selected maneuver, `None` when nothing is selected.
    pub speed: Option<i32>,
    pub name: &'a str,
    pub id: CombatantId,
}

/// Orders two combatants for execution.
///
/// Ascending speed first, combatants without a maneuver last. Equal speeds
/// fall back to a case-insensitive comparison of display names, and finally
/// to the combatant id so the order is total and identical on every client.
pub fn compare_initiative(a: &InitiativeKey<'_>, b: &InitiativeKey<'_>) -> Ordering {
    compare_speed(a.speed, b.speed)
        .then_with(|| compare_names(a.name, b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Returns true iff a maneuver of `interruptor_speed` may cut into one of
/// `target_speed`.
#[inline]
pub const fn can_interrupt(interruptor_speed: i32, target_speed: i32) -> bool {
    interruptor_speed > target_speed
}

fn compare_speed(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
