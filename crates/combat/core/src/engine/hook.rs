//! End-of-round side effects delegated to actor/resource collaborators.

use crate::state::CombatantState;

/// Hook invoked once per non-defeated combatant when a round ends.
///
/// Concrete effects (resource regeneration and the like) are owned by the
/// implementor; the engine only guarantees the call order: initiative order,
/// before the round counter advances.
pub trait RoundEndHook: Send + Sync {
    /// Human-readable name used in logging.
    fn name(&self) -> &'static str;

    /// Lower values run first when a host sorts its hooks.
    fn priority(&self) -> i32 {
        0
    }

    fn on_round_end(&self, combatant: &CombatantState, round: u32);
}
