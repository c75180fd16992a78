//! Hook registry holding round-end hooks in execution order.

use std::sync::Arc;

use super::RoundEndHook;

/// Registry of round-end hooks, sorted by priority (lower values first).
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn RoundEndHook>>,
}

impl HookRegistry {
    pub fn new(mut hooks: Vec<Arc<dyn RoundEndHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());
        Self { hooks }
    }

    /// Adds a hook, keeping priority order. Equal priorities keep insertion
    /// order.
    pub fn register(&mut self, hook: Arc<dyn RoundEndHook>) {
        let index = self
            .hooks
            .partition_point(|h| h.priority() <= hook.priority());
        self.hooks.insert(index, hook);
    }

    pub fn as_slice(&self) -> &[Arc<dyn RoundEndHook>] {
        &self.hooks
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::CombatantState;

    use super::*;

    struct Named(&'static str, i32);

    impl RoundEndHook for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn priority(&self) -> i32 {
            self.1
        }

        fn on_round_end(&self, _combatant: &CombatantState, _round: u32) {}
    }

    #[test]
    fn hooks_are_ordered_by_priority() {
        let mut registry = HookRegistry::new(vec![
            Arc::new(Named("regen", 10)) as Arc<dyn RoundEndHook>,
            Arc::new(Named("bleed", -5)),
        ]);
        registry.register(Arc::new(Named("upkeep", 0)));
        registry.register(Arc::new(Named("decay", 10)));

        assert_eq!(registry.names(), vec!["bleed", "upkeep", "regen", "decay"]);
        assert_eq!(registry.len(), 4);
    }
}
