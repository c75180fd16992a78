//! Operator presence and the participant request relay.

use std::collections::BTreeSet;

use combat_core::{CombatError, OperatorRelay, OperatorRequest};
use tracing::debug;

use crate::events::{Event, EventBus, OperatorId, RelayEvent};

/// Operators currently connected to the encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorRegistry {
    operators: BTreeSet<OperatorId>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `operator` was already present.
    pub fn join(&mut self, operator: OperatorId) -> bool {
        self.operators.insert(operator)
    }

    /// Returns false if `operator` was not present.
    pub fn leave(&mut self, operator: OperatorId) -> bool {
        self.operators.remove(&operator)
    }

    pub fn contains(&self, operator: OperatorId) -> bool {
        self.operators.contains(&operator)
    }

    /// The operator that receives relayed requests: the lowest id present.
    pub fn primary(&self) -> Option<OperatorId> {
        self.operators.first().copied()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

/// Relay that forwards requests to the primary operator over the event bus.
pub struct BusRelay<'a> {
    operators: &'a OperatorRegistry,
    event_bus: &'a EventBus,
}

impl<'a> BusRelay<'a> {
    pub fn new(operators: &'a OperatorRegistry, event_bus: &'a EventBus) -> Self {
        Self {
            operators,
            event_bus,
        }
    }
}

impl OperatorRelay for BusRelay<'_> {
    fn relay(&self, request: OperatorRequest) -> Result<(), CombatError> {
        let Some(operator) = self.operators.primary() else {
            debug!(target: "runtime::relay", ?request, "no operator available");
            return Err(CombatError::NoOperatorAvailable);
        };

        debug!(target: "runtime::relay", %operator, ?request, "relaying request");
        self.event_bus
            .publish(Event::Relay(RelayEvent::RequestRelayed { operator, request }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use combat_core::CombatantId;

    use super::*;
    use crate::events::Topic;

    #[test]
    fn primary_is_lowest_id() {
        let mut registry = OperatorRegistry::new();
        assert_eq!(registry.primary(), None);

        assert!(registry.join(OperatorId(7)));
        assert!(registry.join(OperatorId(3)));
        assert!(!registry.join(OperatorId(3)));
        assert_eq!(registry.primary(), Some(OperatorId(3)));
        assert_eq!(registry.len(), 2);

        assert!(registry.leave(OperatorId(3)));
        assert!(!registry.leave(OperatorId(3)));
        assert_eq!(registry.primary(), Some(OperatorId(7)));
    }

    #[test]
    fn relay_requires_an_operator() {
        let registry = OperatorRegistry::new();
        let bus = EventBus::new();
        let relay = BusRelay::new(&registry, &bus);

        assert_eq!(
            relay.relay(OperatorRequest::SkipAction),
            Err(CombatError::NoOperatorAvailable)
        );
    }

    #[test]
    fn relay_publishes_to_relay_topic() {
        let mut registry = OperatorRegistry::new();
        registry.join(OperatorId(1));
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Topic::Relay);

        let request = OperatorRequest::Interrupt {
            interruptor: CombatantId(2),
        };
        BusRelay::new(&registry, &bus)
            .relay(request.clone())
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Event::Relay(RelayEvent::RequestRelayed {
                operator: OperatorId(1),
                request
            })
        );
    }
}
