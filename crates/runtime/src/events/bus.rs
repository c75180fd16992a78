//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{Announcer, EncounterEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::RelayEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase changes
    Phase,
    /// Turn hand-offs, interruptions and reveals
    Turn,
    /// Participant requests forwarded to operators, operator presence
    Relay,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Encounter(EncounterEvent),
    Relay(RelayEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Encounter(EncounterEvent::PhaseChanged { .. }) => Topic::Phase,
            Event::Encounter(_) => Topic::Turn,
            Event::Relay(_) => Topic::Relay,
        }
    }
}

struct Channels {
    phase: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    relay: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Phase => &self.phase,
            Topic::Turn => &self.turn,
            Topic::Relay => &self.relay,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Delivery is best-effort: publishing never blocks
/// and lagging receivers lose the oldest events.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        // broadcast::channel panics on zero capacity
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                phase: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                relay: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer for EventBus {
    fn announce(&self, event: EncounterEvent) {
        self.publish(Event::Encounter(event));
    }
}
