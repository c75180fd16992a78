//! Outbound notification boundary.
//!
//! The engine announces committed transitions through [`Announcer`]. Delivery
//! to local and remote observers is the implementor's concern; the engine
//! never waits for acknowledgement and never rolls back on delivery failure.

use std::cell::RefCell;

use crate::phase::Phase;
use crate::state::{CombatantId, SelectedManeuver};

/// Something observers may want to know about.
#[derive(Clone, Debug, PartialEq, Eq, strum::EnumDiscriminants)]
#[strum_discriminants(name(EventKind), derive(Hash, strum::Display))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterEvent {
    /// The encounter entered a new phase.
    PhaseChanged { phase: Phase, round: u32 },

    /// A combatant became the acting combatant.
    TurnStarted { combatant: CombatantId, round: u32 },

    /// `interruptor` cut into `interrupted`'s action.
    Interruption {
        interruptor: CombatantId,
        interrupted: CombatantId,
    },

    /// A maneuver became public.
    ManeuverRevealed {
        combatant: CombatantId,
        maneuver: SelectedManeuver,
    },
}

impl EncounterEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from(self)
    }
}

/// Fire-and-forget sink for encounter events.
pub trait Announcer {
    fn announce(&self, event: EncounterEvent);
}

/// Announcer that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn announce(&self, _event: EncounterEvent) {}
}

/// Announcer that buffers events in memory for later inspection.
#[derive(Debug, Default)]
pub struct EventLog {
    events: RefCell<Vec<EncounterEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns every buffered event.
    pub fn take(&self) -> Vec<EncounterEvent> {
        self.events.take()
    }

    /// Kinds of the buffered events, oldest first.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(EncounterEvent::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Announcer for EventLog {
    fn announce(&self, event: EncounterEvent) {
        self.events.borrow_mut().push(event);
    }
}
