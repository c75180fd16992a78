//! Renders bus events as lines on stdout.

use combat_core::EncounterEvent;
use runtime::{Event, RelayEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::warn;

pub fn describe(event: &Event) -> String {
    match event {
        Event::Encounter(EncounterEvent::PhaseChanged { phase, round }) => {
            format!("== round {round}: {phase} ==")
        }
        Event::Encounter(EncounterEvent::TurnStarted { combatant, .. }) => {
            format!("   {combatant} is acting")
        }
        Event::Encounter(EncounterEvent::Interruption {
            interruptor,
            interrupted,
        }) => format!("   {interruptor} interrupts {interrupted}!"),
        Event::Encounter(EncounterEvent::ManeuverRevealed {
            combatant,
            maneuver,
        }) => format!(
            "   {combatant} reveals {} (speed {}, damage {}, move {})",
            maneuver.name(),
            maneuver.speed(),
            maneuver.damage(),
            maneuver.movement()
        ),
        Event::Relay(RelayEvent::RequestRelayed { operator, request }) => {
            format!("   [relay] {request:?} forwarded to {operator}")
        }
        Event::Relay(RelayEvent::OperatorJoined { operator }) => {
            format!("   [relay] {operator} joined")
        }
        Event::Relay(RelayEvent::OperatorLeft { operator }) => {
            format!("   [relay] {operator} left")
        }
    }
}

/// Prints every event from `rx` until the bus closes.
pub fn spawn(mut rx: broadcast::Receiver<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => println!("{}", describe(&event)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "encounter_cli", skipped, "event printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
