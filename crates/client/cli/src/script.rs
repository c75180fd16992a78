//! A scripted encounter that exercises every transition of the engine.

use anyhow::{Context, Result, bail};
use combat_core::{
    CombatantId, CombatantState, OperationContext, RequestOutcome, RoundEndHook,
    SelectedManeuver,
};
use runtime::{EncounterHandle, Event, OperatorId, RelayEvent, Topic};
use tokio::sync::broadcast;
use tracing::{info, warn};

const GM: OperationContext = OperationContext::OPERATOR;

/// Logs who is still standing at the end of each round.
pub struct RoundSummary;

impl RoundEndHook for RoundSummary {
    fn name(&self) -> &'static str {
        "round_summary"
    }

    fn on_round_end(&self, combatant: &CombatantState, round: u32) {
        info!(
            target: "encounter_cli",
            round,
            combatant = %combatant.id(),
            name = combatant.name(),
            status = %combatant.action_status(),
            "round ended"
        );
    }
}

struct Fighter {
    id: CombatantId,
    name: &'static str,
    moves: [(&'static str, &'static str, i32, i32); 2],
}

fn roster() -> [Fighter; 3] {
    [
        Fighter {
            id: CombatantId(1),
            name: "Kane",
            moves: [
                ("fierce", "Fierce Punch", 2, 6),
                ("sweep", "Sweep", 4, 3),
            ],
        },
        Fighter {
            id: CombatantId(2),
            name: "Mei",
            moves: [("jab", "Jab", 6, 2), ("throw", "Throw", 1, 5)],
        },
        Fighter {
            id: CombatantId(3),
            name: "Rook",
            moves: [("block", "Block", 5, 0), ("roundhouse", "Roundhouse", 3, 5)],
        },
    ]
}

/// An operator session that applies whatever the relay forwards to it.
pub struct Operator {
    id: OperatorId,
    relay_rx: broadcast::Receiver<Event>,
}

impl Operator {
    pub async fn connect(handle: &EncounterHandle, id: OperatorId) -> Result<Self> {
        let relay_rx = handle.subscribe(Topic::Relay);
        handle.join_operator(id).await?;
        Ok(Self { id, relay_rx })
    }

    /// Applies the next request relayed to this operator.
    async fn serve_next(&mut self, handle: &EncounterHandle) -> Result<()> {
        loop {
            match self.relay_rx.recv().await? {
                Event::Relay(RelayEvent::RequestRelayed { operator, request })
                    if operator == self.id =>
                {
                    if let Err(error) = handle.apply_request(GM, request).await {
                        warn!(target: "encounter_cli", %error, "operator could not apply request");
                    }
                    return Ok(());
                }
                _ => continue,
            }
        }
    }

    pub async fn disconnect(self, handle: &EncounterHandle) -> Result<()> {
        handle.leave_operator(self.id).await?;
        Ok(())
    }
}

/// Plays `rounds` rounds. `participant` is the role used for in-turn requests.
pub async fn play(
    handle: &EncounterHandle,
    operator: &mut Operator,
    participant: OperationContext,
    rounds: u32,
) -> Result<()> {
    let fighters = roster();
    for fighter in &fighters {
        handle.add_combatant(GM, fighter.id, fighter.name).await?;
    }

    handle.start_selection_phase(GM).await?;
    for round in 0..rounds {
        let pick = (round % 2) as usize;
        for fighter in &fighters {
            let (id, name, speed, damage) = fighter.moves[pick];
            let maneuver = SelectedManeuver::new(id, name, speed)
                .with_damage(damage)
                .with_movement(1);
            handle.select_maneuver(fighter.id, maneuver).await?;
        }
        handle.start_execution_phase(GM).await?;

        // The fastest fighter tries to cut into the opening action.
        let fastest = fastest_fighter(handle).await?;
        match handle.request_interrupt(participant, fastest).await {
            Ok(RequestOutcome::Relayed) => operator.serve_next(handle).await?,
            Ok(RequestOutcome::Executed) => {}
            Err(error) => warn!(target: "encounter_cli", %error, "interrupt refused"),
        }

        resolve_actions(handle, operator, participant).await?;
        handle.advance_to_next_turn(GM).await?;
    }
    Ok(())
}

async fn fastest_fighter(handle: &EncounterHandle) -> Result<CombatantId> {
    let state = handle.query_state().await?;
    state
        .combatants_by_initiative()
        .last()
        .map(|combatant| combatant.id())
        .context("encounter has no active combatants")
}

async fn resolve_actions(
    handle: &EncounterHandle,
    operator: &mut Operator,
    participant: OperationContext,
) -> Result<()> {
    let mut reveal_first = true;
    loop {
        let state = handle.query_state().await?;
        let Some(current) = state.current_acting_id() else {
            break;
        };
        if reveal_first {
            relay_or_run(
                handle,
                operator,
                handle.request_reveal(participant, current).await,
            )
            .await?;
            reveal_first = false;
        }
        relay_or_run(
            handle,
            operator,
            handle.request_complete_action(participant).await,
        )
        .await?;

        if handle.query_state().await?.current_acting_id() == Some(current) {
            bail!("{current} still acting after completing its action");
        }
    }
    Ok(())
}

async fn relay_or_run(
    handle: &EncounterHandle,
    operator: &mut Operator,
    outcome: runtime::Result<RequestOutcome>,
) -> Result<()> {
    match outcome? {
        RequestOutcome::Relayed => operator.serve_next(handle).await,
        RequestOutcome::Executed => Ok(()),
    }
}
