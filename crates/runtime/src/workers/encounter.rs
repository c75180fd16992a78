//! Encounter worker that owns the authoritative [`combat_core::EncounterState`].
//!
//! Receives commands from [`EncounterHandle`](crate::EncounterHandle), applies
//! them through [`combat_core::EncounterEngine`] one at a time, and announces
//! committed transitions on the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use combat_core::{
    CombatError, CombatantId, EncounterEngine, EncounterState, OperationContext,
    OperatorRequest, RequestOutcome, SelectedManeuver,
};

use crate::api::Result;
use crate::events::{Event, EventBus, OperatorId, RelayEvent};
use crate::hooks::HookRegistry;
use crate::operators::{BusRelay, OperatorRegistry};

/// A single engine transition.
#[derive(Debug, Clone, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    StartSelectionPhase,
    StartExecutionPhase,
    HandleInterruption { interruptor: CombatantId },
    CompleteCurrentAction,
    SkipCurrentAction,
    AdvanceToNextTurn,
    RevealManeuver { combatant: CombatantId },
    AddCombatant { id: CombatantId, name: String },
    RemoveCombatant { id: CombatantId },
    SetDefeated { id: CombatantId, defeated: bool },
    SelectManeuver { id: CombatantId, maneuver: SelectedManeuver },
    ClearSelection { id: CombatantId },
    ApplyRequest { request: OperatorRequest },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    fn changes_phase(&self) -> bool {
        matches!(
            self,
            Operation::StartSelectionPhase
                | Operation::StartExecutionPhase
                | Operation::AdvanceToNextTurn
        )
    }
}

/// Commands that can be sent to the encounter worker
pub enum Command {
    /// Apply one transition under the caller's role.
    Execute {
        ctx: OperationContext,
        operation: Operation,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Apply or relay a request depending on the caller's role.
    Submit {
        ctx: OperationContext,
        request: OperatorRequest,
        reply: oneshot::Sender<Result<RequestOutcome>>,
    },
    JoinOperator {
        operator: OperatorId,
        reply: oneshot::Sender<bool>,
    },
    LeaveOperator {
        operator: OperatorId,
        reply: oneshot::Sender<bool>,
    },
    /// Query the current encounter state (read-only).
    QueryState {
        reply: oneshot::Sender<EncounterState>,
    },
}

/// Background task that serialises every mutation of one encounter.
pub struct EncounterWorker {
    state: EncounterState,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    hooks: HookRegistry,
    operators: OperatorRegistry,
}

impl EncounterWorker {
    pub fn new(
        state: EncounterState,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        hooks: HookRegistry,
    ) -> Self {
        info!(
            target: "runtime::worker",
            combatants = state.len(),
            phase = %state.phase(),
            round = state.round(),
            hooks = hooks.len(),
            "encounter worker initialized"
        );

        Self {
            state,
            command_rx,
            event_bus,
            hooks,
            operators: OperatorRegistry::new(),
        }
    }

    /// Main worker loop. Exits once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Execute {
                ctx,
                operation,
                reply,
            } => {
                let result = self.execute(ctx, operation).map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "Execute reply channel closed (caller dropped)"
                    );
                }
            }
            Command::Submit {
                ctx,
                request,
                reply,
            } => {
                let result = self.submit(ctx, request).map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "Submit reply channel closed (caller dropped)"
                    );
                }
            }
            Command::JoinOperator { operator, reply } => {
                let joined = self.operators.join(operator);
                if joined {
                    info!(target: "runtime::worker", %operator, "operator joined");
                    self.event_bus
                        .publish(Event::Relay(RelayEvent::OperatorJoined { operator }));
                }
                if reply.send(joined).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "JoinOperator reply channel closed (caller dropped)"
                    );
                }
            }
            Command::LeaveOperator { operator, reply } => {
                let left = self.operators.leave(operator);
                if left {
                    info!(target: "runtime::worker", %operator, "operator left");
                    self.event_bus
                        .publish(Event::Relay(RelayEvent::OperatorLeft { operator }));
                }
                if reply.send(left).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "LeaveOperator reply channel closed (caller dropped)"
                    );
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "QueryState reply channel closed (caller dropped)"
                    );
                }
            }
        }
    }

    fn execute(
        &mut self,
        ctx: OperationContext,
        operation: Operation,
    ) -> std::result::Result<(), CombatError> {
        let label = operation.name();
        let changes_phase = operation.changes_phase();

        let mut engine = EncounterEngine::new(&mut self.state, &self.event_bus)
            .with_hooks(self.hooks.as_slice());
        let result = match operation {
            Operation::StartSelectionPhase => engine.start_selection_phase(ctx),
            Operation::StartExecutionPhase => engine.start_execution_phase(ctx),
            Operation::HandleInterruption { interruptor } => {
                engine.handle_interruption(ctx, interruptor)
            }
            Operation::CompleteCurrentAction => engine.complete_current_action(ctx),
            Operation::SkipCurrentAction => engine.skip_current_action(ctx),
            Operation::AdvanceToNextTurn => engine.advance_to_next_turn(ctx),
            Operation::RevealManeuver { combatant } => engine.reveal_maneuver(ctx, combatant),
            Operation::AddCombatant { id, name } => engine.add_combatant(ctx, id, name),
            Operation::RemoveCombatant { id } => engine.remove_combatant(ctx, id),
            Operation::SetDefeated { id, defeated } => engine.set_defeated(id, defeated),
            Operation::SelectManeuver { id, maneuver } => engine.select_maneuver(id, maneuver),
            Operation::ClearSelection { id } => engine.clear_selection(id),
            Operation::ApplyRequest { request } => engine.apply_request(ctx, &request),
        };

        match &result {
            Ok(()) if changes_phase => info!(
                target: "runtime::worker",
                operation = label,
                phase = %self.state.phase(),
                round = self.state.round(),
                "phase transition committed"
            ),
            Ok(()) => debug!(
                target: "runtime::worker",
                operation = label,
                current = ?self.state.current_acting_id(),
                "operation committed"
            ),
            Err(error) => debug!(
                target: "runtime::worker",
                operation = label,
                code = error.error_code(),
                %error,
                "operation rejected"
            ),
        }
        result
    }

    fn submit(
        &mut self,
        ctx: OperationContext,
        request: OperatorRequest,
    ) -> std::result::Result<RequestOutcome, CombatError> {
        let relay = BusRelay::new(&self.operators, &self.event_bus);
        let result = EncounterEngine::new(&mut self.state, &self.event_bus)
            .with_hooks(self.hooks.as_slice())
            .submit_request(ctx, request, &relay);

        if let Err(error) = &result {
            debug!(
                target: "runtime::worker",
                code = error.error_code(),
                %error,
                "request rejected"
            );
        }
        result
    }
}
