//! Cloneable façade for issuing commands to the runtime.
//!
//! [`EncounterHandle`] hides channel plumbing and offers async helpers for
//! every encounter transition, the participant request relay, and event
//! subscriptions. Every mutating call carries the caller's
//! [`OperationContext`]; the worker enforces the operator gate.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{
    CombatantId, EncounterState, OperationContext, OperatorRequest, RequestOutcome,
    SelectedManeuver,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, OperatorId, Topic};
use crate::snapshot;
use crate::workers::{Command, Operation};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct EncounterHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl EncounterHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    async fn execute(&self, ctx: OperationContext, operation: Operation) -> Result<()> {
        self.request(|reply| Command::Execute {
            ctx,
            operation,
            reply,
        })
        .await?
    }

    /// Open the selection phase, resetting every combatant's round flags.
    pub async fn start_selection_phase(&self, ctx: OperationContext) -> Result<()> {
        self.execute(ctx, Operation::StartSelectionPhase).await
    }

    /// Move to execution once every active combatant has selected.
    pub async fn start_execution_phase(&self, ctx: OperationContext) -> Result<()> {
        self.execute(ctx, Operation::StartExecutionPhase).await
    }

    pub async fn handle_interruption(
        &self,
        ctx: OperationContext,
        interruptor: CombatantId,
    ) -> Result<()> {
        self.execute(ctx, Operation::HandleInterruption { interruptor })
            .await
    }

    pub async fn complete_current_action(&self, ctx: OperationContext) -> Result<()> {
        self.execute(ctx, Operation::CompleteCurrentAction).await
    }

    pub async fn skip_current_action(&self, ctx: OperationContext) -> Result<()> {
        self.execute(ctx, Operation::SkipCurrentAction).await
    }

    /// Close the round and open the next selection phase.
    pub async fn advance_to_next_turn(&self, ctx: OperationContext) -> Result<()> {
        self.execute(ctx, Operation::AdvanceToNextTurn).await
    }

    pub async fn reveal_maneuver(
        &self,
        ctx: OperationContext,
        combatant: CombatantId,
    ) -> Result<()> {
        self.execute(ctx, Operation::RevealManeuver { combatant })
            .await
    }

    pub async fn add_combatant(
        &self,
        ctx: OperationContext,
        id: CombatantId,
        name: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        self.execute(ctx, Operation::AddCombatant { id, name }).await
    }

    pub async fn remove_combatant(&self, ctx: OperationContext, id: CombatantId) -> Result<()> {
        self.execute(ctx, Operation::RemoveCombatant { id }).await
    }

    /// Push the externally derived defeat flag for `id`.
    pub async fn set_defeated(&self, id: CombatantId, defeated: bool) -> Result<()> {
        self.execute(
            OperationContext::PARTICIPANT,
            Operation::SetDefeated { id, defeated },
        )
        .await
    }

    pub async fn select_maneuver(&self, id: CombatantId, maneuver: SelectedManeuver) -> Result<()> {
        self.execute(
            OperationContext::PARTICIPANT,
            Operation::SelectManeuver { id, maneuver },
        )
        .await
    }

    pub async fn clear_selection(&self, id: CombatantId) -> Result<()> {
        self.execute(
            OperationContext::PARTICIPANT,
            Operation::ClearSelection { id },
        )
        .await
    }

    /// Apply a request directly, typically one received on [`Topic::Relay`].
    pub async fn apply_request(
        &self,
        ctx: OperationContext,
        request: OperatorRequest,
    ) -> Result<()> {
        self.execute(ctx, Operation::ApplyRequest { request }).await
    }

    /// Submit a request: operators execute it in place, anyone else has it
    /// relayed to a connected operator.
    pub async fn submit_request(
        &self,
        ctx: OperationContext,
        request: OperatorRequest,
    ) -> Result<RequestOutcome> {
        self.request(|reply| Command::Submit {
            ctx,
            request,
            reply,
        })
        .await?
    }

    pub async fn request_interrupt(
        &self,
        ctx: OperationContext,
        interruptor: CombatantId,
    ) -> Result<RequestOutcome> {
        self.submit_request(ctx, OperatorRequest::Interrupt { interruptor })
            .await
    }

    pub async fn request_complete_action(&self, ctx: OperationContext) -> Result<RequestOutcome> {
        self.submit_request(ctx, OperatorRequest::CompleteAction)
            .await
    }

    pub async fn request_skip_action(&self, ctx: OperationContext) -> Result<RequestOutcome> {
        self.submit_request(ctx, OperatorRequest::SkipAction).await
    }

    pub async fn request_reveal(
        &self,
        ctx: OperationContext,
        combatant: CombatantId,
    ) -> Result<RequestOutcome> {
        self.submit_request(ctx, OperatorRequest::RevealManeuver { combatant })
            .await
    }

    /// Register an operator session. Returns false if it was already present.
    pub async fn join_operator(&self, operator: OperatorId) -> Result<bool> {
        self.request(|reply| Command::JoinOperator { operator, reply })
            .await
    }

    /// Unregister an operator session. Returns false if it was not present.
    pub async fn leave_operator(&self, operator: OperatorId) -> Result<bool> {
        self.request(|reply| Command::LeaveOperator { operator, reply })
            .await
    }

    /// Query the current encounter state (read-only snapshot)
    pub async fn query_state(&self) -> Result<EncounterState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Serialise the current encounter state to JSON.
    pub async fn snapshot(&self) -> Result<String> {
        snapshot::encode(&self.query_state().await?)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Phase` - Phase changes
    /// - `Topic::Turn` - Turn hand-offs, interruptions and reveals
    /// - `Topic::Relay` - Relayed requests and operator presence
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
