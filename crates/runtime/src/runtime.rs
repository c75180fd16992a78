//! High-level runtime orchestrator.
//!
//! The runtime owns the encounter worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the encounter.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use combat_core::EncounterState;

use crate::api::{EncounterHandle, Result, RuntimeError};
use crate::events::EventBus;
use crate::hooks::{HookRegistry, RoundEndHook};
use crate::workers::{Command, EncounterWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Per-topic broadcast capacity.
    pub event_buffer_size: usize,
    /// Pending commands before senders wait.
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime hosting one encounter.
///
/// Runtime owns the worker; [`EncounterHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: EncounterHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> EncounterHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain its queue, which happens once every
    /// outstanding [`EncounterHandle`] clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
#[derive(Debug, Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<EncounterState>,
    hooks: HookRegistry,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial encounter state, e.g. a restored snapshot
    pub fn initial_state(mut self, state: EncounterState) -> Self {
        self.state = Some(state);
        self
    }

    /// Replace the round-end hooks.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Add one round-end hook to the current set.
    pub fn add_hook(mut self, hook: Arc<dyn RoundEndHook>) -> Self {
        self.hooks.register(hook);
        self
    }

    /// Build the runtime
    ///
    /// Fails with [`RuntimeError::InvalidState`] if the initial state breaks
    /// a structural invariant.
    pub async fn build(self) -> Result<Runtime> {
        let initial_state = self.state.unwrap_or_default();
        initial_state.validate()?;

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = EncounterHandle::new(command_tx, event_bus.clone());

        let worker = EncounterWorker::new(initial_state, command_rx, event_bus, self.hooks);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
