use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use combat_core::{
    ActionStatus, CombatError, CombatantId, CombatantState, EncounterEvent, EncounterState,
    OperationContext, Phase, RoundEndHook, SelectedManeuver,
};
use runtime::{EncounterHandle, Event, Runtime, RuntimeConfig, RuntimeError, Topic, snapshot};

const GM: OperationContext = OperationContext::OPERATOR;
const PLAYER: OperationContext = OperationContext::PARTICIPANT;

const KANE: CombatantId = CombatantId(1);
const MEI: CombatantId = CombatantId(2);

async fn seeded(handle: &EncounterHandle) {
    handle.add_combatant(GM, KANE, "Kane").await.unwrap();
    handle.add_combatant(GM, MEI, "Mei").await.unwrap();
    handle.start_selection_phase(GM).await.unwrap();
    handle
        .select_maneuver(KANE, SelectedManeuver::new("fierce", "Fierce Punch", 2))
        .await
        .unwrap();
    handle
        .select_maneuver(MEI, SelectedManeuver::new("jab", "Jab", 6).with_damage(2))
        .await
        .unwrap();
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn round_with_interruption_resolves_through_worker() {
    let runtime = Runtime::builder().build().await.unwrap();
    let handle = runtime.handle();
    seeded(&handle).await;

    let mut turns = handle.subscribe(Topic::Turn);
    let mut phases = handle.subscribe(Topic::Phase);

    handle.start_execution_phase(GM).await.unwrap();
    handle.handle_interruption(GM, MEI).await.unwrap();

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.current_acting_id(), Some(MEI));
    assert_eq!(state.interruption_stack(), &[KANE]);

    handle.complete_current_action(GM).await.unwrap();
    handle.complete_current_action(GM).await.unwrap();
    handle.advance_to_next_turn(GM).await.unwrap();

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.phase(), Phase::Selection);
    assert_eq!(state.round(), 2);

    assert_eq!(
        drain(&mut phases),
        vec![
            Event::Encounter(EncounterEvent::PhaseChanged {
                phase: Phase::Execution,
                round: 1
            }),
            Event::Encounter(EncounterEvent::PhaseChanged {
                phase: Phase::Selection,
                round: 2
            }),
        ]
    );

    let turn_events = drain(&mut turns);
    assert!(matches!(
        turn_events.first(),
        Some(Event::Encounter(EncounterEvent::TurnStarted { combatant: KANE, .. }))
    ));
    assert!(turn_events.contains(&Event::Encounter(EncounterEvent::Interruption {
        interruptor: MEI,
        interrupted: KANE,
    })));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn participants_cannot_drive_transitions() {
    let runtime = Runtime::builder().build().await.unwrap();
    let handle = runtime.handle();
    seeded(&handle).await;
    let before = handle.query_state().await.unwrap();

    let error = handle.start_execution_phase(PLAYER).await.unwrap_err();
    assert_eq!(error.as_combat(), Some(&CombatError::Unauthorized));
    assert_eq!(error.error_code(), CombatError::Unauthorized.error_code());

    assert!(handle.add_combatant(PLAYER, CombatantId(3), "Rook").await.is_err());
    assert_eq!(handle.query_state().await.unwrap(), before);
}

#[tokio::test]
async fn guard_failures_surface_as_combat_errors() {
    let runtime = Runtime::builder().build().await.unwrap();
    let handle = runtime.handle();
    handle.add_combatant(GM, KANE, "Kane").await.unwrap();
    handle.start_selection_phase(GM).await.unwrap();

    let error = handle.start_execution_phase(GM).await.unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Combat(CombatError::SelectionsIncomplete)
    ));

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.phase(), Phase::Selection);
    assert_eq!(
        state.combatant(KANE).map(|c| c.action_status()),
        Some(ActionStatus::Pending)
    );
}

#[derive(Default)]
struct Upkeep {
    calls: AtomicU32,
}

impl RoundEndHook for Upkeep {
    fn name(&self) -> &'static str {
        "upkeep"
    }

    fn on_round_end(&self, _combatant: &CombatantState, _round: u32) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn round_end_hooks_run_once_per_active_combatant() {
    let upkeep = Arc::new(Upkeep::default());
    let runtime = Runtime::builder()
        .add_hook(upkeep.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    seeded(&handle).await;
    handle.add_combatant(GM, CombatantId(3), "Fallen").await.unwrap();
    handle.set_defeated(CombatantId(3), true).await.unwrap();

    handle.start_execution_phase(GM).await.unwrap();
    handle.skip_current_action(GM).await.unwrap();
    handle.complete_current_action(GM).await.unwrap();
    handle.advance_to_next_turn(GM).await.unwrap();

    assert_eq!(upkeep.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn runtime_resumes_from_snapshot() {
    let runtime = Runtime::builder().build().await.unwrap();
    let handle = runtime.handle();
    seeded(&handle).await;
    handle.start_execution_phase(GM).await.unwrap();
    handle.handle_interruption(GM, MEI).await.unwrap();

    let json = handle.snapshot().await.unwrap();
    let restored = snapshot::decode(&json).unwrap();

    let resumed = Runtime::builder()
        .config(RuntimeConfig {
            event_buffer_size: 16,
            command_buffer_size: 4,
        })
        .initial_state(restored)
        .build()
        .await
        .unwrap();
    let resumed_handle = resumed.handle();

    resumed_handle.complete_current_action(GM).await.unwrap();
    let state = resumed_handle.query_state().await.unwrap();
    assert_eq!(state.current_acting_id(), Some(KANE));
    assert!(state.interruption_stack().is_empty());
}

#[tokio::test]
async fn broken_initial_state_is_rejected() {
    let json = r#"{
        "phase": "Execution",
        "round": 1,
        "turn_started": true,
        "current_acting": 9,
        "interruption_stack": [],
        "combatants": {}
    }"#;
    let state: EncounterState = serde_json::from_str(json).unwrap();

    let result = Runtime::builder().initial_state(state).build().await;
    assert!(matches!(result, Err(RuntimeError::InvalidState(_))));
    assert!(matches!(
        snapshot::decode(json),
        Err(RuntimeError::InvalidState(_))
    ));
}
