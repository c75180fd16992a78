//! JSON snapshots of encounter state.
//!
//! Restored snapshots are validated before use so a runtime never starts from
//! a structurally broken state.

use combat_core::EncounterState;

use crate::api::Result;

pub fn encode(state: &EncounterState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn encode_pretty(state: &EncounterState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parses and validates a snapshot produced by [`encode`].
pub fn decode(json: &str) -> Result<EncounterState> {
    let state: EncounterState = serde_json::from_str(json)?;
    state.validate()?;
    Ok(state)
}
