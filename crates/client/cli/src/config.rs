//! Environment-driven configuration for the terminal driver.

use std::env;

use runtime::RuntimeConfig;

/// Settings read once at startup.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    /// Whether the scripted participant holds the operator role. When false,
    /// its requests go through the relay to a separate operator session.
    pub operator: bool,
    /// Rounds to play before shutting down.
    pub rounds: u32,
    /// Print the final encounter snapshot as JSON.
    pub dump_state: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            operator: false,
            rounds: 2,
            dump_state: false,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Channel configuration
        if let Some(capacity) = read_env::<usize>("ENCOUNTER_EVENT_BUFFER") {
            config.runtime.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("ENCOUNTER_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }

        if let Some(operator) = read_env_bool("ENCOUNTER_OPERATOR") {
            config.operator = operator;
        }
        if let Some(rounds) = read_env::<u32>("ENCOUNTER_ROUNDS") {
            config.rounds = rounds.max(1);
        }
        if let Some(dump) = read_env_bool("ENCOUNTER_DUMP_STATE") {
            config.dump_state = dump;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_runtime_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.runtime, RuntimeConfig::default());
        assert!(!config.operator);
        assert_eq!(config.rounds, 2);
    }
}
