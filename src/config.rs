// Process-wide configuration, read once at start

use crate::gate::GateConfig;
use crate::orchestrator::OrchestratorConfig;
use crate::runner::RunnerConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const ENV_DISABLE_NOTIFICATIONS: &str = "DISABLE_NOTIFICATIONS";
pub const ENV_DEFAULT_TIMEOUT_MS: &str = "PERMSHELL_DEFAULT_TIMEOUT_MS";
pub const ENV_APPROVAL_WAIT_SECS: &str = "PERMSHELL_APPROVAL_WAIT_SECS";
pub const ENV_MAX_APPROVAL_ATTEMPTS: &str = "PERMSHELL_MAX_APPROVAL_ATTEMPTS";
pub const ENV_SUMMARY_MAX_CHARS: &str = "PERMSHELL_SUMMARY_MAX_CHARS";
pub const ENV_MAX_OUTPUT_BYTES: &str = "PERMSHELL_MAX_OUTPUT_BYTES";
pub const ENV_TOOLS_TOML: &str = "PERMSHELL_TOOLS_TOML";
pub const ENV_SHELL: &str = "PERMSHELL_SHELL";

/// Everything the server needs, assembled before the first tool call
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gate: GateConfig,
    pub orchestrator: OrchestratorConfig,
    pub runner: RunnerConfig,
    /// Optional tool description overrides
    pub tools_toml_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gate: GateConfig::default(),
            orchestrator: OrchestratorConfig::default(),
            runner: RunnerConfig::default(),
            tools_toml_path: PathBuf::from("tools.toml"),
        }
    }
}

/// Parse a variable, logging a warning if the value is present but invalid.
fn parse_env_var<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) => match v.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        None => default,
    }
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        config.gate.notifications_disabled = parse_env_var(
            &lookup,
            ENV_DISABLE_NOTIFICATIONS,
            config.gate.notifications_disabled,
        );

        let orchestrator = &mut config.orchestrator;
        let timeout_ms = parse_env_var(
            &lookup,
            ENV_DEFAULT_TIMEOUT_MS,
            orchestrator.default_timeout.as_millis() as u64,
        );
        if timeout_ms > 0 {
            orchestrator.default_timeout = Duration::from_millis(timeout_ms);
        } else {
            warn!(
                var = ENV_DEFAULT_TIMEOUT_MS,
                "timeout must be positive, using default"
            );
        }
        let wait_secs = parse_env_var(
            &lookup,
            ENV_APPROVAL_WAIT_SECS,
            orchestrator.approval_wait.as_secs(),
        );
        orchestrator.approval_wait = Duration::from_secs(wait_secs);
        orchestrator.max_approval_attempts = parse_env_var(
            &lookup,
            ENV_MAX_APPROVAL_ATTEMPTS,
            orchestrator.max_approval_attempts,
        );
        orchestrator.summary_max_chars = parse_env_var(
            &lookup,
            ENV_SUMMARY_MAX_CHARS,
            orchestrator.summary_max_chars,
        );
        orchestrator.max_output_bytes = parse_env_var(
            &lookup,
            ENV_MAX_OUTPUT_BYTES,
            orchestrator.max_output_bytes,
        );
        orchestrator.clamp_limits();

        if let Some(path) = lookup(ENV_TOOLS_TOML) {
            config.tools_toml_path = PathBuf::from(path);
        }
        if let Some(shell) = lookup(ENV_SHELL).filter(|s| !s.trim().is_empty()) {
            config.runner.shell = shell;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{MIN_APPROVAL_WAIT, MIN_SUMMARY_CHARS};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        let orchestrator = &config.orchestrator;
        assert!(!config.gate.notifications_disabled);
        assert_eq!(orchestrator.default_timeout, Duration::from_millis(30_000));
        assert_eq!(orchestrator.approval_wait, Duration::from_secs(60));
        assert_eq!(orchestrator.max_approval_attempts, 5);
        assert_eq!(orchestrator.summary_max_chars, 100);
        assert_eq!(config.tools_toml_path, PathBuf::from("tools.toml"));
    }

    #[test]
    fn test_disable_notifications_flag() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DISABLE_NOTIFICATIONS, "true")]));
        assert!(config.gate.notifications_disabled);

        let config = AppConfig::from_lookup(lookup(&[(ENV_DISABLE_NOTIFICATIONS, "false")]));
        assert!(!config.gate.notifications_disabled);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DISABLE_NOTIFICATIONS, "yes please"),
            (ENV_DEFAULT_TIMEOUT_MS, "0"),
            (ENV_MAX_APPROVAL_ATTEMPTS, "0"),
            (ENV_APPROVAL_WAIT_SECS, "soon"),
        ]));
        let orchestrator = &config.orchestrator;
        assert!(!config.gate.notifications_disabled);
        assert_eq!(orchestrator.default_timeout, Duration::from_millis(30_000));
        assert_eq!(orchestrator.max_approval_attempts, 1);
        assert_eq!(orchestrator.approval_wait, Duration::from_secs(60));
    }

    #[test]
    fn test_degenerate_limits_are_clamped() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_APPROVAL_WAIT_SECS, "0"),
            (ENV_SUMMARY_MAX_CHARS, "2"),
        ]));
        let orchestrator = &config.orchestrator;
        assert_eq!(orchestrator.approval_wait, MIN_APPROVAL_WAIT);
        assert_eq!(orchestrator.summary_max_chars, MIN_SUMMARY_CHARS);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DEFAULT_TIMEOUT_MS, "1500"),
            (ENV_APPROVAL_WAIT_SECS, "15"),
            (ENV_MAX_APPROVAL_ATTEMPTS, "2"),
            (ENV_SUMMARY_MAX_CHARS, "40"),
            (ENV_MAX_OUTPUT_BYTES, "4096"),
            (ENV_TOOLS_TOML, "/etc/permshell/tools.toml"),
            (ENV_SHELL, "/bin/bash"),
        ]));
        let orchestrator = &config.orchestrator;
        assert_eq!(orchestrator.default_timeout, Duration::from_millis(1500));
        assert_eq!(orchestrator.approval_wait, Duration::from_secs(15));
        assert_eq!(orchestrator.max_approval_attempts, 2);
        assert_eq!(orchestrator.summary_max_chars, 40);
        assert_eq!(orchestrator.max_output_bytes, 4096);
        assert_eq!(
            config.tools_toml_path,
            PathBuf::from("/etc/permshell/tools.toml")
        );
        assert_eq!(config.runner.shell, "/bin/bash");
    }
}
