// Orchestrator configuration

use std::time::Duration;

/// Shortest approval window a prompt can be given
pub const MIN_APPROVAL_WAIT: Duration = Duration::from_secs(1);

/// Shortest summary that still shows one character before the ellipsis
pub const MIN_SUMMARY_CHARS: usize = 4;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Execution timeout when the caller gives none
    pub default_timeout: Duration,
    /// How long one approval prompt waits for a human
    pub approval_wait: Duration,
    /// Prompts shown for one command before giving up on repeated denials
    pub max_approval_attempts: u32,
    /// Display length of commands in prompts and logs
    pub summary_max_chars: usize,
    /// Per-stream cap on output returned to the caller
    pub max_output_bytes: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_millis(30_000),
            approval_wait: Duration::from_secs(60),
            max_approval_attempts: 5,
            summary_max_chars: 100,
            max_output_bytes: 1048576, // 1MB
        }
    }
}

impl OrchestratorConfig {
    /// Raise limits that would make every prompt or summary useless to their floor
    pub fn clamp_limits(&mut self) {
        self.approval_wait = self.approval_wait.max(MIN_APPROVAL_WAIT);
        self.max_approval_attempts = self.max_approval_attempts.max(1);
        self.summary_max_chars = self.summary_max_chars.max(MIN_SUMMARY_CHARS);
    }
}
