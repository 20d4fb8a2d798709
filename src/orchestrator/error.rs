// Error types for Orchestrator module

use thiserror::Error;

fn attempts_label(attempts: &u32) -> String {
    if *attempts == 1 {
        "1 attempt".to_string()
    } else {
        format!("{attempts} attempts")
    }
}

/// Everything that can go wrong in one tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Permission denied by user after {}", attempts_label(.attempts))]
    PermissionDenied { attempts: u32 },

    #[error("Permission request timed out after {wait_secs}s without a response")]
    PermissionTimeout { wait_secs: u64 },

    #[error("Permission prompt unavailable, nothing was executed: {0}")]
    PermissionChannelFailure(String),

    #[error("Command timed out after {timeout_ms} ms")]
    ExecutionTimeout { timeout_ms: u64 },

    #[error("{0}")]
    ExecutionFailure(String),

    #[error("Invalid request: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;
