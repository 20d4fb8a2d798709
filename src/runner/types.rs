// Data types for Runner module

use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved parameters for one subprocess
#[derive(Debug, Clone)]
pub struct ExecutionSpec {
    /// Opaque command string handed to the shell
    pub command: String,
    /// Directory the shell starts in
    pub working_dir: PathBuf,
    /// Upper bound on total execution time
    pub timeout: Duration,
    /// Optional standard input, followed by EOF
    pub stdin: Option<String>,
}

impl ExecutionSpec {
    pub fn new(
        command: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            working_dir: working_dir.into(),
            timeout,
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

/// How a spawned process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    /// Exit code 0
    Success,
    /// Any other exit code; -1 when the process was ended by a signal
    NonZeroExit(i32),
    /// Killed after exceeding its timeout
    TimedOut,
    /// The shell could not be started
    SpawnFailed(String),
}

/// Output of one spawned process
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl ExecutionResult {
    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            status: ExitStatus::SpawnFailed(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExitStatus::Success
    }
}
