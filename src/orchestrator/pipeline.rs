// Orchestrator: validate, ask, run, shape

use crate::gate::{ActionRequest, PermissionDecision, PermissionGate};
use crate::orchestrator::config::OrchestratorConfig;
use crate::orchestrator::error::{Result, ToolError};
use crate::orchestrator::search::SearchStrategy;
use crate::orchestrator::shape;
use crate::orchestrator::types::{CommandRequest, FindRequest, ToolResponse};
use crate::runner::{CommandRunner, ExecutionSpec};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Read-only diagnostics run by `system-info`, in output order
pub const DIAGNOSTIC_COMMANDS: [&str; 5] = [
    "uname -a",
    "uptime",
    "free -h || vm_stat",
    "df -h | grep -v loop",
    "cat /proc/cpuinfo | grep 'model name' | head -1 || sysctl -n machdep.cpu.brand_string",
];

/// Composes the permission gate and the command runner per tool call
pub struct Orchestrator {
    config: OrchestratorConfig,
    gate: PermissionGate,
    runner: CommandRunner,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig, gate: PermissionGate, runner: CommandRunner) -> Self {
        Self {
            config,
            gate,
            runner,
        }
    }

    /// `execute-command`: approval, then one shell subprocess
    pub async fn run_gated_command(&self, request: CommandRequest) -> ToolResponse {
        self.try_run_gated_command(request)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "execute-command rejected");
                e.into()
            })
    }

    async fn try_run_gated_command(&self, request: CommandRequest) -> Result<ToolResponse> {
        let spec = self.resolve_command(request).await?;
        let action = ActionRequest::execute(
            &spec.command,
            &spec.working_dir,
            spec.stdin.is_some(),
            self.config.summary_max_chars,
        );

        self.obtain_approval(&action, self.config.max_approval_attempts)
            .await?;

        info!(
            command = %action.summary(),
            cwd = %spec.working_dir.display(),
            timeout_ms = spec.timeout.as_millis() as u64,
            "executing approved command"
        );
        let result = self.runner.spawn(&spec).await;

        Ok(shape::command_response(
            &result,
            spec.timeout,
            self.config.max_output_bytes,
        ))
    }

    /// `system-info`: fixed read-only diagnostics, no approval
    pub async fn system_info(&self) -> ToolResponse {
        self.run_diagnostics(&DIAGNOSTIC_COMMANDS).await
    }

    /// Run `commands` concurrently without approval. A failing command
    /// yields a placeholder section instead of failing the batch.
    pub async fn run_diagnostics(&self, commands: &[&str]) -> ToolResponse {
        let dir = std::env::temp_dir();
        let runs = commands.iter().map(|command| {
            let spec = ExecutionSpec::new(*command, dir.clone(), self.config.default_timeout);
            async move {
                let result = self.runner.spawn(&spec).await;
                if result.is_success() {
                    result.stdout.trim().to_string()
                } else {
                    warn!(command, status = ?result.status, "diagnostic command failed");
                    format!("Failed to execute: {command}")
                }
            }
        });

        let sections = join_all(runs).await;
        ToolResponse::text(sections.join("\n\n"))
    }

    /// `find-files`: single approval, then a platform search command
    pub async fn find_files(&self, request: FindRequest) -> ToolResponse {
        self.try_find_files(request).await.unwrap_or_else(|e| {
            warn!(error = %e, "find-files rejected");
            e.into()
        })
    }

    async fn try_find_files(&self, request: FindRequest) -> Result<ToolResponse> {
        if request.pattern.trim().is_empty() {
            return Err(ToolError::Validation(
                "pattern must not be empty".to_string(),
            ));
        }
        let root = request.directory.as_deref().unwrap_or(".");
        let dir = resolve_directory(Path::new(root)).await?;

        let action = ActionRequest::search(&request.pattern, &dir, self.config.summary_max_chars);
        self.obtain_approval(&action, 1).await?;

        let strategy = SearchStrategy::for_host();
        let command = strategy.command(&request.pattern, &dir, request.max_depth);
        let spec = ExecutionSpec::new(command, dir.clone(), self.config.default_timeout);

        info!(
            pattern = %action.summary(),
            dir = %dir.display(),
            strategy = ?strategy,
            "searching files"
        );
        let result = self.runner.spawn(&spec).await;

        Ok(shape::search_response(
            strategy,
            &result,
            &request.pattern,
            &dir,
            spec.timeout,
            self.config.max_output_bytes,
        ))
    }

    /// Ask until approved, retrying only on denial
    async fn obtain_approval(&self, action: &ActionRequest, max_attempts: u32) -> Result<()> {
        let max_attempts = max_attempts.max(1);
        let wait = self.config.approval_wait;

        for attempt in 1..=max_attempts {
            match self.gate.request_approval(action, wait).await {
                PermissionDecision::Approved => return Ok(()),
                PermissionDecision::Denied => {
                    info!(attempt, max_attempts, action = %action.summary(), "approval denied");
                }
                PermissionDecision::TimedOut => {
                    return Err(ToolError::PermissionTimeout {
                        wait_secs: wait.as_secs(),
                    });
                }
                PermissionDecision::SystemError(reason) => {
                    return Err(ToolError::PermissionChannelFailure(reason));
                }
            }
        }

        Err(ToolError::PermissionDenied {
            attempts: max_attempts,
        })
    }

    async fn resolve_command(&self, request: CommandRequest) -> Result<ExecutionSpec> {
        if request.command.trim().is_empty() {
            return Err(ToolError::Validation(
                "command must not be empty".to_string(),
            ));
        }

        let timeout = match request.timeout_ms {
            Some(0) => {
                return Err(ToolError::Validation(
                    "timeout must be greater than zero".to_string(),
                ));
            }
            Some(ms) => Duration::from_millis(ms),
            None => self.config.default_timeout,
        };

        let working_dir = match request.cwd.as_deref() {
            Some(cwd) if !cwd.trim().is_empty() => resolve_directory(Path::new(cwd)).await?,
            _ => resolve_directory(&std::env::temp_dir()).await?,
        };

        Ok(ExecutionSpec {
            command: request.command,
            working_dir,
            timeout,
            stdin: request.stdin,
        })
    }
}

/// Make `path` absolute against the process cwd and require an existing directory
async fn resolve_directory(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| {
        ToolError::Validation(format!(
            "cannot resolve directory {}: {e}",
            path.display()
        ))
    })?;

    match tokio::fs::metadata(&absolute).await {
        Ok(meta) if meta.is_dir() => Ok(absolute),
        Ok(_) => Err(ToolError::Validation(format!(
            "{} is not a directory",
            absolute.display()
        ))),
        Err(e) => Err(ToolError::Validation(format!(
            "directory {} is not accessible: {e}",
            absolute.display()
        ))),
    }
}
