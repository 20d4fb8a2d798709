use clap::Parser;
use permshell::{
    AppConfig, CommandRunner, DesktopNotifier, McpServer, Orchestrator, PermissionGate,
    ToolRegistry,
};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// CLI arguments; each flag overrides the matching environment variable
#[derive(Debug, Parser)]
#[command(name = "permshell")]
#[command(about = "MCP server for shell commands gated by human approval")]
struct Args {
    /// Approve every action without prompting (headless/trusted hosts only)
    #[arg(long)]
    disable_notifications: bool,

    /// Default command timeout in milliseconds
    #[arg(long)]
    default_timeout_ms: Option<u64>,

    /// Seconds an approval prompt waits for an answer
    #[arg(long)]
    approval_wait_secs: Option<u64>,

    /// Prompts shown for one command before giving up on repeated denials
    #[arg(long)]
    max_approval_attempts: Option<u32>,

    /// Tool description overrides
    #[arg(long)]
    tools_toml: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "permshell=trace" (defaults to RUST_LOG, then "info")
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if self.disable_notifications {
            config.gate.notifications_disabled = true;
        }
        if let Some(ms) = self.default_timeout_ms.filter(|ms| *ms > 0) {
            config.orchestrator.default_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = self.approval_wait_secs {
            config.orchestrator.approval_wait = Duration::from_secs(secs);
        }
        if let Some(attempts) = self.max_approval_attempts {
            config.orchestrator.max_approval_attempts = attempts;
        }
        if let Some(path) = &self.tools_toml {
            config.tools_toml_path = path.clone();
        }
        config.orchestrator.clamp_limits();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("info"));

    // stdout carries MCP traffic, logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting PermShell MCP server...");

    let mut config = AppConfig::from_env();
    args.apply(&mut config);

    info!(
        notifications_disabled = config.gate.notifications_disabled,
        default_timeout_ms = config.orchestrator.default_timeout.as_millis() as u64,
        approval_wait_secs = config.orchestrator.approval_wait.as_secs(),
        max_approval_attempts = config.orchestrator.max_approval_attempts,
        shell = %config.runner.shell,
        "Configuration loaded"
    );

    let notifier = DesktopNotifier::for_host();
    info!(backend = ?notifier.backend(), "Notifier initialized");

    let gate = PermissionGate::new(config.gate.clone(), Arc::new(notifier));
    let runner = CommandRunner::new(config.runner.clone());
    let orchestrator = Arc::new(Orchestrator::new(config.orchestrator.clone(), gate, runner));
    let registry = ToolRegistry::init(orchestrator, &config.tools_toml_path);

    let service = McpServer::new(registry).serve(stdio()).await?;
    info!("PermShell MCP server running on stdio");

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit?;
            info!(reason = ?reason, "Client disconnected");
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Goodbye!");
    Ok(())
}
