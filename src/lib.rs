//! Human-approved shell tools served over MCP.
//!
//! A caller asks to run a command, list system information or search for
//! files. Side-effecting requests are shown to an operator as an Allow/Deny
//! prompt first; approved commands run under a working directory, timeout
//! and optional stdin, and come back as bounded text.

pub mod config;
pub mod gate;
pub mod orchestrator;
pub mod runner;
pub mod surface;

pub use config::AppConfig;
pub use gate::{DesktopNotifier, Notifier, PermissionDecision, PermissionGate};
pub use orchestrator::{Orchestrator, ToolResponse};
pub use runner::CommandRunner;
pub use surface::{McpServer, ToolRegistry};
