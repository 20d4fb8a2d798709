// Orchestrator module - approval policy, execution and result shaping per tool call

pub mod config;
pub mod error;
pub mod pipeline;
pub mod search;
pub mod shape;
pub mod types;

pub use config::{MIN_APPROVAL_WAIT, MIN_SUMMARY_CHARS, OrchestratorConfig};
pub use error::{Result, ToolError};
pub use pipeline::{DIAGNOSTIC_COMMANDS, Orchestrator};
pub use search::SearchStrategy;
pub use types::{CommandRequest, FindRequest, ToolContent, ToolResponse};
