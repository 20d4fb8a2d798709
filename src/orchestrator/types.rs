// Data types for Orchestrator module

use crate::orchestrator::error::ToolError;
use serde::{Deserialize, Serialize};

/// A shell command as requested by the caller, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: String,
    /// Working directory; the system temp directory when absent
    pub cwd: Option<String>,
    pub timeout_ms: Option<u64>,
    pub stdin: Option<String>,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }
}

/// A file search as requested by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindRequest {
    pub pattern: String,
    /// Search root; the process working directory when absent
    pub directory: Option<String>,
    pub max_depth: Option<u32>,
}

/// One block of tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    /// Whether the invocation failed
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn success(content: Vec<ToolContent>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(content: Vec<ToolContent>) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::success(vec![ToolContent::text(text)])
    }

    pub fn error_text(text: impl Into<String>) -> Self {
        Self::error(vec![ToolContent::text(text)])
    }

    /// All text blocks joined by newlines
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(ToolContent::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<ToolError> for ToolResponse {
    fn from(error: ToolError) -> Self {
        Self::error_text(error.to_string())
    }
}
