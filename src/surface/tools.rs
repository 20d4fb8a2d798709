// Tool implementations backed by the orchestrator

use crate::orchestrator::{CommandRequest, FindRequest, Orchestrator, ToolResponse};
use crate::surface::Result;
use crate::surface::tool::{ToolDefinition, ToolImpl, parse_input};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

pub const EXECUTE_COMMAND: &str = "execute-command";
pub const SYSTEM_INFO: &str = "system-info";
pub const FIND_FILES: &str = "find-files";

/// execute-command input parameters
#[derive(Debug, Deserialize)]
struct ExecuteCommandInput {
    command: String,
    cwd: Option<String>,
    timeout: Option<u64>,
    stdin: Option<String>,
}

/// find-files input parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindFilesInput {
    pattern: String,
    directory: Option<String>,
    max_depth: Option<u32>,
}

/// system-info takes no parameters
#[derive(Debug, Deserialize)]
struct SystemInfoInput {}

pub struct ExecuteCommandTool {
    orchestrator: Arc<Orchestrator>,
    description: String,
}

impl ExecuteCommandTool {
    pub fn new(orchestrator: Arc<Orchestrator>, description: impl Into<String>) -> Self {
        Self {
            orchestrator,
            description: description.into(),
        }
    }

    pub fn default_description() -> String {
        r#"Execute a shell command on the host after a human approves it.
The command is passed verbatim to the system shell (/bin/sh -c, or cmd /C on Windows).
Runs in the system temp directory unless cwd is given. Stdout and stderr are captured."#
            .to_string()
    }
}

#[async_trait]
impl ToolImpl for ExecuteCommandTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: EXECUTE_COMMAND.to_string(),
            description: self.description.clone(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "The shell command to execute"
                    },
                    "cwd": {
                        "type": "string",
                        "description":
                            "Directory to run the command in (defaults to system temp directory)"
                    },
                    "timeout": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Timeout in milliseconds after which the process is killed"
                    },
                    "stdin": {
                        "type": "string",
                        "description": "Optional input to provide to the command's standard input"
                    }
                },
                "required": ["command"]
            }),
        }
    }

    async fn run(&self, input: serde_json::Value) -> Result<ToolResponse> {
        let ExecuteCommandInput {
            command,
            cwd,
            timeout,
            stdin,
        } = parse_input(EXECUTE_COMMAND, input)?;

        Ok(self
            .orchestrator
            .run_gated_command(CommandRequest {
                command,
                cwd,
                timeout_ms: timeout,
                stdin,
            })
            .await)
    }
}

pub struct SystemInfoTool {
    orchestrator: Arc<Orchestrator>,
    description: String,
}

impl SystemInfoTool {
    pub fn new(orchestrator: Arc<Orchestrator>, description: impl Into<String>) -> Self {
        Self {
            orchestrator,
            description: description.into(),
        }
    }

    pub fn default_description() -> String {
        "Get system information: OS, uptime, memory, disk usage and CPU model. \
         Read-only, no approval needed."
            .to_string()
    }
}

#[async_trait]
impl ToolImpl for SystemInfoTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: SYSTEM_INFO.to_string(),
            description: self.description.clone(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn run(&self, input: serde_json::Value) -> Result<ToolResponse> {
        let SystemInfoInput {} = parse_input(SYSTEM_INFO, input)?;
        Ok(self.orchestrator.system_info().await)
    }
}

pub struct FindFilesTool {
    orchestrator: Arc<Orchestrator>,
    description: String,
}

impl FindFilesTool {
    pub fn new(orchestrator: Arc<Orchestrator>, description: impl Into<String>) -> Self {
        Self {
            orchestrator,
            description: description.into(),
        }
    }

    pub fn default_description() -> String {
        "Find files whose name matches a pattern, after a human approves the search.".to_string()
    }
}

#[async_trait]
impl ToolImpl for FindFilesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: FIND_FILES.to_string(),
            description: self.description.clone(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "description": "File name pattern to search for"
                    },
                    "directory": {
                        "type": "string",
                        "description": "Directory to search in (defaults to current directory)"
                    },
                    "maxDepth": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum directory depth to search"
                    }
                },
                "required": ["pattern"]
            }),
        }
    }

    async fn run(&self, input: serde_json::Value) -> Result<ToolResponse> {
        let FindFilesInput {
            pattern,
            directory,
            max_depth,
        } = parse_input(FIND_FILES, input)?;

        Ok(self
            .orchestrator
            .find_files(FindRequest {
                pattern,
                directory,
                max_depth,
            })
            .await)
    }
}
