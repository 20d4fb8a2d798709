// Tool registry

use crate::orchestrator::{Orchestrator, ToolResponse};
use crate::surface::error::{Result, SurfaceError};
use crate::surface::tool::{ToolDefinition, ToolImpl, load_tool_descriptions};
use crate::surface::tools::{
    EXECUTE_COMMAND, ExecuteCommandTool, FIND_FILES, FindFilesTool, SYSTEM_INFO, SystemInfoTool,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name-indexed set of tools exposed to callers
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolImpl>>,
}

impl ToolRegistry {
    /// Register the three shell tools, applying description overrides from
    /// `tools_toml_path` when the file exists
    pub fn init(orchestrator: Arc<Orchestrator>, tools_toml_path: &Path) -> Self {
        let descriptions = load_tool_descriptions(tools_toml_path).unwrap_or_else(|e| {
            warn!(path = %tools_toml_path.display(), error = %e, "ignoring unreadable tools.toml");
            HashMap::new()
        });
        let describe = |name: &str, default: fn() -> String| {
            descriptions.get(name).cloned().unwrap_or_else(default)
        };

        let tools: Vec<Arc<dyn ToolImpl>> = vec![
            Arc::new(ExecuteCommandTool::new(
                Arc::clone(&orchestrator),
                describe(EXECUTE_COMMAND, ExecuteCommandTool::default_description),
            )),
            Arc::new(SystemInfoTool::new(
                Arc::clone(&orchestrator),
                describe(SYSTEM_INFO, SystemInfoTool::default_description),
            )),
            Arc::new(FindFilesTool::new(
                orchestrator,
                describe(FIND_FILES, FindFilesTool::default_description),
            )),
        ];

        let tools: HashMap<_, _> = tools.into_iter().map(|t| (t.name(), t)).collect();
        info!(tool_count = tools.len(), "tool registry initialized");

        Self { tools }
    }

    /// Definitions of every registered tool, sorted by name
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<_> = self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Execute a tool by name with JSON input
    pub async fn execute(&self, tool_name: &str, input: serde_json::Value) -> Result<ToolResponse> {
        debug!(tool_name = %tool_name, "looking up tool");

        let tool = self
            .tools
            .get(tool_name)
            .cloned()
            .ok_or_else(|| SurfaceError::UnknownTool(tool_name.to_string()))?;

        info!(tool_name = %tool_name, "executing tool");
        tool.run(input).await
    }
}
