// Tool trait and description overrides

use crate::orchestrator::ToolResponse;
use crate::surface::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Tool name, description and JSON schema of its arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Internal trait for tool implementations
#[async_trait]
pub trait ToolImpl: Send + Sync {
    /// Get the tool definition (name, description, input_schema)
    fn definition(&self) -> ToolDefinition;

    /// Run the tool with JSON arguments
    async fn run(&self, input: serde_json::Value) -> Result<ToolResponse>;

    /// Get tool name
    fn name(&self) -> String {
        self.definition().name
    }
}

/// Parse JSON arguments into a tool's typed input
pub(crate) fn parse_input<T: serde::de::DeserializeOwned>(
    tool: &str,
    input: serde_json::Value,
) -> Result<T> {
    // Clients may send no arguments at all for argument-less tools
    let input = match input {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(input)
        .map_err(|e| crate::surface::SurfaceError::InvalidInput(tool.to_string(), e.to_string()))
}

/// Load per-tool description overrides from a TOML file.
///
/// ```toml
/// [execute-command]
/// description = "Run a shell command after the operator approves it"
/// ```
///
/// A missing file is not an error and yields no overrides.
pub fn load_tool_descriptions(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        debug!(path = %path.display(), "tools.toml not found, using default descriptions");
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)?;

    let descriptions: HashMap<String, String> = table
        .iter()
        .filter_map(|(name, value)| {
            value
                .get("description")
                .and_then(|d| d.as_str())
                .map(|d| (name.clone(), d.to_string()))
        })
        .collect();

    debug!(
        path = %path.display(),
        tool_count = descriptions.len(),
        "loaded tool descriptions from config"
    );
    Ok(descriptions)
}
