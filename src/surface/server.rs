// MCP server exposing the tool registry over stdio

use crate::orchestrator::ToolResponse;
use crate::surface::error::SurfaceError;
use crate::surface::registry::ToolRegistry;
use crate::surface::tool::ToolDefinition;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// MCP handler dispatching `tools/call` to the registry
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

fn to_mcp_tool(definition: ToolDefinition) -> Tool {
    let schema = match definition.input_schema {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    Tool::new(definition.name, definition.description, Arc::new(schema))
}

/// Convert a tool response into MCP text content
pub fn to_call_result(response: ToolResponse) -> CallToolResult {
    let content = response
        .content
        .iter()
        .map(|block| Content::text(block.as_text().to_string()))
        .collect();
    if response.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
                ..Default::default()
            },
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("PermShell".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Shell tools gated by human approval. execute-command and find-files \
                 show an Allow/Deny prompt to the operator before running; system-info \
                 is read-only and runs without approval."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools: Vec<Tool> = self
            .registry
            .tool_definitions()
            .into_iter()
            .map(to_mcp_tool)
            .collect();
        debug!("Listing {} tools", tools.len());
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = request.name.as_ref();
        let arguments = request.arguments.map_or(Value::Null, Value::Object);

        match self.registry.execute(name, arguments).await {
            Ok(response) => Ok(to_call_result(response)),
            Err(SurfaceError::UnknownTool(tool)) => Err(ErrorData::invalid_params(
                format!("Unknown tool: {tool}"),
                None,
            )),
            Err(e) => {
                warn!(tool = %name, error = %e, "tool call rejected");
                Ok(to_call_result(ToolResponse::error_text(e.to_string())))
            }
        }
    }
}
