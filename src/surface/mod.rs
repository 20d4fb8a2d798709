// Surface module - tool registry and MCP stdio server
// Receives {name, arguments} tool calls and dispatches them to the orchestrator.

pub mod error;
pub mod registry;
pub mod server;
pub mod tool;
pub mod tools;

pub use error::{Result, SurfaceError};
pub use registry::ToolRegistry;
pub use server::McpServer;
pub use tool::{ToolDefinition, ToolImpl};
