//! # chillax-mcp
//!
//! A small Model Context Protocol (MCP) server for exposing tools.
//!
//! MCP frames JSON-RPC 2.0 messages one per line; this crate implements the
//! server side of the `initialize`, `ping`, `tools/list` and `tools/call`
//! methods, which is everything a tool-only server needs.
//!
//! ## Core Concepts
//!
//! - **[`McpServer`]**: Expose tools via MCP protocol
//! - **[`ToolHandler`]**: Implement a single tool
//!
//! ## Example
//!
//! ```ignore
//! use chillax_mcp::{McpServer, McpTool, CallToolResult};
//!
//! let server = McpServer::new("my-server", "1.0.0")
//!     .tool_fn(
//!         McpTool::new("echo", serde_json::json!({"type": "object"}))
//!             .with_description("Echo the input"),
//!         |args| CallToolResult::text(args.to_string()),
//!     );
//!
//! server.run_stdio().await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod server;
pub mod types;

// Re-exports
pub use error::{McpError, McpResult};
pub use server::{FnToolHandler, McpServer, ToolHandler};
pub use types::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcMessage, JsonRpcResponse, ListToolsResult, McpTool, RequestId,
    ServerCapabilities, ToolResultContent, ToolsCapability, PROTOCOL_VERSION,
};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{CallToolResult, McpError, McpResult, McpServer, McpTool, ToolHandler};
}
