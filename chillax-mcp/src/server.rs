//! MCP server implementation.
//!
//! Speaks newline-delimited JSON-RPC 2.0 over any async reader/writer pair,
//! typically the process's stdin and stdout.

use crate::error::{McpError, McpResult};
use crate::types::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcMessage, JsonRpcResponse, ListToolsResult, McpTool, RequestId,
    ServerCapabilities, ToolsCapability, PROTOCOL_VERSION,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Trait for MCP tool handlers.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool definition.
    fn definition(&self) -> McpTool;

    /// Handle a tool call.
    ///
    /// Failures of the tool itself belong in a [`CallToolResult::error`];
    /// an `Err` here is reported to the client as a JSON-RPC error.
    async fn call(&self, arguments: JsonValue) -> McpResult<CallToolResult>;
}

/// Simple function-based tool handler.
pub struct FnToolHandler<F>
where
    F: Fn(JsonValue) -> CallToolResult + Send + Sync,
{
    definition: McpTool,
    handler: F,
}

impl<F> FnToolHandler<F>
where
    F: Fn(JsonValue) -> CallToolResult + Send + Sync,
{
    /// Create a new function tool handler.
    pub fn new(definition: McpTool, handler: F) -> Self {
        Self {
            definition,
            handler,
        }
    }
}

#[async_trait]
impl<F> ToolHandler for FnToolHandler<F>
where
    F: Fn(JsonValue) -> CallToolResult + Send + Sync,
{
    fn definition(&self) -> McpTool {
        self.definition.clone()
    }

    async fn call(&self, arguments: JsonValue) -> McpResult<CallToolResult> {
        Ok((self.handler)(arguments))
    }
}

/// MCP server for exposing tools.
///
/// # Example
///
/// ```ignore
/// use chillax_mcp::{McpServer, McpTool, CallToolResult};
///
/// let server = McpServer::new("my-server", "1.0.0")
///     .tool_fn(
///         McpTool::new("echo", serde_json::json!({"type": "object"}))
///             .with_description("Echo the input"),
///         |args| CallToolResult::text(args.to_string()),
///     );
///
/// server.run_stdio().await?;
/// ```
pub struct McpServer {
    info: Implementation,
    instructions: Option<String>,
    tools: RwLock<HashMap<String, Arc<dyn ToolHandler>>>,
    capabilities: ServerCapabilities,
}

impl McpServer {
    /// Create a new server.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Implementation::new(name, version),
            instructions: None,
            tools: RwLock::new(HashMap::new()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
        }
    }

    /// Set the usage instructions returned from `initialize`.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Add a tool handler.
    pub fn tool(self, handler: impl ToolHandler + 'static) -> Self {
        let def = handler.definition();
        self.tools.write().insert(def.name.clone(), Arc::new(handler));
        self
    }

    /// Add a sync function tool.
    pub fn tool_fn<F>(self, definition: McpTool, handler: F) -> Self
    where
        F: Fn(JsonValue) -> CallToolResult + Send + Sync + 'static,
    {
        let name = definition.name.clone();
        let handler = FnToolHandler::new(definition, handler);
        self.tools.write().insert(name, Arc::new(handler));
        self
    }

    /// Run the server on stdio.
    pub async fn run_stdio(&self) -> McpResult<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests read line by line from `reader`, writing one response
    /// line per request to `writer`. Returns on EOF.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = %self.info.name, tools = self.tool_count(), "MCP server listening");
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    if let Some(resp) = self.handle_message(trimmed).await {
                        let json = serde_json::to_string(&resp)?;
                        writer.write_all(json.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;
                    }
                }
                Err(e) => return Err(McpError::Io(e)),
            }
        }

        info!("MCP input closed, shutting down");
        Ok(())
    }

    async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: JsonValue = match serde_json::from_str(message) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Unparseable JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    RequestId::Null,
                    JsonRpcError::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let request: JsonRpcMessage = match serde_json::from_value(value) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Message is not a JSON-RPC request");
                return Some(JsonRpcResponse::error(
                    RequestId::Null,
                    JsonRpcError::INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                ));
            }
        };

        let id = match request.request_id() {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!(method = %request.method, "Notification received");
                return None;
            }
            Err(e) => {
                warn!(method = %request.method, error = %e, "Rejecting request with unusable id");
                return Some(JsonRpcResponse::failure(RequestId::Null, e));
            }
        };

        debug!(method = %request.method, id = ?id, "Request received");

        match request.method.as_str() {
            "initialize" => {
                if let Some(params) = request
                    .params
                    .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
                {
                    info!(
                        client = %params.client_info.name,
                        client_version = %params.client_info.version,
                        protocol = %params.protocol_version,
                        "Client initializing"
                    );
                }
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: self.capabilities.clone(),
                    server_info: self.info.clone(),
                    instructions: self.instructions.clone(),
                };
                Some(JsonRpcResponse::success(id, result))
            }
            "ping" => Some(JsonRpcResponse::success(id, serde_json::json!({}))),
            "tools/list" => {
                let mut tools: Vec<McpTool> =
                    self.tools.read().values().map(|h| h.definition()).collect();
                tools.sort_by(|a, b| a.name.cmp(&b.name));
                let result = ListToolsResult {
                    tools,
                    next_cursor: None,
                };
                Some(JsonRpcResponse::success(id, result))
            }
            "tools/call" => match self.call_tool(request.params).await {
                Ok(result) => Some(JsonRpcResponse::success(id, result)),
                Err(e) => Some(JsonRpcResponse::error(id, e.code(), e.to_string())),
            },
            _ => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        }
    }

    async fn call_tool(&self, params: Option<JsonValue>) -> McpResult<CallToolResult> {
        let params: CallToolParams = match params {
            Some(p) => {
                serde_json::from_value(p).map_err(|e| McpError::InvalidParams(e.to_string()))?
            }
            None => return Err(McpError::InvalidParams("Missing params".to_string())),
        };

        let handler = self
            .tools
            .read()
            .get(&params.name)
            .cloned()
            .ok_or_else(|| McpError::ToolNotFound(params.name.clone()))?;

        debug!(tool = %params.name, "Calling tool");
        let result = handler.call(params.arguments).await?;
        if result.is_error {
            warn!(tool = %params.name, "Tool returned an error result");
        }
        Ok(result)
    }

    /// Get server info.
    pub fn info(&self) -> &Implementation {
        &self.info
    }

    /// Get registered tool count.
    pub fn tool_count(&self) -> usize {
        self.tools.read().len()
    }
}
