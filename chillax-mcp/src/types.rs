//! MCP protocol types.
//!
//! Only the subset of the Model Context Protocol a tool-only server needs:
//! JSON-RPC framing, the initialize handshake and the tools methods.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Protocol revision spoken by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const JSONRPC_VERSION: &str = "2.0";

/// Identifier echoed back in the response to a request.
///
/// JSON-RPC allows strings and integers. `Null` is only sent back when the
/// offending message's own id could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer id.
    Number(i64),
    /// String id.
    String(String),
    /// `null`.
    Null,
}

/// An inbound JSON-RPC message whose `id` has not been checked yet.
///
/// Deserializing only requires a `method`. Whether the message is a request,
/// a notification, or an invalid request depends on its `id`; see
/// [`JsonRpcMessage::request_id`].
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcMessage {
    /// Raw `id`. `None` when the key is absent, `Some(Value::Null)` for an
    /// explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<JsonValue>,
    /// Method name.
    pub method: String,
    /// Method parameters, if any.
    #[serde(default)]
    pub params: Option<JsonValue>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(deserializer).map(Some)
}

impl JsonRpcMessage {
    /// `Ok(None)` for a notification, `Ok(Some(id))` for a request.
    ///
    /// An id that is present but neither a string, an integer nor `null`
    /// (a float, an object, an array, a bool) makes the message an invalid
    /// request.
    pub fn request_id(&self) -> Result<Option<RequestId>, JsonRpcError> {
        match &self.id {
            None => Ok(None),
            Some(raw) => serde_json::from_value(raw.clone()).map(Some).map_err(|_| {
                JsonRpcError::new(
                    JsonRpcError::INVALID_REQUEST,
                    format!("Invalid Request: id must be a string or an integer, got {raw}"),
                )
            }),
        }
    }
}

/// Outbound JSON-RPC response. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Id of the request being answered.
    pub id: RequestId,
    /// Present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    /// Present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Answer `id` with `result`.
    ///
    /// A result that cannot be encoded turns into an internal error.
    pub fn success(id: RequestId, result: impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self {
                jsonrpc: JSONRPC_VERSION.to_string(),
                id,
                result: Some(value),
                error: None,
            },
            Err(e) => Self::failure(
                id,
                JsonRpcError::new(
                    JsonRpcError::INTERNAL_ERROR,
                    format!("Failed to encode result: {e}"),
                ),
            ),
        }
    }

    /// Answer `id` with an error built from `code` and `message`.
    pub fn error(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self::failure(id, JsonRpcError::new(code, message))
    }

    /// Answer `id` with `error`.
    pub fn failure(id: RequestId, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// The `error` member of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// One of the code constants below.
    pub code: i32,
    /// Short description.
    pub message: String,
    /// Extra detail; never set by this server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl JsonRpcError {
    /// Invalid JSON (-32700).
    pub const PARSE_ERROR: i32 = -32700;
    /// Valid JSON that is not a request object (-32600).
    pub const INVALID_REQUEST: i32 = -32600;
    /// Unknown method (-32601).
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Unusable method parameters (-32602).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Failure inside the server (-32603).
    pub const INTERNAL_ERROR: i32 = -32603;

    /// Error with no extra data.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON-RPC error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcError {}

/// Name and version of a client or server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    /// Name.
    pub name: String,
    /// Version string.
    pub version: String,
}

impl Implementation {
    /// Build from a name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// `initialize` params. Only read for logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Revision the client asked for.
    pub protocol_version: String,
    /// Client capabilities, kept opaque.
    #[serde(default)]
    pub capabilities: JsonValue,
    /// Who is connecting.
    pub client_info: Implementation,
}

/// `initialize` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Always [`PROTOCOL_VERSION`].
    pub protocol_version: String,
    /// What the server offers.
    pub capabilities: ServerCapabilities,
    /// Who the client is talking to.
    pub server_info: Implementation,
    /// Usage hints for the client's model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Capabilities advertised during `initialize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Set when the server has tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// The `tools` capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// The tool set is fixed after startup, so this is `false`.
    #[serde(default)]
    pub list_changed: bool,
}

/// A tool as listed by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    /// Name used in `tools/call`.
    pub name: String,
    /// What the tool does, for the client's model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema of the arguments object.
    pub input_schema: JsonValue,
}

impl McpTool {
    /// Tool without a description.
    pub fn new(name: impl Into<String>, input_schema: JsonValue) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `tools/list` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResult {
    /// Every registered tool.
    pub tools: Vec<McpTool>,
    /// Always `None`; the list is never paginated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// `tools/call` params.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    /// Which tool to run.
    pub name: String,
    /// Arguments object, `null` when omitted.
    #[serde(default)]
    pub arguments: JsonValue,
}

/// `tools/call` result.
///
/// A tool that fails still produces one of these, with `is_error` set, so
/// the client's model can read the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    /// Output blocks.
    pub content: Vec<ToolResultContent>,
    /// Whether the tool failed.
    #[serde(default)]
    pub is_error: bool,
}

impl CallToolResult {
    /// Successful result with one text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Failed result carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// All text blocks joined together.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolResultContent::Text { text } => text.as_str(),
            })
            .collect()
    }
}

/// One block of tool output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolResultContent {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
}
