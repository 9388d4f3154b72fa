//! MCP error types.

use crate::types::JsonRpcError;
use thiserror::Error;

/// Errors raised while serving MCP requests.
#[derive(Debug, Error)]
pub enum McpError {
    /// Encoding a response or a tool result failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool not found.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments did not match the tool's schema.
    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

impl McpError {
    /// JSON-RPC error code to answer with when this error ends a request.
    pub fn code(&self) -> i32 {
        match self {
            Self::ToolNotFound(_) | Self::InvalidParams(_) => JsonRpcError::INVALID_PARAMS,
            Self::Json(_) | Self::Io(_) => JsonRpcError::INTERNAL_ERROR,
        }
    }
}

/// Result type for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = McpError::ToolNotFound("get_weather".to_string());
        assert_eq!(err.to_string(), "Tool not found: get_weather");
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            McpError::ToolNotFound("x".into()).code(),
            JsonRpcError::INVALID_PARAMS
        );
        assert_eq!(
            McpError::InvalidParams("x".into()).code(),
            JsonRpcError::INVALID_PARAMS
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(McpError::from(io).code(), JsonRpcError::INTERNAL_ERROR);

        let json = serde_json::from_str::<u8>("x").unwrap_err();
        assert_eq!(McpError::from(json).code(), JsonRpcError::INTERNAL_ERROR);
    }
}
