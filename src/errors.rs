use thiserror::Error;

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;

/// Failures reported through the JSON-RPC `error` member.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("Parse error")]
    Parse,
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("{0}")]
    Internal(String),
}

/// Failures of a tool execution. These travel inside a successful
/// `tools/call` result flagged with `isError`.
#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Division by zero is not allowed")]
    DivisionByZero,
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

impl DispatchError {
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal(message.to_string())
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Parse => PARSE_ERROR,
            Self::MethodNotFound(_) => METHOD_NOT_FOUND,
            Self::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl ToolError {
    pub fn invalid_arguments(tool: &str, message: impl ToString) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            message: message.to_string(),
        }
    }
}
