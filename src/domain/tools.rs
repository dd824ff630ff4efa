//! Calculator tools exposed via Model Context Protocol
//!
//! Provides the four tool descriptors and the `tools/call` invoker. Tool
//! failures (unknown tool, bad operands, division by zero) are reported as a
//! successful call result flagged with `isError`.

use rust_mcp_sdk::{
    macros,
    schema::{CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::calculator::{self, format_number};
use crate::errors::{DispatchError, ToolError};
use crate::mcp::rpc::member_label;

#[macros::mcp_tool(name = "add", description = "Add two numbers")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct AddTool {
    /// First number
    pub a: f64,
    /// Second number
    pub b: f64,
}

#[macros::mcp_tool(
    name = "subtract",
    description = "Subtract second number from first number"
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct SubtractTool {
    /// First number
    pub a: f64,
    /// Second number
    pub b: f64,
}

#[macros::mcp_tool(name = "multiply", description = "Multiply two numbers")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct MultiplyTool {
    /// First number
    pub a: f64,
    /// Second number
    pub b: f64,
}

#[macros::mcp_tool(name = "divide", description = "Divide first number by second number")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct DivideTool {
    /// Dividend
    pub a: f64,
    /// Divisor
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Deserialize)]
struct Operands {
    a: f64,
    b: f64,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    pub fn tool(self) -> Tool {
        match self {
            Self::Add => AddTool::tool(),
            Self::Subtract => SubtractTool::tool(),
            Self::Multiply => MultiplyTool::tool(),
            Self::Divide => DivideTool::tool(),
        }
    }

    pub fn apply(self, a: f64, b: f64) -> Result<f64, ToolError> {
        match self {
            Self::Add => Ok(calculator::add(a, b)),
            Self::Subtract => Ok(calculator::subtract(a, b)),
            Self::Multiply => Ok(calculator::multiply(a, b)),
            Self::Divide => calculator::divide(a, b),
        }
    }
}

pub fn build_tools_list() -> Vec<Tool> {
    Operation::ALL.into_iter().map(Operation::tool).collect()
}

/// Runs a single tool by name. The name is resolved before the arguments are
/// looked at, so an unknown tool wins over missing operands.
pub fn invoke_tool(name: &str, arguments: Value) -> Result<f64, ToolError> {
    let operation =
        Operation::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    let operands: Operands = serde_json::from_value(arguments)
        .map_err(|err| ToolError::invalid_arguments(name, err))?;

    operation.apply(operands.a, operands.b)
}

/// Only absent or null `params` fail at the dispatch tier. Everything past
/// that, including a missing or non-string tool name, is a tool error.
pub fn handle_tools_call(params: Option<Value>) -> Result<Value, DispatchError> {
    let params = params
        .filter(|value| !value.is_null())
        .ok_or_else(|| DispatchError::internal("tools/call requires params"))?;

    let name = member_label(params.get("name"));
    let arguments = params.get("arguments").cloned().unwrap_or_default();
    let outcome = match params.get("name") {
        Some(Value::String(_)) => invoke_tool(&name, arguments),
        _ => Err(ToolError::UnknownTool(name.clone())),
    };

    let result = match outcome {
        Ok(value) => text_result(format!("Result: {}", format_number(value)), None),
        Err(err) => {
            debug!(tool = %name, error = %err, "tool execution failed");
            text_result(format!("Error: {err}"), Some(true))
        }
    };

    serde_json::to_value(result).map_err(DispatchError::internal)
}

fn text_result(text: String, is_error: Option<bool>) -> CallToolResult {
    CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(text, None, None))],
        is_error,
        meta: None,
        structured_content: None,
    }
}
