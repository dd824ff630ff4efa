//! JSON-RPC envelope types and formatting utilities
//!
//! Request ids are carried as raw JSON values so that whatever the client sent
//! (string, number or null) is echoed back untouched.

use rust_mcp_sdk::schema::RpcError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DispatchError;

pub const JSONRPC_VERSION: &str = "2.0";

/// Members are read loosely: `jsonrpc` is ignored and a missing or
/// non-string `method` still routes, ending up as "method not found".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl From<Value> for JsonRpcRequest {
    fn from(payload: Value) -> Self {
        serde_json::from_value(payload).unwrap_or_default()
    }
}

impl JsonRpcRequest {
    pub fn method_name(&self) -> String {
        member_label(self.method.as_ref())
    }
}

/// Text form of a loosely typed member for messages: strings verbatim,
/// absent members as `undefined`, anything else as its JSON text.
pub fn member_label(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(RpcError),
}

impl JsonRpcResponse {
    pub fn result(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: id.unwrap_or(Value::Null),
            outcome: Outcome::Result(result),
        }
    }

    pub fn error(id: Option<Value>, error: &DispatchError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: id.unwrap_or(Value::Null),
            outcome: Outcome::Error(RpcError {
                code: i64::from(error.code()),
                data: None,
                message: error.to_string(),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    pub fn error_code(&self) -> Option<i64> {
        match &self.outcome {
            Outcome::Error(error) => Some(error.code),
            Outcome::Result(_) => None,
        }
    }

    /// True for a successful envelope whose tool result carries `isError`.
    pub fn is_tool_error(&self) -> bool {
        match &self.outcome {
            Outcome::Result(result) => result.get("isError") == Some(&Value::Bool(true)),
            Outcome::Error(_) => false,
        }
    }

    /// Serialized text frame. Falls back to a hand-built internal error if the
    /// result itself cannot be encoded.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            serde_json::json!({
                "jsonrpc": JSONRPC_VERSION,
                "id": self.id,
                "error": {
                    "code": crate::errors::INTERNAL_ERROR,
                    "message": err.to_string(),
                }
            })
            .to_string()
        })
    }
}

pub fn parse_error() -> JsonRpcResponse {
    JsonRpcResponse::error(None, &DispatchError::Parse)
}
