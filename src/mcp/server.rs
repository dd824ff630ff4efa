//! The central Model Context Protocol engine
//!
//! Holds the immutable server manifest and routes decoded JSON-RPC requests to
//! their handlers. Every dispatch is synchronous and stateless.

use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ListToolsResult, ServerCapabilities, ServerCapabilitiesTools,
    Tool,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::tools::{build_tools_list, handle_tools_call};
use crate::errors::DispatchError;
use crate::logging::log_rpc_outcome;
use crate::mcp::rpc::{parse_error, JsonRpcRequest, JsonRpcResponse};

pub const SUPPORTED_PROTOCOL_VERSION: &str = "2024-11-05";
pub const DISPLAY_NAME: &str = "Calculator MCP Server";
pub const INSTRUCTIONS: &str = "Use this server to perform basic arithmetic calculations.";

/// Server metadata and tool catalog, built once at startup and shared
/// read-only between requests.
#[derive(Debug, Clone)]
pub struct ServerManifest {
    pub name: String,
    pub display_name: String,
    pub version: String,
    pub protocol_version: String,
    pub instructions: Option<String>,
    pub tools: Vec<Tool>,
}

impl Default for ServerManifest {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            display_name: DISPLAY_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: SUPPORTED_PROTOCOL_VERSION.to_string(),
            instructions: Some(INSTRUCTIONS.to_string()),
            tools: build_tools_list(),
        }
    }
}

impl ServerManifest {
    pub fn new() -> Self {
        Self::default()
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                title: None,
                description: None,
                icons: vec![],
                website_url: None,
            },
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools { list_changed: None }),
                ..Default::default()
            },
            protocol_version: self.protocol_version.clone(),
            instructions: self.instructions.clone(),
            meta: None,
        }
    }

    fn list_tools_result(&self) -> ListToolsResult {
        ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: self.tools.clone(),
        }
    }
}

/// Entry point for raw text coming off a transport: parses JSON and dispatches.
pub fn handle_json_rpc_text(manifest: &ServerManifest, text: &str) -> JsonRpcResponse {
    match serde_json::from_str::<Value>(text) {
        Ok(payload) => handle_json_rpc_value(manifest, payload),
        Err(err) => {
            debug!(error = %err, "rejecting malformed json-rpc payload");
            parse_error()
        }
    }
}

/// Any JSON value is accepted; members that are missing or of the wrong
/// shape fall through to "method not found" rather than failing the decode.
pub fn handle_json_rpc_value(manifest: &ServerManifest, payload: Value) -> JsonRpcResponse {
    handle_json_rpc_request(manifest, JsonRpcRequest::from(payload))
}

pub fn handle_json_rpc_request(
    manifest: &ServerManifest,
    request: JsonRpcRequest,
) -> JsonRpcResponse {
    let method = request.method_name();
    let routable = request.method.as_ref().is_some_and(Value::is_string);
    let params_field = request.params.clone().unwrap_or_default();

    debug!(method = %method, params = %params_field, "mcp request received");

    let outcome = if routable {
        dispatch(manifest, &method, request.params)
    } else {
        Err(DispatchError::MethodNotFound(method.clone()))
    };
    let response = match outcome {
        Ok(result) => JsonRpcResponse::result(request.id, result),
        Err(err) => JsonRpcResponse::error(request.id, &err),
    };

    log_rpc_outcome(&method, &response);
    response
}

fn dispatch(
    manifest: &ServerManifest,
    method: &str,
    params: Option<Value>,
) -> Result<Value, DispatchError> {
    match method {
        "initialize" => {
            serde_json::to_value(manifest.initialize_result()).map_err(DispatchError::internal)
        }
        "notifications/initialized" | "ping" => Ok(json!({})),
        "tools/list" => {
            serde_json::to_value(manifest.list_tools_result()).map_err(DispatchError::internal)
        }
        "tools/call" => handle_tools_call(params),
        _ => Err(DispatchError::MethodNotFound(method.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dispatch_value(payload: Value) -> Value {
        let response = handle_json_rpc_value(&ServerManifest::new(), payload);
        serde_json::to_value(response).expect("response serializes")
    }

    #[test]
    fn initialize_echoes_id_and_reports_server_info() {
        let response = dispatch_value(json!({
            "jsonrpc": "2.0",
            "id": "init-1",
            "method": "initialize",
            "params": {"whatever": true}
        }));

        assert_eq!(response["id"], "init-1");
        assert_eq!(response["result"]["serverInfo"]["name"], "calculator-server");
        assert_eq!(response["result"]["serverInfo"]["version"], "1.0.0");
        assert_eq!(
            response["result"]["protocolVersion"],
            SUPPORTED_PROTOCOL_VERSION
        );
        assert!(response["result"]["capabilities"]["tools"].is_object());
        assert_eq!(response["result"]["instructions"], INSTRUCTIONS);
    }

    #[test]
    fn non_string_jsonrpc_member_is_ignored() {
        let response = dispatch_value(json!({"jsonrpc": 2, "id": 1, "method": "ping"}));

        assert!(response.get("error").is_none());
        assert_eq!(response["result"], json!({}));
        assert_eq!(response["id"], 1);
        assert_eq!(response["jsonrpc"], "2.0");
    }

    #[test]
    fn ping_and_initialized_notification_return_empty_result() {
        for method in ["ping", "notifications/initialized"] {
            let response = dispatch_value(json!({"jsonrpc": "2.0", "id": 5, "method": method}));
            assert_eq!(response["result"], json!({}), "method {method}");
            assert_eq!(response["id"], 5);
        }

        let response =
            dispatch_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[test]
    fn tools_list_returns_four_descriptors() {
        let response = dispatch_value(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}));
        let tools = response["result"]["tools"].as_array().expect("tools array");

        assert_eq!(tools.len(), 4);
        assert_eq!(tools[3]["name"], "divide");
    }

    #[test]
    fn unknown_method_is_method_not_found() {
        let response = dispatch_value(json!({"jsonrpc": "2.0", "id": 9, "method": "foo"}));

        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["error"]["message"], "Method not found: foo");
        assert_eq!(response["id"], 9);
    }

    #[test]
    fn tools_call_end_to_end() {
        let response = dispatch_value(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "add", "arguments": {"a": 15, "b": 27}}
        }));

        assert_eq!(response["id"], 3);
        assert_eq!(response["result"]["content"][0]["text"], "Result: 42");
    }

    #[test]
    fn unknown_tool_is_successful_envelope_with_error_flag() {
        let response = dispatch_value(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "power", "arguments": {"a": 2, "b": 3}}
        }));

        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "Error: Unknown tool: power"
        );
    }

    #[test]
    fn tools_call_without_params_is_internal_error() {
        let response =
            dispatch_value(json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call"}));

        assert_eq!(response["error"]["code"], -32603);
        assert_eq!(response["id"], 6);
    }

    #[test]
    fn missing_or_non_string_method_is_method_not_found() {
        let response = dispatch_value(json!({"jsonrpc": "2.0", "id": 7}));
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["error"]["message"], "Method not found: undefined");
        assert_eq!(response["id"], 7);

        let response = dispatch_value(json!({"jsonrpc": "2.0", "id": 8, "method": 5}));
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["error"]["message"], "Method not found: 5");

        let response = dispatch_value(json!([1, 2, 3]));
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["id"], Value::Null);
    }

    #[test]
    fn malformed_text_is_parse_error() {
        let response = handle_json_rpc_text(&ServerManifest::new(), "{not json");
        let response = serde_json::to_value(response).expect("response serializes");

        assert_eq!(response["error"]["code"], -32700);
        assert_eq!(response["error"]["message"], "Parse error");
        assert_eq!(response["id"], Value::Null);
    }
}
