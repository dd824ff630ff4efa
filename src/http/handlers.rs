//! Axum HTTP handlers for the web server
//!
//! Provides the primary Model Context Protocol endpoint, and general metadata endpoints.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::mcp::rpc::{parse_error, JsonRpcResponse};
use crate::mcp::server::handle_json_rpc_text;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: String,
    pub version: String,
    pub status: &'static str,
    pub protocol: String,
    pub endpoints: Endpoints,
    pub tools: Vec<ToolSummary>,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub mcp: &'static str,
    pub websocket: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct McpInfoResponse {
    pub name: String,
    pub version: String,
    pub protocol: String,
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: format!("{} is running", state.manifest.display_name),
        version: state.manifest.version.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryResponse> {
    let manifest = &state.manifest;
    Json(DiscoveryResponse {
        name: manifest.display_name.clone(),
        version: manifest.version.clone(),
        status: "running",
        protocol: format!("mcp/{}", manifest.protocol_version),
        endpoints: Endpoints {
            health: "/health",
            mcp: "/mcp (POST)",
            websocket: "/ws",
        },
        tools: manifest
            .tools
            .iter()
            .map(|tool| ToolSummary {
                name: tool.name.clone(),
                description: tool.description.clone(),
            })
            .collect(),
    })
}

pub async fn mcp_info(State(state): State<AppState>) -> Json<McpInfoResponse> {
    Json(McpInfoResponse {
        name: state.manifest.display_name.clone(),
        version: state.manifest.version.clone(),
        protocol: format!("mcp/{}", state.manifest.protocol_version),
        status: "ready",
        message: "Use POST method to interact with MCP protocol",
    })
}

/// Every JSON-RPC outcome, parse and internal errors included, is sent with 200.
pub async fn mcp_endpoint(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<JsonRpcResponse>) {
    let response = match std::str::from_utf8(&body) {
        Ok(text) => handle_json_rpc_text(&state.manifest, text),
        Err(_) => parse_error(),
    };

    (StatusCode::OK, Json(response))
}
