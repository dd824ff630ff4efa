//! WebSocket binding for the MCP dispatcher
//!
//! Each inbound text frame carries one JSON-RPC request; the response goes back
//! as a single text frame on the same socket.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use tracing::{debug, info, warn};

use crate::mcp::rpc::parse_error;
use crate::mcp::server::{handle_json_rpc_text, ServerManifest};
use crate::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    info!("websocket client connected");

    while let Some(message) = socket.recv().await {
        let reply = match message {
            Ok(Message::Text(text)) => handle_ws_text(&state.manifest, text.as_str()),
            Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => handle_ws_text(&state.manifest, text),
                Err(_) => parse_error().to_json_string(),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(err) => {
                warn!(error = %err, "websocket receive failed");
                break;
            }
        };

        if let Err(err) = socket.send(Message::Text(reply.into())).await {
            warn!(error = %err, "websocket send failed");
            break;
        }
    }

    info!("websocket client disconnected");
}

pub fn handle_ws_text(manifest: &ServerManifest, text: &str) -> String {
    debug!(bytes = text.len(), "websocket message received");
    handle_json_rpc_text(manifest, text).to_json_string()
}
