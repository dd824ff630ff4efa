use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::INTERNAL_ERROR;
use crate::mcp::rpc::JsonRpcResponse;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let upgrade = request.headers().contains_key(axum::http::header::UPGRADE);
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        upgrade,
        duration_ms = elapsed_ms,
        "request summary"
    );

    response
}

/// Classifies a JSON-RPC reply: `tool_error` is a successful envelope whose
/// tool result is flagged, `failure` is a JSON-RPC `error` member.
pub fn rpc_outcome(response: &JsonRpcResponse) -> &'static str {
    if response.is_error() {
        "failure"
    } else if response.is_tool_error() {
        "tool_error"
    } else {
        "success"
    }
}

pub fn log_rpc_outcome(method: &str, response: &JsonRpcResponse) {
    let outcome = rpc_outcome(response);
    let id = response.id.to_string();
    let code = response.error_code().unwrap_or_default();

    if code == i64::from(INTERNAL_ERROR) {
        warn!(method = %method, id = %id, code, "mcp request failed internally");
        return;
    }

    info!(method = %method, id = %id, outcome, code, "mcp request handled");
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::DispatchError;

    #[test]
    fn outcomes_follow_the_two_error_tiers() {
        let success = JsonRpcResponse::result(Some(json!(1)), json!({"content": []}));
        let tool_error = JsonRpcResponse::result(
            Some(json!(2)),
            json!({"content": [], "isError": true}),
        );
        let failure = JsonRpcResponse::error(
            Some(json!(3)),
            &DispatchError::MethodNotFound("foo".to_string()),
        );

        assert_eq!(rpc_outcome(&success), "success");
        assert_eq!(rpc_outcome(&tool_error), "tool_error");
        assert_eq!(rpc_outcome(&failure), "failure");
    }
}
