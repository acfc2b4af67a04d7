// Handlers: mcp, version, api/tools

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::AppState;
use crate::transport;
use crate::version::{NAME, VERSION};

/// POST /mcp — one JSON-RPC message per `application/json` body. Other content types are
/// refused before anything runs. Notifications get 202 with no body.
pub(super) async fn mcp_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let message = match body {
        Ok(Json(message)) => message,
        Err(JsonRejection::JsonSyntaxError(e)) => {
            return Json(transport::parse_error(e.body_text())).into_response();
        }
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), "rejected /mcp body");
            return rejection.into_response();
        }
    };
    match transport::handle_message(&state.dispatcher, message).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/tools — same definitions as `tools/list`.
pub(super) async fn tools_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "tools": state.dispatcher.tools() }))
}
