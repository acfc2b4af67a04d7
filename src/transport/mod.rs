// MCP over JSON-RPC 2.0: message handling shared by the stdio and HTTP transports

pub mod stdio;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::dispatcher::Dispatcher;
use crate::version::{NAME, VERSION};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(default)]
    jsonrpc: Option<String>,
    /// Absent (or null) for notifications.
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Id of a request, or `None` for a notification.
pub fn request_id(message: &Value) -> Option<Value> {
    message.get("id").filter(|id| !id.is_null()).cloned()
}

/// Response for a message that is not valid JSON. The id is always null.
pub fn parse_error(detail: impl fmt::Display) -> JsonRpcResponse {
    let message = format!("parse error: {}", detail);
    warn!(error = %detail, "malformed JSON-RPC message");
    JsonRpcResponse::failure(Value::Null, PARSE_ERROR, message)
}

/// Parse one raw line/body, or produce the parse-error response for it.
pub fn parse_message(text: &str) -> Result<Value, JsonRpcResponse> {
    serde_json::from_str::<Value>(text).map_err(parse_error)
}

/// Handle one parsed message. Returns `None` for notifications.
pub async fn handle_message(dispatcher: &Dispatcher, message: Value) -> Option<JsonRpcResponse> {
    let id = request_id(&message);
    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "invalid JSON-RPC request");
            return id.map(|id| {
                JsonRpcResponse::failure(id, INVALID_REQUEST, format!("invalid request: {}", e))
            });
        }
    };
    if let Some(version) = request.jsonrpc.as_deref()
        && version != "2.0"
    {
        return id.map(|id| {
            JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("unsupported jsonrpc version: {}", version),
            )
        });
    }
    let Some(id) = request.id else {
        debug!(method = %request.method, "notification");
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": NAME, "version": VERSION },
            }),
        ),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": dispatcher.tools() })),
        "tools/call" => {
            let params = request.params.unwrap_or(Value::Null);
            match serde_json::from_value::<CallParams>(params) {
                Ok(call) => {
                    let result = dispatcher.dispatch(&call.name, &call.arguments).await;
                    match serde_json::to_value(result) {
                        Ok(value) => JsonRpcResponse::success(id, value),
                        Err(e) => JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
                    }
                }
                Err(e) => JsonRpcResponse::failure(
                    id,
                    INVALID_PARAMS,
                    format!("invalid params: {}", e),
                ),
            }
        }
        other => {
            debug!(method = %other, "unknown method");
            JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("method not found: {}", other),
            )
        }
    };
    Some(response)
}
