// HTTP routes: MCP endpoint plus version and tool listing

mod http;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::dispatcher::Dispatcher;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dispatcher: Arc<Dispatcher>,
}

pub fn app(dispatcher: Arc<Dispatcher>) -> Router {
    let state = AppState { dispatcher };
    // CORS covers the read-only routes only; /mcp drives devices and stays same-origin
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/tools", get(http::tools_handler)) // GET /api/tools
        .layer(CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]))
        .route("/mcp", post(http::mcp_handler)) // POST /mcp
        .with_state(state)
}
