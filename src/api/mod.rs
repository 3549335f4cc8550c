//! # API Module
//!
//! HTTP surface for running the MCP server behind a port instead of stdio.
//!
//! ## Endpoints
//! - `GET /api/health` - liveness plus the configured RPC endpoint
//! - `POST /api/rpc` - one MCP JSON-RPC request per call

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod rpc;

/// Builds the router served in HTTP mode.
pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
