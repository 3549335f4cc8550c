use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "rpc_url": state.config.rpc_url,
        "commitment": state.config.commitment.commitment,
    }))
}
