use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::error;

use crate::{
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};

// Forward JSON-RPC requests over HTTP to the MCP handler.
// The body is decoded here so malformed JSON gets a JSON-RPC parse error like on stdio.
pub async fn rpc_handler(State(state): State<AppState>, body: Bytes) -> Json<Response> {
    let req = match serde_json::from_slice::<Request>(&body) {
        Ok(req) => req,
        Err(parse_error) => {
            error!("JSON parse error on /api/rpc: {}", parse_error);
            return Json(Response::error(
                Value::Null,
                error_codes::PARSE_ERROR,
                format!("Parse error: {}", parse_error),
            ));
        }
    };

    match handle_mcp_request(req, &state).await {
        Some(resp) => Json(resp),
        None => Json(Response::error(
            Value::Null,
            error_codes::INVALID_REQUEST,
            "Notifications are not supported over HTTP".into(),
        )),
    }
}
