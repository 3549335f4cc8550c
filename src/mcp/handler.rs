//! # MCP Handler Module
//!
//! Implements the Model Context Protocol request surface for the Solana
//! server and dispatches tool calls to the registry in [`crate::mcp::tools`].
//!
//! ## Methods
//! - `initialize` - server info and capabilities
//! - `ping` - liveness
//! - `tools/list` - tool names, descriptions and input schemas
//! - `tools/call` - validated tool execution
//!
//! Tool names are also accepted as methods directly; they are rewritten into
//! `tools/call` with the params used as arguments.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::{
    mcp::{
        protocol::{error_codes, Request, Response},
        tools::{find_tool, ToolCall, TOOLS},
    },
    utils, AppState,
};

pub const SERVER_NAME: &str = "solana-rpc";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// This is the main dispatcher for all incoming MCP requests.
/// Returns `None` for notifications.
pub async fn handle_mcp_request(req: Request, state: &AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        debug!("Notification {} acknowledged", req.method);
        return None;
    }

    let method = req.method.clone();
    let response = match method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id.clone(), json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, state).await,
        // Convenience aliases so CLI users can call a tool by method name
        name if find_tool(name).is_some() => {
            let wrapped = Request {
                jsonrpc: req.jsonrpc.clone(),
                id: req.id.clone(),
                method: "tools/call".to_string(),
                params: Some(json!({
                    "name": name,
                    "arguments": req.params.clone().unwrap_or_else(|| json!({}))
                })),
            };
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request by validating and running the named tool.
async fn handle_tool_call(req: Request, state: &AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name: String = match utils::get_required_arg(params, "name", &req.id) {
        Ok(name) => name,
        Err(err_resp) => return err_resp,
    };

    let empty_args = Value::Null;
    let args = params.get("arguments").unwrap_or(&empty_args);

    let call = match ToolCall::parse(&tool_name, args) {
        Ok(call) => call,
        Err(message) => {
            warn!("Rejected call to {}: {}", tool_name, message);
            return Response::error(req.id, error_codes::INVALID_PARAMS, message);
        }
    };

    let result = call.execute(state.rpc.as_ref()).await;
    if result.is_error {
        warn!("Tool {} failed: {}", call.name(), result.joined_text());
    }

    match serde_json::to_value(&result) {
        Ok(value) => Response::success(req.id, value),
        Err(e) => Response::error(req.id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

fn handle_initialize(req: &Request) -> Response {
    let protocol_version = req
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "protocolVersion": protocol_version,
            "capabilities": { "tools": { "listChanged": false } },
            "instructions": "Read-only Solana RPC tools: current slot, balances, account info and keypair inspection."
        }),
    )
}

/// Handles the 'tools/list' request by returning every registered tool.
fn handle_tools_list(req: &Request) -> Response {
    let tools: Vec<Value> = TOOLS.iter().map(|t| t.to_json()).collect();
    Response::success(req.id.clone(), json!({ "tools": tools }))
}
