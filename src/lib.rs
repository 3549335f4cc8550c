// src/lib.rs
// `SolanaError` wraps solana_client's large ClientError by value.
#![allow(clippy::result_large_err)]

use std::sync::Arc;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod mcp;
pub mod utils;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::Config>,
    /// Solana RPC connection used by every tool call
    pub rpc: Arc<dyn blockchain::SolanaRpc>,
}

impl AppState {
    pub fn new(config: config::Config, rpc: Arc<dyn blockchain::SolanaRpc>) -> Self {
        Self {
            config: Arc::new(config),
            rpc,
        }
    }
}
