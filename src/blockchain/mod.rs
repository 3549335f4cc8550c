// src/blockchain/mod.rs

pub mod client;
pub use client::{SolanaRpc, SolanaRpcClient};

pub mod keypair;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use models::{parse_pubkey, AccountSnapshot, DataEncoding, Pubkey, SolanaError};
