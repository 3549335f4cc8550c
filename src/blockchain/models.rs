// src/blockchain/models.rs
use serde_json::Value;
use solana_client::client_error::ClientError;
pub use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

// --- Error types for RPC and key handling ---

#[derive(Error, Debug)]
pub enum SolanaError {
    #[error("RPC error: {0}")]
    Rpc(#[from] ClientError),
    #[error("Invalid public key input '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("Invalid secret key: {0}")]
    InvalidKeypair(String),
    #[error("unexpected RPC response: {0}")]
    InvalidResponse(String),
}

// --- Keys ---

/// Parses a base58 address, keeping the offending input in the error.
pub fn parse_pubkey(address: &str) -> Result<Pubkey, SolanaError> {
    Pubkey::from_str(address).map_err(|e| SolanaError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Output encoding for account data in `getAccountInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataEncoding {
    Base58,
    #[default]
    Base64,
    JsonParsed,
}

impl DataEncoding {
    pub const ALL: [&'static str; 3] = ["base58", "base64", "jsonParsed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataEncoding::Base58 => "base58",
            DataEncoding::Base64 => "base64",
            DataEncoding::JsonParsed => "jsonParsed",
        }
    }

    /// How the account has to be fetched to render it in this encoding.
    pub fn fetch_mode(&self) -> AccountFetch {
        match self {
            DataEncoding::JsonParsed => AccountFetch::Parsed,
            DataEncoding::Base58 | DataEncoding::Base64 => AccountFetch::Binary,
        }
    }
}

impl FromStr for DataEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base58" => Ok(DataEncoding::Base58),
            "base64" => Ok(DataEncoding::Base64),
            "jsonParsed" => Ok(DataEncoding::JsonParsed),
            other => Err(format!(
                "unsupported encoding '{}', expected one of: {}",
                other,
                Self::ALL.join(", ")
            )),
        }
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding requested from the node for `getAccountInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountFetch {
    /// Raw bytes, transferred as base64.
    Binary,
    /// Structured JSON when the node has a parser for the owning program.
    Parsed,
}

// --- Account models ---

/// Point-in-time view of an on-chain account. Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub lamports: u64,
    /// Owning program, base58.
    pub owner: String,
    pub executable: bool,
    pub rent_epoch: u64,
    pub data: AccountData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccountData {
    Binary(Vec<u8>),
    Parsed {
        program: String,
        parsed: Value,
        space: u64,
    },
}

impl AccountSnapshot {
    /// Size of the account data in bytes.
    pub fn data_len(&self) -> u64 {
        match &self.data {
            AccountData::Binary(bytes) => bytes.len() as u64,
            AccountData::Parsed { space, .. } => *space,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pubkey_system_program() {
        let key = parse_pubkey("11111111111111111111111111111111").unwrap();
        assert_eq!(key.to_bytes(), [0u8; 32]);
        assert_eq!(key.to_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn test_parse_pubkey_rejects_non_base58() {
        let err = parse_pubkey("0OIl-not-base58").unwrap_err();
        assert!(matches!(err, SolanaError::InvalidAddress { ref address, .. } if address == "0OIl-not-base58"));
    }

    #[test]
    fn test_parse_pubkey_rejects_wrong_length() {
        // Valid base58, but only 4 bytes.
        assert!(matches!(parse_pubkey("ADDR1"), Err(SolanaError::InvalidAddress { .. })));
        assert!(parse_pubkey("").is_err());
    }

    #[test]
    fn test_encoding_parse_and_fetch_mode() {
        assert_eq!("base58".parse::<DataEncoding>().unwrap(), DataEncoding::Base58);
        assert_eq!(DataEncoding::default(), DataEncoding::Base64);
        assert_eq!(DataEncoding::JsonParsed.fetch_mode(), AccountFetch::Parsed);
        assert_eq!(DataEncoding::Base58.fetch_mode(), AccountFetch::Binary);
        assert!("hex".parse::<DataEncoding>().is_err());
    }
}
