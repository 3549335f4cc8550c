//! Secret key parsing for `getKeypairInfo`.
//!
//! A secret key is 64 bytes: the ed25519 seed followed by its public key.
//! Input text is run through an ordered list of parsers; the first one that
//! yields a consistent keypair wins.

use std::fmt;

use solana_sdk::signature::{Keypair, Signer};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::blockchain::models::{Pubkey, SolanaError};

pub const SECRET_KEY_LEN: usize = 64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeypairError {
    #[error("expected 64 bytes, got {0}")]
    WrongLength(usize),
    #[error("entry {0} is not a byte value (0-255)")]
    InvalidByte(usize),
    #[error("not a JSON array of byte values (line {line}, column {column})")]
    NotJsonArray { line: usize, column: usize },
    #[error("public key half does not match the secret seed")]
    Mismatch,
}

type SecretBytes = Zeroizing<[u8; SECRET_KEY_LEN]>;
type SecretKeyParser = fn(&str) -> Result<SecretBytes, KeypairError>;

/// Tried in order.
const SECRET_KEY_PARSERS: [(&str, SecretKeyParser); 2] = [
    ("comma-separated", parse_comma_separated),
    ("json-array", parse_json_array),
];

/// A keypair decoded from user input.
pub struct SolanaKeypair {
    keypair: Keypair,
}

impl SolanaKeypair {
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

impl fmt::Debug for SolanaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolanaKeypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

/// Parses a secret key given as comma-separated decimals or a JSON byte array.
pub fn parse_keypair(input: &str) -> Result<SolanaKeypair, SolanaError> {
    let mut failures = Vec::with_capacity(SECRET_KEY_PARSERS.len());

    for (name, parser) in SECRET_KEY_PARSERS {
        match parser(input).and_then(|bytes| keypair_from_bytes(&bytes)) {
            Ok(keypair) => {
                debug!("Secret key accepted as {}", name);
                return Ok(keypair);
            }
            Err(e) => failures.push(format!("{}: {}", name, e)),
        }
    }

    Err(SolanaError::InvalidKeypair(failures.join("; ")))
}

// Rejects input whose public half is not derived from its seed.
fn keypair_from_bytes(bytes: &[u8; SECRET_KEY_LEN]) -> Result<SolanaKeypair, KeypairError> {
    let keypair = Keypair::from_bytes(bytes.as_slice()).map_err(|_| KeypairError::Mismatch)?;
    Ok(SolanaKeypair { keypair })
}

fn parse_comma_separated(input: &str) -> Result<SecretBytes, KeypairError> {
    let bytes = input
        .split(',')
        .enumerate()
        .map(|(i, part)| part.trim().parse::<u8>().map_err(|_| KeypairError::InvalidByte(i)))
        .collect::<Result<Vec<u8>, _>>()?;
    to_secret_bytes(Zeroizing::new(bytes))
}

fn parse_json_array(input: &str) -> Result<SecretBytes, KeypairError> {
    let bytes: Vec<u8> =
        serde_json::from_str(input.trim()).map_err(|e| KeypairError::NotJsonArray {
            line: e.line(),
            column: e.column(),
        })?;
    to_secret_bytes(Zeroizing::new(bytes))
}

fn to_secret_bytes(bytes: Zeroizing<Vec<u8>>) -> Result<SecretBytes, KeypairError> {
    if bytes.len() != SECRET_KEY_LEN {
        return Err(KeypairError::WrongLength(bytes.len()));
    }
    let mut secret = Zeroizing::new([0u8; SECRET_KEY_LEN]);
    secret.copy_from_slice(&bytes);
    Ok(secret)
}
