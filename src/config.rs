// src/config.rs

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use url::Url;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// How the MCP server talks to its client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportMode {
    #[default]
    Stdio,
    Http,
}

impl FromStr for TransportMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stdio" => Ok(TransportMode::Stdio),
            "http" => Ok(TransportMode::Http),
            other => Err(anyhow!("unknown transport '{}', expected stdio or http", other)),
        }
    }
}

// All configuration, loaded once at startup from the environment (and an optional .env file).
#[derive(Clone, Debug)]
pub struct Config {
    /// Solana JSON-RPC endpoint
    pub rpc_url: String,
    pub commitment: CommitmentConfig,

    // Server settings
    pub transport: TransportMode,
    /// Only used in HTTP mode
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: CommitmentConfig::confirmed(),
            transport: TransportMode::default(),
            port: 8080,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let rpc_url = lookup("SOLANA_RPC_URL").unwrap_or(defaults.rpc_url);
        validate_rpc_url(&rpc_url)?;

        let commitment = match lookup("SOLANA_COMMITMENT") {
            Some(raw) => parse_commitment(&raw).context("SOLANA_COMMITMENT is invalid")?,
            None => defaults.commitment,
        };

        let transport = match lookup("MCP_TRANSPORT") {
            Some(raw) => raw.parse::<TransportMode>().context("MCP_TRANSPORT is invalid")?,
            None => defaults.transport,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().context("PORT must be a valid number")?,
            None => defaults.port,
        };

        Ok(Config {
            rpc_url,
            commitment,
            transport,
            port,
        })
    }
}

fn parse_commitment(raw: &str) -> Result<CommitmentConfig> {
    let commitment = raw
        .trim()
        .to_lowercase()
        .parse::<CommitmentLevel>()
        .map_err(|_| anyhow!("unknown commitment '{}', expected processed, confirmed or finalized", raw))?;
    Ok(CommitmentConfig { commitment })
}

fn validate_rpc_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("SOLANA_RPC_URL '{}' is not a valid URL", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("SOLANA_RPC_URL must use http or https, got '{}'", url.scheme());
    }
    Ok(())
}
