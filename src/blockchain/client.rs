//! Solana JSON-RPC client.
//!
//! `SolanaRpc` is the seam the tool services depend on. `SolanaRpcClient`
//! implements it with the nonblocking `RpcClient` from `solana-client`,
//! issuing one request per call against a single endpoint with a fixed
//! commitment level.

use async_trait::async_trait;
use serde_json::json;
use solana_account_decoder::{UiAccount, UiAccountData, UiAccountEncoding};
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_config::RpcAccountInfoConfig,
    rpc_request::RpcRequest, rpc_response::Response as RpcResponse,
};
use solana_sdk::{account::Account, commitment_config::CommitmentConfig};
use tracing::debug;

use crate::blockchain::models::{AccountData, AccountFetch, AccountSnapshot, Pubkey, SolanaError};

/// Read-only chain queries used by the tools.
#[async_trait]
pub trait SolanaRpc: Send + Sync {
    /// Current slot at the configured commitment.
    async fn get_slot(&self) -> Result<u64, SolanaError>;

    /// Balance in lamports.
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, SolanaError>;

    /// Account state, or `None` when no account exists at the address.
    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        fetch: AccountFetch,
    ) -> Result<Option<AccountSnapshot>, SolanaError>;
}

/// [`SolanaRpc`] backed by a Solana JSON-RPC node.
pub struct SolanaRpcClient {
    client: RpcClient,
}

impl SolanaRpcClient {
    /// Create a client for the given endpoint URL
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
        }
    }

    pub fn rpc_url(&self) -> String {
        self.client.url()
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.client.commitment()
    }
}

#[async_trait]
impl SolanaRpc for SolanaRpcClient {
    async fn get_slot(&self) -> Result<u64, SolanaError> {
        debug!("Solana RPC getSlot");
        Ok(self.client.get_slot().await?)
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, SolanaError> {
        debug!("Solana RPC getBalance {}", pubkey);
        Ok(self.client.get_balance(pubkey).await?)
    }

    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        fetch: AccountFetch,
    ) -> Result<Option<AccountSnapshot>, SolanaError> {
        debug!("Solana RPC getAccountInfo {} ({:?})", pubkey, fetch);
        let encoding = match fetch {
            AccountFetch::Binary => UiAccountEncoding::Base64,
            AccountFetch::Parsed => UiAccountEncoding::JsonParsed,
        };
        let config = RpcAccountInfoConfig {
            encoding: Some(encoding),
            commitment: Some(self.client.commitment()),
            ..RpcAccountInfoConfig::default()
        };

        // `get_account_with_config` discards jsonParsed payloads, so the UI
        // account is requested as-is and decoded here.
        let res: RpcResponse<Option<UiAccount>> = self
            .client
            .send(RpcRequest::GetAccountInfo, json!([pubkey.to_string(), config]))
            .await?;

        res.value.map(into_snapshot).transpose()
    }
}

fn into_snapshot(account: UiAccount) -> Result<AccountSnapshot, SolanaError> {
    let data = match &account.data {
        UiAccountData::Json(parsed) => AccountData::Parsed {
            program: parsed.program.clone(),
            parsed: parsed.parsed.clone(),
            space: parsed.space,
        },
        UiAccountData::LegacyBinary(_) | UiAccountData::Binary(..) => {
            let decoded: Account = account.decode().ok_or_else(|| {
                SolanaError::InvalidResponse(format!(
                    "account data owned by {} could not be decoded",
                    account.owner
                ))
            })?;
            AccountData::Binary(decoded.data)
        }
    };

    Ok(AccountSnapshot {
        lamports: account.lamports,
        owner: account.owner,
        executable: account.executable,
        rent_epoch: account.rent_epoch,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use solana_client::client_error::ClientErrorKind;

    const ADDRESS: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

    fn client_for(server: &mockito::Server) -> SolanaRpcClient {
        SolanaRpcClient::new(&server.url(), CommitmentConfig::confirmed())
    }

    #[tokio::test]
    async fn test_get_slot_sends_commitment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "method": "getSlot",
                "params": [{ "commitment": "confirmed" }]
            })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":245678901}"#)
            .create_async()
            .await;

        let slot = client_for(&server).get_slot().await.unwrap();
        assert_eq!(slot, 245_678_901);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_balance_reads_context_value() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "method": "getBalance",
                "params": [ADDRESS]
            })))
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":1},"value":2500000000}}"#)
            .create_async()
            .await;

        let pubkey: Pubkey = ADDRESS.parse().unwrap();
        let lamports = client_for(&server).get_balance(&pubkey).await.unwrap();
        assert_eq!(lamports, 2_500_000_000);
    }

    #[tokio::test]
    async fn test_get_account_info_missing_account_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":1},"value":null}}"#)
            .create_async()
            .await;

        let pubkey: Pubkey = ADDRESS.parse().unwrap();
        let account = client_for(&server)
            .get_account_info(&pubkey, AccountFetch::Binary)
            .await
            .unwrap();
        assert!(account.is_none());
    }

    #[tokio::test]
    async fn test_get_account_info_decodes_base64_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "params": [ADDRESS, { "encoding": "base64" }]
            })))
            .with_body(
                r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":1},"value":{
                    "data":["AQID","base64"],"executable":false,"lamports":1461600,
                    "owner":"TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
                    "rentEpoch":18446744073709551615,"space":3}}}"#,
            )
            .create_async()
            .await;

        let pubkey: Pubkey = ADDRESS.parse().unwrap();
        let account = client_for(&server)
            .get_account_info(&pubkey, AccountFetch::Binary)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.data, AccountData::Binary(vec![1, 2, 3]));
        assert_eq!(account.rent_epoch, u64::MAX);
        assert_eq!(account.lamports, 1_461_600);
    }

    #[tokio::test]
    async fn test_get_account_info_parsed_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "params": [ADDRESS, { "encoding": "jsonParsed" }]
            })))
            .with_body(
                r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":1},"value":{
                    "data":{"program":"spl-token","parsed":{"type":"mint"},"space":82},
                    "executable":false,"lamports":1461600,
                    "owner":"TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA","rentEpoch":0}}}"#,
            )
            .create_async()
            .await;

        let pubkey: Pubkey = ADDRESS.parse().unwrap();
        let account = client_for(&server)
            .get_account_info(&pubkey, AccountFetch::Parsed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.data_len(), 82);
        assert!(matches!(account.data, AccountData::Parsed { ref program, .. } if program == "spl-token"));
    }

    #[tokio::test]
    async fn test_get_account_info_undecodable_data_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(
                r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":1},"value":{
                    "data":["not base64!","base64"],"executable":false,"lamports":1,
                    "owner":"11111111111111111111111111111111","rentEpoch":0}}}"#,
            )
            .create_async()
            .await;

        let pubkey: Pubkey = ADDRESS.parse().unwrap();
        let err = client_for(&server)
            .get_account_info(&pubkey, AccountFetch::Binary)
            .await
            .unwrap_err();
        assert!(matches!(err, SolanaError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_http_failure_keeps_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).get_slot().await.unwrap_err();
        let SolanaError::Rpc(client_error) = &err else {
            panic!("expected RPC client error, got {:?}", err);
        };
        assert!(matches!(
            client_error.kind(),
            ClientErrorKind::Reqwest(e) if e.status().map(|s| s.as_u16()) == Some(503)
        ));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_rpc_error_object_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"Node is behind"}}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_slot().await.unwrap_err();
        assert!(matches!(
            &err,
            SolanaError::Rpc(e) if matches!(e.kind(), ClientErrorKind::RpcError(_))
        ));
        assert!(err.to_string().contains("-32000: Node is behind"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = SolanaRpcClient::new("http://127.0.0.1:1/", CommitmentConfig::confirmed());
        let err = client.get_slot().await.unwrap_err();
        assert!(matches!(
            &err,
            SolanaError::Rpc(e) if matches!(e.kind(), ClientErrorKind::Reqwest(_))
        ));
    }
}
