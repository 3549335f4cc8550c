//! Chain queries behind each tool.
//!
//! Inputs arrive as raw strings; address and key validation happens here,
//! before any network I/O.

use tracing::debug;

use crate::blockchain::{
    client::SolanaRpc,
    keypair::parse_keypair,
    models::{parse_pubkey, AccountFetch, AccountSnapshot, DataEncoding, Pubkey, SolanaError},
};

/// Everything `getKeypairInfo` reports about a key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeypairInfo {
    pub pubkey: Pubkey,
    pub lamports: u64,
    pub account: Option<AccountSnapshot>,
}

pub async fn get_slot(rpc: &dyn SolanaRpc) -> Result<u64, SolanaError> {
    rpc.get_slot().await
}

/// Balance in lamports for a base58 address.
pub async fn get_balance(rpc: &dyn SolanaRpc, address: &str) -> Result<u64, SolanaError> {
    let pubkey = parse_pubkey(address)?;
    rpc.get_balance(&pubkey).await
}

pub async fn get_account_info(
    rpc: &dyn SolanaRpc,
    address: &str,
    encoding: DataEncoding,
) -> Result<Option<AccountSnapshot>, SolanaError> {
    let pubkey = parse_pubkey(address)?;
    rpc.get_account_info(&pubkey, encoding.fetch_mode()).await
}

/// Derives the public key from `secret_key`, then reads its balance and account.
pub async fn get_keypair_info(
    rpc: &dyn SolanaRpc,
    secret_key: &str,
) -> Result<KeypairInfo, SolanaError> {
    let pubkey = parse_keypair(secret_key)?.pubkey();
    debug!("Inspecting keypair {}", pubkey);

    let lamports = rpc.get_balance(&pubkey).await?;
    let account = rpc.get_account_info(&pubkey, AccountFetch::Binary).await?;

    Ok(KeypairInfo {
        pubkey,
        lamports,
        account,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solana_sdk::signer::{keypair::keypair_from_seed, Signer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and answers with fixed values.
    #[derive(Default)]
    struct CountingRpc {
        calls: AtomicUsize,
        fetches: std::sync::Mutex<Vec<AccountFetch>>,
    }

    #[async_trait]
    impl SolanaRpc for CountingRpc {
        async fn get_slot(&self) -> Result<u64, SolanaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(42)
        }

        async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, SolanaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        }

        async fn get_account_info(
            &self,
            _pubkey: &Pubkey,
            fetch: AccountFetch,
        ) -> Result<Option<AccountSnapshot>, SolanaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.fetches.lock().unwrap().push(fetch);
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_invalid_address_skips_rpc() {
        let rpc = CountingRpc::default();

        let err = get_balance(&rpc, "ADDR1").await.unwrap_err();
        assert!(matches!(err, SolanaError::InvalidAddress { .. }));
        let err = get_account_info(&rpc, "", DataEncoding::Base64).await.unwrap_err();
        assert!(matches!(err, SolanaError::InvalidAddress { .. }));

        assert_eq!(rpc.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_keypair_skips_rpc() {
        let rpc = CountingRpc::default();

        let err = get_keypair_info(&rpc, "1,2,3").await.unwrap_err();
        assert!(matches!(err, SolanaError::InvalidKeypair(_)));
        assert_eq!(rpc.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_keypair_info_queries_balance_then_binary_account() {
        let rpc = CountingRpc::default();
        let keypair = keypair_from_seed(&[9u8; 32]).unwrap();
        let secret = keypair
            .to_bytes()
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let info = get_keypair_info(&rpc, &secret).await.unwrap();

        assert_eq!(info.pubkey, keypair.pubkey());
        assert_eq!(info.lamports, 7);
        assert_eq!(info.account, None);
        assert_eq!(rpc.calls.load(Ordering::SeqCst), 2);
        assert_eq!(*rpc.fetches.lock().unwrap(), [AccountFetch::Binary]);
    }

    #[tokio::test]
    async fn test_json_parsed_encoding_requests_parsed_fetch() {
        let rpc = CountingRpc::default();

        let account = get_account_info(
            &rpc,
            "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM",
            DataEncoding::JsonParsed,
        )
        .await
        .unwrap();

        assert!(account.is_none());
        assert_eq!(*rpc.fetches.lock().unwrap(), [AccountFetch::Parsed]);
    }
}
