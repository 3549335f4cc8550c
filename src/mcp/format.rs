//! Text rendering for tool results.

use base64::{engine::general_purpose, Engine as _};

use crate::blockchain::{
    models::{AccountData, AccountSnapshot, DataEncoding, SolanaError},
    services::KeypairInfo,
};
use crate::utils::lamports_to_sol;

pub fn slot(slot: u64) -> String {
    format!("Current slot: {}", slot)
}

pub fn balance(address: &str, lamports: u64) -> String {
    format!("Balance for {}:\n{} SOL", address, lamports_to_sol(lamports))
}

pub fn keypair_info(info: &KeypairInfo) -> String {
    let account = info.account.as_ref();
    format!(
        "Keypair Information:\n\
         Public Key: {}\n\
         Balance: {} SOL\n\
         Account Program Owner: {}\n\
         Account Size: {} bytes\n\
         Is Executable: {}\n\
         Rent Epoch: {}",
        info.pubkey,
        lamports_to_sol(info.lamports),
        account.map(|a| a.owner.as_str()).unwrap_or("N/A"),
        account.map(AccountSnapshot::data_len).unwrap_or(0),
        account.map(|a| a.executable).unwrap_or(false),
        account.map(|a| a.rent_epoch).unwrap_or(0),
    )
}

pub fn account_info(address: &str, account: &AccountSnapshot, encoding: DataEncoding) -> String {
    format!(
        "Account Information for {}:\n\
         Lamports: {} ({} SOL)\n\
         Owner: {}\n\
         Executable: {}\n\
         Rent Epoch: {}\n\
         Data Length: {} bytes\n\
         {}",
        address,
        account.lamports,
        lamports_to_sol(account.lamports),
        account.owner,
        account.executable,
        account.rent_epoch,
        account.data_len(),
        account_data(&account.data, encoding),
    )
}

pub fn no_account(address: &str) -> String {
    format!("No account found for address: {}", address)
}

/// The `Data (...)` line(s). The label always names the encoding actually shown.
fn account_data(data: &AccountData, encoding: DataEncoding) -> String {
    match (data, encoding) {
        (AccountData::Binary(bytes), DataEncoding::Base58) => {
            format!("Data (base58): {}", bs58::encode(bytes).into_string())
        }
        (AccountData::Binary(bytes), DataEncoding::Base64) => {
            format!("Data (base64): {}", general_purpose::STANDARD.encode(bytes))
        }
        (AccountData::Binary(bytes), DataEncoding::JsonParsed) => format!(
            "Data (base64): {}\n\
             Note: the RPC node has no JSON parser for this account's program",
            general_purpose::STANDARD.encode(bytes)
        ),
        (AccountData::Parsed { program, parsed, .. }, _) => format!(
            "Data (jsonParsed, program {}): {}",
            program,
            serde_json::to_string_pretty(parsed).unwrap_or_else(|_| parsed.to_string())
        ),
    }
}

pub fn slot_failure(err: &SolanaError) -> String {
    format!("Failed to retrieve current slot: {}", err)
}

pub fn balance_failure(err: &SolanaError) -> String {
    format!("Failed to retrieve balance for address: {}", err)
}

pub fn keypair_failure(err: &SolanaError) -> String {
    format!("Failed to retrieve keypair information: {}", err)
}

pub fn account_failure(err: &SolanaError) -> String {
    format!("Failed to retrieve account information: {}", err)
}
