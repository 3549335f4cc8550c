//! Utility functions for the Solana MCP server

use serde::de::DeserializeOwned;
use serde_json::{from_value, Value};

use crate::blockchain::models::LAMPORTS_PER_SOL;
use crate::mcp::protocol::{error_codes, Response};

/// Helper function to extract a required argument from a JSON object
pub fn get_required_arg<T: DeserializeOwned>(
    args: &Value,
    key: &str,
    req_id: &Value,
) -> Result<T, Response> {
    from_value(args.get(key).cloned().unwrap_or(Value::Null)).map_err(|_| {
        Response::error(
            req_id.clone(),
            error_codes::INVALID_PARAMS,
            format!("Missing or invalid required argument: '{}'", key),
        )
    })
}

/// Lamports to SOL as a plain float division, no rounding.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(2_500_000_000), 2.5);
        assert_eq!(lamports_to_sol(0), 0.0);
        assert_eq!(lamports_to_sol(1), 1e-9);
        assert_eq!(lamports_to_sol(123_456_789_012), 123_456_789_012f64 / 1e9);
    }

    #[test]
    fn test_get_required_arg_reports_missing_key() {
        let args = json!({ "name": "getSlot" });
        let name: String = get_required_arg(&args, "name", &json!(1)).unwrap();
        assert_eq!(name, "getSlot");

        let err = get_required_arg::<String>(&args, "arguments", &json!(1)).unwrap_err();
        let error = err.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert!(error.message.contains("'arguments'"));
    }
}
