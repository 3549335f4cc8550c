//! # Tool Registry
//!
//! Declares the tools this server exposes, renders their JSON input schemas
//! for `tools/list`, and validates `tools/call` arguments into a typed
//! [`ToolCall`] before anything touches the network.
//!
//! ## Tools
//! - `getSlot` - current slot
//! - `getBalance` - SOL balance of an address
//! - `getKeypairInfo` - public key, balance and account of a secret key
//! - `getAccountInfo` - account details with data in a chosen encoding

use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::blockchain::{client::SolanaRpc, models::DataEncoding, services};
use crate::mcp::{format, protocol::ToolResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "getSlot",
        description: "Get the current slot",
        params: &[],
    },
    ToolSpec {
        name: "getBalance",
        description: "Get balance for a Solana address",
        params: &[ParamSpec {
            name: "address",
            kind: ParamKind::String,
            required: true,
            description: "Solana account address",
        }],
    },
    ToolSpec {
        name: "getKeypairInfo",
        description: "Get information about a keypair from its secret key",
        params: &[ParamSpec {
            name: "secretKey",
            kind: ParamKind::String,
            required: true,
            description: "Secret key as comma-separated byte values or a JSON array of bytes",
        }],
    },
    ToolSpec {
        name: "getAccountInfo",
        description: "Get detailed account information for a Solana address",
        params: &[
            ParamSpec {
                name: "address",
                kind: ParamKind::String,
                required: true,
                description: "Solana account address",
            },
            ParamSpec {
                name: "encoding",
                kind: ParamKind::Enum(&DataEncoding::ALL),
                required: false,
                description: "Data encoding format",
            },
        ],
    },
];

pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|t| t.name == name)
}

impl ToolSpec {
    /// JSON Schema for the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            let mut prop = json!({ "type": "string", "description": param.description });
            if let ParamKind::Enum(values) = param.kind {
                prop["enum"] = json!(values);
            }
            properties.insert(param.name.to_string(), prop);
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Entry for the `tools/list` result.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    /// Checks `args` against the parameter specs. Unknown keys are ignored.
    pub fn validate(&self, args: &Value) -> Result<(), String> {
        if !(args.is_object() || args.is_null()) {
            return Err(format!("Arguments for '{}' must be an object", self.name));
        }

        for param in self.params {
            match args.get(param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(format!("Missing required argument: '{}'", param.name));
                }
                None | Some(Value::Null) => {}
                Some(Value::String(s)) => {
                    if let ParamKind::Enum(values) = param.kind {
                        if !values.contains(&s.as_str()) {
                            return Err(format!(
                                "Invalid value for '{}': expected one of {}",
                                param.name,
                                values.join(", ")
                            ));
                        }
                    }
                }
                Some(_) => {
                    return Err(format!("Argument '{}' must be a string", param.name));
                }
            }
        }
        Ok(())
    }
}

/// A validated tool invocation.
#[derive(Debug)]
pub enum ToolCall {
    GetSlot,
    GetBalance { address: String },
    GetKeypairInfo { secret_key: SecretString },
    GetAccountInfo { address: String, encoding: DataEncoding },
}

impl ToolCall {
    /// Resolves and validates a `tools/call` request.
    pub fn parse(name: &str, args: &Value) -> Result<Self, String> {
        let spec = find_tool(name).ok_or_else(|| format!("Tool {} not found", name))?;
        spec.validate(args)?;
        let string_arg = |key: &str| {
            args.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let call = match spec.name {
            "getSlot" => ToolCall::GetSlot,
            "getBalance" => ToolCall::GetBalance {
                address: string_arg("address").unwrap_or_default(),
            },
            "getKeypairInfo" => ToolCall::GetKeypairInfo {
                secret_key: SecretString::new(string_arg("secretKey").unwrap_or_default()),
            },
            "getAccountInfo" => ToolCall::GetAccountInfo {
                address: string_arg("address").unwrap_or_default(),
                encoding: match string_arg("encoding") {
                    Some(e) => e.parse()?,
                    None => DataEncoding::default(),
                },
            },
            other => return Err(format!("Tool {} not found", other)),
        };
        Ok(call)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::GetSlot => "getSlot",
            ToolCall::GetBalance { .. } => "getBalance",
            ToolCall::GetKeypairInfo { .. } => "getKeypairInfo",
            ToolCall::GetAccountInfo { .. } => "getAccountInfo",
        }
    }

    /// Runs the tool. Failures become text; this never returns an error.
    pub async fn execute(&self, rpc: &dyn SolanaRpc) -> ToolResponse {
        debug!("Executing tool {}", self.name());
        match self {
            ToolCall::GetSlot => match services::get_slot(rpc).await {
                Ok(slot) => ToolResponse::text(format::slot(slot)),
                Err(e) => ToolResponse::failure(format::slot_failure(&e)),
            },
            ToolCall::GetBalance { address } => match services::get_balance(rpc, address).await {
                Ok(lamports) => ToolResponse::text(format::balance(address, lamports)),
                Err(e) => ToolResponse::failure(format::balance_failure(&e)),
            },
            ToolCall::GetKeypairInfo { secret_key } => {
                match services::get_keypair_info(rpc, secret_key.expose_secret()).await {
                    Ok(info) => ToolResponse::text(format::keypair_info(&info)),
                    Err(e) => ToolResponse::failure(format::keypair_failure(&e)),
                }
            }
            ToolCall::GetAccountInfo { address, encoding } => {
                match services::get_account_info(rpc, address, *encoding).await {
                    Ok(Some(account)) => {
                        ToolResponse::text(format::account_info(address, &account, *encoding))
                    }
                    Ok(None) => ToolResponse::text(format::no_account(address)),
                    Err(e) => ToolResponse::failure(format::account_failure(&e)),
                }
            }
        }
    }
}
