//! Types for the contract gateway and pinning APIs

use serde::{Deserialize, Serialize};

/// Contract gateway configuration
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint of the contract gateway
    pub rpc_url: String,
    /// Deployed supply-chain contract address
    pub contract_address: String,
    /// Optional bearer token for the gateway
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: "0x0000000000000000000000000000000000000000".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Pinning service configuration
#[derive(Debug, Clone)]
pub struct PinningConfig {
    /// Base URL of the pinning API
    pub pinning_url: String,
    /// Public gateway that serves pinned content
    pub gateway_url: String,
    /// JWT for the pinning API
    pub jwt: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            pinning_url: "https://api.pinata.cloud".to_string(),
            gateway_url: "https://gateway.pinata.cloud".to_string(),
            jwt: None,
            timeout_secs: 30,
        }
    }
}

// ==================== JSON-RPC envelope ====================

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: P,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Params for a read-only contract call
#[derive(Debug, Clone, Serialize)]
pub struct CallParams<'a> {
    pub to: &'a str,
    pub function: &'a str,
    pub args: Vec<serde_json::Value>,
}

/// Params for a state-changing transaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendParams<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub function: &'a str,
    pub args: Vec<serde_json::Value>,
    /// Attached payment in wei, decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Params for an event-log query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsParams<'a> {
    pub to: &'a str,
    pub from_block: u64,
}

/// Mined transaction receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
    /// `true` when the transaction did not revert
    pub status: bool,
}

/// Decoded contract event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Event name, e.g. `RawMaterialAdded`
    pub event: String,
    /// Named event arguments
    #[serde(default)]
    pub args: serde_json::Map<String, serde_json::Value>,
    pub block_number: u64,
    /// Position of the log within its block
    #[serde(default)]
    pub log_index: u64,
    pub transaction_hash: String,
    /// Block timestamp in unix seconds, when the gateway resolves it
    #[serde(default)]
    pub timestamp: Option<u64>,
}

// ==================== Pinning API ====================

/// Request body for `pinJSONToIPFS`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinJsonRequest<'a> {
    pub pinata_content: &'a serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinata_metadata: Option<PinMetadata<'a>>,
}

/// Optional pin metadata
#[derive(Debug, Clone, Serialize)]
pub struct PinMetadata<'a> {
    pub name: &'a str,
}

/// Response from `pinJSONToIPFS`
#[derive(Debug, Clone, Deserialize)]
pub struct PinJsonResponse {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pub pin_size: u64,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
}
