//! Error types for the gateway and pinning clients

use thiserror::Error;

/// Transport-level client error
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The gateway returned a JSON-RPC error object (revert, bad params, ...)
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response was well-formed JSON but not what the protocol promises
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Content id failed to parse
    #[error("Invalid content id {value}: {reason}")]
    InvalidCid { value: String, reason: String },

    /// Client could not be constructed from its configuration
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
