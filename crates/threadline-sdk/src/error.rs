//! Error types for the Threadline SDK

use crate::models::{Role, TierKind};
use crate::units::AmountError;
use thiserror::Error;
use threadline_client::ClientError;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK error types
#[derive(Error, Debug)]
pub enum SdkError {
    /// Gateway or node unreachable, bad status, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// The contract rejected the call
    #[error("Contract error {code}: {message}")]
    Contract { code: i64, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form or argument rejected before any network call
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Connected account is not allowed into the area
    #[error("Access denied: {required} role required, have {actual}")]
    Unauthorized { required: Role, actual: String },

    /// No wallet connected
    #[error("No wallet connected")]
    NotConnected,

    /// Every detail fetch of a non-empty batch failed
    #[error("Could not load any {kind} records ({failed} fetches failed)")]
    BatchFailed { kind: TierKind, failed: usize },

    /// Content store failure (upload, bad content id)
    #[error("Content store error: {0}")]
    ContentStore(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error classes shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transient notification, operation abandoned, user may retry
    Network,
    /// Inline feedback, no side effect happened
    Validation,
    /// Fail-closed redirect to login
    Authorization,
    /// Whole batch failed; view degrades to empty
    Batch,
}

impl SdkError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SdkError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            SdkError::Validation { .. } => ErrorClass::Validation,
            SdkError::Unauthorized { .. } | SdkError::NotConnected => ErrorClass::Authorization,
            SdkError::BatchFailed { .. } => ErrorClass::Batch,
            SdkError::Network(_)
            | SdkError::Contract { .. }
            | SdkError::Serialization(_)
            | SdkError::NotFound(_)
            | SdkError::ContentStore(_)
            | SdkError::Config(_) => ErrorClass::Network,
        }
    }

    /// Single user-facing message for this failure
    pub fn notification(&self) -> crate::notify::Notification {
        use crate::notify::Notification;

        match self {
            SdkError::Validation { field, reason } => {
                Notification::warning(format!("{}: {}", field, reason))
            }
            SdkError::NotConnected => Notification::warning("Connect a wallet to continue"),
            SdkError::Unauthorized { required, .. } => {
                Notification::warning(format!("This area is for {} accounts", required))
            }
            SdkError::BatchFailed { kind, .. } => {
                Notification::error(format!("Could not load {} records, try refreshing", kind))
            }
            SdkError::Contract { message, .. } => {
                Notification::error(format!("Transaction failed: {}", message))
            }
            SdkError::ContentStore(_) => {
                Notification::error("Could not upload metadata, try again")
            }
            other => Notification::error(format!("Request failed: {}", other)),
        }
    }
}

impl From<ClientError> for SdkError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rpc { code, message } => SdkError::Contract { code, message },
            ClientError::Json(e) => SdkError::Serialization(e.to_string()),
            ClientError::InvalidResponse(msg) => SdkError::Serialization(msg),
            ClientError::NotFound(what) => SdkError::NotFound(what),
            ClientError::InvalidCid { .. } => SdkError::ContentStore(err.to_string()),
            ClientError::Config(msg) => SdkError::Config(msg),
            other => SdkError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<AmountError> for SdkError {
    fn from(err: AmountError) -> Self {
        SdkError::validation("price", err.to_string())
    }
}
