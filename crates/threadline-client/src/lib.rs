//! HTTP clients for the Threadline supply-chain deployment
//!
//! Two external collaborators sit behind this crate:
//!
//! - the **contract gateway**, a JSON-RPC 2.0 endpoint that forwards read calls,
//!   write transactions and event-log queries to the textile supply-chain
//!   contract, and
//! - the **pinning service**, which stores JSON metadata and hands back a
//!   content id that the chain entities carry as their `qrCode`.
//!
//! Neither client knows anything about raw materials or fabrics; typed access
//! lives in `threadline-sdk`.
//!
//! # Example
//!
//! ```rust,no_run
//! use threadline_client::{ChainConfig, ContractClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ContractClient::new(ChainConfig {
//!     rpc_url: "http://localhost:8545".into(),
//!     contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into(),
//!     ..Default::default()
//! })?;
//!
//! let ids = client.call("getAllRawMaterialIds", vec![]).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod pinning;
pub mod types;

// Re-export main types
pub use client::ContractClient;
pub use error::{ClientError, Result};
pub use pinning::PinningClient;
pub use types::*;
