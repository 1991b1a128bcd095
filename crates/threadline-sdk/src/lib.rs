//! Threadline SDK - textile supply-chain client
//!
//! Typed access to a supply-chain contract that tracks textile goods through
//! five tiers:
//!
//! ```text
//! raw material -> fabric -> apparel -> packaged stock -> retail product
//!   (farmer)      (mill)   (manufacturer) (distributor)    (retailer)
//! ```
//!
//! The contract owns every business rule. This crate rebuilds views of chain
//! state on the client by walking id lists and filtering on ownership and
//! availability, and drives the write flows (creation, purchase,
//! registration) that the contract then validates.
//!
//! # Architecture
//!
//! - [`SupplyChainContract`]: the contract seam ([`RpcContract`] over the
//!   JSON-RPC gateway, [`MockContract`] in memory)
//! - [`ContentStore`]: metadata documents and scannable-code targets
//! - [`traversal`]: fetch-and-filter over one tier, ledgers and provenance
//! - [`submission`], [`purchase`], [`gate`]: the write flows and role gate
//! - [`dashboard`], [`history`]: per-role views and event history
//! - [`ThreadlineClient`]: all of the above bound to one wallet context
//!
//! # Example
//!
//! ```rust,ignore
//! use threadline_sdk::{ThreadlineClient, Role};
//!
//! let client = ThreadlineClient::connect(chain_config, pinning_config)?;
//! client.wallet().connect(account);
//!
//! match client.dashboard(Role::Mill).await {
//!     Ok((user, dashboard)) => render(&user, &dashboard),
//!     Err(redirect) => navigate(redirect),
//! }
//! ```

// Entity models, roles, addresses
pub mod models;

// Amounts in wei
pub mod units;

// Contract seam
pub mod contract;

// Metadata storage
pub mod content;

// Core traits
pub mod traits;

// Fetch-and-filter traversal
pub mod traversal;

// Write flows
pub mod submission;
pub mod purchase;
pub mod gate;

// Views
pub mod dashboard;
pub mod history;

// Session state
pub mod wallet;
pub mod route;
pub mod notify;

// Unified client
pub mod client;

// Error types
pub mod error;

pub use client::ThreadlineClient;
pub use content::{ContentStore, MockContentStore, PinningStore};
pub use contract::{CreateRequest, MockContract, RpcContract, SupplyChainContract, TxReceipt};
pub use dashboard::{Dashboard, Section, SectionItems};
pub use error::{ErrorClass, Result, SdkError};
pub use gate::GateDecision;
pub use history::{ChainEvent, EventKind};
pub use models::{
    Address, AddressError, Apparel, ContentId, Fabric, PackagedStock, RawMaterial, RetailProduct,
    Role, TierKind, UserInfo,
};
pub use notify::{Notification, NotificationLevel};
pub use purchase::Purchase;
pub use route::Route;
pub use submission::{
    ApparelForm, Candidate, CreationForm, FabricForm, FormState, PackagedStockForm, RawMaterialForm,
    RetailProductForm, Selection, Submission, Submitter,
};
pub use traits::Tier;
pub use traversal::{ChainSnapshot, Filter, Ledger, Provenance, Traversal};
pub use units::{format_ether, parse_ether, AmountError, Wei};
pub use wallet::WalletContext;

// Re-export from underlying crate
pub use threadline_client::{ChainConfig, PinningConfig, RawEvent};
