//! Mirrors of the supply-chain contract's structs
//!
//! One canonical schema per entity. Field names follow the contract's ABI in
//! camelCase on the wire.

mod address;
mod content_id;
mod entities;
mod role;
pub(crate) mod serde_util;

pub use address::{Address, AddressError};
pub use content_id::ContentId;
pub use entities::{Apparel, Fabric, PackagedStock, RawMaterial, RetailProduct, UserInfo};
pub use role::{Role, TierKind};
