//! The supply-chain contract seam
//!
//! [`SupplyChainContract`] is everything this crate needs from the chain:
//! per-tier id lists and entity reads, profile reads, the creation / purchase /
//! registration writes, and historical event logs. [`RpcContract`] talks to the
//! JSON-RPC gateway; [`MockContract`] keeps state in memory for tests.

mod mock;
mod rpc;

pub use mock::MockContract;
pub use rpc::RpcContract;

use crate::error::Result;
use crate::models::{
    Address, Apparel, ContentId, Fabric, PackagedStock, RawMaterial, RetailProduct, Role, TierKind,
    UserInfo,
};
use crate::units::Wei;
use async_trait::async_trait;
use serde::Serialize;
use threadline_client::RawEvent;

pub use threadline_client::TxReceipt;

/// Arguments of one creation write call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CreateRequest {
    RawMaterial {
        name: String,
        raw_material_type: String,
        quantity: u64,
        price: Wei,
        qr_code: ContentId,
    },
    Fabric {
        raw_material_ids: Vec<u64>,
        name: String,
        composition: String,
        price: Wei,
        qr_code: ContentId,
    },
    Apparel {
        fabric_ids: Vec<u64>,
        name: String,
        category: String,
        size: String,
        price: Wei,
        qr_code: ContentId,
    },
    PackagedStock {
        apparel_ids: Vec<u64>,
        name: String,
        quantity: u64,
        price: Wei,
        qr_code: ContentId,
    },
    RetailProduct {
        packaged_stock_ids: Vec<u64>,
        name: String,
        brand: String,
        price: Wei,
        qr_code: ContentId,
    },
}

impl CreateRequest {
    pub fn kind(&self) -> TierKind {
        match self {
            CreateRequest::RawMaterial { .. } => TierKind::RawMaterial,
            CreateRequest::Fabric { .. } => TierKind::Fabric,
            CreateRequest::Apparel { .. } => TierKind::Apparel,
            CreateRequest::PackagedStock { .. } => TierKind::PackagedStock,
            CreateRequest::RetailProduct { .. } => TierKind::RetailProduct,
        }
    }

    pub fn lower_ids(&self) -> &[u64] {
        match self {
            CreateRequest::RawMaterial { .. } => &[],
            CreateRequest::Fabric { raw_material_ids, .. } => raw_material_ids,
            CreateRequest::Apparel { fabric_ids, .. } => fabric_ids,
            CreateRequest::PackagedStock { apparel_ids, .. } => apparel_ids,
            CreateRequest::RetailProduct {
                packaged_stock_ids, ..
            } => packaged_stock_ids,
        }
    }

    pub fn qr_code(&self) -> &ContentId {
        match self {
            CreateRequest::RawMaterial { qr_code, .. }
            | CreateRequest::Fabric { qr_code, .. }
            | CreateRequest::Apparel { qr_code, .. }
            | CreateRequest::PackagedStock { qr_code, .. }
            | CreateRequest::RetailProduct { qr_code, .. } => qr_code,
        }
    }

    /// Replace the content id carried by the request
    pub fn with_qr_code(mut self, content_id: ContentId) -> Self {
        match &mut self {
            CreateRequest::RawMaterial { qr_code, .. }
            | CreateRequest::Fabric { qr_code, .. }
            | CreateRequest::Apparel { qr_code, .. }
            | CreateRequest::PackagedStock { qr_code, .. }
            | CreateRequest::RetailProduct { qr_code, .. } => *qr_code = content_id,
        }
        self
    }
}

/// Read/write access to the supply-chain contract
///
/// Implementations must not retry; callers decide what a failure means.
#[async_trait]
pub trait SupplyChainContract: Send + Sync {
    /// All ids of one tier, in contract order
    async fn all_ids(&self, kind: TierKind) -> Result<Vec<u64>>;

    async fn raw_material(&self, id: u64) -> Result<RawMaterial>;

    async fn fabric(&self, id: u64) -> Result<Fabric>;

    async fn apparel(&self, id: u64) -> Result<Apparel>;

    async fn packaged_stock(&self, id: u64) -> Result<PackagedStock>;

    async fn retail_product(&self, id: u64) -> Result<RetailProduct>;

    /// Profile registered for `address`
    async fn user_info(&self, address: Address) -> Result<UserInfo>;

    /// Register `from` under `role`; `location` is stored alongside the profile
    async fn register_user(
        &self,
        from: Address,
        name: &str,
        location: &str,
        role: Role,
    ) -> Result<TxReceipt>;

    /// Create one entity from `from`'s account
    async fn create(&self, from: Address, request: CreateRequest) -> Result<TxReceipt>;

    /// Buy entity `id` of tier `kind`, attaching `payment`
    async fn buy(&self, from: Address, kind: TierKind, id: u64, payment: Wei) -> Result<TxReceipt>;

    /// Decoded event logs since `from_block`, oldest first
    async fn events(&self, from_block: u64) -> Result<Vec<RawEvent>>;
}
