use crate::contract::SupplyChainContract;
use crate::error::Result;
use crate::models::{
    Address, Apparel, ContentId, Fabric, PackagedStock, RawMaterial, RetailProduct, TierKind,
};
use crate::units::Wei;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Common view over the five chain-of-custody entities
///
/// Every tier has an originating account, a next-role account that stays the
/// zero address until the next role takes it over, an availability flag, and
/// the ids of the tier below it.
///
/// # Example
///
/// ```rust,ignore
/// use threadline_sdk::{Tier, RawMaterial};
///
/// let raw = RawMaterial::fetch(&contract, 7).await?;
/// if raw.is_available() {
///     println!("{} listed at {}", raw.name(), raw.price());
/// }
/// ```
#[async_trait]
pub trait Tier: Sized + Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const KIND: TierKind;

    /// Fetch one entity by id through the contract
    async fn fetch(contract: &dyn SupplyChainContract, id: u64) -> Result<Self>;

    fn id(&self) -> u64;

    /// Account that created the entity
    fn origin(&self) -> Address;

    /// Account of the next role, zero until taken over
    fn next_owner(&self) -> Address;

    fn is_available(&self) -> bool;

    /// Ids of the tier below this one
    fn lower_ids(&self) -> &[u64];

    fn price(&self) -> Wei;

    fn name(&self) -> &str;

    fn qr_code(&self) -> &ContentId;

    /// Creation time, unix seconds
    fn timestamp(&self) -> u64;

    /// Whether the next role already consumed this entity into its own tier.
    /// Tiers without such a flag report `false`.
    fn used_for_next_tier(&self) -> bool {
        false
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.timestamp()).ok()?, 0)
    }
}

#[async_trait]
impl Tier for RawMaterial {
    const KIND: TierKind = TierKind::RawMaterial;

    async fn fetch(contract: &dyn SupplyChainContract, id: u64) -> Result<Self> {
        contract.raw_material(id).await
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn origin(&self) -> Address {
        self.farmer
    }

    fn next_owner(&self) -> Address {
        self.mill
    }

    fn is_available(&self) -> bool {
        self.is_available
    }

    fn lower_ids(&self) -> &[u64] {
        &[]
    }

    fn price(&self) -> Wei {
        self.price
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn qr_code(&self) -> &ContentId {
        &self.qr_code
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn used_for_next_tier(&self) -> bool {
        self.is_used_for_fabric
    }
}

#[async_trait]
impl Tier for Fabric {
    const KIND: TierKind = TierKind::Fabric;

    async fn fetch(contract: &dyn SupplyChainContract, id: u64) -> Result<Self> {
        contract.fabric(id).await
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn origin(&self) -> Address {
        self.mill
    }

    fn next_owner(&self) -> Address {
        self.manufacturer
    }

    fn is_available(&self) -> bool {
        self.is_available
    }

    fn lower_ids(&self) -> &[u64] {
        &self.raw_material_ids
    }

    fn price(&self) -> Wei {
        self.price
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn qr_code(&self) -> &ContentId {
        &self.qr_code
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn used_for_next_tier(&self) -> bool {
        self.is_used_for_apparel
    }
}

#[async_trait]
impl Tier for Apparel {
    const KIND: TierKind = TierKind::Apparel;

    async fn fetch(contract: &dyn SupplyChainContract, id: u64) -> Result<Self> {
        contract.apparel(id).await
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn origin(&self) -> Address {
        self.manufacturer
    }

    fn next_owner(&self) -> Address {
        self.distributor
    }

    fn is_available(&self) -> bool {
        self.is_available
    }

    fn lower_ids(&self) -> &[u64] {
        &self.fabric_ids
    }

    fn price(&self) -> Wei {
        self.price
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn qr_code(&self) -> &ContentId {
        &self.qr_code
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn used_for_next_tier(&self) -> bool {
        self.is_used_for_packaged_stock
    }
}

#[async_trait]
impl Tier for PackagedStock {
    const KIND: TierKind = TierKind::PackagedStock;

    async fn fetch(contract: &dyn SupplyChainContract, id: u64) -> Result<Self> {
        contract.packaged_stock(id).await
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn origin(&self) -> Address {
        self.distributor
    }

    fn next_owner(&self) -> Address {
        self.retailer
    }

    fn is_available(&self) -> bool {
        self.is_available
    }

    fn lower_ids(&self) -> &[u64] {
        &self.apparel_ids
    }

    fn price(&self) -> Wei {
        self.price
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn qr_code(&self) -> &ContentId {
        &self.qr_code
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

#[async_trait]
impl Tier for RetailProduct {
    const KIND: TierKind = TierKind::RetailProduct;

    async fn fetch(contract: &dyn SupplyChainContract, id: u64) -> Result<Self> {
        contract.retail_product(id).await
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn origin(&self) -> Address {
        self.retailer
    }

    fn next_owner(&self) -> Address {
        self.customer
    }

    fn is_available(&self) -> bool {
        self.is_available
    }

    fn lower_ids(&self) -> &[u64] {
        &self.packaged_stock_ids
    }

    fn price(&self) -> Wei {
        self.price
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn qr_code(&self) -> &ContentId {
        &self.qr_code
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn used_for_next_tier(&self) -> bool {
        self.is_used_for_customer
    }
}
