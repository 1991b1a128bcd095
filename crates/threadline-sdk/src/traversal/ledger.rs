use super::{traverse, Filter, Traversal};
use crate::contract::SupplyChainContract;
use crate::error::{Result, SdkError};
use crate::models::{
    Address, Apparel, Fabric, PackagedStock, RawMaterial, RetailProduct, Role, TierKind,
};
use crate::traits::Tier;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Entities of one tier keyed by id
#[derive(Debug, Clone)]
pub struct Ledger<T> {
    entries: BTreeMap<u64, T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Tier> Ledger<T> {
    pub fn insert(&mut self, entity: T) {
        self.entries.insert(entity.id(), entity);
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entities in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Entities of this tier that were built from `lower_id`
    pub fn built_from(&self, lower_id: u64) -> impl Iterator<Item = &T> {
        self.entries
            .values()
            .filter(move |e| e.lower_ids().contains(&lower_id))
    }
}

impl<T: Tier> From<Traversal<T>> for Ledger<T> {
    fn from(traversal: Traversal<T>) -> Self {
        let mut ledger = Ledger::default();
        for entity in traversal.items {
            ledger.insert(entity);
        }
        ledger
    }
}

/// Every tier of the chain, loaded in one pass
#[derive(Debug, Clone, Default)]
pub struct ChainSnapshot {
    pub raw_materials: Ledger<RawMaterial>,
    pub fabrics: Ledger<Fabric>,
    pub apparel: Ledger<Apparel>,
    pub packaged_stock: Ledger<PackagedStock>,
    pub retail_products: Ledger<RetailProduct>,
    /// Ids that failed to load, per tier
    pub skipped: Vec<(TierKind, u64)>,
}

impl ChainSnapshot {
    /// Load all five tiers, lowest first
    ///
    /// Tiers load sequentially. An empty tier is fine; a tier whose id list
    /// or entire batch fails aborts the load.
    pub async fn load(contract: &dyn SupplyChainContract) -> Result<Self> {
        let mut snapshot = ChainSnapshot::default();

        let raw = traverse::<RawMaterial>(contract, &Filter::all()).await;
        snapshot.raw_materials = snapshot.absorb(raw)?;
        let fabrics = traverse::<Fabric>(contract, &Filter::all()).await;
        snapshot.fabrics = snapshot.absorb(fabrics)?;
        let apparel = traverse::<Apparel>(contract, &Filter::all()).await;
        snapshot.apparel = snapshot.absorb(apparel)?;
        let stock = traverse::<PackagedStock>(contract, &Filter::all()).await;
        snapshot.packaged_stock = snapshot.absorb(stock)?;
        let retail = traverse::<RetailProduct>(contract, &Filter::all()).await;
        snapshot.retail_products = snapshot.absorb(retail)?;

        tracing::info!(
            raw_materials = snapshot.raw_materials.len(),
            fabrics = snapshot.fabrics.len(),
            apparel = snapshot.apparel.len(),
            packaged_stock = snapshot.packaged_stock.len(),
            retail_products = snapshot.retail_products.len(),
            skipped = snapshot.skipped.len(),
            "Chain snapshot loaded"
        );
        Ok(snapshot)
    }

    fn absorb<T: Tier>(&mut self, result: Result<Traversal<T>>) -> Result<Ledger<T>> {
        let traversal = result?;
        self.skipped
            .extend(traversal.skipped.iter().map(|&id| (T::KIND, id)));
        Ok(traversal.into())
    }

    /// Walk a retail product down to the raw materials it was made from
    ///
    /// Ids referenced by a tier but absent from the snapshot are collected in
    /// [`Provenance::missing`] instead of failing the walk.
    pub fn provenance(&self, retail_product_id: u64) -> Result<Provenance> {
        let retail_product = self
            .retail_products
            .get(retail_product_id)
            .cloned()
            .ok_or_else(|| SdkError::NotFound(format!("retail product {}", retail_product_id)))?;

        let mut missing = Vec::new();
        let packaged_stock = collect(
            &self.packaged_stock,
            retail_product.lower_ids().iter().copied(),
            &mut missing,
        );
        let apparel = collect(
            &self.apparel,
            packaged_stock.iter().flat_map(|s| s.lower_ids().iter().copied()),
            &mut missing,
        );
        let fabrics = collect(
            &self.fabrics,
            apparel.iter().flat_map(|a| a.lower_ids().iter().copied()),
            &mut missing,
        );
        let raw_materials = collect(
            &self.raw_materials,
            fabrics.iter().flat_map(|f| f.lower_ids().iter().copied()),
            &mut missing,
        );

        Ok(Provenance {
            retail_product,
            packaged_stock,
            apparel,
            fabrics,
            raw_materials,
            missing,
        })
    }
}

fn collect<T: Tier>(
    ledger: &Ledger<T>,
    ids: impl Iterator<Item = u64>,
    missing: &mut Vec<(TierKind, u64)>,
) -> Vec<T> {
    let ids: BTreeSet<u64> = ids.collect();
    let mut found = Vec::with_capacity(ids.len());
    for id in ids {
        match ledger.get(id) {
            Some(entity) => found.push(entity.clone()),
            None => missing.push((T::KIND, id)),
        }
    }
    found
}

/// Chain of custody behind one retail product
#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    pub retail_product: RetailProduct,
    pub packaged_stock: Vec<PackagedStock>,
    pub apparel: Vec<Apparel>,
    pub fabrics: Vec<Fabric>,
    pub raw_materials: Vec<RawMaterial>,
    /// Referenced ids that were not in the snapshot
    pub missing: Vec<(TierKind, u64)>,
}

impl Provenance {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Every distinct account that touched the product, by role
    pub fn participants(&self) -> BTreeSet<(Role, Address)> {
        let mut out = BTreeSet::new();
        let mut add = |role: Role, address: Address| {
            if !address.is_zero() {
                out.insert((role, address));
            }
        };

        for raw in &self.raw_materials {
            add(Role::Farmer, raw.farmer);
        }
        for fabric in &self.fabrics {
            add(Role::Mill, fabric.mill);
        }
        for apparel in &self.apparel {
            add(Role::Manufacturer, apparel.manufacturer);
        }
        for stock in &self.packaged_stock {
            add(Role::Distributor, stock.distributor);
        }
        add(Role::Retailer, self.retail_product.retailer);
        add(Role::Customer, self.retail_product.customer);
        out
    }
}
