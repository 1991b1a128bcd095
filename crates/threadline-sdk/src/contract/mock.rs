//! In-memory contract for testing.

use super::{CreateRequest, SupplyChainContract, TxReceipt};
use crate::error::{Result, SdkError};
use crate::models::{
    Address, Apparel, Fabric, PackagedStock, RawMaterial, RetailProduct, Role, TierKind, UserInfo,
};
use crate::units::Wei;
use async_trait::async_trait;
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use threadline_client::RawEvent;

const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

#[derive(Default)]
struct State {
    raw_materials: BTreeMap<u64, RawMaterial>,
    fabrics: BTreeMap<u64, Fabric>,
    apparel: BTreeMap<u64, Apparel>,
    packaged_stock: BTreeMap<u64, PackagedStock>,
    retail_products: BTreeMap<u64, RetailProduct>,
    users: HashMap<Address, UserInfo>,
    events: Vec<RawEvent>,
    block: u64,
    failing: HashSet<(TierKind, u64)>,
    failing_lists: HashSet<TierKind>,
    fail_user_info: bool,
    fail_writes: bool,
}

impl State {
    fn next_id(&self, kind: TierKind) -> u64 {
        let len = match kind {
            TierKind::RawMaterial => self.raw_materials.len(),
            TierKind::Fabric => self.fabrics.len(),
            TierKind::Apparel => self.apparel.len(),
            TierKind::PackagedStock => self.packaged_stock.len(),
            TierKind::RetailProduct => self.retail_products.len(),
        };
        len as u64 + 1
    }

    fn mine(&mut self, event: &str, args: serde_json::Value) -> TxReceipt {
        self.block += 1;
        let receipt = TxReceipt {
            transaction_hash: format!("0x{:064x}", self.block),
            block_number: self.block,
            status: true,
        };
        let args = match args {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        self.events.push(RawEvent {
            event: event.to_string(),
            args,
            block_number: self.block,
            log_index: 0,
            transaction_hash: receipt.transaction_hash.clone(),
            timestamp: Some(self.now()),
        });
        receipt
    }

    fn now(&self) -> u64 {
        GENESIS_TIMESTAMP + self.block * 12
    }

    fn require_role(&self, from: Address, role: Role) -> Result<()> {
        match self.users.get(&from).and_then(|u| u.role) {
            Some(actual) if actual == role => Ok(()),
            _ => Err(revert(format!("caller is not a {}", role))),
        }
    }
}

fn revert(message: impl Into<String>) -> SdkError {
    SdkError::Contract {
        code: 3,
        message: format!("execution reverted: {}", message.into()),
    }
}

/// Mock contract for testing.
///
/// Emulates the contract's ownership rules in memory, counts detail fetches
/// and write calls, and can be told to fail specific reads.
#[derive(Default)]
pub struct MockContract {
    state: Mutex<State>,
    id_list_calls: AtomicUsize,
    detail_fetches: AtomicUsize,
    user_info_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl MockContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user directly, without a transaction
    pub fn with_user(self, address: Address, name: &str, role: Role) -> Self {
        self.lock().users.insert(
            address,
            UserInfo {
                name: name.to_string(),
                role: Some(role),
                location: String::new(),
                registration_date: GENESIS_TIMESTAMP,
            },
        );
        self
    }

    /// Make the detail fetch of one id fail
    pub fn fail_fetch(&self, kind: TierKind, id: u64) {
        self.lock().failing.insert((kind, id));
    }

    /// Make the id-list read of one tier fail
    pub fn fail_id_list(&self, kind: TierKind) {
        self.lock().failing_lists.insert(kind);
    }

    pub fn fail_user_info(&self) {
        self.lock().fail_user_info = true;
    }

    pub fn fail_writes(&self) {
        self.lock().fail_writes = true;
    }

    /// Number of `all_ids` calls so far
    pub fn id_list_calls(&self) -> usize {
        self.id_list_calls.load(Ordering::SeqCst)
    }

    /// Number of per-id entity reads so far
    pub fn detail_fetches(&self) -> usize {
        self.detail_fetches.load(Ordering::SeqCst)
    }

    pub fn user_info_calls(&self) -> usize {
        self.user_info_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Total network round trips of any kind
    pub fn total_calls(&self) -> usize {
        self.id_list_calls() + self.detail_fetches() + self.user_info_calls() + self.write_calls()
    }

    pub fn reset_counters(&self) {
        self.id_list_calls.store(0, Ordering::SeqCst);
        self.detail_fetches.store(0, Ordering::SeqCst);
        self.user_info_calls.store(0, Ordering::SeqCst);
        self.write_calls.store(0, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read<T: Clone>(
        &self,
        kind: TierKind,
        id: u64,
        table: impl FnOnce(&State) -> &BTreeMap<u64, T>,
    ) -> Result<T> {
        self.detail_fetches.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        if state.failing.contains(&(kind, id)) {
            return Err(SdkError::Network(format!("injected failure for {} {}", kind, id)));
        }
        table(&state)
            .get(&id)
            .cloned()
            .ok_or_else(|| revert(format!("{} {} does not exist", kind, id)))
    }

    fn begin_write(&self) -> Result<std::sync::MutexGuard<'_, State>> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        if state.fail_writes {
            return Err(SdkError::Network("injected write failure".into()));
        }
        Ok(state)
    }
}

#[async_trait]
impl SupplyChainContract for MockContract {
    async fn all_ids(&self, kind: TierKind) -> Result<Vec<u64>> {
        self.id_list_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        if state.failing_lists.contains(&kind) {
            return Err(SdkError::Network(format!("injected failure listing {}", kind)));
        }
        let ids = match kind {
            TierKind::RawMaterial => state.raw_materials.keys().copied().collect(),
            TierKind::Fabric => state.fabrics.keys().copied().collect(),
            TierKind::Apparel => state.apparel.keys().copied().collect(),
            TierKind::PackagedStock => state.packaged_stock.keys().copied().collect(),
            TierKind::RetailProduct => state.retail_products.keys().copied().collect(),
        };
        Ok(ids)
    }

    async fn raw_material(&self, id: u64) -> Result<RawMaterial> {
        self.read(TierKind::RawMaterial, id, |s| &s.raw_materials)
    }

    async fn fabric(&self, id: u64) -> Result<Fabric> {
        self.read(TierKind::Fabric, id, |s| &s.fabrics)
    }

    async fn apparel(&self, id: u64) -> Result<Apparel> {
        self.read(TierKind::Apparel, id, |s| &s.apparel)
    }

    async fn packaged_stock(&self, id: u64) -> Result<PackagedStock> {
        self.read(TierKind::PackagedStock, id, |s| &s.packaged_stock)
    }

    async fn retail_product(&self, id: u64) -> Result<RetailProduct> {
        self.read(TierKind::RetailProduct, id, |s| &s.retail_products)
    }

    async fn user_info(&self, address: Address) -> Result<UserInfo> {
        self.user_info_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        if state.fail_user_info {
            return Err(SdkError::Network("injected user info failure".into()));
        }
        Ok(state.users.get(&address).cloned().unwrap_or(UserInfo {
            name: String::new(),
            role: None,
            location: String::new(),
            registration_date: 0,
        }))
    }

    async fn register_user(
        &self,
        from: Address,
        name: &str,
        location: &str,
        role: Role,
    ) -> Result<TxReceipt> {
        let mut state = self.begin_write()?;
        if state.users.get(&from).is_some_and(UserInfo::is_registered) {
            return Err(revert("user already registered"));
        }
        let registration_date = state.now();
        state.users.insert(
            from,
            UserInfo {
                name: name.to_string(),
                role: Some(role),
                location: location.to_string(),
                registration_date,
            },
        );
        Ok(state.mine(
            "UserRegistered",
            json!({ "user": from, "name": name, "role": role.as_str() }),
        ))
    }

    async fn create(&self, from: Address, request: CreateRequest) -> Result<TxReceipt> {
        let mut state = self.begin_write()?;
        let kind = request.kind();
        state.require_role(from, kind.origin_role())?;

        let id = state.next_id(kind);
        let timestamp = state.now();

        match request {
            CreateRequest::RawMaterial {
                name,
                raw_material_type,
                quantity,
                price,
                qr_code,
            } => {
                state.raw_materials.insert(
                    id,
                    RawMaterial {
                        id,
                        farmer: from,
                        mill: Address::ZERO,
                        qr_code,
                        is_available: true,
                        timestamp,
                        name,
                        raw_material_type,
                        quantity,
                        price,
                        is_used_for_fabric: false,
                    },
                );
            }
            CreateRequest::Fabric {
                raw_material_ids,
                name,
                composition,
                price,
                qr_code,
            } => {
                for raw_id in &raw_material_ids {
                    match state.raw_materials.get(raw_id) {
                        Some(raw) if raw.mill == from && !raw.is_used_for_fabric => {}
                        _ => {
                            return Err(revert(format!(
                                "raw material {} not held by caller",
                                raw_id
                            )))
                        }
                    }
                }
                for raw_id in &raw_material_ids {
                    if let Some(raw) = state.raw_materials.get_mut(raw_id) {
                        raw.is_used_for_fabric = true;
                    }
                }
                state.fabrics.insert(
                    id,
                    Fabric {
                        id,
                        mill: from,
                        manufacturer: Address::ZERO,
                        qr_code,
                        raw_material_ids,
                        is_available: true,
                        timestamp,
                        name,
                        composition,
                        price,
                        is_used_for_apparel: false,
                    },
                );
            }
            CreateRequest::Apparel {
                fabric_ids,
                name,
                category,
                size,
                price,
                qr_code,
            } => {
                for fabric_id in &fabric_ids {
                    match state.fabrics.get(fabric_id) {
                        Some(fabric)
                            if fabric.manufacturer == from && !fabric.is_used_for_apparel => {}
                        _ => return Err(revert(format!("fabric {} not held by caller", fabric_id))),
                    }
                }
                for fabric_id in &fabric_ids {
                    if let Some(fabric) = state.fabrics.get_mut(fabric_id) {
                        fabric.is_used_for_apparel = true;
                    }
                }
                state.apparel.insert(
                    id,
                    Apparel {
                        id,
                        manufacturer: from,
                        distributor: Address::ZERO,
                        qr_code,
                        fabric_ids,
                        is_available: true,
                        timestamp,
                        name,
                        category,
                        size,
                        price,
                        is_used_for_packaged_stock: false,
                    },
                );
            }
            CreateRequest::PackagedStock {
                apparel_ids,
                name,
                quantity,
                price,
                qr_code,
            } => {
                if let Some(id) = apparel_ids
                    .iter()
                    .find(|id| !state.apparel.get(*id).is_some_and(|a| a.is_available))
                {
                    return Err(revert(format!("apparel {} not available", id)));
                }
                for apparel_id in &apparel_ids {
                    if let Some(apparel) = state.apparel.get_mut(apparel_id) {
                        apparel.distributor = from;
                        apparel.is_available = false;
                        apparel.is_used_for_packaged_stock = true;
                    }
                }
                state.packaged_stock.insert(
                    id,
                    PackagedStock {
                        id,
                        distributor: from,
                        retailer: Address::ZERO,
                        qr_code,
                        apparel_ids,
                        is_available: true,
                        timestamp,
                        name,
                        quantity,
                        price,
                    },
                );
            }
            CreateRequest::RetailProduct {
                packaged_stock_ids,
                name,
                brand,
                price,
                qr_code,
            } => {
                for stock_id in &packaged_stock_ids {
                    match state.packaged_stock.get(stock_id) {
                        Some(stock) if stock.retailer == from => {}
                        _ => {
                            return Err(revert(format!(
                                "packaged stock {} not held by caller",
                                stock_id
                            )))
                        }
                    }
                }
                state.retail_products.insert(
                    id,
                    RetailProduct {
                        id,
                        retailer: from,
                        customer: Address::ZERO,
                        qr_code,
                        packaged_stock_ids,
                        is_available: true,
                        timestamp,
                        name,
                        price,
                        brand,
                        is_used_for_customer: false,
                    },
                );
            }
        }

        let event = format!("{}Added", kind.contract_name());
        Ok(state.mine(&event, json!({ "id": id.to_string(), "creator": from })))
    }

    async fn buy(&self, from: Address, kind: TierKind, id: u64, payment: Wei) -> Result<TxReceipt> {
        let mut state = self.begin_write()?;
        if !kind.is_purchasable() {
            return Err(revert(format!("{} cannot be bought", kind)));
        }
        state.require_role(from, kind.next_role())?;

        fn settle(available: &mut bool, price: Wei, payment: Wei) -> Result<()> {
            if !*available {
                return Err(revert("item not available"));
            }
            if price != payment {
                return Err(revert("incorrect payment amount"));
            }
            *available = false;
            Ok(())
        }

        let missing = || revert(format!("{} {} does not exist", kind, id));
        let seller = match kind {
            TierKind::RawMaterial => {
                let raw = state.raw_materials.get_mut(&id).ok_or_else(missing)?;
                settle(&mut raw.is_available, raw.price, payment)?;
                raw.mill = from;
                raw.farmer
            }
            TierKind::Fabric => {
                let fabric = state.fabrics.get_mut(&id).ok_or_else(missing)?;
                settle(&mut fabric.is_available, fabric.price, payment)?;
                fabric.manufacturer = from;
                fabric.mill
            }
            TierKind::PackagedStock => {
                let stock = state.packaged_stock.get_mut(&id).ok_or_else(missing)?;
                settle(&mut stock.is_available, stock.price, payment)?;
                stock.retailer = from;
                stock.distributor
            }
            TierKind::RetailProduct => {
                let product = state.retail_products.get_mut(&id).ok_or_else(missing)?;
                settle(&mut product.is_available, product.price, payment)?;
                product.customer = from;
                product.is_used_for_customer = true;
                product.retailer
            }
            TierKind::Apparel => unreachable!("rejected above"),
        };

        let event = format!("{}Bought", kind.contract_name());
        Ok(state.mine(
            &event,
            json!({ "id": id.to_string(), "buyer": from, "seller": seller, "price": payment }),
        ))
    }

    async fn events(&self, from_block: u64) -> Result<Vec<RawEvent>> {
        let state = self.lock();
        Ok(state
            .events
            .iter()
            .filter(|e| e.block_number >= from_block)
            .cloned()
            .collect())
    }
}
