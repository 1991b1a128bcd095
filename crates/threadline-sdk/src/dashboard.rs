//! Role dashboards
//!
//! A dashboard is a fixed list of sections per role, each one a traversal of
//! a single tier. Sections load one after another. A section that fails turns
//! into an empty list plus a notification; the remaining sections still load.

use crate::contract::SupplyChainContract;
use crate::error::Result;
use crate::gate::{check_role, GateDecision};
use crate::models::{
    Address, Apparel, Fabric, PackagedStock, RawMaterial, RetailProduct, Role, TierKind, UserInfo,
};
use crate::notify::Notification;
use crate::route::Route;
use crate::traits::Tier;
use crate::traversal::{traverse, Filter, Traversal};
use crate::wallet::WalletContext;
use serde::Serialize;

/// Entities shown in one section
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "kebab-case")]
pub enum SectionItems {
    RawMaterial(Vec<RawMaterial>),
    Fabric(Vec<Fabric>),
    Apparel(Vec<Apparel>),
    PackagedStock(Vec<PackagedStock>),
    RetailProduct(Vec<RetailProduct>),
}

impl SectionItems {
    pub fn kind(&self) -> TierKind {
        match self {
            SectionItems::RawMaterial(_) => TierKind::RawMaterial,
            SectionItems::Fabric(_) => TierKind::Fabric,
            SectionItems::Apparel(_) => TierKind::Apparel,
            SectionItems::PackagedStock(_) => TierKind::PackagedStock,
            SectionItems::RetailProduct(_) => TierKind::RetailProduct,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SectionItems::RawMaterial(v) => v.len(),
            SectionItems::Fabric(v) => v.len(),
            SectionItems::Apparel(v) => v.len(),
            SectionItems::PackagedStock(v) => v.len(),
            SectionItems::RetailProduct(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty(kind: TierKind) -> Self {
        match kind {
            TierKind::RawMaterial => SectionItems::RawMaterial(Vec::new()),
            TierKind::Fabric => SectionItems::Fabric(Vec::new()),
            TierKind::Apparel => SectionItems::Apparel(Vec::new()),
            TierKind::PackagedStock => SectionItems::PackagedStock(Vec::new()),
            TierKind::RetailProduct => SectionItems::RetailProduct(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub items: SectionItems,
    /// Ids left out because their fetch failed
    pub skipped: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub role: Role,
    pub account: Address,
    pub sections: Vec<Section>,
    pub notifications: Vec<Notification>,
}

impl Dashboard {
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

enum Query {
    RawMaterial(Filter<RawMaterial>),
    Fabric(Filter<Fabric>),
    Apparel(Filter<Apparel>),
    PackagedStock(Filter<PackagedStock>),
    RetailProduct(Filter<RetailProduct>),
}

impl Query {
    fn kind(&self) -> TierKind {
        match self {
            Query::RawMaterial(_) => TierKind::RawMaterial,
            Query::Fabric(_) => TierKind::Fabric,
            Query::Apparel(_) => TierKind::Apparel,
            Query::PackagedStock(_) => TierKind::PackagedStock,
            Query::RetailProduct(_) => TierKind::RetailProduct,
        }
    }

    async fn run(&self, contract: &dyn SupplyChainContract) -> Result<(SectionItems, Vec<u64>)> {
        fn split<T>(t: Traversal<T>, wrap: fn(Vec<T>) -> SectionItems) -> (SectionItems, Vec<u64>) {
            (wrap(t.items), t.skipped)
        }

        Ok(match self {
            Query::RawMaterial(f) => split(traverse(contract, f).await?, SectionItems::RawMaterial),
            Query::Fabric(f) => split(traverse(contract, f).await?, SectionItems::Fabric),
            Query::Apparel(f) => split(traverse(contract, f).await?, SectionItems::Apparel),
            Query::PackagedStock(f) => {
                split(traverse(contract, f).await?, SectionItems::PackagedStock)
            }
            Query::RetailProduct(f) => {
                split(traverse(contract, f).await?, SectionItems::RetailProduct)
            }
        })
    }
}

fn mine<T: Tier>(account: Address) -> Filter<T> {
    Filter::originated_by(account)
}

fn sections(role: Role, account: Address) -> Vec<(&'static str, Query)> {
    match role {
        Role::Farmer => vec![
            (
                "My raw materials",
                Query::RawMaterial(mine(account).and(Filter::available())),
            ),
            (
                "Sold raw materials",
                Query::RawMaterial(mine(account).and(Filter::unavailable())),
            ),
        ],
        Role::Mill => vec![
            ("Raw material market", Query::RawMaterial(Filter::available())),
            (
                "Purchased raw materials",
                Query::RawMaterial(Filter::held_by(account).and(Filter::unused_for_next_tier())),
            ),
            ("My fabrics", Query::Fabric(mine(account))),
        ],
        Role::Manufacturer => vec![
            ("Fabric market", Query::Fabric(Filter::available())),
            (
                "Purchased fabrics",
                Query::Fabric(Filter::held_by(account).and(Filter::unused_for_next_tier())),
            ),
            ("My apparel", Query::Apparel(mine(account))),
        ],
        Role::Distributor => vec![
            (
                "Apparel market",
                Query::Apparel(Filter::available().and(Filter::unused_for_next_tier())),
            ),
            ("My packaged stock", Query::PackagedStock(mine(account))),
        ],
        Role::Retailer => vec![
            ("Packaged stock market", Query::PackagedStock(Filter::available())),
            ("Purchased packaged stock", Query::PackagedStock(Filter::held_by(account))),
            ("My retail products", Query::RetailProduct(mine(account))),
        ],
        Role::Customer => vec![
            ("Retail product market", Query::RetailProduct(Filter::available())),
            ("My purchases", Query::RetailProduct(Filter::held_by(account))),
        ],
    }
}

/// Load every section of `role`'s dashboard for `account`
pub async fn load(contract: &dyn SupplyChainContract, role: Role, account: Address) -> Dashboard {
    let mut dashboard = Dashboard {
        role,
        account,
        sections: Vec::new(),
        notifications: Vec::new(),
    };

    for (title, query) in sections(role, account) {
        match query.run(contract).await {
            Ok((items, skipped)) => {
                if !skipped.is_empty() {
                    dashboard.notifications.push(Notification::warning(format!(
                        "{}: {} record(s) could not be loaded",
                        title,
                        skipped.len()
                    )));
                }
                dashboard.sections.push(Section { title, items, skipped });
            }
            Err(e) => {
                tracing::warn!(
                    role = %role,
                    section = title,
                    error = %e,
                    "Dashboard section failed"
                );
                dashboard.notifications.push(e.notification());
                dashboard.sections.push(Section {
                    title,
                    items: SectionItems::empty(query.kind()),
                    skipped: Vec::new(),
                });
            }
        }
    }

    dashboard
}

/// Gate on `role`, then load the dashboard, or return the redirect
pub async fn open(
    contract: &dyn SupplyChainContract,
    wallet: &WalletContext,
    role: Role,
) -> std::result::Result<(UserInfo, Dashboard), Route> {
    match check_role(contract, wallet, role).await {
        GateDecision::Allow(user) => {
            let account = wallet.active().ok_or(Route::Login)?;
            Ok((user, load(contract, role, account).await))
        }
        GateDecision::Redirect(route) => Err(route),
    }
}
