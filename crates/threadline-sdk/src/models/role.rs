use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Participant roles registered on the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Mill,
    Manufacturer,
    Distributor,
    Retailer,
    Customer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Farmer,
        Role::Mill,
        Role::Manufacturer,
        Role::Distributor,
        Role::Retailer,
        Role::Customer,
    ];

    /// Contract encoding of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Mill => "mill",
            Role::Manufacturer => "manufacturer",
            Role::Distributor => "distributor",
            Role::Retailer => "retailer",
            Role::Customer => "customer",
        }
    }

    /// Tier this role creates, if any
    pub fn creates(&self) -> Option<TierKind> {
        TierKind::ALL.into_iter().find(|kind| kind.origin_role() == *self)
    }

    /// Tier this role buys from the role below, if any
    pub fn buys(&self) -> Option<TierKind> {
        TierKind::ALL
            .into_iter()
            .find(|kind| kind.next_role() == *self && kind.is_purchasable())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "mill" => Ok(Role::Mill),
            "manufacturer" => Ok(Role::Manufacturer),
            "distributor" => Ok(Role::Distributor),
            "retailer" => Ok(Role::Retailer),
            "customer" => Ok(Role::Customer),
            other => Err(format!("unknown role {:?}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five tiers of the chain of custody, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierKind {
    RawMaterial,
    Fabric,
    Apparel,
    PackagedStock,
    RetailProduct,
}

impl TierKind {
    pub const ALL: [TierKind; 5] = [
        TierKind::RawMaterial,
        TierKind::Fabric,
        TierKind::Apparel,
        TierKind::PackagedStock,
        TierKind::RetailProduct,
    ];

    /// Tier whose ids this tier references
    pub fn lower(&self) -> Option<TierKind> {
        match self {
            TierKind::RawMaterial => None,
            TierKind::Fabric => Some(TierKind::RawMaterial),
            TierKind::Apparel => Some(TierKind::Fabric),
            TierKind::PackagedStock => Some(TierKind::Apparel),
            TierKind::RetailProduct => Some(TierKind::PackagedStock),
        }
    }

    /// Tier that references this one
    pub fn upper(&self) -> Option<TierKind> {
        TierKind::ALL.into_iter().find(|kind| kind.lower() == Some(*self))
    }

    /// Role that creates entities of this tier
    pub fn origin_role(&self) -> Role {
        match self {
            TierKind::RawMaterial => Role::Farmer,
            TierKind::Fabric => Role::Mill,
            TierKind::Apparel => Role::Manufacturer,
            TierKind::PackagedStock => Role::Distributor,
            TierKind::RetailProduct => Role::Retailer,
        }
    }

    /// Role that takes over an entity of this tier
    pub fn next_role(&self) -> Role {
        match self {
            TierKind::RawMaterial => Role::Mill,
            TierKind::Fabric => Role::Manufacturer,
            TierKind::Apparel => Role::Distributor,
            TierKind::PackagedStock => Role::Retailer,
            TierKind::RetailProduct => Role::Customer,
        }
    }

    /// Whether the contract exposes a paid buy call for this tier
    ///
    /// Apparel is assigned to its distributor at creation and has no buy call.
    pub fn is_purchasable(&self) -> bool {
        !matches!(self, TierKind::Apparel)
    }

    /// Contract entity name, as used in function names (`getAll{Name}Ids`, `get{Name}`)
    pub fn contract_name(&self) -> &'static str {
        match self {
            TierKind::RawMaterial => "RawMaterial",
            TierKind::Fabric => "Fabric",
            TierKind::Apparel => "Apparel",
            TierKind::PackagedStock => "PackagedStock",
            TierKind::RetailProduct => "RetailProduct",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TierKind::RawMaterial => "raw-material",
            TierKind::Fabric => "fabric",
            TierKind::Apparel => "apparel",
            TierKind::PackagedStock => "packaged-stock",
            TierKind::RetailProduct => "retail-product",
        }
    }
}

impl FromStr for TierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        TierKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown tier {:?}", s))
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
