//! Buying an entity from the role below

use crate::contract::{SupplyChainContract, TxReceipt};
use crate::error::{Result, SdkError};
use crate::models::{Fabric, PackagedStock, RawMaterial, RetailProduct, TierKind};
use crate::notify::Notification;
use crate::traits::Tier;
use crate::units::Wei;
use crate::wallet::WalletContext;
use serde::Serialize;

/// Confirmed purchase
#[derive(Debug, Clone, Serialize)]
pub struct Purchase {
    pub kind: TierKind,
    pub id: u64,
    pub price: Wei,
    pub receipt: TxReceipt,
}

impl Purchase {
    pub fn notification(&self) -> Notification {
        Notification::success(format!("Bought {} #{} for {}", self.kind, self.id, self.price))
    }
}

async fn listing<T: Tier>(contract: &dyn SupplyChainContract, id: u64) -> Result<(bool, Wei)> {
    let entity = T::fetch(contract, id).await?;
    Ok((entity.is_available(), entity.price()))
}

/// Buy entity `id` of `kind` from the connected account
///
/// The entity is read again right before the write so the attached payment
/// is the current listed price. An entity that is no longer available is
/// rejected without a write.
pub async fn buy(
    contract: &dyn SupplyChainContract,
    wallet: &WalletContext,
    kind: TierKind,
    id: u64,
) -> Result<Purchase> {
    if !kind.is_purchasable() {
        return Err(SdkError::validation("kind", format!("{} cannot be bought", kind)));
    }
    let account = wallet.require()?;

    let (available, price) = match kind {
        TierKind::RawMaterial => listing::<RawMaterial>(contract, id).await?,
        TierKind::Fabric => listing::<Fabric>(contract, id).await?,
        TierKind::PackagedStock => listing::<PackagedStock>(contract, id).await?,
        TierKind::RetailProduct => listing::<RetailProduct>(contract, id).await?,
        TierKind::Apparel => return Err(SdkError::validation("kind", "apparel cannot be bought")),
    };
    if !available {
        return Err(SdkError::validation("id", format!("{} {} is no longer available", kind, id)));
    }

    let receipt = contract.buy(account, kind, id, price).await?;
    tracing::info!(
        kind = %kind,
        id,
        price = %price,
        buyer = %account,
        tx = %receipt.transaction_hash,
        "Purchase confirmed"
    );

    Ok(Purchase {
        kind,
        id,
        price,
        receipt,
    })
}
