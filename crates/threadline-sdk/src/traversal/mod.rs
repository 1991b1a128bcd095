//! Fetch-and-filter traversal of the entity chain
//!
//! The contract only exposes "all ids of a tier" and "entity by id", so every
//! view is rebuilt the same way: one id-list read, then one detail read per
//! id, in order, keeping the entities a [`Filter`] accepts.
//!
//! A detail fetch that fails is logged and skipped; the rest of the batch
//! still loads. Only a failed id-list read, or a non-empty list where every
//! fetch failed, is reported as an error.

mod filter;
mod ledger;

pub use filter::Filter;
pub use ledger::{ChainSnapshot, Ledger, Provenance};

use crate::contract::SupplyChainContract;
use crate::error::{Result, SdkError};
use crate::traits::Tier;

/// Outcome of one traversal
#[derive(Debug, Clone)]
pub struct Traversal<T> {
    /// Entities accepted by the filter, in id-list order
    pub items: Vec<T>,
    /// Ids whose detail fetch failed
    pub skipped: Vec<u64>,
}

impl<T> Traversal<T> {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl<T> Default for Traversal<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Read every id of `T`'s tier and keep the entities `filter` accepts
pub async fn traverse<T: Tier>(
    contract: &dyn SupplyChainContract,
    filter: &Filter<T>,
) -> Result<Traversal<T>> {
    let ids = contract.all_ids(T::KIND).await?;
    traverse_ids(contract, &ids, filter).await
}

/// Fetch the given ids one after another and keep what `filter` accepts
pub async fn traverse_ids<T: Tier>(
    contract: &dyn SupplyChainContract,
    ids: &[u64],
    filter: &Filter<T>,
) -> Result<Traversal<T>> {
    let mut result = Traversal::default();
    if ids.is_empty() {
        return Ok(result);
    }

    let mut fetched = 0usize;
    for &id in ids {
        match T::fetch(contract, id).await {
            Ok(entity) => {
                fetched += 1;
                if filter.matches(&entity) {
                    result.items.push(entity);
                }
            }
            Err(e) => {
                tracing::warn!(
                    kind = %T::KIND,
                    id,
                    error = %e,
                    "Skipping entity after failed fetch"
                );
                result.skipped.push(id);
            }
        }
    }

    if fetched == 0 {
        return Err(SdkError::BatchFailed {
            kind: T::KIND,
            failed: result.skipped.len(),
        });
    }

    tracing::debug!(
        kind = %T::KIND,
        filter = filter.label(),
        total = ids.len(),
        kept = result.items.len(),
        skipped = result.skipped.len(),
        "Traversal complete"
    );
    Ok(result)
}
