//! Creation submission
//!
//! Every role that creates a tier goes through the same steps:
//!
//! 1. validate the form; nothing touches the network if this fails
//! 2. upload a metadata document to the content store
//! 3. send one creation write carrying the content id and the selected
//!    lower-tier ids
//! 4. reset the form and hand back the role's dashboard as the redirect
//!
//! A failure at any step stops there. Nothing already done is rolled back,
//! so a failed write can leave an orphaned metadata document behind.

mod form;

pub use form::{

    ApparelForm, CreationForm, FabricForm, FormState, PackagedStockForm, RawMaterialForm,

    RetailProductForm, Selection,

};

use crate::content::ContentStore;
use crate::contract::{CreateRequest, SupplyChainContract, TxReceipt};
use crate::error::Result;
use crate::models::{Address, Apparel, ContentId, Fabric, PackagedStock, RawMaterial, TierKind};
use crate::notify::Notification;
use crate::route::Route;
use crate::traits::Tier;
use crate::traversal::{traverse, Filter};
use serde::Serialize;
use serde_json::{json, Value};

/// Result of a confirmed creation
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub kind: TierKind,
    pub content_id: ContentId,
    /// Scannable-code target for the new entity
    pub code_target: String,
    pub receipt: TxReceipt,
    pub redirect: Route,
}

impl Submission {
    pub fn notification(&self) -> Notification {
        Notification::success(format!(
            "{} created in block {}",
            self.kind, self.receipt.block_number
        ))
    }
}

/// Metadata document stored for a creation request
pub fn metadata_document(request: &CreateRequest, creator: Address) -> Result<Value> {
    let mut document = serde_json::to_value(request)?;
    if let Some(fields) = document.as_object_mut() {
        fields.remove("qr_code");
        fields.insert("role".into(), json!(request.kind().origin_role()));
        fields.insert("creator".into(), json!(creator));
    }
    Ok(document)
}

/// Runs creation submissions against a contract and a content store
pub struct Submitter<'a> {
    contract: &'a dyn SupplyChainContract,
    content: &'a dyn ContentStore,
}

impl<'a> Submitter<'a> {
    pub fn new(contract: &'a dyn SupplyChainContract, content: &'a dyn ContentStore) -> Self {
        Self { contract, content }
    }

    /// Submit the form held by `state` from `account`
    ///
    /// The form is reset only after the write is confirmed.
    pub async fn submit<F: CreationForm>(
        &self,
        account: Address,
        state: &mut FormState<F>,
    ) -> Result<Submission> {
        let request = state.form().validate()?;

        let document = metadata_document(&request, account)?;
        let content_id = self.content.store_json(&document, F::KIND.as_str()).await?;
        tracing::debug!(kind = %F::KIND, content_id = %content_id, "Metadata stored");

        let request = request.with_qr_code(content_id.clone());
        let lower_ids = request.lower_ids().to_vec();
        let receipt = self.contract.create(account, request).await?;

        tracing::info!(
            kind = %F::KIND,
            account = %account,
            lower_ids = ?lower_ids,
            tx = %receipt.transaction_hash,
            block = receipt.block_number,
            "Entity created"
        );

        state.reset();
        Ok(Submission {
            kind: F::KIND,
            code_target: self.content.code_target(&content_id),
            content_id,
            receipt,
            redirect: Route::dashboard(F::KIND.origin_role()),
        })
    }
}

/// One selectable lower-tier entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: u64,
    pub name: String,
}

fn to_candidates<T: Tier>(items: Vec<T>) -> Vec<Candidate> {
    items
        .into_iter()
        .map(|e| Candidate {
            id: e.id(),
            name: e.name().to_string(),
        })
        .collect()
}

/// Entities `account` may select when creating `kind`
///
/// Mills, manufacturers and retailers pick from what they bought and have not
/// used yet; distributors pick from apparel still on the market.
pub async fn lower_tier_candidates(
    contract: &dyn SupplyChainContract,
    kind: TierKind,
    account: Address,
) -> Result<Vec<Candidate>> {
    let candidates = match kind {
        TierKind::RawMaterial => Vec::new(),
        TierKind::Fabric => {
            let filter =
                Filter::<RawMaterial>::held_by(account).and(Filter::unused_for_next_tier());
            to_candidates(traverse(contract, &filter).await?.items)
        }
        TierKind::Apparel => {
            let filter = Filter::<Fabric>::held_by(account).and(Filter::unused_for_next_tier());
            to_candidates(traverse(contract, &filter).await?.items)
        }
        TierKind::PackagedStock => {
            let filter = Filter::<Apparel>::available().and(Filter::unused_for_next_tier());
            to_candidates(traverse(contract, &filter).await?.items)
        }
        TierKind::RetailProduct => {
            let filter = Filter::<PackagedStock>::held_by(account);
            to_candidates(traverse(contract, &filter).await?.items)
        }
    };
    Ok(candidates)
}
