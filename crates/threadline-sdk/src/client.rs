//! Unified client over the contract, content store and wallet
//!
//! [`ThreadlineClient`] owns the three collaborators every view needs and
//! exposes each operation with the connected account filled in. It holds no
//! entity state: every call reads fresh from the contract.

use crate::content::{ContentStore, PinningStore};
use crate::contract::{RpcContract, SupplyChainContract, TxReceipt};
use crate::dashboard::{self, Dashboard};
use crate::error::Result;
use crate::gate::{self, GateDecision};
use crate::history::{self, ChainEvent};
use crate::models::{Role, TierKind, UserInfo};
use crate::purchase::{self, Purchase};
use crate::route::Route;
use crate::submission::{self, Candidate, CreationForm, FormState, Submission, Submitter};
use crate::traits::Tier;
use crate::traversal::{self, ChainSnapshot, Filter, Provenance, Traversal};
use crate::wallet::WalletContext;
use std::sync::Arc;
use threadline_client::{ChainConfig, PinningConfig};

/// Client for one deployment of the supply-chain contract
///
/// # Example
///
/// ```rust,ignore
/// use threadline_sdk::{ThreadlineClient, FormState, RawMaterialForm};
///
/// let client = ThreadlineClient::connect(chain_config, pinning_config)?;
/// client.wallet().connect("0x7099...79c8".parse()?);
///
/// let mut form = FormState::new(RawMaterialForm {
///     name: "Organic cotton".into(),
///     raw_material_type: "cotton".into(),
///     quantity: "500".into(),
///     price: "0.25".into(),
/// });
/// let submission = client.submit(&mut form).await?;
/// println!("created, go to {}", submission.redirect);
/// ```
#[derive(Clone)]
pub struct ThreadlineClient {
    contract: Arc<dyn SupplyChainContract>,
    content: Arc<dyn ContentStore>,
    wallet: WalletContext,
}

impl ThreadlineClient {
    pub fn new(
        contract: Arc<dyn SupplyChainContract>,
        content: Arc<dyn ContentStore>,
        wallet: WalletContext,
    ) -> Self {
        Self {
            contract,
            content,
            wallet,
        }
    }

    /// Build HTTP-backed collaborators from configuration
    pub fn connect(chain: ChainConfig, pinning: PinningConfig) -> Result<Self> {
        let contract = RpcContract::from_config(chain)?;
        let content = PinningStore::from_config(pinning)?;
        Ok(Self::new(
            Arc::new(contract),
            Arc::new(content),
            WalletContext::new(),
        ))
    }

    pub fn contract(&self) -> &dyn SupplyChainContract {
        self.contract.as_ref()
    }

    pub fn content(&self) -> &dyn ContentStore {
        self.content.as_ref()
    }

    pub fn wallet(&self) -> &WalletContext {
        &self.wallet
    }

    /// Profile of the connected account
    pub async fn whoami(&self) -> Result<UserInfo> {
        let account = self.wallet.require()?;
        gate::profile(self.contract(), account).await
    }

    pub async fn landing(&self) -> Route {
        gate::landing(self.contract(), &self.wallet).await
    }

    pub async fn check_role(&self, role: Role) -> GateDecision {
        gate::check_role(self.contract(), &self.wallet, role).await
    }

    pub async fn register(&self, name: &str, location: &str, role: Role) -> Result<TxReceipt> {
        gate::register(self.contract(), &self.wallet, name, location, role).await
    }

    pub async fn list<T: Tier>(&self, filter: &Filter<T>) -> Result<Traversal<T>> {
        traversal::traverse(self.contract(), filter).await
    }

    pub async fn dashboard(&self, role: Role) -> std::result::Result<(UserInfo, Dashboard), Route> {
        dashboard::open(self.contract(), &self.wallet, role).await
    }

    /// Lower-tier entities the connected account may pick when creating `kind`
    pub async fn candidates(&self, kind: TierKind) -> Result<Vec<Candidate>> {
        let account = self.wallet.require()?;
        submission::lower_tier_candidates(self.contract(), kind, account).await
    }

    pub async fn submit<F: CreationForm>(&self, state: &mut FormState<F>) -> Result<Submission> {
        // validate before requiring a wallet so form errors surface first
        state.form().validate()?;
        let account = self.wallet.require()?;
        Submitter::new(self.contract(), self.content())
            .submit(account, state)
            .await
    }

    pub async fn buy(&self, kind: TierKind, id: u64) -> Result<Purchase> {
        purchase::buy(self.contract(), &self.wallet, kind, id).await
    }

    /// Event history since `from_block`; `mine_only` limits it to the connected account
    pub async fn history(&self, from_block: u64, mine_only: bool) -> Result<Vec<ChainEvent>> {
        let address = if mine_only {
            Some(self.wallet.require()?)
        } else {
            None
        };
        history::history(self.contract(), from_block, address).await
    }

    pub async fn snapshot(&self) -> Result<ChainSnapshot> {
        ChainSnapshot::load(self.contract()).await
    }

    /// Chain of custody behind one retail product
    pub async fn provenance(&self, retail_product_id: u64) -> Result<Provenance> {
        self.snapshot().await?.provenance(retail_product_id)
    }
}
