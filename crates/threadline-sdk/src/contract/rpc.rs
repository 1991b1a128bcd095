//! Contract access through the JSON-RPC gateway

use super::{CreateRequest, SupplyChainContract, TxReceipt};
use crate::error::{Result, SdkError};
use crate::models::serde_util::vec_u64_from_any;
use crate::models::{
    Address, Apparel, Fabric, PackagedStock, RawMaterial, RetailProduct, Role, TierKind, UserInfo,
};
use crate::units::Wei;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use threadline_client::{ChainConfig, ContractClient, RawEvent};

/// [`SupplyChainContract`] backed by [`ContractClient`]
///
/// Maps each operation onto the contract's ABI function names
/// (`getAllRawMaterialIds`, `getFabric`, `addApparel`, `buyPackagedStock`, ...).
pub struct RpcContract {
    client: ContractClient,
}

impl RpcContract {
    pub fn new(client: ContractClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: ChainConfig) -> Result<Self> {
        Ok(Self::new(ContractClient::new(config)?))
    }

    pub fn client(&self) -> &ContractClient {
        &self.client
    }

    async fn get<T: DeserializeOwned>(&self, kind: TierKind, id: u64) -> Result<T> {
        let function = format!("get{}", kind.contract_name());
        let value = self.client.call(&function, vec![json!(id)]).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn create_call(request: &CreateRequest) -> (String, Vec<Value>) {
    let function = format!("add{}", request.kind().contract_name());
    let args = match request {
        CreateRequest::RawMaterial {
            name,
            raw_material_type,
            quantity,
            price,
            qr_code,
        } => vec![
            json!(name),
            json!(raw_material_type),
            json!(quantity),
            json!(price),
            json!(qr_code),
        ],
        CreateRequest::Fabric {
            raw_material_ids,
            name,
            composition,
            price,
            qr_code,
        } => vec![
            json!(raw_material_ids),
            json!(name),
            json!(composition),
            json!(price),
            json!(qr_code),
        ],
        CreateRequest::Apparel {
            fabric_ids,
            name,
            category,
            size,
            price,
            qr_code,
        } => vec![
            json!(fabric_ids),
            json!(name),
            json!(category),
            json!(size),
            json!(price),
            json!(qr_code),
        ],
        CreateRequest::PackagedStock {
            apparel_ids,
            name,
            quantity,
            price,
            qr_code,
        } => vec![
            json!(apparel_ids),
            json!(name),
            json!(quantity),
            json!(price),
            json!(qr_code),
        ],
        CreateRequest::RetailProduct {
            packaged_stock_ids,
            name,
            brand,
            price,
            qr_code,
        } => vec![
            json!(packaged_stock_ids),
            json!(name),
            json!(brand),
            json!(price),
            json!(qr_code),
        ],
    };
    (function, args)
}

#[async_trait]
impl SupplyChainContract for RpcContract {
    async fn all_ids(&self, kind: TierKind) -> Result<Vec<u64>> {
        let function = format!("getAll{}Ids", kind.contract_name());
        let value = self.client.call(&function, vec![]).await?;
        Ok(vec_u64_from_any(value)?)
    }

    async fn raw_material(&self, id: u64) -> Result<RawMaterial> {
        self.get(TierKind::RawMaterial, id).await
    }

    async fn fabric(&self, id: u64) -> Result<Fabric> {
        self.get(TierKind::Fabric, id).await
    }

    async fn apparel(&self, id: u64) -> Result<Apparel> {
        self.get(TierKind::Apparel, id).await
    }

    async fn packaged_stock(&self, id: u64) -> Result<PackagedStock> {
        self.get(TierKind::PackagedStock, id).await
    }

    async fn retail_product(&self, id: u64) -> Result<RetailProduct> {
        self.get(TierKind::RetailProduct, id).await
    }

    async fn user_info(&self, address: Address) -> Result<UserInfo> {
        let value = self
            .client
            .call("getUserInfo", vec![json!(address)])
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn register_user(
        &self,
        from: Address,
        name: &str,
        location: &str,
        role: Role,
    ) -> Result<TxReceipt> {
        let args = vec![json!(name), json!(location), json!(role.as_str())];
        Ok(self
            .client
            .send(&from.to_string(), "registerUser", args, None)
            .await?)
    }

    async fn create(&self, from: Address, request: CreateRequest) -> Result<TxReceipt> {
        let (function, args) = create_call(&request);
        Ok(self.client.send(&from.to_string(), &function, args, None).await?)
    }

    async fn buy(&self, from: Address, kind: TierKind, id: u64, payment: Wei) -> Result<TxReceipt> {
        if !kind.is_purchasable() {
            return Err(SdkError::validation("kind", format!("{} cannot be bought", kind)));
        }
        let function = format!("buy{}", kind.contract_name());
        Ok(self
            .client
            .send(
                &from.to_string(),
                &function,
                vec![json!(id)],
                Some(payment.to_decimal_string()),
            )
            .await?)
    }

    async fn events(&self, from_block: u64) -> Result<Vec<RawEvent>> {
        Ok(self.client.events(from_block).await?)
    }
}
