//! JSON-RPC client for the supply-chain contract gateway

use crate::error::{ClientError, Result};
use crate::types::*;
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// HTTP client for the contract gateway
///
/// Every call is a single JSON-RPC 2.0 POST to `rpc_url`. Reads go through
/// `contract_call`, writes through `contract_send` (the gateway signs with
/// the wallet it manages for `from` and waits for the receipt), and event
/// history through `contract_events`.
///
/// # Example
///
/// ```rust,no_run
/// use threadline_client::{ChainConfig, ContractClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ContractClient::new(ChainConfig::default())?;
///
/// let raw = client.call("getRawMaterial", vec![serde_json::json!(1)]).await?;
/// let receipt = client
///     .send(
///         "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
///         "buyRawMaterial",
///         vec![serde_json::json!(1)],
///         Some("1000000000000000000".into()),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ContractClient {
    config: ChainConfig,
    client: Client,
    next_id: AtomicU64,
}

impl ContractClient {
    /// Create a new gateway client
    pub fn new(config: ChainConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| ClientError::Config(format!("invalid API key: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Address of the contract this client talks to
    pub fn contract_address(&self) -> &str {
        &self.config.contract_address
    }

    /// Gateway endpoint
    pub fn rpc_url(&self) -> &str {
        &self.config.rpc_url
    }

    // ==================== Contract API ====================

    /// Execute a read-only contract function and return its decoded result
    pub async fn call(
        &self,
        function: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        tracing::debug!(function, "contract_call");
        let params = CallParams {
            to: &self.config.contract_address,
            function,
            args,
        };
        self.rpc("contract_call", params).await
    }

    /// Submit a transaction and wait for its receipt
    ///
    /// `value` is the attached payment in wei as a decimal string.
    pub async fn send(
        &self,
        from: &str,
        function: &str,
        args: Vec<serde_json::Value>,
        value: Option<String>,
    ) -> Result<TxReceipt> {
        tracing::debug!(function, from, value = value.as_deref().unwrap_or("0"), "contract_send");
        let params = SendParams {
            from,
            to: &self.config.contract_address,
            function,
            args,
            value,
        };
        let receipt: TxReceipt = self.rpc("contract_send", params).await?;

        if !receipt.status {
            return Err(ClientError::Rpc {
                code: -32000,
                message: format!("transaction {} reverted", receipt.transaction_hash),
            });
        }
        Ok(receipt)
    }

    /// Fetch decoded event logs emitted by the contract since `from_block`
    pub async fn events(&self, from_block: u64) -> Result<Vec<RawEvent>> {
        let params = EventsParams {
            to: &self.config.contract_address,
            from_block,
        };
        self.rpc("contract_events", params).await
    }

    // ==================== Helper Methods ====================

    async fn rpc<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: P,
    ) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.config.rpc_url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let body: RpcResponse<T> = self.handle_response(response).await?;

        if let Some(error) = body.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result.ok_or_else(|| {
            ClientError::InvalidResponse(format!("{} returned neither result nor error", method))
        })
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(response.url().to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status,
                message: body,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }
}
