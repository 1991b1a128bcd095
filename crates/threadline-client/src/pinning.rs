//! Client for the IPFS pinning service

use crate::error::{ClientError, Result};
use crate::types::*;
use cid::Cid;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

/// Parse and normalize a content id
///
/// CIDv0 values keep their `Qm...` base58 form, CIDv1 values come back in
/// their canonical multibase string.
pub fn parse_cid(value: &str) -> Result<String> {
    let cid: Cid = value.trim().parse().map_err(|e: cid::Error| ClientError::InvalidCid {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(cid.to_string())
}

/// HTTP client for the pinning API and its public gateway
pub struct PinningClient {
    config: PinningConfig,
    client: Client,
}

impl PinningClient {
    /// Create a new pinning client
    pub fn new(config: PinningConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref jwt) = config.jwt {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", jwt))
                .map_err(|e| ClientError::Config(format!("invalid pinning JWT: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Pin a JSON document and return its content id
    pub async fn pin_json(
        &self,
        content: &serde_json::Value,
        name: Option<&str>,
    ) -> Result<String> {
        let url = format!("{}/pinning/pinJSONToIPFS", self.config.pinning_url);

        let body = PinJsonRequest {
            pinata_content: content,
            pinata_metadata: name.map(|name| PinMetadata { name }),
        };

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status,
                message: body,
            });
        }

        let pinned: PinJsonResponse = response.json().await?;
        let cid = parse_cid(&pinned.ipfs_hash)?;
        tracing::debug!(cid = %cid, size = pinned.pin_size, "pinned JSON");
        Ok(cid)
    }

    /// Public URL that serves the given content id
    ///
    /// This is the target a scannable code for the entity encodes.
    pub fn gateway_url(&self, cid: &str) -> String {
        format!("{}/ipfs/{}", self.config.gateway_url, urlencoding::encode(cid))
    }

    /// Fetch a pinned JSON document through the public gateway
    pub async fn fetch_json(&self, cid: &str) -> Result<serde_json::Value> {
        let url = self.gateway_url(cid);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(cid.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status,
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cid_v0() {
        let cid = parse_cid("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
        assert_eq!(cid, "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
    }

    #[test]
    fn test_parse_cid_rejects_garbage() {
        let err = parse_cid("not-a-cid").unwrap_err();
        assert!(matches!(err, ClientError::InvalidCid { .. }));
    }

    #[test]
    fn test_gateway_url() {
        let client = PinningClient::new(PinningConfig {
            gateway_url: "https://ipfs.example.com".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.gateway_url("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"),
            "https://ipfs.example.com/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
    }
}
