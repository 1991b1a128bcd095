//! Content store for entity metadata
//!
//! Every created entity carries a content id pointing at a JSON document with
//! its descriptive fields. The same id, resolved through the public gateway,
//! is what the entity's scannable code encodes.

use crate::error::{Result, SdkError};
use crate::models::ContentId;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use threadline_client::{PinningClient, PinningConfig};

/// Storage for metadata documents
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store a JSON document and return its content id
    async fn store_json(&self, document: &Value, name: &str) -> Result<ContentId>;

    /// URL a scannable code for `content_id` should point at
    fn code_target(&self, content_id: &ContentId) -> String;
}

/// [`ContentStore`] backed by the pinning service
pub struct PinningStore {
    client: PinningClient,
}

impl PinningStore {
    pub fn new(client: PinningClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: PinningConfig) -> Result<Self> {
        Ok(Self::new(PinningClient::new(config)?))
    }

    /// Fetch a stored document back through the gateway
    pub async fn fetch_json(&self, content_id: &ContentId) -> Result<Value> {
        Ok(self.client.fetch_json(content_id.as_str()).await?)
    }
}

#[async_trait]
impl ContentStore for PinningStore {
    async fn store_json(&self, document: &Value, name: &str) -> Result<ContentId> {
        let cid = self
            .client
            .pin_json(document, Some(name))
            .await
            .map_err(|e| SdkError::ContentStore(e.to_string()))?;
        ContentId::parse(&cid)
    }

    fn code_target(&self, content_id: &ContentId) -> String {
        self.client.gateway_url(content_id.as_str())
    }
}

/// In-memory content store for testing
#[derive(Default)]
pub struct MockContentStore {
    documents: Mutex<Vec<(String, Value)>>,
    uploads: AtomicUsize,
    fail: AtomicBool,
}

impl MockContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail
    pub fn fail_uploads(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Number of upload attempts, failed ones included
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Documents stored so far, with the name they were stored under
    pub fn documents(&self) -> Vec<(String, Value)> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn store_json(&self, document: &Value, name: &str) -> Result<ContentId> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail.load(Ordering::SeqCst) {
            return Err(SdkError::ContentStore("injected upload failure".into()));
        }
        if let Ok(mut docs) = self.documents.lock() {
            docs.push((name.to_string(), document.clone()));
        }
        Ok(ContentId::unchecked(format!("QmMock{:040}", n)))
    }

    fn code_target(&self, content_id: &ContentId) -> String {
        format!("https://gateway.test/ipfs/{}", content_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_store_records_documents() {
        let store = MockContentStore::new();
        let id = store.store_json(&json!({"name": "Cotton"}), "raw-material").await.unwrap();

        assert_eq!(store.uploads(), 1);
        assert_eq!(store.documents()[0].0, "raw-material");
        assert!(store.code_target(&id).ends_with(id.as_str()));
    }

    #[tokio::test]
    async fn test_mock_store_failure() {
        let store = MockContentStore::new();
        store.fail_uploads();

        let err = store.store_json(&json!({}), "x").await.unwrap_err();
        assert!(matches!(err, SdkError::ContentStore(_)));
        assert!(store.documents().is_empty());
    }
}
