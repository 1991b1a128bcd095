//! Connected-account context
//!
//! The wallet provider itself (key custody, signing) is external. This is only
//! the observable "which account is active" state that gates and dashboards
//! read. It is passed around explicitly; clones share the same state.

use crate::error::{Result, SdkError};
use crate::models::Address;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct WalletContext {
    active: Arc<watch::Sender<Option<Address>>>,
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletContext {
    /// Context with no account connected
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { active: Arc::new(tx) }
    }

    pub fn with_account(address: Address) -> Self {
        let ctx = Self::new();
        ctx.connect(address);
        ctx
    }

    pub fn connect(&self, address: Address) {
        let previous = self.active.send_replace(Some(address));
        if previous != Some(address) {
            tracing::info!(account = %address, "Wallet connected");
        }
    }

    pub fn disconnect(&self) {
        if let Some(previous) = self.active.send_replace(None) {
            tracing::info!(account = %previous, "Wallet disconnected");
        }
    }

    pub fn active(&self) -> Option<Address> {
        *self.active.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.active().is_some()
    }

    /// Active account, or [`SdkError::NotConnected`]
    pub fn require(&self) -> Result<Address> {
        self.active().ok_or(SdkError::NotConnected)
    }

    /// Watch for account changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Address>> {
        self.active.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_disconnect() {
        let wallet = WalletContext::new();
        assert!(matches!(wallet.require(), Err(SdkError::NotConnected)));

        let account = Address::from_bytes([7; 20]);
        wallet.connect(account);
        assert_eq!(wallet.active(), Some(account));

        wallet.disconnect();
        assert!(!wallet.is_connected());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let wallet = WalletContext::new();
        let mut rx = wallet.subscribe();
        let shared = wallet.clone();

        let account = Address::from_bytes([9; 20]);
        shared.connect(account);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(account));
    }
}
