//! CLI configuration
//!
//! Loaded from `threadline.toml` when present, then overridden by
//! environment variables and flags.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use threadline_sdk::{Address, ChainConfig, PinningConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chain: ChainSection,
    #[serde(default)]
    pub content: ContentSection,
    #[serde(default)]
    pub wallet: WalletSection,
}

/// Contract gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSection {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_contract_address")]
    pub contract_address: String,

    /// Bearer token for the gateway
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Metadata pinning service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default = "default_pinning_url")]
    pub pinning_url: String,

    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Pinning JWT
    #[serde(default, alias = "jwt")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletSection {
    /// Account to act as
    #[serde(default)]
    pub address: Option<String>,
}

// Defaults
fn default_rpc_url() -> String { ChainConfig::default().rpc_url }
fn default_contract_address() -> String { ChainConfig::default().contract_address }
fn default_pinning_url() -> String { PinningConfig::default().pinning_url }
fn default_gateway_url() -> String { PinningConfig::default().gateway_url }
fn default_timeout() -> u64 { 30 }

impl Default for ChainSection {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: default_contract_address(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            pinning_url: default_pinning_url(),
            gateway_url: default_gateway_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path`, or defaults when it does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            rpc_url: self.chain.rpc_url.trim_end_matches('/').to_string(),
            contract_address: self.chain.contract_address.clone(),
            api_key: self.chain.api_key.clone(),
            timeout_secs: self.chain.timeout_secs,
        }
    }

    pub fn pinning_config(&self) -> PinningConfig {
        PinningConfig {
            pinning_url: self.content.pinning_url.trim_end_matches('/').to_string(),
            gateway_url: self.content.gateway_url.trim_end_matches('/').to_string(),
            jwt: self.content.api_key.clone(),
            timeout_secs: self.content.timeout_secs,
        }
    }

    /// Configured wallet account, if any
    pub fn wallet_address(&self) -> anyhow::Result<Option<Address>> {
        match self.wallet.address.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Ok(Some(
                value
                    .parse()
                    .with_context(|| format!("invalid wallet address {:?}", value))?,
            )),
        }
    }
}
