//! Threadline command-line dashboard
//!
//! Wraps [`threadline_sdk::ThreadlineClient`] in a small CLI: per-role
//! dashboards, tier listings, creation and purchase commands, event history
//! and provenance traces.

pub mod cli;
pub mod config;
pub mod render;

pub use cli::{execute, Args, Command};
pub use config::Config;

/// Fold CLI and environment overrides into the loaded config
pub fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(ref rpc_url) = args.rpc_url {
        config.chain.rpc_url = rpc_url.clone();
    }
    if let Some(ref contract_address) = args.contract_address {
        config.chain.contract_address = contract_address.clone();
    }
    if let Some(ref jwt) = args.pinning_jwt {
        config.content.api_key = Some(jwt.clone());
    }
    if let Some(ref account) = args.account {
        config.wallet.address = Some(account.clone());
    }
}
