//! Config loading and override tests

use clap::Parser;
use threadline::{apply_overrides, Args, Config};

#[test]
fn test_defaults_when_sections_missing() {
    let config = Config::from_toml("").expect("empty config parses");

    assert_eq!(config.chain.rpc_url, "http://localhost:8545");
    assert_eq!(config.chain.timeout_secs, 30);
    assert!(config.content.api_key.is_none());
    assert!(config.wallet_address().unwrap().is_none());
}

#[test]
fn test_config_with_all_fields() {
    let toml_str = r#"
[chain]
rpc_url = "https://gateway.example.org/rpc/"
contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
api_key = "gateway-token"
timeout_secs = 10

[content]
pinning_url = "https://pin.example.org"
gateway_url = "https://ipfs.example.org/"
jwt = "pin-token"

[wallet]
address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
"#;

    let config = Config::from_toml(toml_str).expect("valid TOML");

    let chain = config.chain_config();
    assert_eq!(chain.rpc_url, "https://gateway.example.org/rpc");
    assert_eq!(chain.api_key.as_deref(), Some("gateway-token"));
    assert_eq!(chain.timeout_secs, 10);

    let pinning = config.pinning_config();
    assert_eq!(pinning.gateway_url, "https://ipfs.example.org");
    assert_eq!(pinning.jwt.as_deref(), Some("pin-token"));
    assert_eq!(pinning.timeout_secs, 30);

    let wallet = config.wallet_address().unwrap().expect("wallet configured");
    assert_eq!(wallet.to_string(), "0x70997970c51812dc3a010c7d01b50e0d17dc79c8");
}

#[test]
fn test_invalid_wallet_address() {
    let config = Config::from_toml("[wallet]\naddress = \"0x1234\"").unwrap();
    assert!(config.wallet_address().is_err());
}

#[test]
fn test_cli_overrides_file() {
    let mut config = Config::from_toml("[chain]\nrpc_url = \"http://from-file:8545\"").unwrap();
    let args = Args::try_parse_from([
        "threadline",
        "--rpc-url",
        "http://from-flag:8545",
        "--account",
        "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
        "whoami",
    ])
    .unwrap();

    apply_overrides(&mut config, &args);

    assert_eq!(config.chain.rpc_url, "http://from-flag:8545");
    assert!(config.wallet_address().unwrap().is_some());
}

#[test]
fn test_missing_file_uses_defaults() {
    let config = Config::load(std::path::Path::new("/nonexistent/threadline.toml")).unwrap();
    assert_eq!(config.chain.contract_address, Config::default().chain.contract_address);
}
