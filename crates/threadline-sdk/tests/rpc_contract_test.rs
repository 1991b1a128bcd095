//! SDK flows over the JSON-RPC gateway, against a mock HTTP server

use serde_json::{json, Value};
use threadline_sdk::{
    gate, purchase, traversal, Address, ChainConfig, ContentStore, Filter, GateDecision,
    PinningConfig, PinningStore, RawMaterial, Role, Route, RpcContract, SdkError, TierKind, Wei,
    WalletContext,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
const FARMER: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
const MILL: &str = "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc";
const ZERO: &str = "0x0000000000000000000000000000000000000000";

fn contract(server: &MockServer) -> RpcContract {
    RpcContract::from_config(ChainConfig {
        rpc_url: server.uri(),
        contract_address: CONTRACT.to_string(),
        ..Default::default()
    })
    .expect("contract builds")
}

fn result(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": value }))
}

fn raw_material(id: u64, available: bool) -> Value {
    json!({
        "id": id.to_string(),
        "farmer": FARMER,
        "mill": if available { ZERO } else { MILL },
        "qrCode": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
        "isAvailable": available,
        "timestamp": "1700000000",
        "name": format!("Lot {}", id),
        "rawMaterialType": "cotton",
        "quantity": "250",
        "price": "1500000000000000000",
        "isUsedForFabric": false
    })
}

async fn mount_call(server: &MockServer, function: &str, args: Value, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "contract_call",
            "params": { "function": function, "args": args }
        })))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_traversal_skips_failing_id() {
    let server = MockServer::start().await;
    mount_call(&server, "getAllRawMaterialIds", json!([]), result(json!(["1", "2", "3"]))).await;
    mount_call(&server, "getRawMaterial", json!([1]), result(raw_material(1, true))).await;
    mount_call(
        &server,
        "getRawMaterial",
        json!([2]),
        ResponseTemplate::new(502).set_body_string("bad gateway"),
    )
    .await;
    mount_call(&server, "getRawMaterial", json!([3]), result(raw_material(3, false))).await;

    let contract = contract(&server);
    let all = traversal::traverse::<RawMaterial>(&contract, &Filter::all()).await.unwrap();

    let ids: Vec<u64> = all.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(all.skipped, vec![2]);
    assert_eq!(all.items[0].price, Wei(1_500_000_000_000_000_000));

    let available = traversal::traverse::<RawMaterial>(&contract, &Filter::available())
        .await
        .unwrap();
    assert_eq!(available.items.len(), 1);
}

#[tokio::test]
async fn test_numeric_uint256_price_above_u64() {
    let server = MockServer::start().await;
    mount_call(&server, "getAllRawMaterialIds", json!([]), result(json!([4]))).await;
    // 20 ETH in wei, written as a bare JSON number
    let body = format!(
        r#"{{"jsonrpc":"2.0","id":1,"result":{{"id":4,"farmer":"{}","mill":"{}","qrCode":"",
"isAvailable":true,"timestamp":1700000000,"name":"Lot 4","rawMaterialType":"wool",
"quantity":90,"price":20000000000000000000,"isUsedForFabric":false}}}}"#,
        FARMER, ZERO
    );
    mount_call(
        &server,
        "getRawMaterial",
        json!([4]),
        ResponseTemplate::new(200).set_body_raw(body, "application/json"),
    )
    .await;

    let contract = contract(&server);
    let all = traversal::traverse::<RawMaterial>(&contract, &Filter::all()).await.unwrap();

    assert!(all.is_complete());
    assert_eq!(all.items.len(), 1);
    assert_eq!(all.items[0].price, Wei(20_000_000_000_000_000_000));
    assert_eq!(all.items[0].quantity, 90);
}

#[tokio::test]
async fn test_unregistered_profile_redirects() {
    let server = MockServer::start().await;
    mount_call(
        &server,
        "getUserInfo",
        json!([FARMER]),
        result(json!({ "name": "", "role": "", "location": "", "registrationDate": "0" })),
    )
    .await;

    let contract = contract(&server);
    let wallet = WalletContext::with_account(FARMER.parse::<Address>().unwrap());

    let decision = gate::check_role(&contract, &wallet, Role::Farmer).await;
    assert_eq!(decision, GateDecision::Redirect(Route::Login));
}

#[tokio::test]
async fn test_buy_attaches_listed_price() {
    let server = MockServer::start().await;
    mount_call(&server, "getRawMaterial", json!([1]), result(raw_material(1, true))).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "contract_send",
            "params": {
                "from": MILL,
                "function": "buyRawMaterial",
                "args": [1],
                "value": "1500000000000000000"
            }
        })))
        .respond_with(result(json!({
            "transactionHash": "0x9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
            "blockNumber": 12,
            "status": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let contract = contract(&server);
    let wallet = WalletContext::with_account(MILL.parse().unwrap());

    let purchase = purchase::buy(&contract, &wallet, TierKind::RawMaterial, 1).await.unwrap();
    assert_eq!(purchase.receipt.block_number, 12);
}

#[tokio::test]
async fn test_sold_item_not_bought() {
    let server = MockServer::start().await;
    mount_call(&server, "getRawMaterial", json!([3]), result(raw_material(3, false))).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "contract_send" })))
        .respond_with(result(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let contract = contract(&server);
    let wallet = WalletContext::with_account(MILL.parse().unwrap());

    let err = purchase::buy(&contract, &wallet, TierKind::RawMaterial, 3).await.unwrap_err();
    assert!(matches!(err, SdkError::Validation { .. }));
}

#[tokio::test]
async fn test_pinning_store_returns_validated_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IpfsHash": " QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG "
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = PinningStore::from_config(PinningConfig {
        pinning_url: server.uri(),
        gateway_url: "https://ipfs.example.org".into(),
        ..Default::default()
    })
    .unwrap();

    let id = store.store_json(&json!({ "name": "Lot 1" }), "raw-material").await.unwrap();
    assert_eq!(id.as_str(), "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
    assert_eq!(
        store.code_target(&id),
        "https://ipfs.example.org/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
    );
}
