//! Contract gateway and pinning client tests against a mock HTTP server

use serde_json::json;
use threadline_client::{ChainConfig, ClientError, ContractClient, PinningClient, PinningConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
const FARMER: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

fn gateway(server: &MockServer) -> ContractClient {
    ContractClient::new(ChainConfig {
        rpc_url: server.uri(),
        contract_address: CONTRACT.to_string(),
        ..Default::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn test_call_sends_function_and_args() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "contract_call",
            "params": { "to": CONTRACT, "function": "getAllRawMaterialIds", "args": [] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": ["1", "2", "3"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway(&server).call("getAllRawMaterialIds", vec![]).await.unwrap();
    assert_eq!(result, json!(["1", "2", "3"]));
}

#[tokio::test]
async fn test_rpc_error_object_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": 3, "message": "execution reverted: raw material does not exist" }
        })))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .call("getRawMaterial", vec![json!(99)])
        .await
        .unwrap_err();

    match err {
        ClientError::Rpc { code, message } => {
            assert_eq!(code, 3);
            assert!(message.contains("does not exist"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_send_attaches_value_and_returns_receipt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "contract_send",
            "params": {
                "from": FARMER,
                "function": "buyRawMaterial",
                "args": [1],
                "value": "2500000000000000000"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "transactionHash": "0xabc", "blockNumber": 42, "status": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = gateway(&server)
        .send(FARMER, "buyRawMaterial", vec![json!(1)], Some("2500000000000000000".into()))
        .await
        .unwrap();

    assert_eq!(receipt.transaction_hash, "0xabc");
    assert_eq!(receipt.block_number, 42);
}

#[tokio::test]
async fn test_reverted_receipt_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "transactionHash": "0xdead", "blockNumber": 7, "status": false }
        })))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .send(FARMER, "addRawMaterial", vec![], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rpc { .. }));
}

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream node unavailable"))
        .mount(&server)
        .await;

    let err = gateway(&server).call("getAllFabricIds", vec![]).await.unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream node unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_events_decode() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "contract_events",
            "params": { "to": CONTRACT, "fromBlock": 0 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [{
                "event": "RawMaterialAdded",
                "args": { "id": "1", "farmer": FARMER },
                "blockNumber": 3,
                "transactionHash": "0x01",
                "timestamp": 1700000000u64
            }]
        })))
        .mount(&server)
        .await;

    let events = gateway(&server).events(0).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "RawMaterialAdded");
    assert_eq!(events[0].args["farmer"], json!(FARMER));
}

#[tokio::test]
async fn test_pin_json_returns_cid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .and(header("authorization", "Bearer test-jwt"))
        .and(body_partial_json(json!({
            "pinataContent": { "name": "Organic cotton" },
            "pinataMetadata": { "name": "raw-material" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IpfsHash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
            "PinSize": 120,
            "Timestamp": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PinningClient::new(PinningConfig {
        pinning_url: server.uri(),
        gateway_url: server.uri(),
        jwt: Some("test-jwt".into()),
        ..Default::default()
    })
    .unwrap();

    let cid = client
        .pin_json(&json!({ "name": "Organic cotton" }), Some("raw-material"))
        .await
        .unwrap();
    assert_eq!(cid, "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG");
}

#[tokio::test]
async fn test_pin_json_rejects_invalid_hash() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "IpfsHash": "nope" })))
        .mount(&server)
        .await;

    let client = PinningClient::new(PinningConfig {
        pinning_url: server.uri(),
        ..Default::default()
    })
    .unwrap();

    let err = client.pin_json(&json!({}), None).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidCid { .. }));
}
