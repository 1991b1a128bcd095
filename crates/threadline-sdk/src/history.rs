//! Transaction history from contract event logs
//!
//! Display only. Events are read once per request; nothing here feeds back
//! into dashboards or traversals.

use crate::contract::SupplyChainContract;
use crate::error::Result;
use crate::models::{Address, TierKind};
use crate::units::Wei;
use serde::Serialize;
use serde_json::Value;
use threadline_client::RawEvent;

/// What an event records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "tier", rename_all = "kebab-case")]
pub enum EventKind {
    Created(TierKind),
    Purchased(TierKind),
    UserRegistered,
    Other,
}

impl EventKind {
    /// Classify a contract event name (`FabricAdded`, `RawMaterialBought`, ...)
    pub fn from_event_name(name: &str) -> Self {
        if name == "UserRegistered" {
            return EventKind::UserRegistered;
        }
        for kind in TierKind::ALL {
            if let Some(rest) = name.strip_prefix(kind.contract_name()) {
                match rest {
                    "Added" | "Created" => return EventKind::Created(kind),
                    "Bought" | "Purchased" => return EventKind::Purchased(kind),
                    _ => {}
                }
            }
        }
        EventKind::Other
    }
}

/// One decoded history entry
#[derive(Debug, Clone, Serialize)]
pub struct ChainEvent {
    pub kind: EventKind,
    pub name: String,
    pub block_number: u64,
    pub log_index: u64,
    pub transaction_hash: String,
    pub timestamp: Option<u64>,
    pub entity_id: Option<u64>,
    /// Every address found in the event arguments
    pub participants: Vec<Address>,
    pub price: Option<Wei>,
}

impl ChainEvent {
    pub fn involves(&self, address: Address) -> bool {
        self.participants.contains(&address)
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl From<RawEvent> for ChainEvent {
    fn from(raw: RawEvent) -> Self {
        let participants = raw
            .args
            .values()
            .filter_map(|v| v.as_str())
            .filter_map(|s| s.parse::<Address>().ok())
            .filter(|a| !a.is_zero())
            .collect();
        let entity_id = raw.args.get("id").and_then(as_u64);
        let price = raw
            .args
            .get("price")
            .and_then(|v| serde_json::from_value::<Wei>(v.clone()).ok());

        ChainEvent {
            kind: EventKind::from_event_name(&raw.event),
            name: raw.event,
            block_number: raw.block_number,
            log_index: raw.log_index,
            transaction_hash: raw.transaction_hash,
            timestamp: raw.timestamp,
            entity_id,
            participants,
            price,
        }
    }
}

/// Order by (block, log index) descending
///
/// Logs arrive in chain order, so reversing first keeps same-position
/// entries newest first when a gateway leaves `logIndex` out.
fn newest_first(events: &mut [ChainEvent]) {
    events.reverse();
    events.sort_by(|a, b| (b.block_number, b.log_index).cmp(&(a.block_number, a.log_index)));
}

/// Events since `from_block`, newest first, optionally only those involving `address`
pub async fn history(
    contract: &dyn SupplyChainContract,
    from_block: u64,
    address: Option<Address>,
) -> Result<Vec<ChainEvent>> {
    let raw = contract.events(from_block).await?;
    let total = raw.len();

    let mut events: Vec<ChainEvent> = raw
        .into_iter()
        .map(ChainEvent::from)
        .filter(|e| address.map_or(true, |a| e.involves(a)))
        .collect();
    newest_first(&mut events);

    tracing::debug!(total, shown = events.len(), "History loaded");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{CreateRequest, MockContract};
    use crate::models::{ContentId, Role};
    use serde_json::json;

    #[test]
    fn test_event_names() {
        assert_eq!(
            EventKind::from_event_name("PackagedStockAdded"),
            EventKind::Created(TierKind::PackagedStock)
        );
        assert_eq!(
            EventKind::from_event_name("RetailProductBought"),
            EventKind::Purchased(TierKind::RetailProduct)
        );
        assert_eq!(EventKind::from_event_name("OwnershipTransferred"), EventKind::Other);
    }

    #[test]
    fn test_decode_raw_event() {
        let raw: RawEvent = serde_json::from_value(json!({
            "event": "FabricBought",
            "args": {
                "id": "4",
                "buyer": "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
                "price": "2000000000000000000"
            },
            "blockNumber": 88,
            "transactionHash": "0xabc"
        }))
        .unwrap();

        let event = ChainEvent::from(raw);
        assert_eq!(event.entity_id, Some(4));
        assert_eq!(event.price, Some(Wei(2_000_000_000_000_000_000)));
        assert_eq!(event.participants.len(), 1);
        assert_eq!(event.timestamp, None);
    }

    #[tokio::test]
    async fn test_history_newest_first_and_filtered() {
        let farmer = Address::from_bytes([1; 20]);
        let mill = Address::from_bytes([2; 20]);
        let contract = MockContract::new()
            .with_user(farmer, "Asha", Role::Farmer)
            .with_user(mill, "Weave Co", Role::Mill);
        for _ in 0..2 {
            contract
                .create(
                    farmer,
                    CreateRequest::RawMaterial {
                        name: "Silk".into(),
                        raw_material_type: "silk".into(),
                        quantity: 1,
                        price: Wei(9),
                        qr_code: ContentId::unchecked("QmSilk"),
                    },
                )
                .await
                .unwrap();
        }
        contract.buy(mill, TierKind::RawMaterial, 1, Wei(9)).await.unwrap();

        let all = history(&contract, 0, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].kind, EventKind::Purchased(TierKind::RawMaterial));
        assert!(all[0].block_number > all[2].block_number);

        let mine = history(&contract, 0, Some(mill)).await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    fn logged(name: &str, block: u64, log_index: Option<u64>) -> ChainEvent {
        let mut value = json!({ "event": name, "blockNumber": block, "transactionHash": "0x01" });
        if let Some(index) = log_index {
            value["logIndex"] = json!(index);
        }
        ChainEvent::from(serde_json::from_value::<RawEvent>(value).unwrap())
    }

    #[test]
    fn test_same_block_events_newest_first() {
        let mut events = vec![
            logged("RawMaterialAdded", 7, Some(0)),
            logged("RawMaterialBought", 7, Some(1)),
            logged("FabricAdded", 8, Some(0)),
        ];
        newest_first(&mut events);
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["FabricAdded", "RawMaterialBought", "RawMaterialAdded"]);

        // no log index: chain order decides
        let mut events = vec![
            logged("RawMaterialAdded", 7, None),
            logged("RawMaterialBought", 7, None),
            logged("UserRegistered", 6, None),
        ];
        newest_first(&mut events);
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["RawMaterialBought", "RawMaterialAdded", "UserRegistered"]);
    }
}
