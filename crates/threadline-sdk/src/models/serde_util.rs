//! Lenient integer decoding
//!
//! Gateways render `uint256` values either as JSON numbers or as decimal
//! strings; ids and quantities accept both.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

fn value_to_u64<E: de::Error>(value: Value) -> Result<u64, E> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| E::custom(format!("invalid integer {}", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| E::custom(format!("invalid integer {:?}: {}", s, e))),
        other => Err(E::custom(format!("expected an integer, found {}", other))),
    }
}

pub fn u64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    value_to_u64(Value::deserialize(deserializer)?)
}

pub fn vec_u64_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(value_to_u64::<D::Error>)
        .collect()
}
