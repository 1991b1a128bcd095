use super::serde_util::{u64_from_any, vec_u64_from_any};
use super::{Address, ContentId, Role};
use crate::units::Wei;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Raw fiber lot created by a farmer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    #[serde(deserialize_with = "u64_from_any")]
    pub id: u64,
    pub farmer: Address,
    pub mill: Address,
    pub qr_code: ContentId,
    pub is_available: bool,
    #[serde(deserialize_with = "u64_from_any")]
    pub timestamp: u64,
    pub name: String,
    pub raw_material_type: String,
    #[serde(deserialize_with = "u64_from_any")]
    pub quantity: u64,
    pub price: Wei,
    pub is_used_for_fabric: bool,
}

/// Fabric woven by a mill from raw materials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fabric {
    #[serde(deserialize_with = "u64_from_any")]
    pub id: u64,
    pub mill: Address,
    pub manufacturer: Address,
    pub qr_code: ContentId,
    #[serde(deserialize_with = "vec_u64_from_any")]
    pub raw_material_ids: Vec<u64>,
    pub is_available: bool,
    #[serde(deserialize_with = "u64_from_any")]
    pub timestamp: u64,
    pub name: String,
    pub composition: String,
    pub price: Wei,
    #[serde(default)]
    pub is_used_for_apparel: bool,
}

/// Garment made by a manufacturer from fabrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apparel {
    #[serde(deserialize_with = "u64_from_any")]
    pub id: u64,
    pub manufacturer: Address,
    pub distributor: Address,
    pub qr_code: ContentId,
    #[serde(deserialize_with = "vec_u64_from_any")]
    pub fabric_ids: Vec<u64>,
    pub is_available: bool,
    #[serde(deserialize_with = "u64_from_any")]
    pub timestamp: u64,
    pub name: String,
    pub category: String,
    pub size: String,
    pub price: Wei,
    pub is_used_for_packaged_stock: bool,
}

/// Stock packed by a distributor from apparel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagedStock {
    #[serde(deserialize_with = "u64_from_any")]
    pub id: u64,
    pub distributor: Address,
    pub retailer: Address,
    pub qr_code: ContentId,
    #[serde(deserialize_with = "vec_u64_from_any")]
    pub apparel_ids: Vec<u64>,
    pub is_available: bool,
    #[serde(deserialize_with = "u64_from_any")]
    pub timestamp: u64,
    pub name: String,
    #[serde(deserialize_with = "u64_from_any")]
    pub quantity: u64,
    pub price: Wei,
}

/// Product listed by a retailer for customers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailProduct {
    #[serde(deserialize_with = "u64_from_any")]
    pub id: u64,
    pub retailer: Address,
    pub customer: Address,
    pub qr_code: ContentId,
    #[serde(deserialize_with = "vec_u64_from_any")]
    pub packaged_stock_ids: Vec<u64>,
    pub is_available: bool,
    #[serde(deserialize_with = "u64_from_any")]
    pub timestamp: u64,
    pub name: String,
    pub price: Wei,
    pub brand: String,
    pub is_used_for_customer: bool,
}

/// Registered participant profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub name: String,
    /// `None` when the address never registered
    #[serde(default, deserialize_with = "role_or_unregistered")]
    pub role: Option<Role>,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "u64_from_any")]
    pub registration_date: u64,
}

impl UserInfo {
    pub fn is_registered(&self) -> bool {
        self.role.is_some()
    }
}

fn role_or_unregistered<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Role>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_material_from_gateway_json() {
        let raw: RawMaterial = serde_json::from_value(json!({
            "id": "3",
            "farmer": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "mill": "0x0000000000000000000000000000000000000000",
            "qrCode": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
            "isAvailable": true,
            "timestamp": 1700000000,
            "name": "Organic cotton",
            "rawMaterialType": "cotton",
            "quantity": "500",
            "price": "1500000000000000000",
            "isUsedForFabric": false
        }))
        .unwrap();

        assert_eq!(raw.id, 3);
        assert_eq!(raw.quantity, 500);
        assert!(raw.mill.is_zero());
        assert_eq!(raw.price, Wei(1_500_000_000_000_000_000));
    }

    #[test]
    fn test_fabric_ids_accept_strings_and_numbers() {
        let fabric: Fabric = serde_json::from_value(json!({
            "id": 1,
            "mill": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
            "manufacturer": "0x0000000000000000000000000000000000000000",
            "qrCode": "",
            "rawMaterialIds": ["1", 2],
            "isAvailable": true,
            "timestamp": "1700000000",
            "name": "Denim",
            "composition": "100% cotton",
            "price": "2000000000000000000"
        }))
        .unwrap();

        assert_eq!(fabric.raw_material_ids, vec![1, 2]);
        assert!(!fabric.is_used_for_apparel);
    }

    #[test]
    fn test_unregistered_user() {
        let user: UserInfo = serde_json::from_value(json!({
            "name": "",
            "role": "",
            "location": "",
            "registrationDate": "0"
        }))
        .unwrap();
        assert!(!user.is_registered());

        let user: UserInfo = serde_json::from_value(json!({
            "name": "Asha",
            "role": "farmer",
            "location": "Gujarat",
            "registrationDate": 1700000000
        }))
        .unwrap();
        assert_eq!(user.role, Some(Role::Farmer));
    }
}
