//! Role-specific creation forms

use crate::contract::CreateRequest;
use crate::error::{Result, SdkError};
use crate::models::{ContentId, TierKind};
use crate::units::{parse_ether, Wei};
use serde::{Deserialize, Serialize};

/// How a form picks entities of the tier below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Single,
    Multi,
}

impl Selection {
    /// Selection mode of the form creating `kind`, `None` for raw materials
    pub fn for_kind(kind: TierKind) -> Option<Selection> {
        match kind {
            TierKind::RawMaterial => None,
            TierKind::Fabric | TierKind::RetailProduct => Some(Selection::Single),
            TierKind::Apparel | TierKind::PackagedStock => Some(Selection::Multi),
        }
    }
}

/// Editable form that turns into one creation write call
pub trait CreationForm: Default + Clone + Send + Sync {
    const KIND: TierKind;

    /// Check every field and build the write call
    ///
    /// The returned request carries an empty content id; the submitter fills
    /// it in after the metadata upload.
    fn validate(&self) -> Result<CreateRequest>;
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SdkError::validation(field, "is required"));
    }
    Ok(value.to_string())
}

fn positive_quantity(field: &str, value: &str) -> Result<u64> {
    let value = required(field, value)?;
    match value.parse::<u64>() {
        Ok(0) => Err(SdkError::validation(field, "must be greater than zero")),
        Ok(n) => Ok(n),
        Err(_) => Err(SdkError::validation(field, "must be a whole number")),
    }
}

fn positive_price(value: &str) -> Result<Wei> {
    required("price", value)?;
    let price = parse_ether(value)?;
    if price.is_zero() {
        return Err(SdkError::validation("price", "must be greater than zero"));
    }
    Ok(price)
}

fn single(field: &str, selected: Option<u64>) -> Result<Vec<u64>> {
    selected
        .map(|id| vec![id])
        .ok_or_else(|| SdkError::validation(field, "select one"))
}

fn multi(field: &str, selected: &[u64]) -> Result<Vec<u64>> {
    if selected.is_empty() {
        return Err(SdkError::validation(field, "select at least one"));
    }
    let mut ids = Vec::with_capacity(selected.len());
    for &id in selected {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Farmer: a new raw material lot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterialForm {
    pub name: String,
    pub raw_material_type: String,
    pub quantity: String,
    pub price: String,
}

impl CreationForm for RawMaterialForm {
    const KIND: TierKind = TierKind::RawMaterial;

    fn validate(&self) -> Result<CreateRequest> {
        Ok(CreateRequest::RawMaterial {
            name: required("name", &self.name)?,
            raw_material_type: required("raw_material_type", &self.raw_material_type)?,
            quantity: positive_quantity("quantity", &self.quantity)?,
            price: positive_price(&self.price)?,
            qr_code: ContentId::default(),
        })
    }
}

/// Mill: fabric woven from one purchased raw material
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricForm {
    pub raw_material_id: Option<u64>,
    pub name: String,
    pub composition: String,
    pub price: String,
}

impl CreationForm for FabricForm {
    const KIND: TierKind = TierKind::Fabric;

    fn validate(&self) -> Result<CreateRequest> {
        Ok(CreateRequest::Fabric {
            name: required("name", &self.name)?,
            composition: required("composition", &self.composition)?,
            price: positive_price(&self.price)?,
            raw_material_ids: single("raw_material_id", self.raw_material_id)?,
            qr_code: ContentId::default(),
        })
    }
}

/// Manufacturer: apparel cut from one or more fabrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApparelForm {
    pub fabric_ids: Vec<u64>,
    pub name: String,
    pub category: String,
    pub size: String,
    pub price: String,
}

impl CreationForm for ApparelForm {
    const KIND: TierKind = TierKind::Apparel;

    fn validate(&self) -> Result<CreateRequest> {
        Ok(CreateRequest::Apparel {
            name: required("name", &self.name)?,
            category: required("category", &self.category)?,
            size: required("size", &self.size)?,
            price: positive_price(&self.price)?,
            fabric_ids: multi("fabric_ids", &self.fabric_ids)?,
            qr_code: ContentId::default(),
        })
    }
}

/// Distributor: a package of apparel items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagedStockForm {
    pub apparel_ids: Vec<u64>,
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl CreationForm for PackagedStockForm {
    const KIND: TierKind = TierKind::PackagedStock;

    fn validate(&self) -> Result<CreateRequest> {
        Ok(CreateRequest::PackagedStock {
            name: required("name", &self.name)?,
            quantity: positive_quantity("quantity", &self.quantity)?,
            price: positive_price(&self.price)?,
            apparel_ids: multi("apparel_ids", &self.apparel_ids)?,
            qr_code: ContentId::default(),
        })
    }
}

/// Retailer: a product listed from one purchased package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailProductForm {
    pub packaged_stock_id: Option<u64>,
    pub name: String,
    pub brand: String,
    pub price: String,
}

impl CreationForm for RetailProductForm {
    const KIND: TierKind = TierKind::RetailProduct;

    fn validate(&self) -> Result<CreateRequest> {
        Ok(CreateRequest::RetailProduct {
            name: required("name", &self.name)?,
            brand: required("brand", &self.brand)?,
            price: positive_price(&self.price)?,
            packaged_stock_ids: single("packaged_stock_id", self.packaged_stock_id)?,
            qr_code: ContentId::default(),
        })
    }
}

/// Form being edited, with reset back to defaults
#[derive(Debug, Clone, Default)]
pub struct FormState<F> {
    form: F,
}

impl<F: CreationForm> FormState<F> {
    pub fn new(form: F) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn reset(&mut self) {
        self.form = F::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_form() -> RawMaterialForm {
        RawMaterialForm {
            name: "Organic cotton".into(),
            raw_material_type: "cotton".into(),
            quantity: "500".into(),
            price: "0.25".into(),
        }
    }

    #[test]
    fn test_valid_raw_material() {
        let request = raw_form().validate().unwrap();
        match request {
            CreateRequest::RawMaterial { quantity, price, .. } => {
                assert_eq!(quantity, 500);
                assert_eq!(price, Wei(250_000_000_000_000_000));
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_required_fields() {
        let mut form = raw_form();
        form.name = "   ".into();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, SdkError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_numeric_fields_must_be_positive() {
        let mut form = raw_form();
        form.quantity = "0".into();
        assert!(form.validate().is_err());

        let mut form = raw_form();
        form.price = "0".into();
        assert!(form.validate().is_err());

        let mut form = raw_form();
        form.price = "-1".into();
        assert!(form.validate().is_err());

        let mut form = raw_form();
        form.price = "NaN".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_lower_tier_selection() {
        let fabric = FabricForm {
            raw_material_id: None,
            name: "Denim".into(),
            composition: "cotton".into(),
            price: "1".into(),
        };
        assert!(fabric.validate().is_err());

        let apparel = ApparelForm {
            fabric_ids: vec![],
            name: "Jacket".into(),
            category: "outerwear".into(),
            size: "L".into(),
            price: "2".into(),
        };
        assert!(apparel.validate().is_err());

        assert_eq!(Selection::for_kind(TierKind::Fabric), Some(Selection::Single));
        assert_eq!(Selection::for_kind(TierKind::PackagedStock), Some(Selection::Multi));
        assert_eq!(Selection::for_kind(TierKind::RawMaterial), None);
    }

    #[test]
    fn test_form_state_reset() {
        let mut state = FormState::new(raw_form());
        state.form_mut().name = "Changed".into();
        state.reset();
        assert_eq!(state.form(), &RawMaterialForm::default());
    }
}
