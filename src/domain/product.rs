use serde::{Deserialize, Deserializer, Serialize};

/// A product in the bar inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub volume_ml: Option<f64>,
    pub unit: String,
    pub barcode: Option<String>,
    pub min_stock: u32,
    pub current_stock: u32,
    pub unit_price: f64,
}

/// Payload for creating a product.
///
/// Only `name` is required; every other field falls back to a default. Stock
/// counts arrive as `i64` so negative input reaches the validation layer
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCreate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub volume_ml: Option<f64>,
    pub unit: Option<String>,
    pub barcode: Option<String>,
    pub min_stock: Option<i64>,
    pub current_stock: Option<i64>,
    pub unit_price: Option<f64>,
}

/// Partial update for a product. `None` means "leave unchanged".
///
/// `volume_ml` and `barcode` are nullable in the stored record, so they carry
/// a second `Option`: an absent field is the outer `None`, an explicit JSON
/// `null` is `Some(None)` and clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub volume_ml: Option<Option<f64>>,
    pub unit: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub barcode: Option<Option<String>>,
    pub min_stock: Option<i64>,
    pub current_stock: Option<i64>,
    pub unit_price: Option<f64>,
}

/// Search/filter criteria. All three are optional and conjunctive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
