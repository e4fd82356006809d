use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-product stock level, as served by the dashboard inventory view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLevel {
    pub id: u64,
    pub name: String,
    pub quantity: u32,
    pub category: String,
    pub price: f64,
}

/// Quantity on hand summed per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: u64,
}

/// Inventory value summed per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValue {
    pub name: String,
    pub value: f64,
}

/// Severity of a reorder alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    OutOfStock,
    LowStock,
}

/// A product at or below its reorder level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub id: u64,
    pub name: String,
    pub quantity: u32,
    pub reorder_level: u32,
    pub status: AlertStatus,
}

/// Total inventory value with its per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueReport {
    pub total_value: f64,
    pub categories: Vec<CategoryValue>,
}

/// Headline dashboard numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: u64,
    pub total_value: f64,
    pub low_stock_count: usize,
    pub category_count: usize,
    pub product_count: usize,
}

/// One stock-level change, as recorded by the movement journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub product_id: u64,
    pub product_name: String,
    pub change: i64,
    pub stock_after: u32,
    pub recorded_at: DateTime<Utc>,
}
