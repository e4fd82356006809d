use std::collections::HashSet;

use crate::domain::{
    AlertStatus, CategoryTotal, CategoryValue, InventoryLevel, InventorySummary, Product,
    StockAlert, ValueReport,
};

/// Per-product levels for the dashboard inventory view.
pub fn inventory_levels(products: &[Product]) -> Vec<InventoryLevel> {
    products
        .iter()
        .map(|p| InventoryLevel {
            id: p.id,
            name: p.name.clone(),
            quantity: p.current_stock,
            category: p.category.clone(),
            price: p.unit_price,
        })
        .collect()
}

/// Quantity on hand per category, in first-seen category order.
pub fn category_breakdown(products: &[Product]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for product in products {
        match totals.iter_mut().find(|t| t.name == product.category) {
            Some(entry) => entry.value += u64::from(product.current_stock),
            None => totals.push(CategoryTotal {
                name: product.category.clone(),
                value: u64::from(product.current_stock),
            }),
        }
    }
    totals
}

/// Products at or below their reorder level. The boundary is inclusive.
pub fn low_stock_alerts(products: &[Product]) -> Vec<StockAlert> {
    products
        .iter()
        .filter(|p| p.current_stock <= p.min_stock)
        .map(|p| StockAlert {
            id: p.id,
            name: p.name.clone(),
            quantity: p.current_stock,
            reorder_level: p.min_stock,
            status: if p.current_stock == 0 {
                AlertStatus::OutOfStock
            } else {
                AlertStatus::LowStock
            },
        })
        .collect()
}

/// Total inventory value with the per-category split, in first-seen category
/// order. Full precision; rounding happens at the HTTP boundary.
pub fn value_report(products: &[Product]) -> ValueReport {
    let mut categories: Vec<CategoryValue> = Vec::new();
    for product in products {
        let value = f64::from(product.current_stock) * product.unit_price;
        match categories.iter_mut().find(|c| c.name == product.category) {
            Some(entry) => entry.value += value,
            None => categories.push(CategoryValue {
                name: product.category.clone(),
                value,
            }),
        }
    }
    ValueReport {
        total_value: total_value(products),
        categories,
    }
}

/// Headline dashboard numbers.
pub fn summary(products: &[Product]) -> InventorySummary {
    let categories: HashSet<&str> = products.iter().map(|p| p.category.as_str()).collect();
    InventorySummary {
        total_items: products.iter().map(|p| u64::from(p.current_stock)).sum(),
        total_value: total_value(products),
        low_stock_count: products
            .iter()
            .filter(|p| p.current_stock <= p.min_stock)
            .count(),
        category_count: categories.len(),
        product_count: products.len(),
    }
}

fn total_value(products: &[Product]) -> f64 {
    products
        .iter()
        .map(|p| f64::from(p.current_stock) * p.unit_price)
        .sum()
}
