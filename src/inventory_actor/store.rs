use std::collections::VecDeque;

use chrono::Utc;

use crate::domain::{Product, ProductCreate, ProductPatch, ProductQuery, StockMovement};

use super::error::InventoryError;

/// Journal entries kept before the oldest are dropped.
const JOURNAL_CAPACITY: usize = 500;

/// The in-memory product collection plus its movement journal.
///
/// Records keep insertion order. Ids come from a counter that only moves
/// forward, so the id of a deleted product is never handed out again.
#[derive(Debug)]
pub struct ProductStore {
    products: Vec<Product>,
    journal: VecDeque<StockMovement>,
    next_id: u64,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            journal: VecDeque::new(),
            next_id: 1,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn get(&self, id: u64) -> Result<Product, InventoryError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(InventoryError::NotFound(id))
    }

    /// Validates and appends a new product, returning the stored record.
    pub fn insert(&mut self, params: ProductCreate) -> Result<Product, InventoryError> {
        let name = required_name(params.name.as_deref())?;
        let min_stock = stock_value(
            params.min_stock,
            "minStock",
            "Minimum stock cannot be negative",
        )?;
        let current_stock = stock_value(
            params.current_stock,
            "currentStock",
            "Current stock cannot be negative",
        )?;
        let unit_price = price_value(params.unit_price)?;
        let volume_ml = volume_value(params.volume_ml)?;
        let barcode = params.barcode.filter(|code| !code.is_empty());
        if let Some(code) = &barcode {
            self.ensure_barcode_free(code, None)?;
        }

        let product = Product {
            id: self.next_id,
            name,
            category: params.category.unwrap_or_default(),
            brand: params.brand.unwrap_or_default(),
            volume_ml,
            unit: params.unit.unwrap_or_default(),
            barcode,
            min_stock,
            current_stock,
            unit_price,
        };
        self.next_id += 1;
        self.record_movement(
            product.id,
            &product.name,
            i64::from(product.current_stock),
            product.current_stock,
        );
        self.products.push(product.clone());
        Ok(product)
    }

    /// Merges a patch into an existing product. All-or-nothing: every supplied
    /// field is validated before anything is written back.
    pub fn update(&mut self, id: u64, patch: ProductPatch) -> Result<Product, InventoryError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(InventoryError::NotFound(id))?;

        let name = match patch.name.as_deref() {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(InventoryError::Validation {
                        field: "name",
                        message: "Product name cannot be empty",
                    });
                }
                Some(trimmed.to_string())
            }
            None => None,
        };
        let min_stock = patch
            .min_stock
            .map(|v| stock_value(Some(v), "minStock", "Minimum stock cannot be negative"))
            .transpose()?;
        let current_stock = patch
            .current_stock
            .map(|v| stock_value(Some(v), "currentStock", "Current stock cannot be negative"))
            .transpose()?;
        let unit_price = patch
            .unit_price
            .map(|v| price_value(Some(v)))
            .transpose()?;
        let volume_ml = match patch.volume_ml {
            Some(inner) => Some(volume_value(inner)?),
            None => None,
        };
        // A supplied empty barcode clears the field, the same as a null.
        let barcode = patch
            .barcode
            .map(|inner| inner.filter(|code| !code.is_empty()));
        if let Some(Some(code)) = &barcode {
            self.ensure_barcode_free(code, Some(id))?;
        }

        let before = self.products[index].current_stock;
        let product = &mut self.products[index];
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(brand) = patch.brand {
            product.brand = brand;
        }
        if let Some(volume) = volume_ml {
            product.volume_ml = volume;
        }
        if let Some(unit) = patch.unit {
            product.unit = unit;
        }
        if let Some(code) = barcode {
            product.barcode = code;
        }
        if let Some(value) = min_stock {
            product.min_stock = value;
        }
        if let Some(value) = current_stock {
            product.current_stock = value;
        }
        if let Some(value) = unit_price {
            product.unit_price = value;
        }

        let updated = product.clone();
        let delta = i64::from(updated.current_stock) - i64::from(before);
        self.record_movement(updated.id, &updated.name, delta, updated.current_stock);
        Ok(updated)
    }

    pub fn remove(&mut self, id: u64) -> Result<Product, InventoryError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(InventoryError::NotFound(id))?;
        let product = self.products.remove(index);
        self.record_movement(product.id, &product.name, -i64::from(product.current_stock), 0);
        Ok(product)
    }

    pub fn filter(&self, query: &ProductQuery) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| matches_query(p, query))
            .cloned()
            .collect()
    }

    /// Journal entries, oldest first.
    pub fn history(&self) -> Vec<StockMovement> {
        self.journal.iter().cloned().collect()
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.products.len()
    }

    fn ensure_barcode_free(&self, code: &str, exclude: Option<u64>) -> Result<(), InventoryError> {
        let taken = self
            .products
            .iter()
            .any(|p| exclude != Some(p.id) && p.barcode.as_deref() == Some(code));
        if taken {
            return Err(InventoryError::DuplicateBarcode(code.to_string()));
        }
        Ok(())
    }

    // Zero deltas (created empty, stock untouched) are not movements.
    fn record_movement(
        &mut self,
        product_id: u64,
        product_name: &str,
        change: i64,
        stock_after: u32,
    ) {
        if change == 0 {
            return;
        }
        if self.journal.len() == JOURNAL_CAPACITY {
            self.journal.pop_front();
        }
        self.journal.push_back(StockMovement {
            product_id,
            product_name: product_name.to_string(),
            change,
            stock_after,
            recorded_at: Utc::now(),
        });
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_query(product: &Product, query: &ProductQuery) -> bool {
    if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        let hit = product.name.to_lowercase().contains(&term)
            || product.brand.to_lowercase().contains(&term)
            || product
                .barcode
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        if product.category != category {
            return false;
        }
    }
    if let Some(brand) = query.brand.as_deref().filter(|b| !b.is_empty()) {
        if product.brand != brand {
            return false;
        }
    }
    true
}

fn required_name(name: Option<&str>) -> Result<String, InventoryError> {
    let trimmed = name.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(InventoryError::Validation {
            field: "name",
            message: "Product name is required",
        });
    }
    Ok(trimmed.to_string())
}

fn stock_value(
    value: Option<i64>,
    field: &'static str,
    negative_message: &'static str,
) -> Result<u32, InventoryError> {
    let value = value.unwrap_or(0);
    if value < 0 {
        return Err(InventoryError::Validation {
            field,
            message: negative_message,
        });
    }
    u32::try_from(value).map_err(|_| InventoryError::Validation {
        field,
        message: "Value is out of range",
    })
}

fn price_value(value: Option<f64>) -> Result<f64, InventoryError> {
    let value = value.unwrap_or(0.0);
    if value < 0.0 {
        return Err(InventoryError::Validation {
            field: "unitPrice",
            message: "Unit price cannot be negative",
        });
    }
    Ok(value)
}

fn volume_value(value: Option<f64>) -> Result<Option<f64>, InventoryError> {
    if let Some(volume) = value {
        if volume <= 0.0 {
            return Err(InventoryError::Validation {
                field: "volumeMl",
                message: "Volume must be positive",
            });
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ProductCreate {
        ProductCreate {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn stocked(name: &str, barcode: &str, current: i64, min: i64, price: f64) -> ProductCreate {
        ProductCreate {
            name: Some(name.to_string()),
            barcode: Some(barcode.to_string()),
            min_stock: Some(min),
            current_stock: Some(current),
            unit_price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn insert_assigns_sequential_ids_and_defaults() {
        let mut store = ProductStore::new();
        let first = store.insert(named("Gin")).unwrap();
        let second = store.insert(named("Rum")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.category, "");
        assert_eq!(first.brand, "");
        assert_eq!(first.unit, "");
        assert_eq!(first.volume_ml, None);
        assert_eq!(first.barcode, None);
        assert_eq!(first.min_stock, 0);
        assert_eq!(first.current_stock, 0);
        assert_eq!(first.unit_price, 0.0);
    }

    #[test]
    fn insert_trims_the_name() {
        let mut store = ProductStore::new();
        let product = store.insert(named("  Pale Ale  ")).unwrap();
        assert_eq!(product.name, "Pale Ale");
    }

    #[test]
    fn insert_requires_a_name() {
        let mut store = ProductStore::new();
        let blank = store.insert(named("   ")).unwrap_err();
        let missing = store.insert(ProductCreate::default()).unwrap_err();

        for err in [blank, missing] {
            assert_eq!(
                err,
                InventoryError::Validation {
                    field: "name",
                    message: "Product name is required",
                }
            );
        }
        assert!(store.products().is_empty());
    }

    #[test]
    fn insert_rejects_negative_figures() {
        let mut store = ProductStore::new();

        let err = store
            .insert(ProductCreate {
                min_stock: Some(-1),
                ..named("Gin")
            })
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::Validation {
                field: "minStock",
                message: "Minimum stock cannot be negative",
            }
        );

        let err = store
            .insert(ProductCreate {
                current_stock: Some(-5),
                ..named("Gin")
            })
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::Validation {
                field: "currentStock",
                message: "Current stock cannot be negative",
            }
        );

        let err = store
            .insert(ProductCreate {
                unit_price: Some(-0.01),
                ..named("Gin")
            })
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::Validation {
                field: "unitPrice",
                message: "Unit price cannot be negative",
            }
        );

        assert!(store.products().is_empty());
    }

    #[test]
    fn insert_rejects_non_positive_volume() {
        let mut store = ProductStore::new();
        let err = store
            .insert(ProductCreate {
                volume_ml: Some(0.0),
                ..named("Gin")
            })
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::Validation {
                field: "volumeMl",
                message: "Volume must be positive",
            }
        );
    }

    #[test]
    fn duplicate_barcodes_are_rejected() {
        let mut store = ProductStore::new();
        store.insert(stocked("Gin", "GIN-001", 0, 0, 0.0)).unwrap();

        let err = store.insert(stocked("Vodka", "GIN-001", 0, 0, 0.0)).unwrap_err();
        assert_eq!(err, InventoryError::DuplicateBarcode("GIN-001".to_string()));

        // Products without a barcode never collide with each other.
        store.insert(named("Rum")).unwrap();
        store.insert(named("Whiskey")).unwrap();
        assert_eq!(store.products().len(), 3);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut store = ProductStore::new();
        store.insert(named("Gin")).unwrap();
        let second = store.insert(named("Rum")).unwrap();

        store.remove(second.id).unwrap();
        let third = store.insert(named("Whiskey")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let mut store = ProductStore::new();
        let original = store.insert(stocked("Gin", "GIN-001", 12, 3, 19.5)).unwrap();

        let updated = store
            .update(
                original.id,
                ProductPatch {
                    current_stock: Some(9),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.current_stock, 9);
        assert_eq!(updated.name, "Gin");
        assert_eq!(updated.barcode.as_deref(), Some("GIN-001"));
        assert_eq!(updated.min_stock, 3);
        assert_eq!(updated.unit_price, 19.5);
    }

    #[test]
    fn update_null_clears_nullable_fields() {
        let mut store = ProductStore::new();
        let original = store
            .insert(ProductCreate {
                volume_ml: Some(750.0),
                ..stocked("Gin", "GIN-001", 12, 3, 19.5)
            })
            .unwrap();

        let updated = store
            .update(
                original.id,
                ProductPatch {
                    barcode: Some(None),
                    volume_ml: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.barcode, None);
        assert_eq!(updated.volume_ml, None);
        assert_eq!(updated.current_stock, 12);
    }

    #[test]
    fn update_with_blank_name_leaves_the_record_unchanged() {
        let mut store = ProductStore::new();
        let original = store.insert(stocked("Gin", "GIN-001", 12, 3, 19.5)).unwrap();

        let err = store
            .update(
                original.id,
                ProductPatch {
                    name: Some("   ".to_string()),
                    current_stock: Some(99),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            InventoryError::Validation {
                field: "name",
                message: "Product name cannot be empty",
            }
        );
        assert_eq!(store.get(original.id).unwrap(), original);
    }

    #[test]
    fn update_rejects_a_barcode_taken_by_another_product() {
        let mut store = ProductStore::new();
        store.insert(stocked("Gin", "GIN-001", 0, 0, 0.0)).unwrap();
        let vodka = store.insert(stocked("Vodka", "VOD-001", 0, 0, 0.0)).unwrap();

        let err = store
            .update(
                vodka.id,
                ProductPatch {
                    barcode: Some(Some("GIN-001".to_string())),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, InventoryError::DuplicateBarcode("GIN-001".to_string()));

        // Re-submitting its own barcode is not a conflict.
        let same = store
            .update(
                vodka.id,
                ProductPatch {
                    barcode: Some(Some("VOD-001".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(same.barcode.as_deref(), Some("VOD-001"));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut store = ProductStore::new();
        assert_eq!(store.get(42).unwrap_err(), InventoryError::NotFound(42));
        assert_eq!(
            store.update(42, ProductPatch::default()).unwrap_err(),
            InventoryError::NotFound(42)
        );
        assert_eq!(store.remove(42).unwrap_err(), InventoryError::NotFound(42));
    }

    #[test]
    fn remove_returns_the_record() {
        let mut store = ProductStore::new();
        let product = store.insert(named("Gin")).unwrap();

        let removed = store.remove(product.id).unwrap();
        assert_eq!(removed, product);
        assert!(store.products().is_empty());
    }

    #[test]
    fn search_matches_name_brand_and_barcode_case_insensitively() {
        let mut store = ProductStore::new();
        store
            .insert(ProductCreate {
                brand: Some("Hendrick's".to_string()),
                ..stocked("Gin", "GIN-001", 0, 0, 0.0)
            })
            .unwrap();
        store.insert(named("Tonic")).unwrap();

        let by_name = store.filter(&ProductQuery {
            search: Some("gIn".to_string()),
            ..Default::default()
        });
        assert_eq!(by_name.len(), 1);

        let by_brand = store.filter(&ProductQuery {
            search: Some("hendrick".to_string()),
            ..Default::default()
        });
        assert_eq!(by_brand.len(), 1);

        let by_barcode = store.filter(&ProductQuery {
            search: Some("gin-00".to_string()),
            ..Default::default()
        });
        assert_eq!(by_barcode.len(), 1);
    }

    #[test]
    fn category_and_brand_filters_are_exact() {
        let mut store = ProductStore::new();
        store
            .insert(ProductCreate {
                category: Some("Wine".to_string()),
                ..named("Red Bordeaux")
            })
            .unwrap();

        let exact = store.filter(&ProductQuery {
            category: Some("Wine".to_string()),
            ..Default::default()
        });
        assert_eq!(exact.len(), 1);

        let wrong_case = store.filter(&ProductQuery {
            category: Some("wine".to_string()),
            ..Default::default()
        });
        assert!(wrong_case.is_empty());
    }

    #[test]
    fn filter_criteria_are_conjunctive() {
        let mut store = ProductStore::new();
        store
            .insert(ProductCreate {
                category: Some("Spirits".to_string()),
                ..named("Gin")
            })
            .unwrap();
        store
            .insert(ProductCreate {
                category: Some("Wine".to_string()),
                ..named("Gin Blanc")
            })
            .unwrap();

        let matches = store.filter(&ProductQuery {
            search: Some("gin".to_string()),
            category: Some("Spirits".to_string()),
            brand: None,
        });
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Gin");

        // Empty strings behave like absent criteria.
        let all = store.filter(&ProductQuery {
            search: Some(String::new()),
            category: Some(String::new()),
            brand: Some(String::new()),
        });
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn journal_records_signed_deltas() {
        let mut store = ProductStore::new();
        let product = store.insert(stocked("Gin", "GIN-001", 45, 10, 25.99)).unwrap();
        store
            .update(
                product.id,
                ProductPatch {
                    current_stock: Some(40),
                    ..Default::default()
                },
            )
            .unwrap();
        store.remove(product.id).unwrap();

        let history = store.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].change, 45);
        assert_eq!(history[0].stock_after, 45);
        assert_eq!(history[1].change, -5);
        assert_eq!(history[1].stock_after, 40);
        assert_eq!(history[2].change, -40);
        assert_eq!(history[2].stock_after, 0);
        assert!(history.iter().all(|m| m.product_id == product.id));
    }

    #[test]
    fn journal_skips_entries_without_a_stock_change() {
        let mut store = ProductStore::new();
        let product = store.insert(named("Gin")).unwrap();
        store
            .update(
                product.id,
                ProductPatch {
                    category: Some("Spirits".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        store
            .update(
                product.id,
                ProductPatch {
                    current_stock: Some(-2),
                    ..Default::default()
                },
            )
            .unwrap_err();
        store.remove(product.id).unwrap();

        assert!(store.history().is_empty());
    }

    #[test]
    fn journal_drops_the_oldest_entry_at_capacity() {
        let mut store = ProductStore::new();
        let product = store.insert(named("Gin")).unwrap();

        // Each update raises the stock by one, so every mutation journals
        // a +1 entry and the stock level doubles as an entry number.
        for stock in 1..=(JOURNAL_CAPACITY as i64 + 1) {
            store
                .update(
                    product.id,
                    ProductPatch {
                        current_stock: Some(stock),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        let history = store.history();
        assert_eq!(history.len(), JOURNAL_CAPACITY);
        assert!(history.iter().all(|m| m.change == 1));
        // The entry for stock level 1 is the one that was evicted.
        assert_eq!(history[0].stock_after, 2);
        assert_eq!(
            history.last().unwrap().stock_after,
            JOURNAL_CAPACITY as u32 + 1
        );
    }
}
