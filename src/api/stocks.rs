use axum::extract::State;
use axum::Json;

use crate::domain::{
    CategoryTotal, InventoryLevel, InventorySummary, StockAlert, StockMovement, ValueReport,
};

use super::{ApiError, AppState};

/// Monetary figures leave full-precision arithmetic behind here: two
/// decimals on the wire.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub async fn inventory_levels(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryLevel>>, ApiError> {
    let levels = state.inventory.inventory_levels().await?;
    Ok(Json(levels))
}

pub async fn movement_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockMovement>>, ApiError> {
    let history = state.inventory.movement_history().await?;
    Ok(Json(history))
}

pub async fn category_breakdown(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryTotal>>, ApiError> {
    let categories = state.inventory.category_breakdown().await?;
    Ok(Json(categories))
}

pub async fn low_stock_alerts(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockAlert>>, ApiError> {
    let alerts = state.inventory.low_stock_alerts().await?;
    Ok(Json(alerts))
}

pub async fn inventory_value(
    State(state): State<AppState>,
) -> Result<Json<ValueReport>, ApiError> {
    let mut report = state.inventory.value_report().await?;
    report.total_value = round2(report.total_value);
    for category in &mut report.categories {
        category.value = round2(category.value);
    }
    Ok(Json(report))
}

pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> Result<Json<InventorySummary>, ApiError> {
    let mut summary = state.inventory.summary().await?;
    summary.total_value = round2(summary.total_value);
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::products::create_product;
    use crate::app_system::StockSystem;
    use crate::auth::{AuthUser, TokenKeys};
    use axum::Extension;

    use super::*;

    fn router() -> Router {
        let system = StockSystem::new();
        let state = AppState {
            inventory: system.inventory_client.clone(),
            directory: system.directory_client.clone(),
            tokens: TokenKeys::new("test-secret", 24),
        };
        Router::new()
            .route("/products", post(create_product))
            .route("/stocks/alerts", get(low_stock_alerts))
            .route("/stocks/value", get(inventory_value))
            .route("/stocks/summary", get(dashboard_summary))
            .layer(Extension(AuthUser {
                id: 1,
                username: "tester@example.com".to_string(),
            }))
            .with_state(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn seed(app: &Router, body: Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn round2_clamps_to_cents() {
        assert_eq!(round2(10.128), 10.13);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(45.0), 45.0);
    }

    #[tokio::test]
    async fn value_report_is_rounded_on_the_wire() {
        let app = router();
        for name in ["Gin", "Rum", "Vodka"] {
            seed(
                &app,
                json!({ "name": name, "category": "Spirits", "currentStock": 1, "unitPrice": 0.10 }),
            )
            .await;
        }

        let (status, body) = send(&app, get_request("/stocks/value")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalValue"], 0.3);
        assert_eq!(body["categories"], json!([{ "name": "Spirits", "value": 0.3 }]));
    }

    #[tokio::test]
    async fn alerts_carry_status_and_reorder_level() {
        let app = router();
        seed(
            &app,
            json!({ "name": "Gin", "minStock": 5, "currentStock": 0 }),
        )
        .await;
        seed(
            &app,
            json!({ "name": "Rum", "minStock": 5, "currentStock": 3 }),
        )
        .await;
        seed(
            &app,
            json!({ "name": "Vodka", "minStock": 5, "currentStock": 6 }),
        )
        .await;

        let (status, body) = send(&app, get_request("/stocks/alerts")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": 1, "name": "Gin", "quantity": 0, "reorderLevel": 5, "status": "out-of-stock" },
                { "id": 2, "name": "Rum", "quantity": 3, "reorderLevel": 5, "status": "low-stock" },
            ])
        );
    }

    #[tokio::test]
    async fn summary_totals_span_every_category() {
        let app = router();
        seed(
            &app,
            json!({ "name": "Gin", "category": "Spirits", "currentStock": 10, "unitPrice": 2.50 }),
        )
        .await;
        seed(
            &app,
            json!({ "name": "Tonic", "category": "Mixers", "minStock": 5, "currentStock": 3, "unitPrice": 1.00 }),
        )
        .await;

        let (status, body) = send(&app, get_request("/stocks/summary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "totalItems": 13,
                "totalValue": 28.0,
                "lowStockCount": 1,
                "categoryCount": 2,
                "productCount": 2,
            })
        );
    }
}
