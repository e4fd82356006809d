//! HTTP surface: route table, shared state, and error mapping.

pub mod auth;
pub mod error;
pub mod products;
pub mod stocks;

pub use error::{ApiError, Json};

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::auth::{require_auth, TokenKeys};
use crate::clients::{DirectoryClient, InventoryClient};

/// Shared handler state; clones are cheap channel handles.
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryClient,
    pub directory: DirectoryClient,
    pub tokens: TokenKeys,
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/products", get(products::list_products).post(products::create_product))
        .route("/products/search", get(products::search_products))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/stocks/inventory", get(stocks::inventory_levels))
        .route("/stocks/history", get(stocks::movement_history))
        .route("/stocks/categories", get(stocks::category_breakdown))
        .route("/stocks/alerts", get(stocks::low_stock_alerts))
        .route("/stocks/value", get(stocks::inventory_value))
        .route("/stocks/summary", get(stocks::dashboard_summary))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
