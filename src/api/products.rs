use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::domain::{Product, ProductCreate, ProductPatch, ProductQuery};

use super::{ApiError, AppState, Json};

/// Response wrapper for the product CRUD endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> Envelope<T> {
    fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
            count: None,
        }
    }

    fn message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
            count: None,
        }
    }
}

fn listing(data: Vec<Product>) -> Envelope<Vec<Product>> {
    let count = data.len();
    Envelope {
        count: Some(count),
        ..Envelope::data(data)
    }
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let products = state.inventory.list_products().await?;
    Ok(Json(listing(products)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let product = state.inventory.get_product(id).await?;
    Ok(Json(Envelope::data(product)))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(params): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Envelope<Product>>), ApiError> {
    let product = state.inventory.create_product(params).await?;
    info!(user_id = user.id, username = %user.username, product_id = product.id, "Product created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::message("Product created", product)),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let product = state.inventory.update_product(id, patch).await?;
    info!(user_id = user.id, username = %user.username, product_id = product.id, "Product updated");
    Ok(Json(Envelope::message("Product updated", product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let product = state.inventory.delete_product(id).await?;
    info!(user_id = user.id, username = %user.username, product_id = product.id, "Product deleted");
    Ok(Json(Envelope::message("Product deleted", product)))
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let products = state.inventory.filter_products(query).await?;
    Ok(Json(listing(products)))
}
