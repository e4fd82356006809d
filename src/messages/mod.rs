use tokio::sync::oneshot;

use crate::domain::{
    CategoryTotal, Credentials, InventoryLevel, InventorySummary, Product, ProductCreate,
    ProductPatch, ProductQuery, StockAlert, StockMovement, User, UserCreate, ValueReport,
};
use crate::inventory_actor::InventoryError;
use crate::user_actor::DirectoryError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes parameters
/// and a oneshot channel for responses.

#[derive(Debug)]
pub enum InventoryRequest {
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    GetProduct {
        id: u64,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    CreateProduct {
        params: ProductCreate,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    UpdateProduct {
        id: u64,
        patch: ProductPatch,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    DeleteProduct {
        id: u64,
        respond_to: ServiceResponse<Product, InventoryError>,
    },
    FilterProducts {
        query: ProductQuery,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    GetInventoryLevels {
        respond_to: ServiceResponse<Vec<InventoryLevel>, InventoryError>,
    },
    GetMovementHistory {
        respond_to: ServiceResponse<Vec<StockMovement>, InventoryError>,
    },
    GetCategoryBreakdown {
        respond_to: ServiceResponse<Vec<CategoryTotal>, InventoryError>,
    },
    GetLowStockAlerts {
        respond_to: ServiceResponse<Vec<StockAlert>, InventoryError>,
    },
    GetValueReport {
        respond_to: ServiceResponse<ValueReport, InventoryError>,
    },
    GetSummary {
        respond_to: ServiceResponse<InventorySummary, InventoryError>,
    },
    Shutdown,
    #[cfg(test)]
    GetProductCount {
        respond_to: ServiceResponse<usize, InventoryError>,
    },
}

#[derive(Debug)]
pub enum DirectoryRequest {
    Register {
        params: UserCreate,
        respond_to: ServiceResponse<User, DirectoryError>,
    },
    VerifyCredentials {
        credentials: Credentials,
        respond_to: ServiceResponse<User, DirectoryError>,
    },
    Shutdown,
    #[cfg(test)]
    GetUserCount {
        respond_to: ServiceResponse<usize, DirectoryError>,
    },
}
