use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{
    CategoryTotal, Credentials, InventoryLevel, InventorySummary, Product, ProductCreate,
    ProductPatch, ProductQuery, StockAlert, StockMovement, User, UserCreate, ValueReport,
};
use crate::inventory_actor::InventoryError;
use crate::messages::{DirectoryRequest, InventoryRequest};
use crate::user_actor::DirectoryError;

/// Generates a client method that wraps the oneshot request/response round
/// trip. A closed channel surfaces as the domain's actor-communication error.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// Inventory Client
// =============================================================================

/// Handle to the inventory actor. Cheap to clone; every HTTP handler holds one.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(InventoryRequest::Shutdown)
            .await
            .map_err(|_| InventoryError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(InventoryClient => fn list_products() -> Vec<Product> as InventoryRequest::ListProducts, Error = InventoryError);
client_method!(InventoryClient => fn get_product(id: u64) -> Product as InventoryRequest::GetProduct, Error = InventoryError);
client_method!(InventoryClient => fn create_product(params: ProductCreate) -> Product as InventoryRequest::CreateProduct, Error = InventoryError);
client_method!(InventoryClient => fn update_product(id: u64, patch: ProductPatch) -> Product as InventoryRequest::UpdateProduct, Error = InventoryError);
client_method!(InventoryClient => fn delete_product(id: u64) -> Product as InventoryRequest::DeleteProduct, Error = InventoryError);
client_method!(InventoryClient => fn filter_products(query: ProductQuery) -> Vec<Product> as InventoryRequest::FilterProducts, Error = InventoryError);
client_method!(InventoryClient => fn inventory_levels() -> Vec<InventoryLevel> as InventoryRequest::GetInventoryLevels, Error = InventoryError);
client_method!(InventoryClient => fn movement_history() -> Vec<StockMovement> as InventoryRequest::GetMovementHistory, Error = InventoryError);
client_method!(InventoryClient => fn category_breakdown() -> Vec<CategoryTotal> as InventoryRequest::GetCategoryBreakdown, Error = InventoryError);
client_method!(InventoryClient => fn low_stock_alerts() -> Vec<StockAlert> as InventoryRequest::GetLowStockAlerts, Error = InventoryError);
client_method!(InventoryClient => fn value_report() -> ValueReport as InventoryRequest::GetValueReport, Error = InventoryError);
client_method!(InventoryClient => fn summary() -> InventorySummary as InventoryRequest::GetSummary, Error = InventoryError);

// Test-only state inspection, answered straight off the actor's store.
#[cfg(test)]
client_method!(InventoryClient => fn product_count() -> usize as InventoryRequest::GetProductCount, Error = InventoryError);

// =============================================================================
// Directory Client
// =============================================================================

/// Handle to the user directory actor.
#[derive(Clone)]
pub struct DirectoryClient {
    sender: mpsc::Sender<DirectoryRequest>,
}

impl DirectoryClient {
    pub fn new(sender: mpsc::Sender<DirectoryRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), DirectoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(DirectoryRequest::Shutdown)
            .await
            .map_err(|_| DirectoryError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(DirectoryClient => fn register(params: UserCreate) -> User as DirectoryRequest::Register, Error = DirectoryError);
client_method!(DirectoryClient => fn verify_credentials(credentials: Credentials) -> User as DirectoryRequest::VerifyCredentials, Error = DirectoryError);

#[cfg(test)]
client_method!(DirectoryClient => fn user_count() -> usize as DirectoryRequest::GetUserCount, Error = DirectoryError);
