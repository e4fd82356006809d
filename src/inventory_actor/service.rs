use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::InventoryClient;
use crate::domain::{
    CategoryTotal, InventoryLevel, InventorySummary, Product, ProductCreate, ProductPatch,
    ProductQuery, StockAlert, StockMovement, ValueReport,
};
use crate::messages::{InventoryRequest, ServiceResponse};

use super::error::InventoryError;
use super::reports;
use super::store::ProductStore;

/// Actor owning the product store.
///
/// Every read and write is serialized through the request channel, so each
/// reply reflects a consistent snapshot and no locking is needed.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    store: ProductStore,
}

impl InventoryService {
    /// Creates the service together with a client for its channel.
    pub fn new(buffer_size: usize) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store: ProductStore::new(),
        };
        let client = InventoryClient::new(sender);
        (service, client)
    }

    /// Runs the message loop until shutdown or until all clients are dropped.
    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!("InventoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::ListProducts { respond_to } => {
                    self.handle_list_products(respond_to);
                }
                InventoryRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                InventoryRequest::CreateProduct { params, respond_to } => {
                    self.handle_create_product(params, respond_to);
                }
                InventoryRequest::UpdateProduct { id, patch, respond_to } => {
                    self.handle_update_product(id, patch, respond_to);
                }
                InventoryRequest::DeleteProduct { id, respond_to } => {
                    self.handle_delete_product(id, respond_to);
                }
                InventoryRequest::FilterProducts { query, respond_to } => {
                    self.handle_filter_products(query, respond_to);
                }
                InventoryRequest::GetInventoryLevels { respond_to } => {
                    self.handle_inventory_levels(respond_to);
                }
                InventoryRequest::GetMovementHistory { respond_to } => {
                    self.handle_movement_history(respond_to);
                }
                InventoryRequest::GetCategoryBreakdown { respond_to } => {
                    self.handle_category_breakdown(respond_to);
                }
                InventoryRequest::GetLowStockAlerts { respond_to } => {
                    self.handle_low_stock_alerts(respond_to);
                }
                InventoryRequest::GetValueReport { respond_to } => {
                    self.handle_value_report(respond_to);
                }
                InventoryRequest::GetSummary { respond_to } => {
                    self.handle_summary(respond_to);
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
                #[cfg(test)]
                InventoryRequest::GetProductCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.count()));
                }
            }
        }

        info!("InventoryService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>, InventoryError>) {
        debug!("Processing list_products request");
        let products = self.store.list();
        info!(product_count = products.len(), "Listed products");
        let _ = respond_to.send(Ok(products));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(&self, id: u64, respond_to: ServiceResponse<Product, InventoryError>) {
        debug!("Processing get_product request");
        let result = self.store.get(id);
        match &result {
            Ok(product) => info!(product_name = %product.name, "Product found"),
            Err(_) => debug!("Product not found"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, params, respond_to))]
    fn handle_create_product(
        &mut self,
        params: ProductCreate,
        respond_to: ServiceResponse<Product, InventoryError>,
    ) {
        debug!("Processing create_product request");
        let result = self.store.insert(params);
        match &result {
            Ok(product) => {
                info!(product_id = product.id, product_name = %product.name, "Product created successfully");
            }
            Err(e) => error!(error = %e, "Product creation rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, patch, respond_to))]
    fn handle_update_product(
        &mut self,
        id: u64,
        patch: ProductPatch,
        respond_to: ServiceResponse<Product, InventoryError>,
    ) {
        debug!("Processing update_product request");
        let result = self.store.update(id, patch);
        match &result {
            Ok(product) => info!(product_name = %product.name, "Product updated successfully"),
            Err(e) => error!(error = %e, "Product update rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_delete_product(
        &mut self,
        id: u64,
        respond_to: ServiceResponse<Product, InventoryError>,
    ) {
        debug!("Processing delete_product request");
        let result = self.store.remove(id);
        match &result {
            Ok(product) => info!(product_name = %product.name, "Product deleted"),
            Err(e) => error!(error = %e, "Product deletion rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, query, respond_to))]
    fn handle_filter_products(
        &self,
        query: ProductQuery,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    ) {
        debug!("Processing filter_products request");
        let matches = self.store.filter(&query);
        info!(match_count = matches.len(), "Filtered products");
        let _ = respond_to.send(Ok(matches));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_inventory_levels(
        &self,
        respond_to: ServiceResponse<Vec<InventoryLevel>, InventoryError>,
    ) {
        debug!("Processing inventory_levels request");
        let _ = respond_to.send(Ok(reports::inventory_levels(self.store.products())));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_movement_history(
        &self,
        respond_to: ServiceResponse<Vec<StockMovement>, InventoryError>,
    ) {
        debug!("Processing movement_history request");
        let _ = respond_to.send(Ok(self.store.history()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_category_breakdown(
        &self,
        respond_to: ServiceResponse<Vec<CategoryTotal>, InventoryError>,
    ) {
        debug!("Processing category_breakdown request");
        let _ = respond_to.send(Ok(reports::category_breakdown(self.store.products())));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_low_stock_alerts(
        &self,
        respond_to: ServiceResponse<Vec<StockAlert>, InventoryError>,
    ) {
        debug!("Processing low_stock_alerts request");
        let alerts = reports::low_stock_alerts(self.store.products());
        info!(alert_count = alerts.len(), "Computed stock alerts");
        let _ = respond_to.send(Ok(alerts));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_value_report(&self, respond_to: ServiceResponse<ValueReport, InventoryError>) {
        debug!("Processing value_report request");
        let _ = respond_to.send(Ok(reports::value_report(self.store.products())));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_summary(&self, respond_to: ServiceResponse<InventorySummary, InventoryError>) {
        debug!("Processing summary request");
        let _ = respond_to.send(Ok(reports::summary(self.store.products())));
    }
}
