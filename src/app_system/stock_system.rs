use tracing::{error, info};

use crate::clients::{DirectoryClient, InventoryClient};
use crate::domain::{ProductCreate, UserCreate};
use crate::inventory_actor::InventoryService;
use crate::user_actor::DirectoryService;

const CHANNEL_BUFFER: usize = 32;

/// The running application: both actors plus the clients that talk to them.
///
/// Responsible for starting the actors, wiring them together, and handling
/// shutdown.
pub struct StockSystem {
    pub inventory_client: InventoryClient,
    pub directory_client: DirectoryClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StockSystem {
    pub fn new() -> Self {
        info!("Starting stock system");

        let (inventory_service, inventory_client) = InventoryService::new(CHANNEL_BUFFER);
        let inventory_handle = tokio::spawn(inventory_service.run());

        let (directory_service, directory_client) = DirectoryService::new(CHANNEL_BUFFER);
        let directory_handle = tokio::spawn(directory_service.run());

        Self {
            inventory_client,
            directory_client,
            handles: vec![inventory_handle, directory_handle],
        }
    }

    /// Loads the demo catalog and demo accounts through the regular clients,
    /// so the data passes the same validation as live requests.
    pub async fn seed_demo_data(&self) -> Result<(), String> {
        let catalog = demo_catalog();
        let accounts = demo_accounts();
        let (product_count, user_count) = (catalog.len(), accounts.len());

        for params in catalog {
            self.inventory_client
                .create_product(params)
                .await
                .map_err(|e| e.to_string())?;
        }
        for params in accounts {
            self.directory_client
                .register(params)
                .await
                .map_err(|e| e.to_string())?;
        }

        info!(product_count, user_count, "Demo data seeded");
        Ok(())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.inventory_client
            .shutdown()
            .await
            .map_err(|e| e.to_string())?;
        self.directory_client
            .shutdown()
            .await
            .map_err(|e| e.to_string())?;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for StockSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_catalog() -> Vec<ProductCreate> {
    [
        ("Vodka", "Spirits", "Smirnoff", 750.0, "VOD-001", 10, 45, 25.99),
        ("Whiskey", "Spirits", "Jack Daniel's", 750.0, "WHI-001", 8, 32, 35.99),
        ("Red Bordeaux", "Wine", "Château Margaux", 750.0, "RWN-001", 5, 18, 45.99),
        ("IPA", "Beer", "Dogfish Head", 355.0, "BER-001", 20, 120, 6.99),
    ]
    .into_iter()
    .map(
        |(name, category, brand, volume_ml, barcode, min_stock, current_stock, unit_price)| {
            ProductCreate {
                name: Some(name.to_string()),
                category: Some(category.to_string()),
                brand: Some(brand.to_string()),
                volume_ml: Some(volume_ml),
                unit: Some("bottle".to_string()),
                barcode: Some(barcode.to_string()),
                min_stock: Some(min_stock),
                current_stock: Some(current_stock),
                unit_price: Some(unit_price),
            }
        },
    )
    .collect()
}

fn demo_accounts() -> Vec<UserCreate> {
    [
        ("demo@example.com", "password123", "Demo User"),
        ("admin@example.com", "admin123", "Admin User"),
    ]
    .into_iter()
    .map(|(username, password, name)| UserCreate {
        username: username.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    })
    .collect()
}
