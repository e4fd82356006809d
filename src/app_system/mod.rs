//! System orchestration, startup, and shutdown logic.

pub mod stock_system;

pub use stock_system::*;

use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber. `RUST_LOG` picks the level;
/// the default is `info`.
///
/// ```bash
/// RUST_LOG=debug cargo run    # Show debug logs
/// RUST_LOG=barstock::inventory_actor=debug cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(uptime())
        .compact()
        .init();
}
