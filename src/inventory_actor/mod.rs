//! Inventory actor: the product store, its validation rules, the movement
//! journal, and the derived stock reports.

mod reports;
mod store;

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
