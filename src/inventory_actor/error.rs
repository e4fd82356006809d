use thiserror::Error;

/// Errors produced by the inventory actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(u64),

    #[error("{message} ({field})")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("Barcode already exists: {0}")]
    DuplicateBarcode(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
