//! User directory actor: registration and credential verification.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
