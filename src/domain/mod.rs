pub mod product;
pub mod reports;
pub mod user;

pub use product::*;
pub use reports::*;
pub use user::*;
