pub mod error;
pub mod models;
pub mod roster;
pub mod validation;

pub use error::ErrorResponse;
pub use models::*;
pub use roster::{upsert, Upsert};
pub use validation::*;
