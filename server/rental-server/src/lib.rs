pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod pinning;
pub mod routes;
pub mod server;

pub use error::{ApiError, ServerError};
