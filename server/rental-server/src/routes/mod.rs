use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::server::AppState;

pub mod items;
pub mod registration;
pub mod rentals;

/// Largest metadata file accepted for pinning
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/items", get(items::list_items))
        .route("/item/:address", get(items::get_item))
        .route("/item/:address/quote", get(items::quote_item))
        .route(
            "/rental-transaction/:address",
            get(rentals::get_rental_transaction),
        )
        .route(
            "/prepare-item-registration/",
            post(registration::prepare_item_registration)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/build-register-item-tx/",
            post(registration::build_register_item_tx),
        )
        .route(
            "/build-update-item-tx/",
            post(registration::build_update_item_tx),
        )
        .route(
            "/build-remove-item-tx/",
            post(registration::build_remove_item_tx),
        )
        .route(
            "/build-initiate-rental-tx/",
            post(rentals::build_initiate_rental_tx),
        )
        .route(
            "/build-complete-rental-tx/",
            post(rentals::build_complete_rental_tx),
        )
        .route(
            "/build-cancel-rental-tx/",
            post(rentals::build_cancel_rental_tx),
        )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
