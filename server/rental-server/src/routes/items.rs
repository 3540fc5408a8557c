use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use rental_sdk::{fetch_item_account, fetch_item_registry, parse_pubkey};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::models::{ItemAccountResponse, PriceQuery, PriceQuoteResponse};
use crate::server::AppState;

#[instrument(skip_all)]
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ItemAccountResponse>, ApiError> {
    let Path(address) = path?;
    let item_account = parse_pubkey("item_account_key_str", &address)?;
    debug!(%item_account, "fetching item");
    let connection = state.ledger.connect();
    let item = fetch_item_account(connection.as_ref(), &state.marketplace, &item_account).await?;
    Ok(Json(item.into()))
}

/// Ids of every registered item, in registration order
#[instrument(skip(state))]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<u64>>, ApiError> {
    let connection = state.ledger.connect();
    let registry = fetch_item_registry(connection.as_ref(), &state.marketplace).await?;
    Ok(Json(registry.item_ids))
}

#[instrument(skip_all)]
pub async fn quote_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<PriceQuoteResponse>, ApiError> {
    let Path(address) = path?;
    let Query(PriceQuery { hours }) = query?;
    let item_account = parse_pubkey("item_account_key_str", &address)?;
    if hours == 0 {
        return Err(ApiError::InvalidInput(
            "hours must be greater than zero".to_string(),
        ));
    }

    let connection = state.ledger.connect();
    let item = fetch_item_account(connection.as_ref(), &state.marketplace, &item_account).await?;
    let total_price = item.quote_total_price(hours)?;
    Ok(Json(PriceQuoteResponse {
        item: item_account.to_string(),
        hours,
        total_price,
    }))
}
