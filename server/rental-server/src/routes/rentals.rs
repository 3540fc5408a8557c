use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use rental_sdk::basic::actions::{
    CancelRentalBuilder, CompleteRentalBuilder, InitiateRentalBuilder,
};
use rental_sdk::{fetch_rental_transaction, parse_pubkey};
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::models::{
    CancelRentalRequest, CompleteRentalRequest, CompleteRentalResponse, InitiateRentalRequest,
    InitiateRentalResponse, RentalTransactionResponse, TransactionResponse,
};
use crate::server::AppState;

#[instrument(skip_all)]
pub async fn get_rental_transaction(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RentalTransactionResponse>, ApiError> {
    let Path(address) = path?;
    let rental_transaction = parse_pubkey("rental_transaction_key_str", &address)?;
    debug!(%rental_transaction, "fetching rental transaction");
    let connection = state.ledger.connect();
    let rental =
        fetch_rental_transaction(connection.as_ref(), &state.marketplace, &rental_transaction)
            .await?;
    Ok(Json(rental.into()))
}

#[instrument(skip_all)]
pub async fn build_initiate_rental_tx(
    State(state): State<AppState>,
    payload: Result<Json<InitiateRentalRequest>, JsonRejection>,
) -> Result<Json<InitiateRentalResponse>, ApiError> {
    let Json(request) = payload?;
    let item_account = parse_pubkey("item_account", &request.item_account)?;
    let renter = parse_pubkey("renter", &request.renter)?;
    let owner = parse_pubkey("owner", &request.owner)?;
    let renter_usdc = parse_pubkey("renter_usdc", &request.renter_usdc)?;

    let connection = state.ledger.connect();
    let built = InitiateRentalBuilder::new(&state.marketplace)
        .with_item_account(item_account)
        .with_renter(renter)
        .with_owner(owner)
        .with_renter_usdc(renter_usdc)
        .with_terms(request.hours, request.start_time)
        .build_transaction(connection.as_ref())
        .await?;

    info!(%item_account, %renter, rental_transaction = %built.rental_transaction, "built initiate_rental");
    Ok(Json(InitiateRentalResponse {
        transaction: built.transaction.message,
        escrow_usdc: built.escrow_usdc.to_string(),
    }))
}

#[instrument(skip_all)]
pub async fn build_complete_rental_tx(
    State(state): State<AppState>,
    payload: Result<Json<CompleteRentalRequest>, JsonRejection>,
) -> Result<Json<CompleteRentalResponse>, ApiError> {
    let Json(request) = payload?;
    let owner = parse_pubkey("owner_key_str", &request.owner_key_str)?;
    let item_account = parse_pubkey("item_account_key_str", &request.item_account_key_str)?;
    let rental_transaction = parse_pubkey(
        "rental_transaction_key_str",
        &request.rental_transaction_key_str,
    )?;

    let connection = state.ledger.connect();
    let built = CompleteRentalBuilder::new(&state.marketplace)
        .with_owner(owner)
        .with_item_account(item_account)
        .with_rental_transaction(rental_transaction)
        .build_transaction(connection.as_ref())
        .await?;

    info!(%owner, %rental_transaction, "built complete_rental");
    Ok(Json(CompleteRentalResponse {
        transaction: built.transaction.message,
        escrow_usdc: built.escrow_usdc.to_string(),
        renter: built.renter.to_string(),
        derived_owner_usdc_ata: built.owner_usdc.to_string(),
        derived_system_usdc_ata: built.system_usdc.to_string(),
    }))
}

#[instrument(skip_all)]
pub async fn build_cancel_rental_tx(
    State(state): State<AppState>,
    payload: Result<Json<CancelRentalRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(request) = payload?;
    let rental_transaction = parse_pubkey(
        "rental_transaction_key_str",
        &request.rental_transaction_key_str,
    )?;
    let claimed_renter = parse_pubkey("renter_key_str", &request.renter_key_str)?;
    let item_account = parse_pubkey("item_account_key_str", &request.item_account_key_str)?;
    let owner = parse_pubkey("owner_key_str", &request.owner_key_str)?;
    let fee_payer = parse_pubkey("fee_payer_key_str", &request.fee_payer_key_str)?;

    let connection = state.ledger.connect();
    let built = CancelRentalBuilder::new(&state.marketplace)
        .with_rental_transaction(rental_transaction)
        .with_claimed_renter(claimed_renter)
        .with_item_account(item_account)
        .with_owner(owner)
        .with_fee_payer(fee_payer)
        .build_transaction(connection.as_ref())
        .await?;

    info!(%rental_transaction, renter = %built.renter, %fee_payer, "built cancel_rental");
    Ok(Json(TransactionResponse {
        transaction: built.transaction.message,
    }))
}
