use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use rental_sdk::advanced::instructions::UpdateItemArgs;
use rental_sdk::authorize;
use rental_sdk::basic::actions::{RegisterItemBuilder, RemoveItemBuilder, UpdateItemBuilder};
use rental_sdk::parse_pubkey;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::models::{
    PreparedRegistrationResponse, RegisterItemRequest, RegisterItemResponse, RemoveItemRequest,
    TransactionResponse, UpdateItemRequest,
};
use crate::pinning::UploadedFile;
use crate::server::AppState;

#[derive(Default)]
struct RegistrationForm {
    name: Option<String>,
    description: Option<String>,
    price_per_hour: Option<u64>,
    price_per_day: Option<u64>,
    file: Option<UploadedFile>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::InvalidInput(format!("{} required", field)))
}

fn parse_price(field: &str, text: &str) -> Result<u64, ApiError> {
    text.trim()
        .parse()
        .map_err(|e| ApiError::InvalidInput(format!("Invalid {}: {}", field, e)))
}

async fn read_registration_form(mut multipart: Multipart) -> Result<RegistrationForm, ApiError> {
    let mut form = RegistrationForm::default();
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "price_per_hour" => {
                form.price_per_hour = Some(parse_price("price_per_hour", &field.text().await?)?)
            }
            "price_per_day" => {
                form.price_per_day = Some(parse_price("price_per_day", &field.text().await?)?)
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await?;
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    content,
                });
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Pins the item's metadata file and echoes the registration fields back
/// with the resulting URI.
#[instrument(skip_all)]
pub async fn prepare_item_registration(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PreparedRegistrationResponse>, ApiError> {
    let form = read_registration_form(multipart?).await?;
    let name = required(form.name, "name")?;
    let description = required(form.description, "description")?;
    let price_per_hour = required(form.price_per_hour, "price_per_hour")?;
    let price_per_day = required(form.price_per_day, "price_per_day")?;
    let file = required(form.file, "file")?;

    authorize::validate_name(&name)?;
    authorize::validate_description(&description)?;
    authorize::validate_price("price_per_hour", price_per_hour)?;
    authorize::validate_price("price_per_day", price_per_day)?;

    let metadata_uri = state.pinner.pin_file(file).await?;
    info!(%metadata_uri, "metadata pinned");

    Ok(Json(PreparedRegistrationResponse {
        name,
        description,
        price_per_hour,
        price_per_day,
        metadata_uri,
    }))
}

#[instrument(skip_all)]
pub async fn build_register_item_tx(
    State(state): State<AppState>,
    payload: Result<Json<RegisterItemRequest>, JsonRejection>,
) -> Result<Json<RegisterItemResponse>, ApiError> {
    let Json(request) = payload?;
    let owner = parse_pubkey("user_pubkey", &request.user_pubkey)?;
    let item_account = request
        .item_account
        .as_deref()
        .map(|value| parse_pubkey("item_account", value))
        .transpose()?;

    let mut builder = RegisterItemBuilder::new(&state.marketplace)
        .with_owner(owner)
        .with_name(request.name)
        .with_description(request.description)
        .with_prices(request.price_per_hour, request.price_per_day)
        .with_metadata_uri(request.metadata_uri);
    if let Some(item_account) = item_account {
        builder = builder.with_item_account(item_account);
    }

    let connection = state.ledger.connect();
    let built = builder.build_transaction(connection.as_ref()).await?;

    info!(%owner, item_account = %built.item_account, "built register_item");
    Ok(Json(RegisterItemResponse {
        transaction: built.transaction.message,
        item_account: built.item_account.to_string(),
    }))
}

#[instrument(skip_all)]
pub async fn build_update_item_tx(
    State(state): State<AppState>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(request) = payload?;
    let owner = parse_pubkey("owner_key_str", &request.owner_key_str)?;
    let item_account = parse_pubkey("item_account_key_str", &request.item_account_key_str)?;
    let changes = UpdateItemArgs {
        name: request.name,
        description: request.description,
        price_per_hour: request.price_per_hour,
        price_per_day: request.price_per_day,
        is_available: request.is_available,
        metadata_uri: request.metadata_uri,
    };

    let connection = state.ledger.connect();
    let built = UpdateItemBuilder::new(&state.marketplace)
        .with_owner(owner)
        .with_item_account(item_account)
        .with_changes(changes)
        .build_transaction(connection.as_ref())
        .await?;

    info!(%owner, %item_account, "built update_item");
    Ok(Json(TransactionResponse {
        transaction: built.message,
    }))
}

#[instrument(skip_all)]
pub async fn build_remove_item_tx(
    State(state): State<AppState>,
    payload: Result<Json<RemoveItemRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(request) = payload?;
    let owner = parse_pubkey("owner_key_str", &request.owner_key_str)?;
    let item_account = parse_pubkey("item_account_key_str", &request.item_account_key_str)?;

    let connection = state.ledger.connect();
    let built = RemoveItemBuilder::new(&state.marketplace)
        .with_owner(owner)
        .with_item_account(item_account)
        .build_transaction(connection.as_ref())
        .await?;

    info!(%owner, %item_account, "built remove_item");
    Ok(Json(TransactionResponse {
        transaction: built.message,
    }))
}
