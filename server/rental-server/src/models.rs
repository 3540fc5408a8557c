//! Request and response bodies. Addresses travel as base58 strings.

use rental_sdk::{ItemAccount, RentalTransaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemAccountResponse {
    pub owner: String,
    pub item_id: u64,
    pub name: String,
    pub description: String,
    pub price_per_hour: u64,
    pub price_per_day: u64,
    pub is_available: bool,
    pub metadata_uri: String,
}

impl From<ItemAccount> for ItemAccountResponse {
    fn from(item: ItemAccount) -> Self {
        Self {
            owner: item.owner.to_string(),
            item_id: item.item_id,
            name: item.name,
            description: item.description,
            price_per_hour: item.price_per_hour,
            price_per_day: item.price_per_day,
            is_available: item.is_available,
            metadata_uri: item.metadata_uri,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RentalTransactionResponse {
    pub item: String,
    pub renter: String,
    pub owner: String,
    pub start_time: i64,
    pub end_time: i64,
    pub total_price: u64,
    pub is_active: bool,
    pub is_completed: bool,
}

impl From<RentalTransaction> for RentalTransactionResponse {
    fn from(rental: RentalTransaction) -> Self {
        Self {
            item: rental.item.to_string(),
            renter: rental.renter.to_string(),
            owner: rental.owner.to_string(),
            start_time: rental.start_time,
            end_time: rental.end_time,
            total_price: rental.total_price,
            is_active: rental.is_active,
            is_completed: rental.is_completed,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceQuery {
    pub hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuoteResponse {
    pub item: String,
    pub hours: u64,
    pub total_price: u64,
}

/// Item fields echoed back after the metadata file is pinned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedRegistrationResponse {
    pub name: String,
    pub description: String,
    pub price_per_hour: u64,
    pub price_per_day: u64,
    pub metadata_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterItemRequest {
    pub name: String,
    pub description: String,
    pub price_per_hour: u64,
    pub price_per_day: u64,
    pub metadata_uri: String,
    pub user_pubkey: String,
    /// Client-generated item address; a random one is used when absent
    #[serde(default)]
    pub item_account: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterItemResponse {
    pub transaction: String,
    pub item_account: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub owner_key_str: String,
    pub item_account_key_str: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_per_hour: Option<u64>,
    #[serde(default)]
    pub price_per_day: Option<u64>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub metadata_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveItemRequest {
    pub owner_key_str: String,
    pub item_account_key_str: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateRentalRequest {
    pub item_account: String,
    /// Fee payer
    pub renter: String,
    pub owner: String,
    pub renter_usdc: String,
    pub hours: u64,
    /// Unix timestamp
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateRentalResponse {
    pub transaction: String,
    pub escrow_usdc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRentalRequest {
    pub owner_key_str: String,
    pub item_account_key_str: String,
    pub rental_transaction_key_str: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRentalResponse {
    pub transaction: String,
    pub escrow_usdc: String,
    pub renter: String,
    pub derived_owner_usdc_ata: String,
    pub derived_system_usdc_ata: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRentalRequest {
    pub rental_transaction_key_str: String,
    /// Compared against the rental record only
    pub renter_key_str: String,
    pub item_account_key_str: String,
    pub owner_key_str: String,
    /// Either the recorded renter or the recorded owner
    pub fee_payer_key_str: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction: String,
}
