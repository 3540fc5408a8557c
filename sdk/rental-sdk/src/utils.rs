use crate::core::connection::SolConnection;
use crate::core::constants::{
    MarketplaceConfig, ASSOCIATED_TOKEN_PROGRAM_ID, ITEM_REGISTRY_SEED, RENTAL_TRANSACTION_SEED,
    TOKEN_PROGRAM_ID,
};
use crate::error::{RentalSdkError, Result};
use crate::state::{AccountSchema, ItemAccount, ItemRegistry, RentalTransaction};
use solana_sdk::pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN};
use std::str::FromStr;

//=============================================================================
// Address Derivation Helpers
//=============================================================================

/// Find the canonical program address and bump for `seeds` under `program_id`.
///
/// The bump occupies one of the `MAX_SEEDS` slots, so at most 15 caller seeds
/// are accepted, each no longer than `MAX_SEED_LEN` bytes.
pub fn derive_pda(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    if seeds.len() >= MAX_SEEDS || seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(RentalSdkError::InvalidSeeds);
    }
    Pubkey::try_find_program_address(seeds, program_id).ok_or(RentalSdkError::InvalidSeeds)
}

/// Derive the associated token account for an (owner, mint) pair
pub fn derive_ata(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    let (ata, _) = derive_pda(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )?;
    Ok(ata)
}

/// Derive the singleton ItemRegistry PDA
pub fn derive_item_registry_pda(config: &MarketplaceConfig) -> Result<(Pubkey, u8)> {
    derive_pda(&[ITEM_REGISTRY_SEED], &config.item_registration_program)
}

/// Derive the RentalTransaction PDA for an (item, renter) pair
pub fn derive_rental_transaction_pda(
    config: &MarketplaceConfig,
    item_account: &Pubkey,
    renter: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive_pda(
        &[RENTAL_TRANSACTION_SEED, item_account.as_ref(), renter.as_ref()],
        &config.rental_program,
    )
}

/// Derive the escrow token account held by a RentalTransaction PDA
pub fn derive_escrow_ata(config: &MarketplaceConfig, rental_transaction: &Pubkey) -> Result<Pubkey> {
    derive_ata(rental_transaction, &config.usdc_mint)
}

/// Parse a base58 address, naming the offending request field on failure
pub fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|e| RentalSdkError::InvalidAddress {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

//=============================================================================
// Account Fetching
//=============================================================================

/// Fetch and decode a record owned by `owner_program`.
///
/// Missing and zero-length accounts are reported as not found; a transport
/// failure never is.
pub async fn fetch_account<T, C>(connection: &C, address: &Pubkey, owner_program: &Pubkey) -> Result<T>
where
    T: AccountSchema,
    C: SolConnection + ?Sized,
{
    let account = connection
        .get_account(address)
        .await
        .map_err(|e| RentalSdkError::Connection(e.to_string()))?;

    let account = match account {
        Some(account) if !account.data.is_empty() => account,
        _ => {
            return Err(RentalSdkError::AccountNotFound {
                entity: T::NAME,
                address: *address,
            })
        },
    };

    if account.owner != *owner_program {
        return Err(RentalSdkError::InvalidAccountData {
            entity: T::NAME,
            reason: format!(
                "account {} is owned by {}, expected {}",
                address, account.owner, owner_program
            ),
        });
    }

    T::decode(&account.data)
}

pub async fn fetch_item_account<C: SolConnection + ?Sized>(
    connection: &C,
    config: &MarketplaceConfig,
    address: &Pubkey,
) -> Result<ItemAccount> {
    fetch_account(connection, address, &config.item_registration_program).await
}

pub async fn fetch_item_registry<C: SolConnection + ?Sized>(
    connection: &C,
    config: &MarketplaceConfig,
) -> Result<ItemRegistry> {
    let (registry_pda, _) = derive_item_registry_pda(config)?;
    fetch_account(connection, &registry_pda, &config.item_registration_program).await
}

pub async fn fetch_rental_transaction<C: SolConnection + ?Sized>(
    connection: &C,
    config: &MarketplaceConfig,
    address: &Pubkey,
) -> Result<RentalTransaction> {
    fetch_account(connection, address, &config.rental_program).await
}
