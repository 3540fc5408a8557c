//! Precondition checks run before any mutating instruction is assembled.
//!
//! The wallet signature remains the final authorization gate on-chain.

use solana_sdk::pubkey::Pubkey;
use tracing::warn;

use crate::core::constants::{MAX_DESCRIPTION_LENGTH, MAX_METADATA_URI_LENGTH, MAX_NAME_LENGTH};
use crate::error::{RentalSdkError, Result};
use crate::state::{ItemAccount, RentalStatus, RentalTransaction};

/// Parties a cancel-rental instruction is built for, all resolved from chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelParties {
    pub renter: Pubkey,
    pub owner: Pubkey,
    pub fee_payer: Pubkey,
}

/// The requester must be the recorded owner on both the item and the rental.
pub fn authorize_complete(
    owner: &Pubkey,
    item: &ItemAccount,
    rental: &RentalTransaction,
) -> Result<()> {
    if *owner != item.owner || *owner != rental.owner {
        return Err(RentalSdkError::Unauthorized(
            "Provided owner does not match record owner.".to_string(),
        ));
    }
    Ok(())
}

/// Either party of the rental may cancel it.
///
/// The owner must match both programs' records. The renter is always taken
/// from the rental record; `claimed_renter` is only compared for logging. The
/// fee payer has to be the recorded renter or the recorded owner.
pub fn authorize_cancel(
    owner: &Pubkey,
    claimed_renter: Option<&Pubkey>,
    fee_payer: &Pubkey,
    item: &ItemAccount,
    rental: &RentalTransaction,
) -> Result<CancelParties> {
    if *owner != item.owner {
        return Err(RentalSdkError::Unauthorized(
            "Provided owner does not match item's owner.".to_string(),
        ));
    }
    if *owner != rental.owner {
        return Err(RentalSdkError::Unauthorized(
            "Provided owner does not match rental transaction's owner.".to_string(),
        ));
    }

    if let Some(claimed) = claimed_renter.filter(|claimed| **claimed != rental.renter) {
        warn!(
            claimed_renter = %claimed,
            recorded_renter = %rental.renter,
            "cancel request renter differs from rental record, using recorded renter"
        );
    }

    if *fee_payer != rental.renter && *fee_payer != rental.owner {
        return Err(RentalSdkError::Unauthorized(
            "Fee payer must be the rental's renter or owner.".to_string(),
        ));
    }

    Ok(CancelParties {
        renter: rental.renter,
        owner: rental.owner,
        fee_payer: *fee_payer,
    })
}

/// The requester must own the item.
pub fn authorize_item_owner(owner: &Pubkey, item: &ItemAccount) -> Result<()> {
    if *owner != item.owner {
        return Err(RentalSdkError::Unauthorized(
            "Provided owner does not match item's owner.".to_string(),
        ));
    }
    Ok(())
}

/// The rental record must belong to `item_account` and still hold escrow.
pub fn ensure_rental_in_escrow(item_account: &Pubkey, rental: &RentalTransaction) -> Result<()> {
    if rental.item != *item_account {
        return Err(RentalSdkError::InvalidArgument(format!(
            "rental transaction is for item {}, not {}",
            rental.item, item_account
        )));
    }
    if rental.status() != RentalStatus::Active {
        return Err(RentalSdkError::InvalidArgument(format!(
            "rental transaction is {:?}, not Active",
            rental.status()
        )));
    }
    Ok(())
}

//=============================================================================
// Argument Validation
//=============================================================================

pub fn validate_name(name: &str) -> Result<()> {
    check_length("name", name, MAX_NAME_LENGTH)
}

pub fn validate_description(description: &str) -> Result<()> {
    check_length("description", description, MAX_DESCRIPTION_LENGTH)
}

pub fn validate_metadata_uri(metadata_uri: &str) -> Result<()> {
    check_length("metadata_uri", metadata_uri, MAX_METADATA_URI_LENGTH)
}

pub fn validate_price(field: &str, price: u64) -> Result<()> {
    if price == 0 {
        return Err(RentalSdkError::InvalidArgument(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}

pub fn validate_rental_terms(hours: u64, start_time: i64) -> Result<()> {
    if hours == 0 {
        return Err(RentalSdkError::InvalidArgument(
            "rental duration must be greater than zero hours".to_string(),
        ));
    }
    if start_time < 0 {
        return Err(RentalSdkError::InvalidArgument(
            "start_time must be a unix timestamp".to_string(),
        ));
    }
    // end_time is computed on-chain as start_time + hours * 3600
    i64::try_from(hours)
        .ok()
        .and_then(|hours| hours.checked_mul(3600))
        .and_then(|duration| start_time.checked_add(duration))
        .map(|_| ())
        .ok_or_else(|| RentalSdkError::InvalidArgument(format!("{} hours is too long", hours)))
}

// Byte length, as the program measures it
fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(RentalSdkError::InvalidArgument(format!(
            "{} is too long: {} bytes, max {}",
            field,
            value.len(),
            max
        )));
    }
    Ok(())
}
