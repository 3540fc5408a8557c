//! Typed decoders for the on-chain account records.
//!
//! Every record is laid out as an 8-byte discriminator followed by the
//! borsh-encoded fields. Accounts are allocated with headroom, so bytes left
//! over after the fields are ignored.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::{RentalSdkError, Result};

pub const DISCRIMINATOR_LEN: usize = 8;

/// A statically known account layout owned by one of the marketplace programs.
pub trait AccountSchema: BorshSerialize + BorshDeserialize + Sized {
    /// Record name, also used in not-found and decode errors.
    const NAME: &'static str;

    /// First 8 bytes of `sha256("account:<NAME>")`.
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];

    /// Decode raw account data, checking the discriminator first.
    fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(RentalSdkError::InvalidAccountData {
                entity: Self::NAME,
                reason: format!("{} bytes is too short for a discriminator", data.len()),
            });
        }

        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != Self::DISCRIMINATOR {
            return Err(RentalSdkError::InvalidAccountData {
                entity: Self::NAME,
                reason: format!("discriminator mismatch: {:?}", discriminator),
            });
        }

        Self::deserialize(&mut body).map_err(|e| RentalSdkError::InvalidAccountData {
            entity: Self::NAME,
            reason: e.to_string(),
        })
    }

    /// Encode into the same layout `decode` reads.
    fn to_account_data(&self) -> Result<Vec<u8>> {
        let mut data = Self::DISCRIMINATOR.to_vec();
        self.serialize(&mut data)
            .map_err(|e| RentalSdkError::InvalidAccountData {
                entity: Self::NAME,
                reason: e.to_string(),
            })?;
        Ok(data)
    }
}

/// A listed item, owned by the item registration program.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemAccount {
    pub owner: Pubkey,
    pub item_id: u64,
    pub name: String,
    pub description: String,
    pub price_per_hour: u64,
    pub price_per_day: u64,
    pub is_available: bool,
    pub metadata_uri: String,
}

impl AccountSchema for ItemAccount {
    const NAME: &'static str = "ItemAccount";
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [203, 112, 16, 182, 215, 183, 63, 175];
}

impl ItemAccount {
    /// Price the rental program will escrow for `hours`.
    ///
    /// The cheaper of a pure hourly rate and whole days at the daily rate plus
    /// the remaining hours at the hourly rate.
    pub fn quote_total_price(&self, hours: u64) -> Result<u64> {
        let overflow =
            || RentalSdkError::InvalidArgument(format!("price for {} hours overflows", hours));

        let hourly_total = self.price_per_hour.checked_mul(hours).ok_or_else(overflow)?;

        let days = hours / 24;
        let remaining_hours = hours % 24;
        let daily_total = self
            .price_per_day
            .checked_mul(days)
            .and_then(|total| {
                self.price_per_hour
                    .checked_mul(remaining_hours)
                    .and_then(|rest| total.checked_add(rest))
            })
            .ok_or_else(overflow)?;

        Ok(hourly_total.min(daily_total))
    }
}

/// Singleton list of registered item ids, addressed by the `item_registry` seed.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRegistry {
    pub next_item_id: u64,
    pub item_ids: Vec<u64>,
}

impl AccountSchema for ItemRegistry {
    const NAME: &'static str = "ItemRegistry";
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [105, 0, 243, 110, 41, 184, 118, 81];
}

/// Escrowed rental, owned by the rental flow program.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RentalTransaction {
    pub item: Pubkey,
    pub renter: Pubkey,
    pub owner: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub total_price: u64,
    pub is_active: bool,
    pub is_completed: bool,
}

impl AccountSchema for RentalTransaction {
    const NAME: &'static str = "RentalTransaction";
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [235, 18, 179, 106, 77, 124, 90, 246];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalStatus {
    /// Funds are in escrow
    Active,
    Completed,
    Cancelled,
}

impl RentalTransaction {
    pub fn status(&self) -> RentalStatus {
        match (self.is_active, self.is_completed) {
            (_, true) => RentalStatus::Completed,
            (true, false) => RentalStatus::Active,
            (false, false) => RentalStatus::Cancelled,
        }
    }
}
