//! Raw instruction assembly for the item registration and rental flow programs.
//!
//! Instruction data is an 8-byte discriminator (`sha256("global:<name>")[..8]`)
//! followed by the borsh-encoded arguments. Account lists must follow each
//! program's declared account struct exactly; the programs reject anything
//! else during deserialization.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::core::constants::{
    MarketplaceConfig, ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::error::{RentalSdkError, Result};

/// Instruction discriminators
pub mod discriminator {
    pub const REGISTER_ITEM: [u8; 8] = [88, 92, 1, 145, 20, 252, 237, 209];
    pub const UPDATE_ITEM: [u8; 8] = [28, 222, 44, 175, 216, 228, 171, 184];
    pub const REMOVE_ITEM: [u8; 8] = [4, 100, 172, 207, 1, 194, 26, 190];
    pub const INITIATE_RENTAL: [u8; 8] = [18, 91, 88, 92, 189, 145, 31, 140];
    pub const COMPLETE_RENTAL: [u8; 8] = [179, 18, 175, 28, 208, 197, 89, 176];
    pub const CANCEL_RENTAL: [u8; 8] = [97, 204, 63, 8, 84, 34, 28, 43];
}

//=============================================================================
// Arguments
//=============================================================================

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterItemArgs {
    pub name: String,
    pub description: String,
    pub price_per_hour: u64,
    pub price_per_day: u64,
    pub metadata_uri: String,
}

/// `None` leaves the field unchanged.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateItemArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_per_hour: Option<u64>,
    pub price_per_day: Option<u64>,
    pub is_available: Option<bool>,
    pub metadata_uri: Option<String>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiateRentalArgs {
    pub hours: u64,
    /// Unix timestamp
    pub start_time: i64,
}

//=============================================================================
// Accounts
//=============================================================================

/// Accounts:
/// 0. `[writable, signer]` Owner (fee payer)
/// 1. `[writable, signer]` Item account (fresh keypair, initialized here)
/// 2. `[writable]` Item registry (PDA: ["item_registry"])
/// 3. `[]` System program
#[derive(Debug, Clone, Copy)]
pub struct RegisterItemAccounts {
    pub owner: Pubkey,
    pub item_account: Pubkey,
    pub item_registry: Pubkey,
}

impl RegisterItemAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.item_account, true),
            AccountMeta::new(self.item_registry, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }
}

/// Accounts:
/// 0. `[writable, signer]` Owner
/// 1. `[writable]` Item account
#[derive(Debug, Clone, Copy)]
pub struct UpdateItemAccounts {
    pub owner: Pubkey,
    pub item_account: Pubkey,
}

impl UpdateItemAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.item_account, false),
        ]
    }
}

/// Accounts:
/// 0. `[writable, signer]` Owner (receives the item account rent)
/// 1. `[writable]` Item account
/// 2. `[writable]` Item registry (PDA: ["item_registry"])
#[derive(Debug, Clone, Copy)]
pub struct RemoveItemAccounts {
    pub owner: Pubkey,
    pub item_account: Pubkey,
    pub item_registry: Pubkey,
}

impl RemoveItemAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.item_account, false),
            AccountMeta::new(self.item_registry, false),
        ]
    }
}

/// Accounts:
/// 0. `[writable, signer]` Renter (fee payer)
/// 1. `[writable, signer]` Owner (authority for the availability CPI)
/// 2. `[writable]` Item account
/// 3. `[writable]` Rental transaction (PDA: ["rental_transaction", item, renter])
/// 4. `[]` USDC mint
/// 5. `[writable]` Renter USDC token account
/// 6. `[writable]` Escrow USDC (ATA of the rental transaction PDA)
/// 7. `[]` Item registration program
/// 8. `[]` Token program
/// 9. `[]` System program
/// 10. `[]` Associated token program
#[derive(Debug, Clone, Copy)]
pub struct InitiateRentalAccounts {
    pub renter: Pubkey,
    pub owner: Pubkey,
    pub item_account: Pubkey,
    pub rental_transaction: Pubkey,
    pub renter_usdc: Pubkey,
    pub escrow_usdc: Pubkey,
}

impl InitiateRentalAccounts {
    pub fn to_account_metas(&self, config: &MarketplaceConfig) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.renter, true),
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.item_account, false),
            AccountMeta::new(self.rental_transaction, false),
            AccountMeta::new_readonly(config.usdc_mint, false),
            AccountMeta::new(self.renter_usdc, false),
            AccountMeta::new(self.escrow_usdc, false),
            AccountMeta::new_readonly(config.item_registration_program, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        ]
    }
}

/// Accounts:
/// 0. `[writable, signer]` Owner (fee payer, receives escrow rent)
/// 1. `[writable]` Rental transaction
/// 2. `[writable]` Item account
/// 3. `[]` USDC mint
/// 4. `[writable]` Owner USDC (ATA)
/// 5. `[writable]` System revenue USDC (ATA)
/// 6. `[writable]` Escrow USDC (ATA of the rental transaction PDA)
/// 7. `[]` Item registration program
/// 8. `[]` Token program
#[derive(Debug, Clone, Copy)]
pub struct CompleteRentalAccounts {
    pub owner: Pubkey,
    pub rental_transaction: Pubkey,
    pub item_account: Pubkey,
    pub owner_usdc: Pubkey,
    pub system_usdc: Pubkey,
    pub escrow_usdc: Pubkey,
}

impl CompleteRentalAccounts {
    pub fn to_account_metas(&self, config: &MarketplaceConfig) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.rental_transaction, false),
            AccountMeta::new(self.item_account, false),
            AccountMeta::new_readonly(config.usdc_mint, false),
            AccountMeta::new(self.owner_usdc, false),
            AccountMeta::new(self.system_usdc, false),
            AccountMeta::new(self.escrow_usdc, false),
            AccountMeta::new_readonly(config.item_registration_program, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ]
    }
}

/// Accounts:
/// 0. `[writable, signer]` Renter (from the rental record)
/// 1. `[writable, signer]` Owner
/// 2. `[writable]` Rental transaction
/// 3. `[writable]` Item account
/// 4. `[]` USDC mint
/// 5. `[writable]` Renter USDC (ATA)
/// 6. `[writable]` Escrow USDC (ATA of the rental transaction PDA)
/// 7. `[]` Item registration program
/// 8. `[]` Token program
#[derive(Debug, Clone, Copy)]
pub struct CancelRentalAccounts {
    pub renter: Pubkey,
    pub owner: Pubkey,
    pub rental_transaction: Pubkey,
    pub item_account: Pubkey,
    pub renter_usdc: Pubkey,
    pub escrow_usdc: Pubkey,
}

impl CancelRentalAccounts {
    pub fn to_account_metas(&self, config: &MarketplaceConfig) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.renter, true),
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.rental_transaction, false),
            AccountMeta::new(self.item_account, false),
            AccountMeta::new_readonly(config.usdc_mint, false),
            AccountMeta::new(self.renter_usdc, false),
            AccountMeta::new(self.escrow_usdc, false),
            AccountMeta::new_readonly(config.item_registration_program, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ]
    }
}

//=============================================================================
// Instructions
//=============================================================================

fn instruction_data<T: BorshSerialize>(discriminator: [u8; 8], args: &T) -> Result<Vec<u8>> {
    let mut data = discriminator.to_vec();
    args.serialize(&mut data)
        .map_err(|e| RentalSdkError::InvalidArgument(e.to_string()))?;
    Ok(data)
}

pub fn register_item(
    config: &MarketplaceConfig,
    accounts: &RegisterItemAccounts,
    args: &RegisterItemArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.item_registration_program,
        accounts: accounts.to_account_metas(),
        data: instruction_data(discriminator::REGISTER_ITEM, args)?,
    })
}

pub fn update_item(
    config: &MarketplaceConfig,
    accounts: &UpdateItemAccounts,
    args: &UpdateItemArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.item_registration_program,
        accounts: accounts.to_account_metas(),
        data: instruction_data(discriminator::UPDATE_ITEM, args)?,
    })
}

pub fn remove_item(config: &MarketplaceConfig, accounts: &RemoveItemAccounts) -> Instruction {
    Instruction {
        program_id: config.item_registration_program,
        accounts: accounts.to_account_metas(),
        data: discriminator::REMOVE_ITEM.to_vec(),
    }
}

pub fn initiate_rental(
    config: &MarketplaceConfig,
    accounts: &InitiateRentalAccounts,
    args: &InitiateRentalArgs,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: config.rental_program,
        accounts: accounts.to_account_metas(config),
        data: instruction_data(discriminator::INITIATE_RENTAL, args)?,
    })
}

pub fn complete_rental(config: &MarketplaceConfig, accounts: &CompleteRentalAccounts) -> Instruction {
    Instruction {
        program_id: config.rental_program,
        accounts: accounts.to_account_metas(config),
        data: discriminator::COMPLETE_RENTAL.to_vec(),
    }
}

pub fn cancel_rental(config: &MarketplaceConfig, accounts: &CancelRentalAccounts) -> Instruction {
    Instruction {
        program_id: config.rental_program,
        accounts: accounts.to_account_metas(config),
        data: discriminator::CANCEL_RENTAL.to_vec(),
    }
}
