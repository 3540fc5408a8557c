pub mod advanced;
pub mod authorize;
pub mod basic;
pub mod core;
pub mod error;
pub mod state;
pub mod types;
pub mod utils;

pub use crate::core::connection::SolConnection;
pub use crate::core::constants::MarketplaceConfig;
pub use crate::error::{RentalSdkError, Result};
pub use crate::state::{AccountSchema, ItemAccount, ItemRegistry, RentalStatus, RentalTransaction};
pub use crate::types::{
    CancelRentalTransaction, CompleteRentalTransaction, InitiateRentalTransaction,
    RegisterItemTransaction, UnsignedTransaction,
};
pub use crate::utils::{
    derive_ata, derive_escrow_ata, derive_item_registry_pda, derive_pda,
    derive_rental_transaction_pda, fetch_account, fetch_item_account, fetch_item_registry,
    fetch_rental_transaction, parse_pubkey,
};
