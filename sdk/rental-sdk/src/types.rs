use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;

/// A serialized, unsigned legacy message ready for a client wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    /// Standard base64 of the message bytes
    pub message: String,

    pub fee_payer: Pubkey,

    /// Blockhash baked into the message; it expires after the ledger's
    /// validity window.
    pub recent_blockhash: Hash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterItemTransaction {
    pub transaction: UnsignedTransaction,

    /// Freshly generated address for the new item record
    pub item_account: Pubkey,

    pub item_registry: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateRentalTransaction {
    pub transaction: UnsignedTransaction,
    pub rental_transaction: Pubkey,
    pub escrow_usdc: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteRentalTransaction {
    pub transaction: UnsignedTransaction,
    pub escrow_usdc: Pubkey,

    /// Renter as recorded on the rental transaction
    pub renter: Pubkey,

    pub owner_usdc: Pubkey,
    pub system_usdc: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelRentalTransaction {
    pub transaction: UnsignedTransaction,

    /// Renter as recorded on the rental transaction
    pub renter: Pubkey,

    pub renter_usdc: Pubkey,
    pub escrow_usdc: Pubkey,
}
