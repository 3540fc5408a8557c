use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::error::Error;

/// Read-only handle to a ledger node.
///
/// Transactions built by this crate are returned unsigned; the client wallet
/// signs and submits them.
#[async_trait]
pub trait SolConnection: Send + Sync {
    /// Returns `Ok(None)` when the ledger has no account at `pubkey`.
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>>;

    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>>;
}
