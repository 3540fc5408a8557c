//! RPC-backed ledger access.

use async_trait::async_trait;
use rental_sdk::SolConnection;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::error::Error;

/// Hands out a fresh connection for each request.
pub trait LedgerProvider: Send + Sync {
    fn connect(&self) -> Box<dyn SolConnection>;
}

pub struct RpcLedger {
    rpc_url: String,
}

impl RpcLedger {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
        }
    }
}

impl LedgerProvider for RpcLedger {
    fn connect(&self) -> Box<dyn SolConnection> {
        Box::new(RpcConnection::new(self.rpc_url.clone()))
    }
}

pub struct RpcConnection {
    client: RpcClient,
}

impl RpcConnection {
    pub fn new(rpc_url: String) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
        }
    }
}

#[async_trait]
impl SolConnection for RpcConnection {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .get_account_with_commitment(pubkey, self.client.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>> {
        Ok(self.client.get_latest_blockhash().await?)
    }
}
