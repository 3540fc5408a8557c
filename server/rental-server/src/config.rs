use clap::Parser;
use rental_sdk::{parse_pubkey, MarketplaceConfig};
use std::net::SocketAddr;

use crate::error::ServerError;

pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";
pub const DEFAULT_PINATA_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs";

/// Server configuration. Every option can also be set through the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "rental-server", version, about)]
pub struct Config {
    /// Ledger RPC endpoint
    #[arg(long, env = "SOLANA_RPC_URL")]
    pub rpc_url: String,

    /// Pinata JWT used as a bearer token for uploads
    #[arg(long, env = "Pinata_JWT", hide_env_values = true)]
    pub pinata_jwt: Option<String>,

    #[arg(long, env = "PINATA_API_URL", default_value = DEFAULT_PINATA_API_URL)]
    pub pinata_api_url: String,

    /// Prefix for the metadata URIs handed back to clients
    #[arg(long, env = "PINATA_GATEWAY_URL", default_value = DEFAULT_PINATA_GATEWAY_URL)]
    pub pinata_gateway_url: String,

    #[arg(long, env = "SYSTEM_REVENUE_ADDRESS")]
    pub system_revenue_address: Option<String>,

    #[arg(long, env = "USDC_MINT")]
    pub usdc_mint: Option<String>,

    #[arg(long, env = "ITEM_REGISTRATION_PROGRAM_ID")]
    pub item_registration_program_id: Option<String>,

    #[arg(long, env = "RENTAL_PROGRAM_ID")]
    pub rental_program_id: Option<String>,

    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8000")]
    pub bind_address: SocketAddr,
}

impl Config {
    /// Resolve the deployment addresses, falling back to the devnet defaults.
    pub fn marketplace(&self) -> Result<MarketplaceConfig, ServerError> {
        let defaults = MarketplaceConfig::default();
        let resolve = |field: &str, value: &Option<String>, default| match value {
            Some(value) => parse_pubkey(field, value).map_err(ServerError::from),
            None => Ok(default),
        };

        Ok(MarketplaceConfig {
            item_registration_program: resolve(
                "ITEM_REGISTRATION_PROGRAM_ID",
                &self.item_registration_program_id,
                defaults.item_registration_program,
            )?,
            rental_program: resolve(
                "RENTAL_PROGRAM_ID",
                &self.rental_program_id,
                defaults.rental_program,
            )?,
            usdc_mint: resolve("USDC_MINT", &self.usdc_mint, defaults.usdc_mint)?,
            system_revenue: resolve(
                "SYSTEM_REVENUE_ADDRESS",
                &self.system_revenue_address,
                defaults.system_revenue,
            )?,
        })
    }
}
