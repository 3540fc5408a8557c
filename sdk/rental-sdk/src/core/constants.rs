use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

// Default Devnet deployment
pub const ITEM_REGISTRATION_PROGRAM_ID: Pubkey =
    pubkey!("Dh1N1esPsvQdgakyM13S3CMFzT2jzDeKbNKerx1vK6Jw");
pub const RENTAL_PROGRAM_ID: Pubkey = pubkey!("6XqPznLJiGdqzD4FkD9yQGMN2XQb1fLXL1UKfwq8kgPQ");
pub const DEVNET_USDC_MINT: Pubkey = pubkey!("4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU");
/// Platform fee recipient checked by `complete_rental` on-chain.
pub const SYSTEM_REVENUE_ADDRESS: Pubkey = pubkey!("6YDGTnmBDe34SYeziSbsVP6ss5ogWREHXec87CJu7Hos");

pub const ITEM_REGISTRY_SEED: &[u8] = b"item_registry";
pub const RENTAL_TRANSACTION_SEED: &[u8] = b"rental_transaction";

// Limits enforced by the item registration program
pub const MAX_NAME_LENGTH: usize = 60;
pub const MAX_DESCRIPTION_LENGTH: usize = 250;
pub const MAX_METADATA_URI_LENGTH: usize = 200;

/// Deployment-specific addresses shared by every builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketplaceConfig {
    pub item_registration_program: Pubkey,
    pub rental_program: Pubkey,
    pub usdc_mint: Pubkey,
    pub system_revenue: Pubkey,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            item_registration_program: ITEM_REGISTRATION_PROGRAM_ID,
            rental_program: RENTAL_PROGRAM_ID,
            usdc_mint: DEVNET_USDC_MINT,
            system_revenue: SYSTEM_REVENUE_ADDRESS,
        }
    }
}

impl MarketplaceConfig {
    /// Addresses a freshly generated item account must never collide with.
    pub fn reserved_addresses(&self) -> [Pubkey; 7] {
        [
            SYSTEM_PROGRAM_ID,
            TOKEN_PROGRAM_ID,
            ASSOCIATED_TOKEN_PROGRAM_ID,
            self.item_registration_program,
            self.rental_program,
            self.usdc_mint,
            self.system_revenue,
        ]
    }
}
