//! Build flows: validate, derive, fetch, authorize, assemble, compose.
//!
//! Nothing is fetched from the ledger until the request arguments are known to
//! be well formed, and the blockhash is only requested once every check passed.

use crate::advanced::instructions::{
    self, CancelRentalAccounts, CompleteRentalAccounts, InitiateRentalAccounts,
    InitiateRentalArgs, RegisterItemAccounts, RegisterItemArgs, RemoveItemAccounts,
    UpdateItemAccounts, UpdateItemArgs,
};
use crate::authorize;
use crate::basic::transaction::compose_unsigned;
use crate::core::connection::SolConnection;
use crate::core::constants::MarketplaceConfig;
use crate::error::{RentalSdkError, Result};
use crate::types::{
    CancelRentalTransaction, CompleteRentalTransaction, InitiateRentalTransaction,
    RegisterItemTransaction, UnsignedTransaction,
};
use crate::utils;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use tracing::debug;

fn required<T: Copy>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| RentalSdkError::InvalidArgument(format!("{} required", field)))
}

pub struct RegisterItemBuilder<'a> {
    config: &'a MarketplaceConfig,
    owner: Option<Pubkey>,
    item_account: Option<Pubkey>,
    name: String,
    description: String,
    price_per_hour: u64,
    price_per_day: u64,
    metadata_uri: String,
}

impl<'a> RegisterItemBuilder<'a> {
    pub fn new(config: &'a MarketplaceConfig) -> Self {
        Self {
            config,
            owner: None,
            item_account: None,
            name: String::new(),
            description: String::new(),
            price_per_hour: 0,
            price_per_day: 0,
            metadata_uri: String::new(),
        }
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Use a client-generated item account instead of a fresh random one.
    /// The client keeps its keypair and co-signs the message.
    pub fn with_item_account(mut self, item_account: Pubkey) -> Self {
        self.item_account = Some(item_account);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prices(mut self, price_per_hour: u64, price_per_day: u64) -> Self {
        self.price_per_hour = price_per_hour;
        self.price_per_day = price_per_day;
        self
    }

    pub fn with_metadata_uri(mut self, metadata_uri: impl Into<String>) -> Self {
        self.metadata_uri = metadata_uri.into();
        self
    }

    /// Generates an item address that collides with no fixed program or mint address.
    fn fresh_item_account(&self) -> Pubkey {
        let reserved = self.config.reserved_addresses();
        loop {
            let candidate = Keypair::new().pubkey();
            if !reserved.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub async fn build_transaction<C: SolConnection + ?Sized>(
        &self,
        connection: &C,
    ) -> Result<RegisterItemTransaction> {
        let owner = required(self.owner, "owner")?;
        authorize::validate_name(&self.name)?;
        authorize::validate_description(&self.description)?;
        authorize::validate_metadata_uri(&self.metadata_uri)?;
        authorize::validate_price("price_per_hour", self.price_per_hour)?;
        authorize::validate_price("price_per_day", self.price_per_day)?;

        let (item_registry, _) = utils::derive_item_registry_pda(self.config)?;
        let item_account = match self.item_account {
            Some(item_account) => {
                if item_account == owner
                    || item_account == item_registry
                    || self.config.reserved_addresses().contains(&item_account)
                {
                    return Err(RentalSdkError::InvalidArgument(format!(
                        "item_account {} is reserved and cannot hold a new item",
                        item_account
                    )));
                }
                item_account
            },
            None => self.fresh_item_account(),
        };
        debug!(%owner, %item_account, %item_registry, "building register_item");

        let ix = instructions::register_item(
            self.config,
            &RegisterItemAccounts {
                owner,
                item_account,
                item_registry,
            },
            &RegisterItemArgs {
                name: self.name.clone(),
                description: self.description.clone(),
                price_per_hour: self.price_per_hour,
                price_per_day: self.price_per_day,
                metadata_uri: self.metadata_uri.clone(),
            },
        )?;

        let transaction = compose_unsigned(connection, ix, &owner).await?;
        Ok(RegisterItemTransaction {
            transaction,
            item_account,
            item_registry,
        })
    }
}

pub struct InitiateRentalBuilder<'a> {
    config: &'a MarketplaceConfig,
    item_account: Option<Pubkey>,
    renter: Option<Pubkey>,
    owner: Option<Pubkey>,
    renter_usdc: Option<Pubkey>,
    hours: u64,
    start_time: i64,
}

impl<'a> InitiateRentalBuilder<'a> {
    pub fn new(config: &'a MarketplaceConfig) -> Self {
        Self {
            config,
            item_account: None,
            renter: None,
            owner: None,
            renter_usdc: None,
            hours: 0,
            start_time: 0,
        }
    }

    pub fn with_item_account(mut self, item_account: Pubkey) -> Self {
        self.item_account = Some(item_account);
        self
    }

    pub fn with_renter(mut self, renter: Pubkey) -> Self {
        self.renter = Some(renter);
        self
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Token account the rental price is paid from
    pub fn with_renter_usdc(mut self, renter_usdc: Pubkey) -> Self {
        self.renter_usdc = Some(renter_usdc);
        self
    }

    pub fn with_terms(mut self, hours: u64, start_time: i64) -> Self {
        self.hours = hours;
        self.start_time = start_time;
        self
    }

    pub async fn build_transaction<C: SolConnection + ?Sized>(
        &self,
        connection: &C,
    ) -> Result<InitiateRentalTransaction> {
        let item_account = required(self.item_account, "item_account")?;
        let renter = required(self.renter, "renter")?;
        let owner = required(self.owner, "owner")?;
        let renter_usdc = required(self.renter_usdc, "renter_usdc")?;
        authorize::validate_rental_terms(self.hours, self.start_time)?;

        let (rental_transaction, _) =
            utils::derive_rental_transaction_pda(self.config, &item_account, &renter)?;
        let escrow_usdc = utils::derive_escrow_ata(self.config, &rental_transaction)?;
        debug!(%rental_transaction, %escrow_usdc, "building initiate_rental");

        let ix = instructions::initiate_rental(
            self.config,
            &InitiateRentalAccounts {
                renter,
                owner,
                item_account,
                rental_transaction,
                renter_usdc,
                escrow_usdc,
            },
            &InitiateRentalArgs {
                hours: self.hours,
                start_time: self.start_time,
            },
        )?;

        let transaction = compose_unsigned(connection, ix, &renter).await?;
        Ok(InitiateRentalTransaction {
            transaction,
            rental_transaction,
            escrow_usdc,
        })
    }
}

pub struct CompleteRentalBuilder<'a> {
    config: &'a MarketplaceConfig,
    owner: Option<Pubkey>,
    item_account: Option<Pubkey>,
    rental_transaction: Option<Pubkey>,
}

impl<'a> CompleteRentalBuilder<'a> {
    pub fn new(config: &'a MarketplaceConfig) -> Self {
        Self {
            config,
            owner: None,
            item_account: None,
            rental_transaction: None,
        }
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_item_account(mut self, item_account: Pubkey) -> Self {
        self.item_account = Some(item_account);
        self
    }

    pub fn with_rental_transaction(mut self, rental_transaction: Pubkey) -> Self {
        self.rental_transaction = Some(rental_transaction);
        self
    }

    pub async fn build_transaction<C: SolConnection + ?Sized>(
        &self,
        connection: &C,
    ) -> Result<CompleteRentalTransaction> {
        let owner = required(self.owner, "owner")?;
        let item_account = required(self.item_account, "item_account")?;
        let rental_transaction = required(self.rental_transaction, "rental_transaction")?;

        let item = utils::fetch_item_account(connection, self.config, &item_account).await?;
        let rental =
            utils::fetch_rental_transaction(connection, self.config, &rental_transaction).await?;

        authorize::authorize_complete(&owner, &item, &rental)?;
        authorize::ensure_rental_in_escrow(&item_account, &rental)?;

        let owner_usdc = utils::derive_ata(&owner, &self.config.usdc_mint)?;
        let system_usdc = utils::derive_ata(&self.config.system_revenue, &self.config.usdc_mint)?;
        let escrow_usdc = utils::derive_escrow_ata(self.config, &rental_transaction)?;
        debug!(%owner_usdc, %system_usdc, %escrow_usdc, "building complete_rental");

        let ix = instructions::complete_rental(
            self.config,
            &CompleteRentalAccounts {
                owner,
                rental_transaction,
                item_account,
                owner_usdc,
                system_usdc,
                escrow_usdc,
            },
        );

        let transaction = compose_unsigned(connection, ix, &owner).await?;
        Ok(CompleteRentalTransaction {
            transaction,
            escrow_usdc,
            renter: rental.renter,
            owner_usdc,
            system_usdc,
        })
    }
}

pub struct CancelRentalBuilder<'a> {
    config: &'a MarketplaceConfig,
    rental_transaction: Option<Pubkey>,
    claimed_renter: Option<Pubkey>,
    item_account: Option<Pubkey>,
    owner: Option<Pubkey>,
    fee_payer: Option<Pubkey>,
}

impl<'a> CancelRentalBuilder<'a> {
    pub fn new(config: &'a MarketplaceConfig) -> Self {
        Self {
            config,
            rental_transaction: None,
            claimed_renter: None,
            item_account: None,
            owner: None,
            fee_payer: None,
        }
    }

    pub fn with_rental_transaction(mut self, rental_transaction: Pubkey) -> Self {
        self.rental_transaction = Some(rental_transaction);
        self
    }

    /// Renter named by the requester. Only compared against the rental
    /// record; the instruction always uses the recorded renter.
    pub fn with_claimed_renter(mut self, renter: Pubkey) -> Self {
        self.claimed_renter = Some(renter);
        self
    }

    pub fn with_item_account(mut self, item_account: Pubkey) -> Self {
        self.item_account = Some(item_account);
        self
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_fee_payer(mut self, fee_payer: Pubkey) -> Self {
        self.fee_payer = Some(fee_payer);
        self
    }

    pub async fn build_transaction<C: SolConnection + ?Sized>(
        &self,
        connection: &C,
    ) -> Result<CancelRentalTransaction> {
        let rental_transaction = required(self.rental_transaction, "rental_transaction")?;
        let item_account = required(self.item_account, "item_account")?;
        let owner = required(self.owner, "owner")?;
        let fee_payer = required(self.fee_payer, "fee_payer")?;

        let rental =
            utils::fetch_rental_transaction(connection, self.config, &rental_transaction).await?;
        let item = utils::fetch_item_account(connection, self.config, &item_account).await?;

        let parties = authorize::authorize_cancel(
            &owner,
            self.claimed_renter.as_ref(),
            &fee_payer,
            &item,
            &rental,
        )?;
        authorize::ensure_rental_in_escrow(&item_account, &rental)?;

        let renter_usdc = utils::derive_ata(&parties.renter, &self.config.usdc_mint)?;
        let escrow_usdc = utils::derive_escrow_ata(self.config, &rental_transaction)?;
        debug!(renter = %parties.renter, %renter_usdc, %escrow_usdc, "building cancel_rental");

        let ix = instructions::cancel_rental(
            self.config,
            &CancelRentalAccounts {
                renter: parties.renter,
                owner: parties.owner,
                rental_transaction,
                item_account,
                renter_usdc,
                escrow_usdc,
            },
        );

        let transaction = compose_unsigned(connection, ix, &parties.fee_payer).await?;
        Ok(CancelRentalTransaction {
            transaction,
            renter: parties.renter,
            renter_usdc,
            escrow_usdc,
        })
    }
}

pub struct UpdateItemBuilder<'a> {
    config: &'a MarketplaceConfig,
    owner: Option<Pubkey>,
    item_account: Option<Pubkey>,
    changes: UpdateItemArgs,
}

impl<'a> UpdateItemBuilder<'a> {
    pub fn new(config: &'a MarketplaceConfig) -> Self {
        Self {
            config,
            owner: None,
            item_account: None,
            changes: UpdateItemArgs::default(),
        }
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_item_account(mut self, item_account: Pubkey) -> Self {
        self.item_account = Some(item_account);
        self
    }

    pub fn with_changes(mut self, changes: UpdateItemArgs) -> Self {
        self.changes = changes;
        self
    }

    fn validate_changes(&self) -> Result<()> {
        let changes = &self.changes;
        if let Some(name) = &changes.name {
            authorize::validate_name(name)?;
        }
        if let Some(description) = &changes.description {
            authorize::validate_description(description)?;
        }
        if let Some(price) = changes.price_per_hour {
            authorize::validate_price("price_per_hour", price)?;
        }
        if let Some(price) = changes.price_per_day {
            authorize::validate_price("price_per_day", price)?;
        }
        if let Some(uri) = &changes.metadata_uri {
            authorize::validate_metadata_uri(uri)?;
        }
        Ok(())
    }

    pub async fn build_transaction<C: SolConnection + ?Sized>(
        &self,
        connection: &C,
    ) -> Result<UnsignedTransaction> {
        let owner = required(self.owner, "owner")?;
        let item_account = required(self.item_account, "item_account")?;
        self.validate_changes()?;

        let item = utils::fetch_item_account(connection, self.config, &item_account).await?;
        authorize::authorize_item_owner(&owner, &item)?;

        let ix = instructions::update_item(
            self.config,
            &UpdateItemAccounts {
                owner,
                item_account,
            },
            &self.changes,
        )?;
        compose_unsigned(connection, ix, &owner).await
    }
}

pub struct RemoveItemBuilder<'a> {
    config: &'a MarketplaceConfig,
    owner: Option<Pubkey>,
    item_account: Option<Pubkey>,
}

impl<'a> RemoveItemBuilder<'a> {
    pub fn new(config: &'a MarketplaceConfig) -> Self {
        Self {
            config,
            owner: None,
            item_account: None,
        }
    }

    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_item_account(mut self, item_account: Pubkey) -> Self {
        self.item_account = Some(item_account);
        self
    }

    pub async fn build_transaction<C: SolConnection + ?Sized>(
        &self,
        connection: &C,
    ) -> Result<UnsignedTransaction> {
        let owner = required(self.owner, "owner")?;
        let item_account = required(self.item_account, "item_account")?;

        let item = utils::fetch_item_account(connection, self.config, &item_account).await?;
        authorize::authorize_item_owner(&owner, &item)?;

        let (item_registry, _) = utils::derive_item_registry_pda(self.config)?;
        let ix = instructions::remove_item(
            self.config,
            &RemoveItemAccounts {
                owner,
                item_account,
                item_registry,
            },
        );
        compose_unsigned(connection, ix, &owner).await
    }
}
