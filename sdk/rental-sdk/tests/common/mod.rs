#![allow(dead_code)]

use async_trait::async_trait;
use rental_sdk::core::connection::SolConnection;
use rental_sdk::state::{AccountSchema, ItemAccount, RentalTransaction};
use rental_sdk::{derive_rental_transaction_pda, MarketplaceConfig};
use solana_sdk::{account::Account, hash::Hash, pubkey::Pubkey};
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory ledger that counts every call made against it.
pub struct MockConnection {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    pub blockhash: Hash,
    pub offline: bool,
    blockhash_calls: AtomicUsize,
    account_calls: AtomicUsize,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            blockhash: Hash::new_from_array([42u8; 32]),
            offline: false,
            blockhash_calls: AtomicUsize::new(0),
            account_calls: AtomicUsize::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub fn insert_raw(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        let account = Account {
            lamports: 1_000_000,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        };
        self.accounts.lock().unwrap().insert(address, account);
    }

    pub fn insert<T: AccountSchema>(&self, address: Pubkey, owner: Pubkey, record: &T) {
        self.insert_raw(address, owner, record.to_account_data().unwrap());
    }

    pub fn blockhash_calls(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
    }

    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SolConnection for MockConnection {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err("connection refused".into());
        }
        Ok(self.accounts.lock().unwrap().get(pubkey).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err("connection refused".into());
        }
        Ok(self.blockhash)
    }
}

/// An item that is currently rented, with both records present on the mock ledger.
pub struct RentalFixture {
    pub config: MarketplaceConfig,
    pub connection: MockConnection,
    pub owner: Pubkey,
    pub renter: Pubkey,
    pub item_account: Pubkey,
    pub rental_transaction: Pubkey,
    pub item: ItemAccount,
    pub rental: RentalTransaction,
}

impl RentalFixture {
    pub fn new() -> Self {
        let config = MarketplaceConfig::default();
        let owner = Pubkey::new_unique();
        let renter = Pubkey::new_unique();
        let item_account = Pubkey::new_unique();
        let (rental_transaction, _) =
            derive_rental_transaction_pda(&config, &item_account, &renter).unwrap();

        let item = ItemAccount {
            owner,
            item_id: 1,
            name: "Kayak".to_string(),
            description: "Two seater".to_string(),
            price_per_hour: 15,
            price_per_day: 100,
            is_available: false,
            metadata_uri: "https://gateway.pinata.cloud/ipfs/QmKayak".to_string(),
        };
        let rental = RentalTransaction {
            item: item_account,
            renter,
            owner,
            start_time: 1_700_000_000,
            end_time: 1_700_010_800,
            total_price: 45,
            is_active: true,
            is_completed: false,
        };

        let connection = MockConnection::new();
        connection.insert(item_account, config.item_registration_program, &item);
        connection.insert(rental_transaction, config.rental_program, &rental);

        Self {
            config,
            connection,
            owner,
            renter,
            item_account,
            rental_transaction,
            item,
            rental,
        }
    }

    pub fn without_rental(self) -> Self {
        let connection = MockConnection::new();
        connection.insert(self.item_account, self.config.item_registration_program, &self.item);
        Self { connection, ..self }
    }

    pub fn without_item(self) -> Self {
        let connection = MockConnection::new();
        connection.insert(self.rental_transaction, self.config.rental_program, &self.rental);
        Self { connection, ..self }
    }
}

/// Resolve the compiled instruction's account indices back to addresses.
pub fn instruction_accounts(message: &solana_sdk::message::Message) -> Vec<Pubkey> {
    message.instructions[0]
        .accounts
        .iter()
        .map(|index| message.account_keys[*index as usize])
        .collect()
}

pub fn instruction_program(message: &solana_sdk::message::Message) -> Pubkey {
    message.account_keys[message.instructions[0].program_id_index as usize]
}
