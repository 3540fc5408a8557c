#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rental_sdk::state::AccountSchema;
use rental_sdk::{
    derive_rental_transaction_pda, ItemAccount, MarketplaceConfig, RentalTransaction,
    SolConnection,
};
use rental_server::ledger::LedgerProvider;
use rental_server::pinning::{MetadataPinner, PinningError, UploadedFile};
use rental_server::server::{router, AppState};
use serde_json::Value;
use solana_sdk::{account::Account, hash::Hash, pubkey::Pubkey};
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub fn test_blockhash() -> Hash {
    Hash::new_from_array([7u8; 32])
}

#[derive(Default)]
struct LedgerState {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    offline: AtomicBool,
    connections: AtomicUsize,
    blockhash_calls: AtomicUsize,
}

/// Ledger shared by every connection the server opens during a test.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    state: Arc<LedgerState>,
}

impl MemoryLedger {
    pub fn insert<T: AccountSchema>(&self, address: Pubkey, owner: Pubkey, record: &T) {
        let account = Account {
            lamports: 1_000_000,
            data: record.to_account_data().unwrap(),
            owner,
            executable: false,
            rent_epoch: 0,
        };
        self.state.accounts.lock().unwrap().insert(address, account);
    }

    pub fn remove(&self, address: &Pubkey) {
        self.state.accounts.lock().unwrap().remove(address);
    }

    pub fn set_offline(&self) {
        self.state.offline.store(true, Ordering::SeqCst);
    }

    pub fn connections(&self) -> usize {
        self.state.connections.load(Ordering::SeqCst)
    }

    pub fn blockhash_calls(&self) -> usize {
        self.state.blockhash_calls.load(Ordering::SeqCst)
    }
}

struct MemoryConnection {
    state: Arc<LedgerState>,
}

#[async_trait]
impl SolConnection for MemoryConnection {
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        if self.state.offline.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok(self.state.accounts.lock().unwrap().get(pubkey).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>> {
        self.state.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.offline.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok(test_blockhash())
    }
}

impl LedgerProvider for MemoryLedger {
    fn connect(&self) -> Box<dyn SolConnection> {
        self.state.connections.fetch_add(1, Ordering::SeqCst);
        Box::new(MemoryConnection {
            state: self.state.clone(),
        })
    }
}

/// Pinning service double that records what it was asked to pin.
pub struct StubPinner {
    rejection: Option<(u16, String)>,
    pub uploads: Mutex<Vec<UploadedFile>>,
}

impl StubPinner {
    pub fn accepting() -> Self {
        Self {
            rejection: None,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self {
            rejection: Some((status, body.to_string())),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MetadataPinner for StubPinner {
    async fn pin_file(&self, file: UploadedFile) -> Result<String, PinningError> {
        self.uploads.lock().unwrap().push(file);
        match &self.rejection {
            Some((status, body)) => Err(PinningError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok("https://gateway.pinata.cloud/ipfs/QmStubHash".to_string()),
        }
    }
}

/// Addresses of an item that is currently rented out.
pub struct RentalScenario {
    pub owner: Pubkey,
    pub renter: Pubkey,
    pub item_account: Pubkey,
    pub rental_transaction: Pubkey,
}

pub struct TestApp {
    pub router: Router,
    pub ledger: MemoryLedger,
    pub pinner: Arc<StubPinner>,
    pub marketplace: MarketplaceConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_pinner(StubPinner::accepting())
    }

    pub fn with_pinner(pinner: StubPinner) -> Self {
        let marketplace = MarketplaceConfig::default();
        let ledger = MemoryLedger::default();
        let pinner = Arc::new(pinner);
        let router = router(AppState {
            marketplace,
            ledger: Arc::new(ledger.clone()),
            pinner: pinner.clone(),
        });
        Self {
            router,
            ledger,
            pinner,
            marketplace,
        }
    }

    pub fn seed_item(&self, item_account: Pubkey, owner: Pubkey) -> ItemAccount {
        let item = ItemAccount {
            owner,
            item_id: 1,
            name: "Kayak".to_string(),
            description: "Two seater".to_string(),
            price_per_hour: 15,
            price_per_day: 100,
            is_available: true,
            metadata_uri: "https://gateway.pinata.cloud/ipfs/QmKayak".to_string(),
        };
        self.ledger
            .insert(item_account, self.marketplace.item_registration_program, &item);
        item
    }

    pub fn seed_rental(&self) -> RentalScenario {
        let owner = Pubkey::new_unique();
        let renter = Pubkey::new_unique();
        let item_account = Pubkey::new_unique();
        let (rental_transaction, _) =
            derive_rental_transaction_pda(&self.marketplace, &item_account, &renter).unwrap();

        let mut item = self.seed_item(item_account, owner);
        item.is_available = false;
        self.ledger
            .insert(item_account, self.marketplace.item_registration_program, &item);

        let rental = RentalTransaction {
            item: item_account,
            renter,
            owner,
            start_time: 1_700_000_000,
            end_time: 1_700_007_200,
            total_price: 30,
            is_active: true,
            is_completed: false,
        };
        self.ledger
            .insert(rental_transaction, self.marketplace.rental_program, &rental);

        RentalScenario {
            owner,
            renter,
            item_account,
            rental_transaction,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &[u8])>,
    ) -> (StatusCode, Value) {
        const BOUNDARY: &str = "rental-test-boundary";
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::post(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

/// Decode a `transaction` field the way a client wallet would.
pub fn decode_transaction(encoded: &Value) -> solana_sdk::message::Message {
    use base64::Engine as _;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_str().unwrap())
        .unwrap();
    bincode::deserialize(&bytes).unwrap()
}

pub fn instruction_accounts(message: &solana_sdk::message::Message) -> Vec<Pubkey> {
    message.instructions[0]
        .accounts
        .iter()
        .map(|index| message.account_keys[*index as usize])
        .collect()
}
