use rental_sdk::core::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, ITEM_REGISTRY_SEED, TOKEN_PROGRAM_ID,
};
use rental_sdk::state::{ItemAccount, ItemRegistry};
use rental_sdk::{
    derive_ata, derive_escrow_ata, derive_item_registry_pda, derive_pda,
    derive_rental_transaction_pda, fetch_account, fetch_item_account, fetch_item_registry,
    parse_pubkey, MarketplaceConfig, RentalSdkError,
};
use solana_sdk::pubkey::Pubkey;

mod common;
use common::{MockConnection, RentalFixture};

#[test]
fn test_derive_pda_is_deterministic() {
    let program = Pubkey::new_unique();
    let item = Pubkey::new_unique();
    let seeds: &[&[u8]] = &[b"rental_transaction", item.as_ref()];

    let first = derive_pda(seeds, &program).unwrap();
    let second = derive_pda(seeds, &program).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Pubkey::find_program_address(seeds, &program));
    assert!(!first.0.is_on_curve());
}

#[test]
fn test_derive_pda_rejects_oversized_seeds() {
    let program = Pubkey::new_unique();
    let long_seed = [1u8; 33];
    assert!(matches!(
        derive_pda(&[&long_seed], &program),
        Err(RentalSdkError::InvalidSeeds)
    ));

    // 16 caller seeds leave no room for the bump
    let seed = [0u8; 1];
    let seeds: Vec<&[u8]> = (0..16).map(|_| &seed[..]).collect();
    assert!(matches!(
        derive_pda(&seeds, &program),
        Err(RentalSdkError::InvalidSeeds)
    ));
}

#[test]
fn test_derive_ata_uses_canonical_seeds() {
    let owner = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    let (expected, _) = Pubkey::find_program_address(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    );
    assert_eq!(derive_ata(&owner, &mint).unwrap(), expected);
}

#[test]
fn test_escrow_is_ata_of_rental_transaction() {
    let config = MarketplaceConfig::default();
    let item = Pubkey::new_unique();
    let renter = Pubkey::new_unique();
    let (rental, _) = derive_rental_transaction_pda(&config, &item, &renter).unwrap();

    assert_eq!(
        derive_escrow_ata(&config, &rental).unwrap(),
        derive_ata(&rental, &config.usdc_mint).unwrap()
    );

    let (other_rental, _) =
        derive_rental_transaction_pda(&config, &item, &Pubkey::new_unique()).unwrap();
    assert_ne!(rental, other_rental);
}

#[test]
fn test_item_registry_pda_uses_fixed_seed() {
    let config = MarketplaceConfig::default();
    let (registry, bump) = derive_item_registry_pda(&config).unwrap();
    assert_eq!(
        (registry, bump),
        Pubkey::find_program_address(&[ITEM_REGISTRY_SEED], &config.item_registration_program)
    );
}

#[test]
fn test_parse_pubkey_names_field() {
    let err = parse_pubkey("owner_key_str", "not-a-key").unwrap_err();
    match err {
        RentalSdkError::InvalidAddress { field, .. } => assert_eq!(field, "owner_key_str"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        parse_pubkey("x", "11111111111111111111111111111111").unwrap(),
        Pubkey::default()
    );
}

#[tokio::test]
async fn test_fetch_missing_account_is_not_found() {
    let config = MarketplaceConfig::default();
    let connection = MockConnection::new();
    let err = fetch_item_account(&connection, &config, &Pubkey::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RentalSdkError::AccountNotFound { entity: "ItemAccount", .. }
    ));
}

#[tokio::test]
async fn test_fetch_zero_length_account_is_not_found() {
    let config = MarketplaceConfig::default();
    let connection = MockConnection::new();
    let address = Pubkey::new_unique();
    connection.insert_raw(address, config.item_registration_program, Vec::new());

    let err = fetch_item_account(&connection, &config, &address).await.unwrap_err();
    assert!(matches!(err, RentalSdkError::AccountNotFound { .. }));
}

#[tokio::test]
async fn test_fetch_wrong_schema_is_decode_error() {
    let fixture = RentalFixture::new();
    // A rental record read as an item
    let err = fetch_account::<ItemAccount, _>(
        &fixture.connection,
        &fixture.rental_transaction,
        &fixture.config.rental_program,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        RentalSdkError::InvalidAccountData { entity: "ItemAccount", .. }
    ));
}

#[tokio::test]
async fn test_fetch_rejects_foreign_owner() {
    let fixture = RentalFixture::new();
    let err = fetch_account::<ItemAccount, _>(
        &fixture.connection,
        &fixture.item_account,
        &fixture.config.rental_program,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RentalSdkError::InvalidAccountData { .. }));
}

#[tokio::test]
async fn test_fetch_transport_failure_is_connection_error() {
    let config = MarketplaceConfig::default();
    let connection = MockConnection::offline();
    let err = fetch_item_registry(&connection, &config).await.unwrap_err();
    assert!(matches!(err, RentalSdkError::Connection(_)));
}

#[tokio::test]
async fn test_fetch_item_registry() {
    let config = MarketplaceConfig::default();
    let connection = MockConnection::new();
    let (registry_pda, _) = derive_item_registry_pda(&config).unwrap();
    let registry = ItemRegistry {
        next_item_id: 3,
        item_ids: vec![1, 2, 3],
    };
    connection.insert(registry_pda, config.item_registration_program, &registry);

    let fetched = fetch_item_registry(&connection, &config).await.unwrap();
    assert_eq!(fetched, registry);
}
