//! Integration tests for remit-core services
//!
//! These tests drive the services through a real JSON store on disk in a
//! temporary directory, reloading from disk to check what was persisted.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tempfile::TempDir;

use remit_core::config::{Config, SETTINGS_FILENAME};
use remit_core::services::admin::compute_total_fees;
use remit_core::{AccountStore, Country, Currency, Error, LoadStatus, RemitContext, Session};

// ============================================================================
// Test Helpers
// ============================================================================

/// Cheap argon2 parameters so tests stay fast
fn write_fast_settings(dir: &Path) {
    fs::write(
        dir.join(SETTINGS_FILENAME),
        r#"{"argon2": {"timeCost": 1, "memoryCost": 8, "parallelism": 1}}"#,
    )
    .unwrap();
}

fn create_context(temp_dir: &TempDir) -> RemitContext {
    write_fast_settings(temp_dir.path());
    RemitContext::new(temp_dir.path()).expect("Failed to create context")
}

/// Context with an admin credential stored in settings
fn create_context_with_admin(temp_dir: &TempDir, username: &str, password: &str) -> RemitContext {
    let ctx = create_context(temp_dir);
    let credential = ctx
        .auth_service
        .make_admin_credential(username, password)
        .unwrap();
    let mut config = Config::load(temp_dir.path()).unwrap();
    config.set_admin(credential);
    config.save(temp_dir.path()).unwrap();
    RemitContext::new(temp_dir.path()).unwrap()
}

fn reload(ctx: &RemitContext) -> AccountStore {
    let loaded = ctx.load_store().unwrap();
    assert_eq!(loaded.status, LoadStatus::Loaded);
    loaded.store
}

fn sign_up(ctx: &RemitContext, store: &mut AccountStore, name: &str, country: Country) -> Session {
    ctx.auth_service
        .sign_up(store, name, "password", country)
        .unwrap()
}

fn store_path(ctx: &RemitContext) -> std::path::PathBuf {
    ctx.config.store_path(&ctx.data_dir)
}

// ============================================================================
// Transfer Tests
// ============================================================================

#[test]
fn test_transfer_debits_sender_and_logs_once() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let mut store = ctx.load_store().unwrap().store;

    let alice = sign_up(&ctx, &mut store, "alice", Country::US);
    sign_up(&ctx, &mut store, "bob", Country::India);

    let receipt = ctx
        .transfer_service
        .transfer(&mut store, &alice, "bob", Country::India, Decimal::new(100, 0))
        .unwrap();

    assert_eq!(receipt.quote.converted_amount, Decimal::new(8333, 0));
    assert_eq!(receipt.quote.fee, Decimal::new(15, 1));
    assert_eq!(receipt.quote.total_deduction, Decimal::new(1015, 1));
    assert_eq!(receipt.balance_after, Decimal::new(998985, 1));

    let persisted = reload(&ctx);
    let account = persisted.get("alice").unwrap();
    assert_eq!(account.balance, Decimal::new(998985, 1));
    assert_eq!(account.transaction_log.len(), 1);

    let tx = &account.transaction_log[0];
    assert_eq!(tx.from, Country::US);
    assert_eq!(tx.to, Country::India);
    assert_eq!(tx.amount, Decimal::new(100, 0));
    assert_eq!(tx.currency, Currency::USD);
    assert_eq!(tx.transaction_fee, Decimal::new(15, 1));
    assert_eq!(tx.recipient.as_deref(), Some("bob"));
    assert!(tx.timestamp.is_some());
}

#[test]
fn test_insufficient_balance_leaves_store_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let mut store = ctx.load_store().unwrap().store;

    let alice = sign_up(&ctx, &mut store, "alice", Country::India);
    let before_bytes = fs::read(store_path(&ctx)).unwrap();
    let before = store.clone();

    // 100000 + 128.79 fee exceeds the starting balance
    let err = ctx
        .transfer_service
        .transfer(&mut store, &alice, "alice", Country::UK, Decimal::new(100000, 0))
        .unwrap_err();

    match err {
        Error::InsufficientBalance { required, available } => {
            assert_eq!(required, Decimal::new(10012879, 2));
            assert_eq!(available, Decimal::new(100000, 0));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store, before);
    assert_eq!(fs::read(store_path(&ctx)).unwrap(), before_bytes);
}

#[test]
fn test_repeated_transfers_accumulate() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let mut store = ctx.load_store().unwrap().store;

    let carol = sign_up(&ctx, &mut store, "carol", Country::Canada);
    sign_up(&ctx, &mut store, "dave", Country::Saudi);

    for _ in 0..3 {
        ctx.transfer_service
            .transfer(&mut store, &carol, "dave", Country::Saudi, Decimal::new(10, 0))
            .unwrap();
    }

    let persisted = reload(&ctx);
    let account = persisted.get("carol").unwrap();
    // 3 * (10 + 1.99)
    assert_eq!(account.balance, Decimal::new(100000, 0) - Decimal::new(3597, 2));
    assert_eq!(account.transaction_log.len(), 3);
    assert_eq!(persisted.get("dave").unwrap().balance, Decimal::new(100000, 0));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[test]
fn test_duplicate_sign_up_keeps_store_file() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let mut store = ctx.load_store().unwrap().store;

    sign_up(&ctx, &mut store, "alice", Country::UK);
    let before_bytes = fs::read(store_path(&ctx)).unwrap();

    let err = ctx
        .auth_service
        .sign_up(&mut store, "alice", "another", Country::US)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateUser(_)));
    assert_eq!(fs::read(store_path(&ctx)).unwrap(), before_bytes);
    assert_eq!(reload(&ctx).get("alice").unwrap().country, Country::UK);
}

#[test]
fn test_login_after_reload() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let mut store = ctx.load_store().unwrap().store;
    sign_up(&ctx, &mut store, "alice", Country::US);

    let mut fresh = reload(&ctx);
    let result = ctx.auth_service.login(&mut fresh, "alice", "password").unwrap();
    assert_eq!(result.session.identity(), "alice");
    assert!(matches!(
        ctx.auth_service.login(&mut fresh, "alice", "bad"),
        Err(Error::InvalidCredentials)
    ));
}

#[test]
fn test_legacy_store_is_readable_and_upgraded() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);

    // Layout written by older releases: plaintext password, no logs
    fs::write(
        store_path(&ctx),
        r#"{
    "transaction_log": [],
    "priya": {"password": "pw1", "country": "India", "balance": 100000},
    "sam": {"password": "pw2", "country": "US", "balance": 99898.5,
            "transaction_log": [{"from": "US", "to": "India", "amount": 100,
                                 "currency": "USD", "transaction_fee": 1.5}]}
}"#,
    )
    .unwrap();

    let mut store = reload(&ctx);
    assert!(store.get("priya").unwrap().transaction_log.is_empty());
    assert_eq!(store.get("sam").unwrap().balance, Decimal::new(998985, 1));

    let result = ctx.auth_service.login(&mut store, "priya", "pw1").unwrap();
    assert!(result.credential_upgraded);

    let persisted = reload(&ctx);
    assert!(persisted.get("priya").unwrap().password.starts_with("$argon2id$"));
    // Untouched account keeps its legacy credential until it logs in
    assert_eq!(persisted.get("sam").unwrap().password, "pw2");
}

#[test]
fn test_admin_login_with_configured_credential() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context_with_admin(&temp_dir, "admin01", "s3cret");

    let session = ctx.auth_service.admin_login("admin01", "s3cret").unwrap();
    assert!(session.is_admin());
    assert!(matches!(
        ctx.auth_service.admin_login("admin01", "987654321"),
        Err(Error::InvalidCredentials)
    ));
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_round_trip_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let mut store = ctx.load_store().unwrap().store;

    let alice = sign_up(&ctx, &mut store, "alice", Country::UK);
    sign_up(&ctx, &mut store, "bob", Country::Canada);
    ctx.transfer_service
        .transfer(&mut store, &alice, "bob", Country::Canada, Decimal::new(42, 0))
        .unwrap();

    assert_eq!(reload(&ctx), store);
}

#[test]
fn test_corrupt_store_starts_fresh() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    fs::write(store_path(&ctx), "{\"alice\": ").unwrap();

    let loaded = ctx.load_store().unwrap();
    assert!(loaded.store.is_empty());
    assert!(matches!(loaded.status, LoadStatus::Corrupt(_)));

    // The next mutation overwrites the corrupt file, but a copy was kept
    let mut store = loaded.store;
    sign_up(&ctx, &mut store, "alice", Country::US);
    assert_eq!(reload(&ctx).len(), 1);

    let copy = temp_dir.path().join("user_data.json.corrupt");
    assert_eq!(fs::read_to_string(copy).unwrap(), "{\"alice\": ");
}

#[test]
fn test_invalid_account_sets_whole_store_aside() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let original = r#"{
    "alice": {"password": "pw", "country": "US", "balance": 500},
    "bob": {"password": "pw", "country": "UK", "balance": -20}
}"#;
    fs::write(store_path(&ctx), original).unwrap();

    let loaded = ctx.load_store().unwrap();
    assert!(loaded.store.is_empty());
    assert!(matches!(loaded.status, LoadStatus::Corrupt(_)));
    let copy = temp_dir.path().join("user_data.json.corrupt");
    assert_eq!(fs::read_to_string(copy).unwrap(), original);
}

#[test]
fn test_large_balances_survive_reload_exactly() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(SETTINGS_FILENAME),
        r#"{"app": {"startingBalance": 10000000000000000},
            "argon2": {"timeCost": 1, "memoryCost": 8, "parallelism": 1}}"#,
    )
    .unwrap();
    let ctx = RemitContext::new(temp_dir.path()).unwrap();
    assert_eq!(ctx.config.starting_balance, Decimal::new(10_000_000_000_000_000, 0));

    let mut store = ctx.load_store().unwrap().store;
    let alice = sign_up(&ctx, &mut store, "alice", Country::US);
    ctx.transfer_service
        .transfer(&mut store, &alice, "alice", Country::US, Decimal::ONE)
        .unwrap();

    let expected = Decimal::new(99_999_999_999_999_975, 1);
    assert_eq!(store.get("alice").unwrap().balance, expected);
    assert_eq!(reload(&ctx).get("alice").unwrap().balance, expected);
    assert_eq!(reload(&ctx), store);
}

#[test]
fn test_custom_store_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(SETTINGS_FILENAME),
        r#"{"app": {"storeFile": "bank.json", "startingBalance": 250},
            "argon2": {"timeCost": 1, "memoryCost": 8, "parallelism": 1}}"#,
    )
    .unwrap();
    let ctx = RemitContext::new(temp_dir.path()).unwrap();
    let mut store = ctx.load_store().unwrap().store;
    sign_up(&ctx, &mut store, "alice", Country::US);

    assert!(temp_dir.path().join("bank.json").exists());
    assert!(!temp_dir.path().join("user_data.json").exists());
    assert_eq!(reload(&ctx).get("alice").unwrap().balance, Decimal::new(250, 0));
}

// ============================================================================
// Admin View Tests
// ============================================================================

#[test]
fn test_admin_dashboard_over_persisted_store() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context_with_admin(&temp_dir, "admin01", "s3cret");
    let mut store = ctx.load_store().unwrap().store;

    let us = sign_up(&ctx, &mut store, "uma", Country::US);
    let india = sign_up(&ctx, &mut store, "ishan", Country::India);
    ctx.transfer_service
        .transfer(&mut store, &us, "ishan", Country::India, Decimal::new(100, 0))
        .unwrap();
    ctx.transfer_service
        .transfer(&mut store, &india, "uma", Country::US, Decimal::new(5000, 0))
        .unwrap();

    let admin = ctx.auth_service.admin_login("admin01", "s3cret").unwrap();
    let persisted = reload(&ctx);
    let dashboard = ctx.admin_service.dashboard(&persisted, &admin).unwrap();

    // One US fee plus one India fee
    assert_eq!(dashboard.total_fees, Decimal::new(13029, 2));
    assert_eq!(dashboard.total_fees, compute_total_fees(&persisted));
    assert_eq!(dashboard.formatted_total_fees, "₹130.29");
    assert_eq!(dashboard.account_count, 2);
    assert_eq!(dashboard.transaction_count, 2);

    let accounts = ctx.admin_service.accounts(&persisted, &admin).unwrap();
    let names: Vec<_> = accounts.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["ishan", "uma"]);

    assert!(matches!(
        ctx.admin_service.accounts(&persisted, &us),
        Err(Error::Unauthorized(_))
    ));
}
