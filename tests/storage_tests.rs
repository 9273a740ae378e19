//! Integration tests for TokenStore
//!
//! Tests the file-backed token store the CLI keeps under the config directory

use hub_admin::config::{resolve_config_dir, TOKEN_DB_FILE};
use hub_admin::storage::{TokenStore, DEFAULT_PROFILE};
use tempfile::TempDir;

fn setup_store() -> (TokenStore, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_dir = resolve_config_dir(Some(temp_dir.path())).unwrap();
    let store = TokenStore::new(config_dir.join(TOKEN_DB_FILE)).unwrap();
    (store, temp_dir)
}

#[test]
fn test_login_then_logout() {
    let (store, _temp) = setup_store();

    store.save_token(DEFAULT_PROFILE, "admin-token").unwrap();
    assert_eq!(
        store.load_token(DEFAULT_PROFILE).unwrap().as_deref(),
        Some("admin-token")
    );

    assert!(store.clear_token(DEFAULT_PROFILE).unwrap());
    assert!(store.load_token(DEFAULT_PROFILE).unwrap().is_none());
}

#[test]
fn test_profiles_are_independent() {
    let (store, _temp) = setup_store();

    store.save_token("production", "prod-token").unwrap();
    store.save_token("staging", "staging-token").unwrap();
    store.clear_token("staging").unwrap();

    assert_eq!(
        store.load_token("production").unwrap().as_deref(),
        Some("prod-token")
    );
    assert!(store.load_token("staging").unwrap().is_none());
}

#[test]
fn test_token_persists_across_opens() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join(TOKEN_DB_FILE);

    TokenStore::new(&db_path)
        .unwrap()
        .save_token(DEFAULT_PROFILE, "kept")
        .unwrap();

    let reopened = TokenStore::new(&db_path).unwrap();
    assert_eq!(
        reopened.load_token(DEFAULT_PROFILE).unwrap().as_deref(),
        Some("kept")
    );
}

#[test]
fn test_logout_without_login() {
    let (store, _temp) = setup_store();
    assert!(!store.clear_token(DEFAULT_PROFILE).unwrap());
}
