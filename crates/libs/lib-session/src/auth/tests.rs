use super::*;
use crate::store::{KvStore, MemoryStore, StoreError};
use crate::wallet::MockWalletConnector;
use std::str::FromStr;
use std::sync::Arc;

fn addr_a() -> Address {
    Address::from_str("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap()
}

fn addr_b() -> Address {
    Address::from_str("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC").unwrap()
}

/// Store whose writes can be shared with the test for inspection.
#[derive(Clone)]
struct SharedStore(Arc<MemoryStore>);

impl KvStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.get(key)
    }
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.put(key, value)
    }
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.0.remove(key)
    }
}

fn manager_with_shared_store() -> (SessionManager, SharedStore) {
    let store = SharedStore(Arc::new(MemoryStore::new()));
    (SessionManager::new(Box::new(store.clone())), store)
}

#[test]
fn test_first_connect_creates_profile() {
    // Arrange
    let (mut manager, store) = manager_with_shared_store();

    // Act
    manager.sync(&WalletState::Connected { address: addr_a() });

    // Assert
    let snapshot = manager.snapshot();
    assert!(snapshot.is_authenticated);
    let user = snapshot.user.unwrap();
    let expected = addr_a().to_string();
    assert_eq!(user.id, expected);
    assert_eq!(user.wallet_address, expected);
    assert_eq!(manager.current_address(), Some(expected.clone()));
    assert_eq!(user.provider, "wallet");
    assert_eq!(user.nft_count, 0);
    assert_eq!(user.display_name, "User 0x7099...79C8");
    assert!(user.email.ends_with("@wallet.local"));

    // Persisted under the fixed key.
    let raw = store.get(USER_STORAGE_KEY).unwrap().unwrap();
    let persisted: UserProfile = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, user);
}

#[test]
fn test_reconnect_updates_only_wallet_address() {
    // Arrange: profile created for address A.
    let (mut manager, store) = manager_with_shared_store();
    manager.sync(&WalletState::Connected { address: addr_a() });
    let original = manager.snapshot().user.unwrap();

    // Act: a different wallet connects.
    manager.sync(&WalletState::Connected { address: addr_b() });

    // Assert: only wallet_address moved; identity fields survive.
    let updated = manager.snapshot().user.unwrap();
    assert_eq!(updated.wallet_address, addr_b().to_string());
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.display_name, original.display_name);
    assert_eq!(updated.created_at, original.created_at);

    let raw = store.get(USER_STORAGE_KEY).unwrap().unwrap();
    let persisted: UserProfile = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.wallet_address, addr_b().to_string());
}

#[test]
fn test_corrupt_persisted_profile_is_resynthesized() {
    // Arrange
    let (mut manager, store) = manager_with_shared_store();
    store.put(USER_STORAGE_KEY, "{not valid json").unwrap();

    // Act
    manager.sync(&WalletState::Connected { address: addr_a() });

    // Assert: fresh profile, store healed with valid JSON.
    let user = manager.snapshot().user.unwrap();
    assert_eq!(user.id, addr_a().to_string());
    let raw = store.get(USER_STORAGE_KEY).unwrap().unwrap();
    assert!(serde_json::from_str::<UserProfile>(&raw).is_ok());
}

#[test]
fn test_disconnect_clears_session_and_store() {
    // Arrange
    let (mut manager, store) = manager_with_shared_store();
    manager.sync(&WalletState::Connected { address: addr_a() });
    assert!(manager.snapshot().is_authenticated);

    // Act
    manager.sync(&WalletState::Disconnected);

    // Assert
    assert_eq!(manager.snapshot(), SessionSnapshot::signed_out());
    assert_eq!(manager.current_address(), None);
    assert_eq!(store.get(USER_STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_login_with_wallet_success() {
    // Arrange
    let (mut manager, _store) = manager_with_shared_store();
    let connector = MockWalletConnector::new(addr_a());

    // Act
    manager.login_with_wallet(&connector).await;

    // Assert
    let snapshot = manager.snapshot();
    assert!(snapshot.is_authenticated);
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.is_none());
    assert!(connector.state().is_connected());
}

#[tokio::test]
async fn test_login_with_wallet_failure_surfaces_error() {
    // Arrange
    let (mut manager, store) = manager_with_shared_store();
    let connector = MockWalletConnector::new(addr_a());
    connector.push_connect(Err("User rejected connection".to_string()));

    // Act
    manager.login_with_wallet(&connector).await;

    // Assert: loading cleared, error surfaced, nothing persisted.
    let snapshot = manager.snapshot();
    assert!(!snapshot.is_authenticated);
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.error.as_deref(), Some("User rejected connection"));
    assert_eq!(connector.state().error(), Some("User rejected connection"));
    assert_eq!(store.get(USER_STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_everything() {
    // Arrange
    let (mut manager, store) = manager_with_shared_store();
    let connector = MockWalletConnector::new(addr_a());
    manager.login_with_wallet(&connector).await;
    assert!(store.get(USER_STORAGE_KEY).unwrap().is_some());

    // Act
    manager.logout(&connector).await;

    // Assert
    let snapshot = manager.snapshot();
    assert!(!snapshot.is_authenticated);
    assert!(snapshot.user.is_none());
    assert_eq!(store.get(USER_STORAGE_KEY).unwrap(), None);
    assert_eq!(connector.state(), WalletState::Disconnected);

    // Logging out again is harmless.
    manager.logout(&connector).await;
    assert_eq!(store.get(USER_STORAGE_KEY).unwrap(), None);
}
