//! # Session Library
//!
//! Wallet connection state, the auth session manager that derives and
//! persists a local [`shared::UserProfile`] from the connected address, and
//! the small key-value store the profile lives in.
//!
//! ## Flow
//!
//! ```text
//! 1. UI calls SessionManager::login_with_wallet → connector.connect()
//! 2. Wallet state changes → SessionManager::sync reconciles the profile
//! 3. Profile is persisted under the fixed "user" key
//! 4. Disconnect or logout → memory and persisted entry are cleared
//! ```

pub mod auth;
pub mod store;
pub mod wallet;

pub use auth::{SessionManager, USER_STORAGE_KEY};
pub use store::{JsonFileStore, KvStore, MemoryStore, StoreError};
pub use wallet::{MockWalletConnector, WalletConnector, WalletState};
