//! # Auth Session Manager
//!
//! Derives a local user profile from the connected wallet address and keeps
//! it in sync with wallet connection changes. Reconciliation is driven by an
//! explicit [`SessionManager::sync`] call whenever wallet state changes;
//! there is no framework lifecycle underneath.

use alloy_primitives::Address;
use shared::dto::auth::{SessionSnapshot, UserProfile};
use shared::utils::truncate_address;
use tracing::{debug, info, warn};

use crate::store::KvStore;
use crate::wallet::{WalletConnector, WalletState};

/// The single durable key the profile is persisted under.
pub const USER_STORAGE_KEY: &str = "user";

/// Observable auth state plus the login/logout operations.
pub struct SessionManager {
    store: Box<dyn KvStore>,
    user: Option<UserProfile>,
    is_loading: bool,
    error: Option<String>,
}

impl SessionManager {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self {
            store,
            user: None,
            is_loading: false,
            error: None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            is_authenticated: self.user.is_some(),
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }

    pub fn current_address(&self) -> Option<String> {
        self.user.as_ref().map(|u| u.wallet_address.clone())
    }

    /// Connect the wallet and reconcile the session to the result.
    ///
    /// The loading flag is held for the duration of the connect prompt. A
    /// connector failure (including a declined prompt) clears loading and
    /// surfaces the collaborator's error without touching persisted state.
    pub async fn login_with_wallet(&mut self, connector: &dyn WalletConnector) {
        info!("[AUTH] Wallet login requested");
        self.is_loading = true;
        self.error = None;

        match connector.connect().await {
            Ok(address) => {
                self.sync(&WalletState::Connected { address });
            }
            Err(message) => {
                warn!("[AUTH] Wallet login failed: {}", message);
                self.is_loading = false;
                self.error = Some(message);
            }
        }
    }

    /// Disconnect and clear both in-memory and persisted state,
    /// unconditionally.
    pub async fn logout(&mut self, connector: &dyn WalletConnector) {
        info!("[AUTH] Logout");
        connector.disconnect().await;
        self.user = None;
        self.is_loading = false;
        self.error = None;
        if let Err(e) = self.store.remove(USER_STORAGE_KEY) {
            warn!("[AUTH] Failed to remove persisted profile: {}", e);
        }
    }

    /// Reconcile the session with the current wallet state.
    ///
    /// Connected: load the persisted profile (corruption counts as absent),
    /// move it to the current address, persist, mark authenticated.
    /// Disconnected or errored: clear the profile and the persisted entry.
    pub fn sync(&mut self, wallet: &WalletState) {
        match wallet {
            WalletState::Connected { address } => self.reconcile_connected(*address),
            WalletState::Error(message) => {
                self.error = Some(message.clone());
                self.clear_session();
            }
            WalletState::Disconnected | WalletState::Connecting => {
                self.clear_session();
            }
        }
    }

    fn reconcile_connected(&mut self, address: Address) {
        let address_str = address.to_string();

        let user = match self.load_persisted() {
            Some(mut profile) => {
                if profile.wallet_address != address_str {
                    debug!(
                        "[AUTH] Wallet address changed {} -> {}",
                        profile.wallet_address, address_str
                    );
                }
                // Only the wallet address follows the connection; every
                // other field keeps its persisted value.
                profile.wallet_address = address_str.clone();
                profile
            }
            None => synthesize_profile(address),
        };

        match serde_json::to_string(&user) {
            Ok(raw) => {
                if let Err(e) = self.store.put(USER_STORAGE_KEY, &raw) {
                    warn!("[AUTH] Failed to persist profile: {}", e);
                }
            }
            Err(e) => warn!("[AUTH] Failed to serialize profile: {}", e),
        }

        info!("[AUTH] ✅ Session active for {}", address_str);
        self.user = Some(user);
        self.is_loading = false;
    }

    fn clear_session(&mut self) {
        self.user = None;
        self.is_loading = false;
        if let Err(e) = self.store.remove(USER_STORAGE_KEY) {
            warn!("[AUTH] Failed to remove persisted profile: {}", e);
        }
    }

    /// A corrupted or unreadable entry is treated as absent, never fatal;
    /// the profile is resynthesized on the next reconcile.
    fn load_persisted(&self) -> Option<UserProfile> {
        let raw = match self.store.get(USER_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("[AUTH] Failed to read persisted profile: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("[AUTH] Persisted profile is corrupt, recreating: {}", e);
                None
            }
        }
    }
}

/// Build a fresh profile from a wallet address.
fn synthesize_profile(address: Address) -> UserProfile {
    let address_str = address.to_string();
    UserProfile {
        id: address_str.clone(),
        display_name: format!("User {}", truncate_address(&address_str)),
        email: format!("{}@wallet.local", &address_str[..8]),
        avatar_url: format!(
            "https://api.dicebear.com/7.x/identicon/svg?seed={}",
            address_str
        ),
        provider: "wallet".to_string(),
        created_at: lib_utils::time::now_utc(),
        nft_count: 0,
        wallet_address: address_str,
    }
}

#[cfg(test)]
mod tests;
