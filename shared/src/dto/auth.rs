use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Local user profile derived from a connected wallet.
///
/// Created the first time a wallet connects and persisted under a single
/// durable key. On later connections only `wallet_address` is updated; the
/// remaining fields keep their originally persisted values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Profile id: the wallet address that first created this profile.
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
    /// Always `"wallet"` for profiles created through wallet login.
    pub provider: String,
    pub created_at: DateTime<Utc>,
    /// Cached NFT count; starts at 0 and is refreshed from chain reads.
    pub nft_count: u64,
    pub wallet_address: String,
}

/// Observable auth state exposed by the session manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn signed_out() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: false,
            error: None,
        }
    }
}
