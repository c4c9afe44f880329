//! # Wallet Connection
//!
//! Connection state plus the connector seam the session manager drives.
//! The real connector wraps a browser wallet extension; tests and the demo
//! binary use [`MockWalletConnector`].

use alloy_primitives::Address;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Wallet connection state. Owned by the connector; read-only elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletState {
    Disconnected,
    Connecting,
    Connected { address: Address },
    Error(String),
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            WalletState::Connected { address } => Some(*address),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WalletState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Connect/disconnect surface of the wallet collaborator.
///
/// `connect` resolves once the user has approved the connection prompt and
/// returns the selected address; a declined prompt is an `Err` with the
/// provider's message.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self) -> Result<Address, String>;

    async fn disconnect(&self);

    fn state(&self) -> WalletState;
}

/// Scripted connector for tests and the demo binary.
///
/// Feed it connect results with [`MockWalletConnector::push_connect`]; each
/// `connect` call consumes one. An empty script connects as the default
/// address.
pub struct MockWalletConnector {
    default_address: Address,
    script: Mutex<VecDeque<Result<Address, String>>>,
    state: Mutex<WalletState>,
}

impl MockWalletConnector {
    pub fn new(default_address: Address) -> Self {
        Self {
            default_address,
            script: Mutex::new(VecDeque::new()),
            state: Mutex::new(WalletState::Disconnected),
        }
    }

    pub fn push_connect(&self, result: Result<Address, String>) {
        self.script.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl WalletConnector for MockWalletConnector {
    async fn connect(&self) -> Result<Address, String> {
        let scripted = self.script.lock().unwrap().pop_front();
        let result = scripted.unwrap_or(Ok(self.default_address));
        let mut state = self.state.lock().unwrap();
        match &result {
            Ok(address) => *state = WalletState::Connected { address: *address },
            Err(message) => *state = WalletState::Error(message.clone()),
        }
        result
    }

    async fn disconnect(&self) {
        *self.state.lock().unwrap() = WalletState::Disconnected;
    }

    fn state(&self) -> WalletState {
        self.state.lock().unwrap().clone()
    }
}
