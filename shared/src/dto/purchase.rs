use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Everything the purchase workflow needs for one attempt.
///
/// Ephemeral: built from the group card plus the freshest on-chain supply
/// read each time the purchase dialog opens, and discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseContext {
    pub group_id: u64,
    /// Unit price in wei. Zero means a free claim.
    pub price_wei: U256,
    pub max_supply: u64,
    pub current_supply: u64,
    /// Payment token contract; the zero address is the native-currency sentinel.
    pub pay_token: Address,
    pub quantity: u64,
}

impl PurchaseContext {
    /// Units still mintable for this group.
    pub fn remaining(&self) -> u64 {
        self.max_supply.saturating_sub(self.current_supply)
    }

    pub fn is_free(&self) -> bool {
        self.price_wei.is_zero()
    }
}

/// Which execution route handled a successful purchase.
///
/// `Simulated` marks the placeholder-marketplace demo mode: the workflow
/// waits out a fixed delay and reports success without submitting anything.
/// Callers must be able to tell it apart from real execution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PurchasePath {
    Marketplace,
    DirectMint,
    Simulated,
}

/// Result of a successful purchase attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub path: PurchasePath,
    /// Transaction hash of the purchase (not the approval). `None` for the
    /// simulated path, which submits no transaction.
    pub tx_hash: Option<B256>,
    pub quantity: u64,
    /// Optimistic local supply after the purchase; not re-read from chain.
    pub new_supply: u64,
}
