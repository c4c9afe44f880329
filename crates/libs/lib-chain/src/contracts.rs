//! # Contract Capability Traits
//!
//! The ABI surfaces the storefront touches, modeled as explicit capability
//! sets so the purchase workflow can be written against interfaces and
//! tested with fakes. Three surfaces:
//!
//! - [`MintContract`] - the ERC-1155-style token contract that owns NFT
//!   balances and per-group supply counters
//! - [`MarketplaceContract`] - the facade that accepts payment and forwards
//!   minting for a group
//! - [`Erc20`] - the payment-token surface used when a group is priced in a
//!   token rather than the native currency
//!
//! Write operations submit the transaction through the connected wallet and
//! return only after finality, so a caller may safely issue the next
//! dependent call as soon as the previous one returns.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Hash of a confirmed transaction.
pub type TxHash = B256;

/// The seven-field group tuple both contracts report
/// (`getGroupInfo` / `getGroupDetails`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupInfo {
    pub name: String,
    pub uri: String,
    pub max_supply: u64,
    pub current_supply: u64,
    pub active: bool,
    /// Unit price in wei; zero for free groups.
    pub price: U256,
    /// Payment token; the zero address means native currency.
    pub pay_token: Address,
}

/// Read/write surface of the IP Model mint contract.
#[async_trait]
pub trait MintContract: Send + Sync {
    /// Mint `amount` tokens of `group_id` to `to`. Requires the caller to be
    /// an authorized minter or the contract owner.
    async fn mint(&self, to: Address, group_id: u64, amount: u64) -> Result<TxHash>;

    async fn get_group_info(&self, group_id: u64) -> Result<GroupInfo>;

    async fn balance_of(&self, account: Address, id: u64) -> Result<U256>;

    /// Whether `account` may call [`MintContract::mint`] directly.
    async fn authorized_minters(&self, account: Address) -> Result<bool>;

    async fn owner(&self) -> Result<Address>;
}

/// Read/write surface of the marketplace facade.
#[async_trait]
pub trait MarketplaceContract: Send + Sync {
    /// Purchase `amount` tokens of `group_id` for the connected wallet.
    /// Payment is collected by the contract (native or via a prior ERC-20
    /// allowance).
    async fn buy_tokens(&self, group_id: u64, amount: u64) -> Result<TxHash>;

    async fn get_group_details(&self, group_id: u64) -> Result<GroupInfo>;

    /// The mint contract this marketplace is configured to front.
    async fn ip_model_contract(&self) -> Result<Address>;

    /// Where collected payments are forwarded.
    async fn recipient(&self) -> Result<Address>;

    async fn owner(&self) -> Result<Address>;
}

/// ERC-20 payment-token surface, keyed by token address so one adapter
/// serves every pay token a group may be priced in.
#[async_trait]
pub trait Erc20: Send + Sync {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash>;

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    async fn balance_of(&self, token: Address, account: Address) -> Result<U256>;

    async fn decimals(&self, token: Address) -> Result<u8>;

    async fn symbol(&self, token: Address) -> Result<String>;
}
