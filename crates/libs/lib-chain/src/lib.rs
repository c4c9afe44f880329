//! # Chain Access Library
//!
//! Typed capability surfaces for the two on-chain collaborators (the IP Model
//! mint contract and its marketplace facade) plus the ERC-20 payment-token
//! surface, the per-dialog contract linkage resolution, and chain
//! configuration with placeholder-address detection.
//!
//! The purchase workflow is written entirely against the traits in
//! [`contracts`]; [`mock`] provides an in-memory implementation for tests and
//! the demo binary. Signature prompts, gas, and transaction ordering live
//! behind whatever implements the traits - write methods return only after
//! the transaction is final.

pub mod config;
pub mod contracts;
pub mod error;
pub mod linkage;
pub mod mock;

pub use config::{is_placeholder_address, ChainConfig, NATIVE_TOKEN};
pub use contracts::{Erc20, GroupInfo, MarketplaceContract, MintContract, TxHash};
pub use error::{ChainError, Result};
pub use linkage::{fetch_group_state, resolve_linkage, ContractLinkage, GroupSnapshot};
