//! # Shared Domain Types
//!
//! Types that cross crate boundaries: the session crate produces
//! [`dto::auth::UserProfile`] snapshots, the market crate consumes
//! [`dto::purchase::PurchaseContext`] and produces
//! [`dto::purchase::PurchaseOutcome`], and the storefront binary renders both.
//!
//! ## Structure
//!
//! - **[`dto`]**: serializable domain objects
//!   - **[`dto::auth`]**: wallet-derived user profile and session snapshot
//!   - **[`dto::purchase`]**: purchase context, path, and outcome
//! - **[`utils`]**: address display helpers
//!
//! All DTOs serialize to JSON with default `serde` behavior (snake_case
//! field names, both `Serialize` and `Deserialize` derived) so the persisted
//! profile format stays stable across versions.

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
