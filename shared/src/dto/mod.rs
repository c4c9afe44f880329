//! # Data Transfer Objects
//!
//! - [`auth`] - wallet-derived user profile and session snapshot
//! - [`purchase`] - purchase context, routing path, and outcome

pub mod auth;
pub mod purchase;

pub use auth::*;
pub use purchase::*;
