//! # Purchase Workflow Library
//!
//! The decision tree behind the "buy" button: precondition checks, routing
//! between the marketplace facade and the direct-mint fallback, ERC-20
//! approval sequencing, simulated demo execution, and failure classification
//! for user messaging.
//!
//! One [`engine::PurchaseEngine`] is built per purchase dialog from the
//! contract linkage resolved at open time; [`engine::PurchaseEngine::purchase`]
//! runs one attempt to a terminal success or failure. There are no automatic
//! retries anywhere.

pub mod engine;
pub mod error;

pub use engine::PurchaseEngine;
pub use error::{PurchaseError, Result};
