//! # Chain Configuration
//!
//! The two contract addresses the storefront talks to, loaded from the
//! environment with deploy-script defaults, plus the placeholder rule that
//! distinguishes "not yet deployed" from a real address.

use alloy_primitives::{address, Address};
use lib_utils::envs::get_env_or;
use std::str::FromStr;

use crate::error::{ChainError, Result};

/// Sentinel pay-token address meaning "pay in the native currency".
pub const NATIVE_TOKEN: Address = Address::ZERO;

/// Well-known test sentinel used in configs before the marketplace is
/// deployed. Purchases against it run in simulated mode.
const PLACEHOLDER: Address = address!("1234567890123456789012345678901234567890");

/// Default mint-contract address (first local deploy).
const DEFAULT_IP_MODEL: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Default marketplace address: the placeholder, i.e. demo mode until a
/// real deployment is configured.
const DEFAULT_MARKETPLACE: &str = "0x1234567890123456789012345678901234567890";

/// An address counts as a placeholder when it is the zero address or the
/// `0x1234...7890` test sentinel. Typed [`Address`] comparison makes the
/// check case-insensitive by construction.
pub fn is_placeholder_address(addr: Address) -> bool {
    addr == Address::ZERO || addr == PLACEHOLDER
}

#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// The IP Model mint contract (owns balances and supply counters).
    pub ip_model: Address,
    /// The marketplace facade expected to front `ip_model`.
    pub marketplace: Address,
}

impl ChainConfig {
    pub fn from_env() -> Result<Self> {
        let ip_model = parse_address("IP_MODEL_ADDRESS", get_env_or("IP_MODEL_ADDRESS", DEFAULT_IP_MODEL))?;
        let marketplace = parse_address(
            "MARKETPLACE_ADDRESS",
            get_env_or("MARKETPLACE_ADDRESS", DEFAULT_MARKETPLACE),
        )?;

        Ok(Self {
            ip_model,
            marketplace,
        })
    }

    /// The mint contract must be a real deployment even when the
    /// marketplace is still a placeholder (demo mode).
    pub fn validate(&self) -> Result<()> {
        if is_placeholder_address(self.ip_model) {
            return Err(ChainError::Unreachable(
                "IP_MODEL_ADDRESS is a placeholder; configure the deployed mint contract".to_string(),
            ));
        }
        Ok(())
    }

    pub fn marketplace_is_placeholder(&self) -> bool {
        is_placeholder_address(self.marketplace)
    }
}

fn parse_address(name: &'static str, value: String) -> Result<Address> {
    Address::from_str(value.trim())
        .map_err(|e| ChainError::Unreachable(format!("{name} is not a valid address: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder_address(Address::ZERO));
        assert!(is_placeholder_address(
            Address::from_str("0x1234567890123456789012345678901234567890").unwrap()
        ));
        assert!(!is_placeholder_address(
            Address::from_str("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap()
        ));
    }

    #[test]
    fn test_validate_rejects_placeholder_mint() {
        let config = ChainConfig {
            ip_model: Address::ZERO,
            marketplace: Address::ZERO,
        };
        assert!(config.validate().is_err());

        let config = ChainConfig {
            ip_model: Address::from_str(DEFAULT_IP_MODEL).unwrap(),
            marketplace: Address::ZERO,
        };
        assert!(config.validate().is_ok());
        assert!(config.marketplace_is_placeholder());
    }
}
