//! # Contract Linkage Resolution
//!
//! Re-derives, every time the purchase dialog opens, which execution path is
//! available: the marketplace facade (preferred), the direct-mint fallback,
//! or simulated demo mode when the marketplace address is still a
//! placeholder. Nothing here is cached across dialog sessions.

use alloy_primitives::{Address, U256};
use tracing::{debug, info, warn};

use crate::config::{is_placeholder_address, ChainConfig};
use crate::contracts::{GroupInfo, MarketplaceContract, MintContract};
use crate::error::Result;

/// Routing state derived from on-chain reads at dialog-open time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractLinkage {
    /// Marketplace address when the marketplace path is usable.
    pub marketplace: Option<Address>,
    /// True when purchases go through the marketplace (real or simulated).
    pub use_marketplace: bool,
    /// True when the marketplace address is a placeholder: purchases run a
    /// fixed delay and report success without a transaction.
    pub simulated: bool,
    /// Whether the acting address may mint directly.
    pub authorized_minter: bool,
    /// Mint-contract owner, when readable.
    pub owner: Option<Address>,
}

impl ContractLinkage {
    /// Direct mint is allowed for authorized minters and the contract owner.
    pub fn can_direct_mint(&self, actor: Address) -> bool {
        self.authorized_minter || self.owner == Some(actor)
    }
}

/// Fresh per-dialog reads for one group: the actor's balance and the
/// group tuple with the latest supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub balance: U256,
    pub info: GroupInfo,
}

/// Read the actor's balance and the latest group state from the mint
/// contract. Called on dialog open so supply checks never run on stale data.
pub async fn fetch_group_state(
    mint: &dyn MintContract,
    actor: Address,
    group_id: u64,
) -> Result<GroupSnapshot> {
    let balance = mint.balance_of(actor, group_id).await?;
    let info = mint.get_group_info(group_id).await?;
    debug!(
        "[LINKAGE] Group {} state: supply {}/{}, actor balance {}",
        group_id, info.current_supply, info.max_supply, balance
    );
    Ok(GroupSnapshot { balance, info })
}

/// Derive the routing state for the acting address.
///
/// Placeholder marketplace address: marketplace path with simulated
/// execution, no contract queried. Otherwise the marketplace must report
/// the configured mint contract as its backing contract; a mismatch or an
/// unreachable marketplace disables the path and forces direct mint.
///
/// Minter authorization and ownership are always read so the direct-mint
/// fallback is decidable; a failed read degrades to "not authorized" rather
/// than failing resolution.
pub async fn resolve_linkage(
    config: &ChainConfig,
    actor: Address,
    mint: &dyn MintContract,
    marketplace: &dyn MarketplaceContract,
) -> ContractLinkage {
    let authorized_minter = match mint.authorized_minters(actor).await {
        Ok(authorized) => authorized,
        Err(e) => {
            warn!("[LINKAGE] Failed to read minter authorization: {}", e);
            false
        }
    };
    let owner = match mint.owner().await {
        Ok(owner) => Some(owner),
        Err(e) => {
            warn!("[LINKAGE] Failed to read contract owner: {}", e);
            None
        }
    };

    if is_placeholder_address(config.marketplace) {
        warn!(
            "[LINKAGE] Marketplace address {} is a placeholder; purchases will be simulated",
            config.marketplace
        );
        return ContractLinkage {
            marketplace: Some(config.marketplace),
            use_marketplace: true,
            simulated: true,
            authorized_minter,
            owner,
        };
    }

    match marketplace.ip_model_contract().await {
        Ok(backing) if backing == config.ip_model => {
            info!(
                "[LINKAGE] ✅ Marketplace {} verified against mint contract {}",
                config.marketplace, config.ip_model
            );
            ContractLinkage {
                marketplace: Some(config.marketplace),
                use_marketplace: true,
                simulated: false,
                authorized_minter,
                owner,
            }
        }
        Ok(backing) => {
            warn!(
                "[LINKAGE] ❌ Marketplace verification failed: backing contract {} does not match {}",
                backing, config.ip_model
            );
            ContractLinkage {
                marketplace: None,
                use_marketplace: false,
                simulated: false,
                authorized_minter,
                owner,
            }
        }
        Err(e) => {
            warn!("[LINKAGE] ❌ Marketplace unreachable: {}", e);
            ContractLinkage {
                marketplace: None,
                use_marketplace: false,
                simulated: false,
                authorized_minter,
                owner,
            }
        }
    }
}
