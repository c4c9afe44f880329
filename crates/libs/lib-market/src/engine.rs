//! # Purchase Engine
//!
//! One engine per purchase dialog, built from the contract linkage resolved
//! at open time. `purchase` serializes its sub-steps: every blockchain write
//! is confirmed before the next dependent call is issued, and an atomic busy
//! flag rejects a second attempt while one is in flight.

use alloy_primitives::{Address, U256};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use lib_chain::{ChainError, ContractLinkage, Erc20, MarketplaceContract, MintContract, NATIVE_TOKEN};
use shared::dto::purchase::{PurchaseContext, PurchaseOutcome, PurchasePath};

use crate::error::{PurchaseError, Result};

/// Hard per-transaction cap, independent of remaining supply.
pub const MAX_PER_PURCHASE: u64 = 10;

/// Fixed delay the simulated (placeholder-marketplace) path waits out.
pub const SIMULATED_DELAY: Duration = Duration::from_secs(2);

pub struct PurchaseEngine {
    mint: Arc<dyn MintContract>,
    marketplace: Arc<dyn MarketplaceContract>,
    tokens: Arc<dyn Erc20>,
    linkage: ContractLinkage,
    buyer: Option<Address>,
    simulated_delay: Duration,
    in_flight: AtomicBool,
}

/// Clears the busy flag when an attempt ends, success or failure.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl PurchaseEngine {
    pub fn new(
        mint: Arc<dyn MintContract>,
        marketplace: Arc<dyn MarketplaceContract>,
        tokens: Arc<dyn Erc20>,
        linkage: ContractLinkage,
        buyer: Option<Address>,
    ) -> Self {
        Self {
            mint,
            marketplace,
            tokens,
            linkage,
            buyer,
            simulated_delay: SIMULATED_DELAY,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Override the simulated-path delay (tests).
    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = delay;
        self
    }

    pub fn linkage(&self) -> &ContractLinkage {
        &self.linkage
    }

    /// Run one purchase attempt to a terminal outcome.
    ///
    /// Preconditions are checked in order and short-circuit: connected
    /// session, remaining supply, quantity within `min(remaining, 10)`.
    /// Every failure is terminal for this invocation; a new attempt must be
    /// user-initiated.
    pub async fn purchase(&self, ctx: &PurchaseContext) -> Result<PurchaseOutcome> {
        let buyer = self.buyer.ok_or(PurchaseError::NotConnected)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PurchaseError::Busy);
        }
        let _guard = FlightGuard(&self.in_flight);

        let remaining = ctx.remaining();
        if remaining == 0 {
            warn!("[PURCHASE] Group {} is sold out", ctx.group_id);
            return Err(PurchaseError::SoldOut);
        }

        let max_quantity = remaining.min(MAX_PER_PURCHASE);
        if ctx.quantity == 0 || ctx.quantity > max_quantity {
            return Err(PurchaseError::QuantityOutOfRange { max: max_quantity });
        }

        info!(
            "[PURCHASE] Group {} x{}, buyer {}, price {} wei",
            ctx.group_id, ctx.quantity, buyer, ctx.price_wei
        );

        let (path, tx_hash) = match (self.linkage.use_marketplace, self.linkage.marketplace) {
            (true, Some(marketplace_addr)) => {
                self.buy_via_marketplace(buyer, marketplace_addr, ctx).await?
            }
            _ => self.mint_directly(buyer, ctx).await?,
        };

        // Optimistic local supply update; the next dialog open re-reads it.
        let outcome = PurchaseOutcome {
            path,
            tx_hash,
            quantity: ctx.quantity,
            new_supply: ctx.current_supply + ctx.quantity,
        };
        info!(
            "[PURCHASE] ✅ Success via {:?}, supply now {}/{}",
            outcome.path, outcome.new_supply, ctx.max_supply
        );
        Ok(outcome)
    }

    async fn buy_via_marketplace(
        &self,
        buyer: Address,
        marketplace_addr: Address,
        ctx: &PurchaseContext,
    ) -> Result<(PurchasePath, Option<lib_chain::TxHash>)> {
        if self.linkage.simulated {
            // Demo fallback: the configured marketplace is a placeholder.
            // Wait out the fixed delay and report success with metadata
            // that makes the absence of a real transaction explicit.
            warn!("[PURCHASE] Placeholder marketplace {}; simulating", marketplace_addr);
            tokio::time::sleep(self.simulated_delay).await;
            return Ok((PurchasePath::Simulated, None));
        }

        if ctx.is_free() {
            let tx = self.marketplace.buy_tokens(ctx.group_id, ctx.quantity).await?;
            return Ok((PurchasePath::Marketplace, Some(tx)));
        }

        let total = ctx
            .price_wei
            .checked_mul(U256::from(ctx.quantity))
            .ok_or(PurchaseError::PriceOverflow)?;

        if ctx.pay_token == NATIVE_TOKEN {
            // Native payment has no separate approval step; a failure here
            // is reported as a payment failure with no retry.
            info!("[PURCHASE] Native payment, total {} wei", total);
            let tx = self
                .marketplace
                .buy_tokens(ctx.group_id, ctx.quantity)
                .await
                .map_err(|e| match e {
                    ChainError::UserRejected => PurchaseError::UserRejected,
                    ChainError::InsufficientFunds => PurchaseError::InsufficientFunds,
                    other => PurchaseError::PaymentFailed(other.to_string()),
                })?;
            return Ok((PurchasePath::Marketplace, Some(tx)));
        }

        // ERC-20 payment: the marketplace pulls the total via allowance, so
        // the purchase call may only be issued once allowance >= total.
        // Approval and purchase are two independent transactions; a crash
        // between them is recovered on retry because the allowance already
        // covers the total and the approval step is skipped.
        let allowance = self
            .tokens
            .allowance(ctx.pay_token, buyer, marketplace_addr)
            .await?;
        if allowance < total {
            info!(
                "[PURCHASE] Approving {} wei for marketplace {} (allowance {})",
                total, marketplace_addr, allowance
            );
            self.tokens
                .approve(ctx.pay_token, marketplace_addr, total)
                .await?;
        }

        let tx = self.marketplace.buy_tokens(ctx.group_id, ctx.quantity).await?;
        Ok((PurchasePath::Marketplace, Some(tx)))
    }

    async fn mint_directly(
        &self,
        buyer: Address,
        ctx: &PurchaseContext,
    ) -> Result<(PurchasePath, Option<lib_chain::TxHash>)> {
        if !self.linkage.can_direct_mint(buyer) {
            return Err(PurchaseError::MintUnauthorized);
        }
        // Direct mint has no payment leg; rejecting here keeps paid groups
        // from being minted without charge.
        if !ctx.is_free() {
            return Err(PurchaseError::PaidDirectMint);
        }

        info!("[PURCHASE] Direct mint to {}", buyer);
        let tx = self.mint.mint(buyer, ctx.group_id, ctx.quantity).await?;
        Ok((PurchasePath::DirectMint, Some(tx)))
    }
}
