//! # Storefront Demo
//!
//! End-to-end walkthrough of the purchase workflow against the in-memory
//! mock chain: connect a wallet, resolve the contract linkage, open a group,
//! and run one purchase. Real deployments swap the mock for RPC-backed
//! implementations of the same contract traits.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::info;

use lib_chain::{fetch_group_state, resolve_linkage, ChainConfig, GroupInfo};
use lib_chain::mock::MockChain;
use lib_market::PurchaseEngine;
use lib_session::{JsonFileStore, MockWalletConnector, SessionManager};
use shared::dto::purchase::PurchaseContext;

const DEMO_WALLET: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
const DEMO_OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" => tracing_subscriber::EnvFilter::new("trace"),
        "debug" => tracing_subscriber::EnvFilter::new("debug"),
        "warn" => tracing_subscriber::EnvFilter::new("warn"),
        "error" => tracing_subscriber::EnvFilter::new("error"),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_tracing();

    info!(" IP MODEL STOREFRONT DEMO STARTING");

    let config = ChainConfig::from_env()?;
    config.validate()?;
    info!("Mint contract:  {}", config.ip_model);
    info!("Marketplace:    {}", config.marketplace);

    let wallet: Address = DEMO_WALLET.parse()?;
    let owner: Address = DEMO_OWNER.parse()?;

    // In-memory chain with one free, active group.
    let chain = Arc::new(MockChain::new(
        config.ip_model,
        config.marketplace,
        owner,
        wallet,
    ));
    chain.add_group(
        1,
        GroupInfo {
            name: "AI Model Genesis".to_string(),
            uri: "ipfs://QmGenesis".to_string(),
            max_supply: 100,
            current_supply: 42,
            active: true,
            price: U256::ZERO,
            pay_token: Address::ZERO,
        },
    );

    // Wallet login: the session manager derives and persists a profile
    // from the connected address.
    let connector = MockWalletConnector::new(wallet);
    let store = JsonFileStore::new(".data/session")?;
    let mut session = SessionManager::new(Box::new(store));
    session.login_with_wallet(&connector).await;

    let snapshot = session.snapshot();
    match &snapshot.user {
        Some(user) => info!("Signed in as {} <{}>", user.display_name, user.email),
        None => anyhow::bail!("login failed: {:?}", snapshot.error),
    }

    // Per-dialog reads: routing state and the latest group tuple.
    let linkage = resolve_linkage(&config, wallet, &*chain, &*chain).await;
    let group = fetch_group_state(&*chain, wallet, 1).await?;
    info!(
        "Group \"{}\": supply {}/{}, owned {}",
        group.info.name, group.info.current_supply, group.info.max_supply, group.balance
    );

    let engine = PurchaseEngine::new(
        chain.clone(),
        chain.clone(),
        chain.clone(),
        linkage,
        Some(wallet),
    );

    let ctx = PurchaseContext {
        group_id: 1,
        price_wei: group.info.price,
        max_supply: group.info.max_supply,
        current_supply: group.info.current_supply,
        pay_token: group.info.pay_token,
        quantity: 1,
    };

    match engine.purchase(&ctx).await {
        Ok(outcome) => info!(
            "Purchased {} via {:?}, supply now {}/{}, tx {:?}",
            outcome.quantity, outcome.path, outcome.new_supply, ctx.max_supply, outcome.tx_hash
        ),
        Err(e) => info!("Purchase failed: {}", e),
    }

    session.logout(&connector).await;
    info!("Signed out, session cleared");

    Ok(())
}
