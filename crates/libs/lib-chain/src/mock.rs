//! # In-Memory Mock Chain
//!
//! One state machine implementing all three contract traits, used by unit
//! tests and by the storefront demo binary. Enforces the same rules the real
//! contracts enforce (supply caps, minter authorization, ERC-20 allowance
//! pulls) and records every write call so tests can assert what was - and
//! was not - submitted.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::contracts::{Erc20, GroupInfo, MarketplaceContract, MintContract, TxHash};
use crate::error::{ChainError, Result};

/// Write calls the mock has accepted, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Mint {
        to: Address,
        group_id: u64,
        amount: u64,
    },
    BuyTokens {
        group_id: u64,
        amount: u64,
    },
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
}

/// Failure to inject into the next write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    UserRejected,
    InsufficientFunds,
}

struct MockState {
    groups: HashMap<u64, GroupInfo>,
    nft_balances: HashMap<(Address, u64), U256>,
    token_balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    authorized: HashSet<Address>,
    owner: Address,
    backing: Address,
    recipient: Address,
    marketplace_down: bool,
    next_failure: Option<MockFailure>,
    tx_counter: u64,
    calls: Vec<Call>,
}

/// Mock chain acting as mint contract, marketplace, and payment tokens.
///
/// The `signer` address plays the role of the connected wallet: writes are
/// attributed to it, so `approve` records it as the allowance owner and
/// `mint` checks its authorization.
pub struct MockChain {
    mint_address: Address,
    marketplace_address: Address,
    signer: Address,
    state: Mutex<MockState>,
}

impl MockChain {
    pub fn new(mint: Address, marketplace: Address, owner: Address, signer: Address) -> Self {
        Self {
            mint_address: mint,
            marketplace_address: marketplace,
            signer,
            state: Mutex::new(MockState {
                groups: HashMap::new(),
                nft_balances: HashMap::new(),
                token_balances: HashMap::new(),
                allowances: HashMap::new(),
                authorized: HashSet::new(),
                owner,
                backing: mint,
                recipient: owner,
                marketplace_down: false,
                next_failure: None,
                tx_counter: 0,
                calls: Vec::new(),
            }),
        }
    }

    pub fn add_group(&self, group_id: u64, info: GroupInfo) {
        self.state.lock().unwrap().groups.insert(group_id, info);
    }

    pub fn authorize_minter(&self, account: Address) {
        self.state.lock().unwrap().authorized.insert(account);
    }

    /// Override what `ipModelContract()` reports, to model a marketplace
    /// fronting some other mint contract.
    pub fn set_backing(&self, backing: Address) {
        self.state.lock().unwrap().backing = backing;
    }

    pub fn set_token_balance(&self, token: Address, holder: Address, amount: U256) {
        self.state
            .lock()
            .unwrap()
            .token_balances
            .insert((token, holder), amount);
    }

    pub fn set_allowance(&self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.state
            .lock()
            .unwrap()
            .allowances
            .insert((token, owner, spender), amount);
    }

    /// Make marketplace reads and writes fail as unreachable.
    pub fn set_marketplace_down(&self, down: bool) {
        self.state.lock().unwrap().marketplace_down = down;
    }

    /// Inject a failure into the next write call only.
    pub fn fail_next_write(&self, failure: MockFailure) {
        self.state.lock().unwrap().next_failure = Some(failure);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn group(&self, group_id: u64) -> Option<GroupInfo> {
        self.state.lock().unwrap().groups.get(&group_id).cloned()
    }

    pub fn nft_balance(&self, holder: Address, group_id: u64) -> U256 {
        self.state
            .lock()
            .unwrap()
            .nft_balances
            .get(&(holder, group_id))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn allowance_of(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn marketplace_address(&self) -> Address {
        self.marketplace_address
    }

    pub fn mint_address(&self) -> Address {
        self.mint_address
    }

    fn next_tx(state: &mut MockState) -> TxHash {
        state.tx_counter += 1;
        B256::from(U256::from(state.tx_counter))
    }

    fn take_injected_failure(state: &mut MockState) -> Result<()> {
        match state.next_failure.take() {
            Some(MockFailure::UserRejected) => Err(ChainError::UserRejected),
            Some(MockFailure::InsufficientFunds) => Err(ChainError::InsufficientFunds),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MintContract for MockChain {
    async fn mint(&self, to: Address, group_id: u64, amount: u64) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        Self::take_injected_failure(&mut state)?;

        if !state.authorized.contains(&self.signer) && state.owner != self.signer {
            return Err(ChainError::Unauthorized);
        }

        let group = state
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| ChainError::Execution(format!("unknown group {group_id}")))?;
        if group.current_supply + amount > group.max_supply {
            return Err(ChainError::SupplyExceeded);
        }
        group.current_supply += amount;

        let balance = state.nft_balances.entry((to, group_id)).or_insert(U256::ZERO);
        *balance += U256::from(amount);

        state.calls.push(Call::Mint {
            to,
            group_id,
            amount,
        });
        Ok(Self::next_tx(&mut state))
    }

    async fn get_group_info(&self, group_id: u64) -> Result<GroupInfo> {
        let state = self.state.lock().unwrap();
        state
            .groups
            .get(&group_id)
            .cloned()
            .ok_or_else(|| ChainError::Execution(format!("unknown group {group_id}")))
    }

    async fn balance_of(&self, account: Address, id: u64) -> Result<U256> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nft_balances
            .get(&(account, id))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn authorized_minters(&self, account: Address) -> Result<bool> {
        Ok(self.state.lock().unwrap().authorized.contains(&account))
    }

    async fn owner(&self) -> Result<Address> {
        Ok(self.state.lock().unwrap().owner)
    }
}

#[async_trait]
impl MarketplaceContract for MockChain {
    async fn buy_tokens(&self, group_id: u64, amount: u64) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        if state.marketplace_down {
            return Err(ChainError::Unreachable("marketplace is down".to_string()));
        }
        Self::take_injected_failure(&mut state)?;

        let group = state
            .groups
            .get(&group_id)
            .cloned()
            .ok_or_else(|| ChainError::Execution(format!("unknown group {group_id}")))?;
        if !group.active {
            return Err(ChainError::Execution(format!("group {group_id} is not active")));
        }
        if group.current_supply + amount > group.max_supply {
            return Err(ChainError::SupplyExceeded);
        }

        // Token-priced groups are settled by pulling the pre-approved
        // allowance, exactly like the real facade's transferFrom.
        if !group.price.is_zero() && group.pay_token != Address::ZERO {
            let total = group.price * U256::from(amount);
            let allowance_key = (group.pay_token, self.signer, self.marketplace_address);
            let allowance = state
                .allowances
                .get(&allowance_key)
                .copied()
                .unwrap_or(U256::ZERO);
            if allowance < total {
                return Err(ChainError::Execution("ERC20: insufficient allowance".to_string()));
            }
            let balance_key = (group.pay_token, self.signer);
            let balance = state
                .token_balances
                .get(&balance_key)
                .copied()
                .unwrap_or(U256::ZERO);
            if balance < total {
                return Err(ChainError::InsufficientFunds);
            }
            state.allowances.insert(allowance_key, allowance - total);
            state.token_balances.insert(balance_key, balance - total);
        }

        let group = state.groups.get_mut(&group_id).expect("group checked above");
        group.current_supply += amount;
        let buyer = self.signer;
        let balance = state
            .nft_balances
            .entry((buyer, group_id))
            .or_insert(U256::ZERO);
        *balance += U256::from(amount);

        state.calls.push(Call::BuyTokens { group_id, amount });
        Ok(Self::next_tx(&mut state))
    }

    async fn get_group_details(&self, group_id: u64) -> Result<GroupInfo> {
        let state = self.state.lock().unwrap();
        if state.marketplace_down {
            return Err(ChainError::Unreachable("marketplace is down".to_string()));
        }
        state
            .groups
            .get(&group_id)
            .cloned()
            .ok_or_else(|| ChainError::Execution(format!("unknown group {group_id}")))
    }

    async fn ip_model_contract(&self) -> Result<Address> {
        let state = self.state.lock().unwrap();
        if state.marketplace_down {
            return Err(ChainError::Unreachable("marketplace is down".to_string()));
        }
        Ok(state.backing)
    }

    async fn recipient(&self) -> Result<Address> {
        Ok(self.state.lock().unwrap().recipient)
    }

    async fn owner(&self) -> Result<Address> {
        Ok(self.state.lock().unwrap().owner)
    }
}

#[async_trait]
impl Erc20 for MockChain {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        Self::take_injected_failure(&mut state)?;
        state.allowances.insert((token, self.signer, spender), amount);
        state.calls.push(Call::Approve {
            token,
            spender,
            amount,
        });
        Ok(Self::next_tx(&mut state))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn balance_of(&self, token: Address, account: Address) -> Result<U256> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .token_balances
            .get(&(token, account))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn decimals(&self, _token: Address) -> Result<u8> {
        Ok(18)
    }

    async fn symbol(&self, _token: Address) -> Result<String> {
        Ok("MOCK".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn addr(n: u8) -> Address {
        Address::from_slice(&[n; 20])
    }

    fn free_group(max_supply: u64, current_supply: u64) -> GroupInfo {
        GroupInfo {
            name: "Test Group".to_string(),
            uri: "ipfs://test".to_string(),
            max_supply,
            current_supply,
            active: true,
            price: U256::ZERO,
            pay_token: Address::ZERO,
        }
    }

    #[tokio::test]
    async fn test_mint_requires_authorization() {
        let chain = MockChain::new(addr(1), addr(2), addr(3), addr(4));
        chain.add_group(1, free_group(10, 0));

        let err = chain.mint(addr(4), 1, 1).await.unwrap_err();
        assert!(matches!(err, ChainError::Unauthorized));

        chain.authorize_minter(addr(4));
        chain.mint(addr(4), 1, 2).await.unwrap();
        assert_eq!(chain.group(1).unwrap().current_supply, 2);
        assert_eq!(chain.nft_balance(addr(4), 1), U256::from(2));
    }

    #[tokio::test]
    async fn test_buy_tokens_enforces_supply_cap() {
        let chain = MockChain::new(addr(1), addr(2), addr(3), addr(4));
        chain.add_group(1, free_group(5, 5));

        let err = chain.buy_tokens(1, 1).await.unwrap_err();
        assert!(matches!(err, ChainError::SupplyExceeded));
        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn test_buy_tokens_pulls_allowance() {
        let token = Address::from_str("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap();
        let buyer = addr(4);
        let chain = MockChain::new(addr(1), addr(2), addr(3), buyer);
        let mut group = free_group(10, 0);
        group.price = U256::from(100u64);
        group.pay_token = token;
        chain.add_group(1, group);

        // No allowance: the pull fails.
        let err = chain.buy_tokens(1, 2).await.unwrap_err();
        assert!(matches!(err, ChainError::Execution(_)));

        chain.set_token_balance(token, buyer, U256::from(1_000u64));
        chain.set_allowance(token, buyer, addr(2), U256::from(200u64));
        chain.buy_tokens(1, 2).await.unwrap();

        // Exact allowance was consumed.
        assert_eq!(chain.allowance_of(token, buyer, addr(2)), U256::ZERO);
    }
}
