//! Reference fungible token
//!
//! A plain transferable asset with a fixed genesis distribution. Stands in
//! for any external token the exchange pools.

use ethereum_types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::TokenResult;
use crate::events::TokenEvent;
use crate::ledger::BalanceLedger;
use crate::traits::FungibleToken;

/// Descriptive token metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone)]
pub struct StandardToken {
    metadata: TokenMetadata,
    ledger: BalanceLedger,
    genesis_events: Vec<TokenEvent>,
}

impl StandardToken {
    pub fn new(address: Address, metadata: TokenMetadata) -> Self {
        Self {
            metadata,
            ledger: BalanceLedger::new(address),
            genesis_events: Vec::new(),
        }
    }

    /// Mint a genesis allocation to `holder`
    pub fn with_balance(mut self, holder: Address, amount: U256) -> TokenResult<Self> {
        let event = self.ledger.mint(holder, amount)?;
        self.genesis_events.push(event);
        Ok(self)
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Mint notifications produced while building the genesis distribution
    pub fn genesis_events(&self) -> &[TokenEvent] {
        &self.genesis_events
    }
}

impl FungibleToken for StandardToken {
    fn address(&self) -> Address {
        self.ledger.token()
    }

    fn total_supply(&self) -> U256 {
        self.ledger.total_supply()
    }

    fn balance_of(&self, account: &Address) -> U256 {
        self.ledger.balance_of(account)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    fn transfer(&mut self, sender: Address, to: Address, amount: U256) -> TokenResult<TokenEvent> {
        self.ledger.transfer(sender, to, amount)
    }

    fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> TokenResult<TokenEvent> {
        self.ledger.approve(owner, spender, amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<TokenEvent> {
        self.ledger.transfer_from(spender, from, to, amount)
    }
}
