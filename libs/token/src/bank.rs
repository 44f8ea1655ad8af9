//! In-memory token bank
//!
//! Reference [`TokenBank`] holding every registered [`StandardToken`] by
//! address, with a single ordered journal of the notifications they emit.

use std::collections::HashMap;

use ethereum_types::{Address, U256};
use tracing::info;

use crate::address::NULL_ADDRESS;
use crate::error::{TokenError, TokenResult};
use crate::events::TokenEvent;
use crate::standard::StandardToken;
use crate::traits::{FungibleToken, TokenBank};

#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenBank {
    tokens: HashMap<Address, StandardToken>,
    journal: Vec<TokenEvent>,
}

impl InMemoryTokenBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token under its own address
    pub fn register(&mut self, token: StandardToken) -> TokenResult<()> {
        let address = token.address();
        if address == NULL_ADDRESS {
            return Err(TokenError::InvalidAccount("token at the void address"));
        }
        if self.tokens.contains_key(&address) {
            return Err(TokenError::DuplicateToken(address));
        }

        info!(
            "Registered token {} at {:?} (supply {})",
            token.symbol(),
            address,
            token.total_supply()
        );
        self.journal.extend_from_slice(token.genesis_events());
        self.tokens.insert(address, token);
        Ok(())
    }

    pub fn token(&self, address: &Address) -> Option<&StandardToken> {
        self.tokens.get(address)
    }

    /// Look up a token by its symbol
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&StandardToken> {
        self.tokens.values().find(|t| t.symbol() == symbol)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &StandardToken> {
        self.tokens.values()
    }

    /// Notifications emitted so far, oldest first
    pub fn events(&self) -> &[TokenEvent] {
        &self.journal
    }

    /// Drain the notification journal
    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.journal)
    }

    fn get(&self, token: &Address) -> TokenResult<&StandardToken> {
        self.tokens.get(token).ok_or(TokenError::UnknownToken(*token))
    }

    fn get_mut(&mut self, token: &Address) -> TokenResult<&mut StandardToken> {
        self.tokens
            .get_mut(token)
            .ok_or(TokenError::UnknownToken(*token))
    }
}

impl TokenBank for InMemoryTokenBank {
    fn balance_of(&self, token: &Address, account: &Address) -> TokenResult<U256> {
        Ok(self.get(token)?.balance_of(account))
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> TokenResult<U256> {
        Ok(self.get(token)?.allowance(owner, spender))
    }

    fn transfer(
        &mut self,
        token: &Address,
        sender: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<()> {
        let event = self.get_mut(token)?.transfer(sender, to, amount)?;
        self.journal.push(event);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: &Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<()> {
        let event = self
            .get_mut(token)?
            .transfer_from(spender, from, to, amount)?;
        self.journal.push(event);
        Ok(())
    }

    fn approve(
        &mut self,
        token: &Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> TokenResult<()> {
        let event = self.get_mut(token)?.approve(owner, spender, amount)?;
        self.journal.push(event);
        Ok(())
    }
}
