//! Token capability interfaces
//!
//! [`FungibleToken`] is the single-token contract surface. [`TokenBank`] is
//! the capability set the exchange engine consumes: the same operations
//! addressed by token identity, so any conforming implementation (in-memory,
//! remote, or a host runtime's native ledger) can stand behind it.

use ethereum_types::{Address, U256};

use crate::error::TokenResult;
use crate::events::TokenEvent;

/// A single fungible token
///
/// Mutators take the acting account explicitly and return the notification
/// they emitted.
pub trait FungibleToken {
    /// Identity of this token
    fn address(&self) -> Address;

    fn total_supply(&self) -> U256;

    fn balance_of(&self, account: &Address) -> U256;

    fn allowance(&self, owner: &Address, spender: &Address) -> U256;

    /// `sender` moves `amount` of its own balance to `to`
    fn transfer(&mut self, sender: Address, to: Address, amount: U256) -> TokenResult<TokenEvent>;

    /// `owner` authorizes `spender` to move up to `amount`
    fn approve(&mut self, owner: Address, spender: Address, amount: U256)
        -> TokenResult<TokenEvent>;

    /// `spender` moves `amount` of `from`'s balance to `to`
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<TokenEvent>;
}

/// Token movement capability consumed by the exchange engine
pub trait TokenBank {
    fn balance_of(&self, token: &Address, account: &Address) -> TokenResult<U256>;

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> TokenResult<U256>;

    fn transfer(
        &mut self,
        token: &Address,
        sender: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<()>;

    fn transfer_from(
        &mut self,
        token: &Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<()>;

    fn approve(
        &mut self,
        token: &Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> TokenResult<()>;
}
