//! Per-pair share token
//!
//! Accounting unit for a provider's proportional claim on one pair. Minting
//! and burning are restricted to the authority captured at construction:
//! the exchange instance that created the token.

use ethereum_types::{Address, U256};
use tracing::warn;

use crate::error::{TokenError, TokenResult};
use crate::events::TokenEvent;
use crate::ledger::BalanceLedger;
use crate::standard::TokenMetadata;
use crate::traits::FungibleToken;

pub const SHARE_TOKEN_NAME: &str = "Pairswap LP";
pub const SHARE_TOKEN_SYMBOL: &str = "PLP";
pub const SHARE_TOKEN_DECIMALS: u8 = 18;

#[derive(Debug, Clone)]
pub struct ShareToken {
    authority: Address,
    ledger: BalanceLedger,
}

impl ShareToken {
    /// Create a share token whose supply only `authority` may change
    pub fn new(address: Address, authority: Address) -> Self {
        Self {
            authority,
            ledger: BalanceLedger::new(address),
        }
    }

    pub fn authority(&self) -> Address {
        self.authority
    }

    /// Metadata shared by every share token
    pub fn metadata() -> TokenMetadata {
        TokenMetadata {
            name: SHARE_TOKEN_NAME.to_string(),
            symbol: SHARE_TOKEN_SYMBOL.to_string(),
            decimals: SHARE_TOKEN_DECIMALS,
        }
    }

    /// Issue `amount` shares to `to`
    pub fn mint(&mut self, caller: Address, to: Address, amount: U256) -> TokenResult<TokenEvent> {
        self.require_authority(caller)?;
        self.ledger.mint(to, amount)
    }

    /// Redeem `amount` shares held by `from`
    pub fn burn(&mut self, caller: Address, from: Address, amount: U256) -> TokenResult<TokenEvent> {
        self.require_authority(caller)?;
        self.ledger.burn(from, amount)
    }

    fn require_authority(&self, caller: Address) -> TokenResult<()> {
        if caller != self.authority {
            warn!(
                "Rejected supply change on share token {:?} by {:?}",
                self.ledger.token(),
                caller
            );
            return Err(TokenError::Unauthorized {
                caller,
                authority: self.authority,
            });
        }
        Ok(())
    }
}

impl FungibleToken for ShareToken {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::address_from_label;
    use assert_matches::assert_matches;

    #[test]
    fn test_only_authority_changes_supply() {
        let exchange = address_from_label("exchange");
        let mallory = address_from_label("mallory");
        let mut share = ShareToken::new(address_from_label("share"), exchange);

        share.mint(exchange, mallory, U256::from(10u64)).unwrap();
        assert_eq!(share.total_supply(), U256::from(10u64));

        assert_matches!(
            share.mint(mallory, mallory, U256::one()),
            Err(TokenError::Unauthorized { caller, authority }) if caller == mallory && authority == exchange
        );
        assert_matches!(
            share.burn(mallory, mallory, U256::one()),
            Err(TokenError::Unauthorized { .. })
        );
        assert_eq!(share.total_supply(), U256::from(10u64));

        share.burn(exchange, mallory, U256::from(4u64)).unwrap();
        assert_eq!(share.balance_of(&mallory), U256::from(6u64));
    }

    #[test]
    fn test_shares_are_transferable() {
        let exchange = address_from_label("exchange");
        let alice = address_from_label("alice");
        let bob = address_from_label("bob");
        let mut share = ShareToken::new(address_from_label("share"), exchange);

        share.mint(exchange, alice, U256::from(100u64)).unwrap();
        share.transfer(alice, bob, U256::from(30u64)).unwrap();
        assert_eq!(share.balance_of(&bob), U256::from(30u64));
        assert_eq!(share.total_supply(), U256::from(100u64));
    }
}
