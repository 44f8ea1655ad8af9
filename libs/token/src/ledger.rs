//! Balance ledger shared by every token kind
//!
//! Holds balances, allowances and total supply for a single token. All
//! mutators validate first and mutate last, so a returned error never leaves
//! a partial update behind. Each successful mutation returns the notification
//! it produced.

use std::collections::HashMap;

use ethereum_types::{Address, U256};
use tracing::debug;

use crate::address::NULL_ADDRESS;
use crate::error::{TokenError, TokenResult};
use crate::events::TokenEvent;

/// Balance and allowance storage for one token
///
/// # Invariants
///
/// `total_supply == sum(balances)` == minted minus burned.
#[derive(Debug, Clone)]
pub struct BalanceLedger {
    token: Address,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl BalanceLedger {
    pub fn new(token: Address) -> Self {
        Self {
            token,
            total_supply: U256::zero(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Number of accounts holding a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    /// Move `amount` from `from` to `to`
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> TokenResult<TokenEvent> {
        if from == NULL_ADDRESS {
            return Err(TokenError::InvalidAccount("transfer from the void address"));
        }
        if to == NULL_ADDRESS {
            return Err(TokenError::InvalidAccount("transfer to the void address"));
        }

        let have = self.balance_of(&from);
        if have < amount {
            return Err(TokenError::InsufficientBalance { have, need: amount });
        }
        if from != to {
            // cannot exceed total supply, but stay checked
            self.balance_of(&to)
                .checked_add(amount)
                .ok_or(TokenError::Overflow)?;
        }

        self.debit(from, amount);
        self.credit(to, amount);
        Ok(self.emit_transfer(from, to, amount))
    }

    /// Set the allowance of `spender` over `owner`'s balance
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) -> TokenResult<TokenEvent> {
        if owner == NULL_ADDRESS {
            return Err(TokenError::InvalidAccount("approve from the void address"));
        }
        if spender == NULL_ADDRESS {
            return Err(TokenError::InvalidAccount("approve to the void address"));
        }

        self.allowances.insert((owner, spender), amount);
        let event = TokenEvent::Approval {
            token: self.token,
            owner,
            spender,
            amount,
        };
        debug!(
            "Approval token={:?} owner={:?} spender={:?} amount={}",
            self.token, owner, spender, amount
        );
        Ok(event)
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming allowance
    ///
    /// An allowance of `U256::MAX` is treated as unlimited and is not consumed.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<TokenEvent> {
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(TokenError::AllowanceExceeded {
                allowed,
                need: amount,
            });
        }

        let event = self.transfer(from, to, amount)?;
        if allowed != U256::MAX {
            self.allowances.insert((from, spender), allowed - amount);
        }
        Ok(event)
    }

    /// Create `amount` new units owned by `to`
    pub fn mint(&mut self, to: Address, amount: U256) -> TokenResult<TokenEvent> {
        if to == NULL_ADDRESS {
            return Err(TokenError::InvalidAccount("mint to the void address"));
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.total_supply = supply;
        self.credit(to, amount);
        Ok(self.emit_transfer(NULL_ADDRESS, to, amount))
    }

    /// Destroy `amount` units owned by `from`
    pub fn burn(&mut self, from: Address, amount: U256) -> TokenResult<TokenEvent> {
        if from == NULL_ADDRESS {
            return Err(TokenError::InvalidAccount("burn from the void address"));
        }
        let have = self.balance_of(&from);
        if have < amount {
            return Err(TokenError::InsufficientBalance { have, need: amount });
        }

        self.debit(from, amount);
        self.total_supply -= amount;
        Ok(self.emit_transfer(from, NULL_ADDRESS, amount))
    }

    fn debit(&mut self, account: Address, amount: U256) {
        let balance = self.balances.entry(account).or_default();
        *balance -= amount;
    }

    fn credit(&mut self, account: Address, amount: U256) {
        let balance = self.balances.entry(account).or_default();
        *balance += amount;
    }

    fn emit_transfer(&self, from: Address, to: Address, amount: U256) -> TokenEvent {
        debug!(
            "Transfer token={:?} from={:?} to={:?} amount={}",
            self.token, from, to, amount
        );
        TokenEvent::Transfer {
            token: self.token,
            from,
            to,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::address_from_label;
    use assert_matches::assert_matches;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn setup() -> (BalanceLedger, Address, Address) {
        let mut ledger = BalanceLedger::new(address_from_label("TKN"));
        let alice = address_from_label("alice");
        let bob = address_from_label("bob");
        ledger.mint(alice, u(1_000)).unwrap();
        (ledger, alice, bob)
    }

    #[test]
    fn test_mint_emits_transfer_from_void() {
        let mut ledger = BalanceLedger::new(address_from_label("TKN"));
        let alice = address_from_label("alice");
        let event = ledger.mint(alice, u(5)).unwrap();
        assert_matches!(event, TokenEvent::Transfer { from, to, .. } if from == NULL_ADDRESS && to == alice);
        assert_eq!(ledger.total_supply(), u(5));
        assert_eq!(ledger.balance_of(&alice), u(5));
    }

    #[test]
    fn test_transfer_moves_balance() {
        let (mut ledger, alice, bob) = setup();
        ledger.transfer(alice, bob, u(400)).unwrap();
        assert_eq!(ledger.balance_of(&alice), u(600));
        assert_eq!(ledger.balance_of(&bob), u(400));
        assert_eq!(ledger.total_supply(), u(1_000));
        assert_eq!(ledger.holder_count(), 2);
    }

    #[test]
    fn test_self_transfer_keeps_balance() {
        let (mut ledger, alice, _) = setup();
        ledger.transfer(alice, alice, u(1_000)).unwrap();
        assert_eq!(ledger.balance_of(&alice), u(1_000));
    }

    #[test]
    fn test_transfer_insufficient_balance_is_untouched() {
        let (mut ledger, alice, bob) = setup();
        let err = ledger.transfer(alice, bob, u(1_001)).unwrap_err();
        assert_eq!(
            err,
            TokenError::InsufficientBalance {
                have: u(1_000),
                need: u(1_001)
            }
        );
        assert_eq!(ledger.balance_of(&alice), u(1_000));
        assert_eq!(ledger.balance_of(&bob), u(0));
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let (mut ledger, alice, bob) = setup();
        let spender = address_from_label("router");
        ledger.approve(alice, spender, u(300)).unwrap();

        ledger.transfer_from(spender, alice, bob, u(200)).unwrap();
        assert_eq!(ledger.allowance(&alice, &spender), u(100));

        let err = ledger.transfer_from(spender, alice, bob, u(101)).unwrap_err();
        assert_matches!(err, TokenError::AllowanceExceeded { .. });
        assert_eq!(ledger.balance_of(&bob), u(200));
    }

    #[test]
    fn test_failed_transfer_from_keeps_allowance() {
        let (mut ledger, alice, bob) = setup();
        let spender = address_from_label("router");
        ledger.approve(alice, spender, u(5_000)).unwrap();

        let err = ledger.transfer_from(spender, alice, bob, u(2_000)).unwrap_err();
        assert_matches!(err, TokenError::InsufficientBalance { .. });
        assert_eq!(ledger.allowance(&alice, &spender), u(5_000));
    }

    #[test]
    fn test_unlimited_allowance_is_not_consumed() {
        let (mut ledger, alice, bob) = setup();
        let spender = address_from_label("router");
        ledger.approve(alice, spender, U256::MAX).unwrap();
        ledger.transfer_from(spender, alice, bob, u(10)).unwrap();
        assert_eq!(ledger.allowance(&alice, &spender), U256::MAX);
    }

    #[test]
    fn test_burn_reduces_supply() {
        let (mut ledger, alice, _) = setup();
        let event = ledger.burn(alice, u(250)).unwrap();
        assert_matches!(event, TokenEvent::Transfer { to, .. } if to == NULL_ADDRESS);
        assert_eq!(ledger.total_supply(), u(750));
        assert_matches!(
            ledger.burn(alice, u(751)),
            Err(TokenError::InsufficientBalance { .. })
        );
    }

    #[test]
    fn test_void_address_is_rejected() {
        let (mut ledger, alice, _) = setup();
        assert_matches!(
            ledger.transfer(alice, NULL_ADDRESS, u(1)),
            Err(TokenError::InvalidAccount(_))
        );
        assert_matches!(
            ledger.mint(NULL_ADDRESS, u(1)),
            Err(TokenError::InvalidAccount(_))
        );
        assert_matches!(
            ledger.approve(alice, NULL_ADDRESS, u(1)),
            Err(TokenError::InvalidAccount(_))
        );
    }
}
