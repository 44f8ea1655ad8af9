//! Pair records
//!
//! A pair is keyed by the ordered `(token_a, token_b)` tuple exactly as the
//! caller supplied it. `(A, B)` and `(B, A)` are different keys with their own
//! reserves and their own share token.

use amm::{ConstantProductPool, MathError, MathResult};
use ethereum_types::{Address, U256};
use serde::Serialize;
use token::{FungibleToken, ShareToken};

/// Ordered, direction-sensitive pair key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PairKey {
    pub token_a: Address,
    pub token_b: Address,
}

impl PairKey {
    pub fn new(token_a: Address, token_b: Address) -> Self {
        Self { token_a, token_b }
    }

    /// The key addressing the opposite slot order
    pub fn reversed(&self) -> Self {
        Self::new(self.token_b, self.token_a)
    }
}

/// Reserve state and share token binding for one key
///
/// # Invariants
///
/// - `reserve_a` / `reserve_b` equal the exchange's net custodial holdings of
///   each token on behalf of this key
/// - only the exchange engine mutates the reserves
/// - once bound, the share token is never replaced
#[derive(Debug, Clone, Default)]
pub struct Pair {
    reserve_a: U256,
    reserve_b: U256,
    share_token: Option<ShareToken>,
}

impl Pair {
    pub fn reserve_a(&self) -> U256 {
        self.reserve_a
    }

    pub fn reserve_b(&self) -> U256 {
        self.reserve_b
    }

    pub fn share_token(&self) -> Option<&ShareToken> {
        self.share_token.as_ref()
    }

    /// Whether a share token has been bound to this key
    pub fn is_bound(&self) -> bool {
        self.share_token.is_some()
    }

    /// Outstanding shares; zero while unbound
    pub fn total_supply(&self) -> U256 {
        self.share_token
            .as_ref()
            .map(|share| share.total_supply())
            .unwrap_or_default()
    }

    pub(crate) fn bind(&mut self, share_token: ShareToken) {
        self.share_token = Some(share_token);
    }

    pub(crate) fn share_token_mut(&mut self) -> Option<&mut ShareToken> {
        self.share_token.as_mut()
    }

    /// Record a deposit of both tokens
    pub(crate) fn deposit(&mut self, amount_a: U256, amount_b: U256) -> MathResult<()> {
        let reserve_a = self
            .reserve_a
            .checked_add(amount_a)
            .ok_or(MathError::Overflow("reserve A"))?;
        let reserve_b = self
            .reserve_b
            .checked_add(amount_b)
            .ok_or(MathError::Overflow("reserve B"))?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        Ok(())
    }

    /// Record a withdrawal of both tokens
    pub(crate) fn withdraw(&mut self, amount_a: U256, amount_b: U256) -> MathResult<()> {
        let reserve_a = self
            .reserve_a
            .checked_sub(amount_a)
            .ok_or(MathError::Overflow("reserve A underflow"))?;
        let reserve_b = self
            .reserve_b
            .checked_sub(amount_b)
            .ok_or(MathError::Overflow("reserve B underflow"))?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        Ok(())
    }

    /// Record a swap: input lands in slot A, output leaves slot B
    pub(crate) fn apply_swap(&mut self, amount_in: U256, amount_out: U256) -> MathResult<()> {
        let reserve_a = self
            .reserve_a
            .checked_add(amount_in)
            .ok_or(MathError::Overflow("reserve A"))?;
        let reserve_b = self
            .reserve_b
            .checked_sub(amount_out)
            .ok_or(MathError::Overflow("reserve B underflow"))?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        Ok(())
    }
}

impl ConstantProductPool for Pair {
    fn reserves(&self) -> (U256, U256) {
        (self.reserve_a, self.reserve_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_updates_are_all_or_nothing() {
        let mut pair = Pair::default();
        pair.deposit(U256::from(10u64), U256::from(20u64)).unwrap();

        let err = pair.withdraw(U256::from(5u64), U256::from(21u64));
        assert!(err.is_err());
        assert_eq!(pair.reserves(), (U256::from(10u64), U256::from(20u64)));

        pair.apply_swap(U256::from(5u64), U256::from(8u64)).unwrap();
        assert_eq!(pair.reserves(), (U256::from(15u64), U256::from(12u64)));
    }

    #[test]
    fn test_reversed_key_is_distinct() {
        let key = PairKey::new(Address::repeat_byte(1), Address::repeat_byte(2));
        assert_ne!(key, key.reversed());
        assert_eq!(key, key.reversed().reversed());
    }

    #[test]
    fn test_unbound_pair_has_no_supply() {
        let pair = Pair::default();
        assert!(!pair.is_bound());
        assert!(pair.is_empty());
        assert_eq!(pair.total_supply(), U256::zero());
    }
}
