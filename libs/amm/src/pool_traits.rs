//! Pool trait definitions for the constant product interface

use crate::error::MathResult;
use crate::V2Math;
use ethereum_types::U256;

/// Anything holding a pair of constant product reserves
///
/// Reserves are reported in slot order `(reserve_a, reserve_b)`; the default
/// methods always price A -> B against that order.
pub trait ConstantProductPool {
    /// Current reserves in slot order
    fn reserves(&self) -> (U256, U256);

    /// Output of B for an exact input of A
    fn amount_out(&self, amount_in: U256) -> MathResult<U256> {
        let (reserve_a, reserve_b) = self.reserves();
        V2Math::get_amount_out(amount_in, reserve_a, reserve_b)
    }

    /// Price of A in B, scaled by 1e18
    fn spot_price(&self) -> MathResult<U256> {
        let (reserve_a, reserve_b) = self.reserves();
        V2Math::spot_price(reserve_a, reserve_b)
    }

    /// Whether both reserves are empty
    fn is_empty(&self) -> bool {
        let (reserve_a, reserve_b) = self.reserves();
        reserve_a.is_zero() && reserve_b.is_zero()
    }
}

impl ConstantProductPool for (U256, U256) {
    fn reserves(&self) -> (U256, U256) {
        *self
    }
}
