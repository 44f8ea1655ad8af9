//! Constant product (x*y=k) math with exact integer arithmetic
//!
//! All amounts are raw `U256` token units. Every division floors, so rounding
//! never favours the trader or the withdrawing provider. Intermediate
//! products are checked; a product that does not fit in 256 bits aborts the
//! calculation instead of wrapping.

use crate::error::{MathError, MathResult};
use ethereum_types::U256;

/// Fee-adjusted input multiplier (0.3% fee: 997/1000)
pub const FEE_NUMERATOR: u64 = 997;

/// Fee denominator
pub const FEE_DENOMINATOR: u64 = 1_000;

/// Fixed-point scale of [`V2Math::spot_price`] (1e18)
pub const PRICE_DECIMALS: usize = 18;

/// Integer constant product math
pub struct V2Math;

impl V2Math {
    /// Largest `z` with `z * z <= y`
    ///
    /// Newton's method seeded at `y / 2 + 1`, iterating while the estimate
    /// strictly decreases. Inputs below 4 are answered directly.
    pub fn integer_sqrt(y: U256) -> U256 {
        if y > U256::from(3u64) {
            let two = U256::from(2u64);
            let mut z = y;
            let mut x = y / two + U256::one();
            while x < z {
                z = x;
                x = (y / x + x) / two;
            }
            z
        } else if !y.is_zero() {
            U256::one()
        } else {
            U256::zero()
        }
    }

    /// Output amount for an exact input, net of the 0.3% fee
    ///
    /// `out = floor(amount_in*997*reserve_out / (reserve_in*1000 + amount_in*997))`
    ///
    /// The result is always strictly below `reserve_out`.
    pub fn get_amount_out(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> MathResult<U256> {
        if amount_in.is_zero() {
            return Err(MathError::InvalidInput("input amount must be positive"));
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(MathError::InvalidInput("reserves must be positive"));
        }

        let amount_in_with_fee = checked_mul(amount_in, U256::from(FEE_NUMERATOR), "fee")?;
        let numerator = checked_mul(amount_in_with_fee, reserve_out, "output numerator")?;
        let denominator = checked_mul(reserve_in, U256::from(FEE_DENOMINATOR), "output denominator")?
            .checked_add(amount_in_with_fee)
            .ok_or(MathError::Overflow("output denominator"))?;

        Ok(numerator / denominator)
    }

    /// Amount of B worth `amount_a` of A at the current reserve ratio
    ///
    /// `floor(amount_a * reserve_b / reserve_a)`
    pub fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> MathResult<U256> {
        checked_mul_div(amount_a, reserve_b, reserve_a, "quote")
    }

    /// Portion of `reserve` redeemable by `liquidity` out of `total_supply` shares
    ///
    /// `floor(reserve * liquidity / total_supply)`
    pub fn share_of(reserve: U256, liquidity: U256, total_supply: U256) -> MathResult<U256> {
        checked_mul_div(reserve, liquidity, total_supply, "share redemption")
    }

    /// Instantaneous price of A in units of B, scaled by 1e18
    ///
    /// `floor(reserve_b * 1e18 / reserve_a)`
    pub fn spot_price(reserve_a: U256, reserve_b: U256) -> MathResult<U256> {
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(MathError::InsufficientReserves);
        }
        checked_mul_div(reserve_b, U256::exp10(PRICE_DECIMALS), reserve_a, "spot price")
    }
}

fn checked_mul(a: U256, b: U256, context: &'static str) -> MathResult<U256> {
    a.checked_mul(b).ok_or(MathError::Overflow(context))
}

fn checked_mul_div(a: U256, b: U256, divisor: U256, context: &'static str) -> MathResult<U256> {
    if divisor.is_zero() {
        return Err(MathError::DivisionByZero(context));
    }
    Ok(checked_mul(a, b, context)? / divisor)
}
