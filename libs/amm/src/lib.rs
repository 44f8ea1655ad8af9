//! # Pairswap AMM Library - Integer Constant Product Mathematics
//!
//! ## Purpose
//!
//! Exact integer math for constant product (`x * y = k`) pools: the square
//! root used to size initial liquidity, the fee-adjusted swap output, the
//! proportional deposit quote, proportional redemption and the instantaneous
//! reserve-ratio price.
//!
//! ## Precision
//!
//! Everything operates on raw `U256` token units. No floating point and no
//! decimal scaling takes place here; every division floors. Overflowing
//! intermediates return [`MathError::Overflow`] instead of wrapping.
//!
//! ## Integration Points
//!
//! - **Consumers**: the exchange engine (deposit sizing, redemption, swaps,
//!   price queries) and the simulator's quoting step
//! - **State**: none; every function is pure
//!
//! ```rust
//! use amm::{V2Math, U256};
//!
//! let out = V2Math::get_amount_out(
//!     U256::from(1_000u64),
//!     U256::from(1_000_000u64),
//!     U256::from(1_000_000u64),
//! )
//! .unwrap();
//! assert_eq!(out, U256::from(996u64));
//! ```

pub mod error;
pub mod pool_traits;
pub mod v2_math;

pub use error::{MathError, MathResult};
pub use pool_traits::ConstantProductPool;
pub use v2_math::{V2Math, FEE_DENOMINATOR, FEE_NUMERATOR, PRICE_DECIMALS};

/// Common numeric type for AMM calculations
pub use ethereum_types::U256;
