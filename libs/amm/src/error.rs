//! Arithmetic errors for constant-product math
//!
//! Every formula in this crate is integer-only and total over its valid
//! domain. Anything outside that domain aborts with one of these variants
//! rather than substituting a default value.

use thiserror::Error;

/// Failure of a pool math operation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// An input amount or reserve was zero where a positive value is required
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// A price was requested from a pool with an empty reserve
    #[error("Insufficient reserves to quote a price")]
    InsufficientReserves,

    /// An intermediate product or sum exceeded 256 bits
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// A divisor was zero
    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),
}

/// Result type for pool math
pub type MathResult<T> = Result<T, MathError>;
