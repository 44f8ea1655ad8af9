//! Token Contract Errors

use ethereum_types::{Address, U256};
use thiserror::Error;

/// Error during token operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: U256, need: U256 },

    #[error("Allowance exceeded: allowed {allowed}, need {need}")]
    AllowanceExceeded { allowed: U256, need: U256 },

    #[error("Unauthorized: caller {caller:?} is not the token authority {authority:?}")]
    Unauthorized { caller: Address, authority: Address },

    #[error("Token not found: {0:?}")]
    UnknownToken(Address),

    #[error("Token already registered: {0:?}")]
    DuplicateToken(Address),

    #[error("Invalid account: {0}")]
    InvalidAccount(&'static str),

    #[error("Arithmetic overflow")]
    Overflow,
}

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;
