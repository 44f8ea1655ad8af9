//! Exchange operation errors
//!
//! Every failure aborts the whole operation. Nothing here is recoverable
//! locally; the caller receives the typed rejection.

use amm::MathError;
use ethereum_types::{Address, U256};
use thiserror::Error;
use token::TokenError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Transaction expired: deadline {deadline} < current {now}")]
    Expired { deadline: u64, now: u64 },

    #[error("Invalid pair: {0}")]
    InvalidPair(&'static str),

    #[error("Slippage exceeded on {asset}: amount {amount}, bound {limit}")]
    SlippageExceeded {
        asset: &'static str,
        amount: U256,
        limit: U256,
    },

    #[error("Pair not found: ({token_a:?}, {token_b:?})")]
    PairNotFound { token_a: Address, token_b: Address },

    #[error("Unsupported path of length {len}: exactly two tokens required")]
    UnsupportedPath { len: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Insufficient reserves")]
    InsufficientReserves,

    #[error("Transfer of {token:?} failed: {source}")]
    TransferFailed {
        token: Address,
        #[source]
        source: TokenError,
    },

    #[error("Unauthorized: caller {caller:?} is not the authority {authority:?}")]
    Unauthorized { caller: Address, authority: Address },

    #[error("Arithmetic failure: {0}")]
    Arithmetic(MathError),
}

impl ExchangeError {
    /// Map a collaborator failure on `token`
    ///
    /// Authority violations keep their own kind; every other collaborator
    /// rejection (balance, allowance, unknown token, void account) is a
    /// failed transfer.
    pub fn from_token(token: Address, err: TokenError) -> Self {
        match err {
            TokenError::Unauthorized { caller, authority } => {
                ExchangeError::Unauthorized { caller, authority }
            }
            source => ExchangeError::TransferFailed { token, source },
        }
    }
}

impl From<MathError> for ExchangeError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidInput(reason) => ExchangeError::InvalidInput(reason),
            MathError::InsufficientReserves => ExchangeError::InsufficientReserves,
            other => ExchangeError::Arithmetic(other),
        }
    }
}

/// Result type for exchange operations
pub type ExchangeResult<T> = Result<T, ExchangeError>;
