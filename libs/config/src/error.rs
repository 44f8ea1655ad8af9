//! Configuration validation errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: &'static str },

    #[error("Invalid address {value:?} for {field}")]
    InvalidAddress { field: String, value: String },

    #[error("Duplicate token symbol: {0}")]
    DuplicateSymbol(String),

    #[error("Duplicate token address for {0}")]
    DuplicateAddress(String),

    #[error("Token {symbol} has {decimals} decimals, at most {max} supported")]
    UnsupportedDecimals { symbol: String, decimals: u8, max: u8 },
}
