//! Account and token identities
//!
//! Identities are 20-byte addresses. The all-zero address is the void
//! sentinel: it is the `from` of a mint, the `to` of a burn, and is never a
//! valid pool participant or balance holder.

use ethereum_types::{Address, H160};
use sha3::{Digest, Keccak256};

use crate::error::{TokenError, TokenResult};

/// The void sentinel
pub const NULL_ADDRESS: Address = H160([0u8; 20]);

/// Parse a hex address, with or without a `0x` prefix
pub fn parse_address(input: &str) -> TokenResult<Address> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes =
        hex::decode(digits).map_err(|_| TokenError::InvalidAccount("address is not valid hex"))?;
    if bytes.len() != 20 {
        return Err(TokenError::InvalidAccount("address must be 20 bytes"));
    }
    Ok(Address::from_slice(&bytes))
}

/// Deterministic address for a human-readable label
///
/// Last 20 bytes of `keccak256(label)`. Used for named accounts and tokens in
/// configuration files and tests.
pub fn address_from_label(label: &str) -> Address {
    let hash = Keccak256::digest(label.as_bytes());
    Address::from_slice(&hash[12..])
}

/// Deterministic identity of the share token bound to `(token_a, token_b)`
///
/// Last 20 bytes of `keccak256(exchange ++ token_a ++ token_b)`. The key is
/// ordered, so `(A, B)` and `(B, A)` produce different share tokens.
pub fn share_token_address(exchange: Address, token_a: Address, token_b: Address) -> Address {
    let mut hasher = Keccak256::new();
    hasher.update(exchange.as_bytes());
    hasher.update(token_a.as_bytes());
    hasher.update(token_b.as_bytes());
    let hash = hasher.finalize();
    Address::from_slice(&hash[12..])
}
