//! # Pairswap Token Collaborators
//!
//! Fungible-token bookkeeping consumed by the exchange engine through a
//! capability interface, plus the per-pair share token whose supply only the
//! creating exchange may change.
//!
//! - [`BalanceLedger`]: balances, allowances, supply; emits notifications
//! - [`StandardToken`]: reference external asset
//! - [`ShareToken`]: authority-gated mint/burn accounting unit
//! - [`TokenBank`]: token-indexed capability set the engine depends on
//! - [`InMemoryTokenBank`]: reference bank with an ordered journal

pub mod address;
pub mod bank;
pub mod error;
pub mod events;
pub mod ledger;
pub mod share;
pub mod standard;
pub mod traits;

pub use address::{address_from_label, parse_address, share_token_address, NULL_ADDRESS};
pub use bank::InMemoryTokenBank;
pub use error::{TokenError, TokenResult};
pub use events::TokenEvent;
pub use ledger::BalanceLedger;
pub use share::ShareToken;
pub use standard::{StandardToken, TokenMetadata};
pub use traits::{FungibleToken, TokenBank};

pub use ethereum_types::{Address, U256};
