//! Engine notifications
//!
//! Emitted by the exchange alongside the token-level notifications of the
//! external collaborators. Share-token mints and burns are wrapped in
//! [`ExchangeEvent::ShareTransfer`] so the engine journal carries every
//! balance change it caused.

use ethereum_types::{Address, U256};
use serde::Serialize;
use token::TokenEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExchangeEvent {
    PairCreated {
        token_a: Address,
        token_b: Address,
        share_token: Address,
    },
    LiquidityAdded {
        provider: Address,
        to: Address,
        token_a: Address,
        token_b: Address,
        amount_a: U256,
        amount_b: U256,
        liquidity: U256,
    },
    LiquidityRemoved {
        provider: Address,
        to: Address,
        token_a: Address,
        token_b: Address,
        amount_a: U256,
        amount_b: U256,
        liquidity: U256,
    },
    Swap {
        sender: Address,
        to: Address,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        amount_out: U256,
    },
    ShareTransfer {
        notification: TokenEvent,
    },
}
