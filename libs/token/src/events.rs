//! Token notifications
//!
//! Every balance-affecting move emits a `Transfer`; every allowance change
//! emits an `Approval`. Mints use the void address as `from`, burns use it
//! as `to`.

use ethereum_types::{Address, U256};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    },
    Approval {
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    },
}

impl TokenEvent {
    /// Token that emitted the notification
    pub fn token(&self) -> Address {
        match self {
            TokenEvent::Transfer { token, .. } | TokenEvent::Approval { token, .. } => *token,
        }
    }
}
