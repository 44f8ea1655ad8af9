//! Operation requests and receipts

use ethereum_types::{Address, U256};
use serde::Serialize;

/// Deposit both tokens of `(token_a, token_b)` and receive shares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidity {
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a_desired: U256,
    pub amount_b_desired: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub to: Address,
    pub deadline: u64,
}

/// Burn shares of `(token_a, token_b)` and receive both tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLiquidity {
    pub token_a: Address,
    pub token_b: Address,
    pub liquidity: U256,
    pub amount_a_min: U256,
    pub amount_b_min: U256,
    pub to: Address,
    pub deadline: u64,
}

/// Sell exactly `amount_in` of `path[0]` for `path[1]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactIn {
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: Vec<Address>,
    pub to: Address,
    pub deadline: u64,
}

/// Amounts actually deposited and shares minted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiquidityReceipt {
    pub amount_a: U256,
    pub amount_b: U256,
    pub liquidity: U256,
}

/// Amounts paid out for burned shares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RedemptionReceipt {
    pub amount_a: U256,
    pub amount_b: U256,
}
