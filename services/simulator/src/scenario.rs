//! Scenario files
//!
//! A scenario is an ordered list of steps. Accounts are referenced by label
//! (or `0x` hex address) and tokens by their configured symbol.
//!
//! ```toml
//! name = "seed and trade"
//!
//! [[steps]]
//! action = "add_liquidity"
//! account = "alice"
//! token_a = "USDC"
//! token_b = "WETH"
//! amount_a = "1000000000"
//! amount_b = "500000000000000000000"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::Amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {:?}", path))?;
        Self::parse(&text).with_context(|| format!("Failed to parse scenario {:?}", path))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// One scenario step
///
/// Optional `to` defaults to the acting account; optional `deadline` defaults
/// to the ledger timestamp at execution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Unlimited when `amount` is omitted
    Approve {
        account: String,
        token: String,
        #[serde(default)]
        spender: Option<String>,
        #[serde(default)]
        amount: Option<Amount>,
    },
    AddLiquidity {
        account: String,
        token_a: String,
        token_b: String,
        amount_a: Amount,
        amount_b: Amount,
        #[serde(default)]
        min_a: Amount,
        #[serde(default)]
        min_b: Amount,
        #[serde(default)]
        to: Option<String>,
        #[serde(default)]
        deadline: Option<u64>,
    },
    /// Burns the whole share balance when `liquidity` is omitted
    RemoveLiquidity {
        account: String,
        token_a: String,
        token_b: String,
        #[serde(default)]
        liquidity: Option<Amount>,
        #[serde(default)]
        min_a: Amount,
        #[serde(default)]
        min_b: Amount,
        #[serde(default)]
        to: Option<String>,
        #[serde(default)]
        deadline: Option<u64>,
    },
    Swap {
        account: String,
        path: Vec<String>,
        amount_in: Amount,
        #[serde(default)]
        min_out: Amount,
        #[serde(default)]
        to: Option<String>,
        #[serde(default)]
        deadline: Option<u64>,
    },
    AdvanceTime {
        seconds: u64,
    },
    Price {
        token_a: String,
        token_b: String,
    },
    Quote {
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Approve { .. } => "approve",
            Step::AddLiquidity { .. } => "add_liquidity",
            Step::RemoveLiquidity { .. } => "remove_liquidity",
            Step::Swap { .. } => "swap",
            Step::AdvanceTime { .. } => "advance_time",
            Step::Price { .. } => "price",
            Step::Quote { .. } => "quote",
        }
    }
}
