//! End-of-run JSON report

use config::Amount;
use ethereum_types::{Address, U256};
use exchange::ExchangeEvent;
use rust_decimal::Decimal;
use serde::Serialize;
use token::FungibleToken;

use crate::runner::{Simulation, StepRecord};
use crate::scenario::Scenario;

/// Scale of raw spot prices
const RAW_PRICE_SCALE: u32 = 18;

/// Largest scale a `Decimal` carries
const MAX_DECIMAL_SCALE: u32 = 28;

#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    pub token_a: String,
    pub token_b: String,
    pub share_token: Option<Address>,
    pub reserve_a: Amount,
    pub reserve_b: Amount,
    pub total_supply: Amount,
    /// Units of B per unit of A; absent while the pool is empty
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub scenario: Option<String>,
    pub exchange: Address,
    pub timestamp: u64,
    pub height: u64,
    pub failed_steps: usize,
    pub steps: Vec<StepRecord>,
    pub pairs: Vec<PairReport>,
    pub events: Vec<ExchangeEvent>,
}

impl Report {
    pub fn build(simulation: &Simulation, scenario: &Scenario, steps: Vec<StepRecord>) -> Self {
        let ledger = simulation.ledger();
        let exchange = ledger.exchange();
        let label = |address: &Address| {
            simulation
                .token_by_address(address)
                .map(|token| token.symbol.clone())
                .unwrap_or_else(|| format!("{:?}", address))
        };
        let decimals = |address: &Address| {
            simulation
                .token_by_address(address)
                .map(|token| token.decimals)
                .unwrap_or(18)
        };

        let mut pairs: Vec<PairReport> = exchange
            .registry()
            .iter()
            .map(|(key, pair)| {
                let price = exchange
                    .get_price(key.token_a, key.token_b)
                    .ok()
                    .and_then(|raw| {
                        display_price(raw, decimals(&key.token_a), decimals(&key.token_b))
                    });
                PairReport {
                    token_a: label(&key.token_a),
                    token_b: label(&key.token_b),
                    share_token: exchange
                        .share_token(key.token_a, key.token_b)
                        .map(|share| share.address()),
                    reserve_a: pair.reserve_a().into(),
                    reserve_b: pair.reserve_b().into(),
                    total_supply: pair.total_supply().into(),
                    price,
                }
            })
            .collect();
        pairs.sort_by(|x, y| (&x.token_a, &x.token_b).cmp(&(&y.token_a, &y.token_b)));

        Self {
            scenario: scenario.name.clone(),
            exchange: exchange.address(),
            timestamp: ledger.timestamp(),
            height: ledger.height(),
            failed_steps: steps.iter().filter(|s| !s.is_ok()).count(),
            steps,
            pairs,
            events: exchange.events().to_vec(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Decimal-adjusted price from a raw 1e18-scaled spot price
///
/// `None` when the value does not fit a `Decimal`.
pub fn display_price(raw: U256, decimals_a: u8, decimals_b: u8) -> Option<Decimal> {
    let mut value = raw;
    let mut scale = RAW_PRICE_SCALE;

    // raw counts B base units per A base unit
    if decimals_a >= decimals_b {
        let shift = usize::from(decimals_a - decimals_b);
        value = value.checked_mul(U256::exp10(shift))?;
    } else {
        scale += u32::from(decimals_b - decimals_a);
    }
    if scale > MAX_DECIMAL_SCALE {
        value /= U256::exp10((scale - MAX_DECIMAL_SCALE) as usize);
        scale = MAX_DECIMAL_SCALE;
    }

    if value > U256::from(i128::MAX as u128) {
        return None;
    }
    let mantissa = i128::try_from(value.as_u128()).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, scale)
        .ok()
        .map(|price| price.normalize())
}
