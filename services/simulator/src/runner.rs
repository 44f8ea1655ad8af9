//! Scenario execution against an in-memory ledger

use std::collections::HashMap;

use anyhow::{Context, Result};
use config::{resolve_account, Amount, ConfigError, SimulatorConfig};
use ethereum_types::{Address, U256};
use exchange::{
    AddLiquidity, Exchange, ExchangeError, Ledger, RemoveLiquidity, SwapExactIn,
};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use token::{InMemoryTokenBank, StandardToken, TokenMetadata};
use tracing::{info, warn};

use crate::report::display_price;
use crate::scenario::{Scenario, Step};

#[derive(Debug, Error)]
pub enum StepError {
    #[error("Unknown token symbol: {0}")]
    UnknownToken(String),

    #[error(transparent)]
    Account(#[from] ConfigError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// Successful outcome of one step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Approved {
        amount: Amount,
    },
    LiquidityAdded {
        amount_a: Amount,
        amount_b: Amount,
        liquidity: Amount,
    },
    LiquidityRemoved {
        amount_a: Amount,
        amount_b: Amount,
    },
    Swapped {
        amount_in: Amount,
        amount_out: Amount,
    },
    TimeAdvanced {
        timestamp: u64,
    },
    Price {
        /// `reserve_b * 1e18 / reserve_a`
        raw: Amount,
        /// Decimal-adjusted units of B per unit of A
        display: Option<Decimal>,
    },
    Quote {
        amount_out: Amount,
    },
}

/// Step outcome as it appears in the report
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub action: &'static str,
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<StepOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepRecord {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Registered token as seen by the simulator
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

pub struct Simulation {
    ledger: Ledger<InMemoryTokenBank>,
    tokens: Vec<TokenInfo>,
    by_symbol: HashMap<String, usize>,
}

impl Simulation {
    /// Register the configured tokens with their genesis balances
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let mut bank = InMemoryTokenBank::new();
        let mut tokens = Vec::with_capacity(config.tokens.len());
        let mut by_symbol = HashMap::new();

        for token_config in &config.tokens {
            let address = token_config.resolve_address()?;
            let metadata = TokenMetadata {
                name: token_config.name.clone(),
                symbol: token_config.symbol.clone(),
                decimals: token_config.decimals,
            };

            let mut token = StandardToken::new(address, metadata);
            for (holder, amount) in token_config.resolved_balances()? {
                token = token
                    .with_balance(holder, amount.value())
                    .with_context(|| format!("Genesis balance for {}", token_config.symbol))?;
            }
            bank.register(token)
                .with_context(|| format!("Failed to register {}", token_config.symbol))?;

            by_symbol.insert(token_config.symbol.clone(), tokens.len());
            tokens.push(TokenInfo {
                symbol: token_config.symbol.clone(),
                address,
                decimals: token_config.decimals,
            });
        }

        let exchange = Exchange::new(config.exchange.resolve()?);
        info!(
            "Simulation ready: exchange {:?}, {} tokens, t={}",
            exchange.address(),
            tokens.len(),
            config.clock.start_timestamp
        );

        Ok(Self {
            ledger: Ledger::new(exchange, bank, config.clock.start_timestamp),
            tokens,
            by_symbol,
        })
    }

    pub fn ledger(&self) -> &Ledger<InMemoryTokenBank> {
        &self.ledger
    }

    pub fn tokens(&self) -> &[TokenInfo] {
        &self.tokens
    }

    pub fn token_by_address(&self, address: &Address) -> Option<&TokenInfo> {
        self.tokens.iter().find(|t| t.address == *address)
    }

    fn token(&self, symbol: &str) -> Result<&TokenInfo, StepError> {
        self.by_symbol
            .get(symbol)
            .map(|&index| &self.tokens[index])
            .ok_or_else(|| StepError::UnknownToken(symbol.to_string()))
    }

    fn address_of(&self, symbol: &str) -> Result<Address, StepError> {
        Ok(self.token(symbol)?.address)
    }

    fn recipient(&self, to: &Option<String>, account: Address) -> Result<Address, StepError> {
        match to {
            Some(reference) => Ok(resolve_account(reference)?),
            None => Ok(account),
        }
    }

    fn deadline(&self, deadline: Option<u64>) -> u64 {
        deadline.unwrap_or_else(|| self.ledger.timestamp())
    }

    /// Replay every step, recording each outcome
    ///
    /// With `fail_fast` the first failing step ends the replay; its record is
    /// still included.
    pub fn run(&mut self, scenario: &Scenario, fail_fast: bool) -> Vec<StepRecord> {
        let mut records = Vec::with_capacity(scenario.steps.len());

        for (index, step) in scenario.steps.iter().enumerate() {
            let result = self.execute(step);
            let timestamp = self.ledger.timestamp();
            let record = match result {
                Ok(outcome) => {
                    info!("Step {} ({}): {:?}", index, step.action(), outcome);
                    StepRecord {
                        index,
                        action: step.action(),
                        timestamp,
                        outcome: Some(outcome),
                        error: None,
                    }
                }
                Err(err) => {
                    warn!("Step {} ({}) failed: {}", index, step.action(), err);
                    StepRecord {
                        index,
                        action: step.action(),
                        timestamp,
                        outcome: None,
                        error: Some(err.to_string()),
                    }
                }
            };

            let failed = !record.is_ok();
            records.push(record);
            if failed && fail_fast {
                warn!("Stopping replay after step {}", index);
                break;
            }
        }

        records
    }

    pub fn execute(&mut self, step: &Step) -> Result<StepOutcome, StepError> {
        match step {
            Step::Approve {
                account,
                token,
                spender,
                amount,
            } => {
                let owner = resolve_account(account)?;
                let token = self.address_of(token)?;
                let spender = match spender {
                    Some(reference) => resolve_account(reference)?,
                    None => self.ledger.exchange().address(),
                };
                let amount = amount.map(Amount::value).unwrap_or(U256::MAX);
                self.ledger.approve(owner, token, spender, amount)?;
                Ok(StepOutcome::Approved {
                    amount: amount.into(),
                })
            }

            Step::AddLiquidity {
                account,
                token_a,
                token_b,
                amount_a,
                amount_b,
                min_a,
                min_b,
                to,
                deadline,
            } => {
                let caller = resolve_account(account)?;
                let params = AddLiquidity {
                    token_a: self.address_of(token_a)?,
                    token_b: self.address_of(token_b)?,
                    amount_a_desired: amount_a.value(),
                    amount_b_desired: amount_b.value(),
                    amount_a_min: min_a.value(),
                    amount_b_min: min_b.value(),
                    to: self.recipient(to, caller)?,
                    deadline: self.deadline(*deadline),
                };
                let receipt = self.ledger.add_liquidity(caller, &params)?;
                Ok(StepOutcome::LiquidityAdded {
                    amount_a: receipt.amount_a.into(),
                    amount_b: receipt.amount_b.into(),
                    liquidity: receipt.liquidity.into(),
                })
            }

            Step::RemoveLiquidity {
                account,
                token_a,
                token_b,
                liquidity,
                min_a,
                min_b,
                to,
                deadline,
            } => {
                let caller = resolve_account(account)?;
                let token_a = self.address_of(token_a)?;
                let token_b = self.address_of(token_b)?;
                let liquidity = match liquidity {
                    Some(amount) => amount.value(),
                    None => self
                        .ledger
                        .exchange()
                        .share_balance(token_a, token_b, &caller),
                };
                let params = RemoveLiquidity {
                    token_a,
                    token_b,
                    liquidity,
                    amount_a_min: min_a.value(),
                    amount_b_min: min_b.value(),
                    to: self.recipient(to, caller)?,
                    deadline: self.deadline(*deadline),
                };
                let receipt = self.ledger.remove_liquidity(caller, &params)?;
                Ok(StepOutcome::LiquidityRemoved {
                    amount_a: receipt.amount_a.into(),
                    amount_b: receipt.amount_b.into(),
                })
            }

            Step::Swap {
                account,
                path,
                amount_in,
                min_out,
                to,
                deadline,
            } => {
                let caller = resolve_account(account)?;
                let path = path
                    .iter()
                    .map(|symbol| self.address_of(symbol))
                    .collect::<Result<Vec<_>, _>>()?;
                let params = SwapExactIn {
                    amount_in: amount_in.value(),
                    amount_out_min: min_out.value(),
                    path,
                    to: self.recipient(to, caller)?,
                    deadline: self.deadline(*deadline),
                };
                let amounts = self.ledger.swap_exact_tokens_for_tokens(caller, &params)?;
                let amount_out = amounts.last().copied().unwrap_or_default();
                Ok(StepOutcome::Swapped {
                    amount_in: amount_in.value().into(),
                    amount_out: amount_out.into(),
                })
            }

            Step::AdvanceTime { seconds } => {
                self.ledger.advance_time(*seconds);
                Ok(StepOutcome::TimeAdvanced {
                    timestamp: self.ledger.timestamp(),
                })
            }

            Step::Price { token_a, token_b } => {
                let base = self.token(token_a)?;
                let quote = self.token(token_b)?;
                let raw = self.ledger.get_price(base.address, quote.address)?;
                Ok(StepOutcome::Price {
                    raw: raw.into(),
                    display: display_price(raw, base.decimals, quote.decimals),
                })
            }

            Step::Quote {
                amount_in,
                reserve_in,
                reserve_out,
            } => {
                let amount_out = Exchange::get_amount_out(
                    amount_in.value(),
                    reserve_in.value(),
                    reserve_out.value(),
                )?;
                Ok(StepOutcome::Quote {
                    amount_out: amount_out.into(),
                })
            }
        }
    }
}
