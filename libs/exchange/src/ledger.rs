//! Serialized execution runtime
//!
//! The ledger owns the exchange, the token bank and the clock. Mutating calls
//! run one at a time inside [`Ledger::transact`], which executes against a
//! snapshot and commits it only when the call succeeds. A failed call leaves
//! balances, reserves, share supplies and notification journals exactly as
//! they were.
//!
//! Token collaborators only ever receive the bank, never the exchange, so a
//! collaborator cannot re-enter a pool operation while one is in flight.

use ethereum_types::{Address, U256};
use token::TokenBank;
use tracing::{debug, warn};

use crate::context::CallContext;
use crate::error::{ExchangeError, ExchangeResult};
use crate::exchange::Exchange;
use crate::params::{
    AddLiquidity, LiquidityReceipt, RedemptionReceipt, RemoveLiquidity, SwapExactIn,
};

#[derive(Debug, Clone)]
pub struct Ledger<B> {
    exchange: Exchange,
    bank: B,
    timestamp: u64,
    height: u64,
}

impl<B: TokenBank + Clone> Ledger<B> {
    pub fn new(exchange: Exchange, bank: B, timestamp: u64) -> Self {
        Self {
            exchange,
            bank,
            timestamp,
            height: 0,
        }
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Direct bank access for setup outside any transaction
    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// Current execution timestamp
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.timestamp = self.timestamp.saturating_add(seconds);
    }

    /// Number of committed transactions
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Run `op` as one indivisible step on behalf of `caller`
    ///
    /// `op` runs against clones of the exchange and the bank, which replace
    /// the originals only when it returns `Ok`. Both clones include the event
    /// journals, so every call costs time and memory linear in the whole
    /// state. Drain the journals with [`Exchange::take_events`] and
    /// `InMemoryTokenBank::take_events` to keep long runs cheap.
    pub fn transact<T, F>(&mut self, caller: Address, op: F) -> ExchangeResult<T>
    where
        F: FnOnce(&mut Exchange, &mut B, &CallContext) -> ExchangeResult<T>,
    {
        let ctx = CallContext::new(caller, self.timestamp);
        let mut exchange = self.exchange.clone();
        let mut bank = self.bank.clone();

        match op(&mut exchange, &mut bank, &ctx) {
            Ok(value) => {
                self.exchange = exchange;
                self.bank = bank;
                self.height += 1;
                debug!("Committed transaction {} from {:?}", self.height, caller);
                Ok(value)
            }
            Err(err) => {
                warn!("Rolled back transaction from {:?}: {}", caller, err);
                Err(err)
            }
        }
    }

    pub fn add_liquidity(
        &mut self,
        caller: Address,
        params: &AddLiquidity,
    ) -> ExchangeResult<LiquidityReceipt> {
        self.transact(caller, |exchange, bank, ctx| {
            exchange.add_liquidity(ctx, bank, params)
        })
    }

    pub fn remove_liquidity(
        &mut self,
        caller: Address,
        params: &RemoveLiquidity,
    ) -> ExchangeResult<RedemptionReceipt> {
        self.transact(caller, |exchange, bank, ctx| {
            exchange.remove_liquidity(ctx, bank, params)
        })
    }

    pub fn swap_exact_tokens_for_tokens(
        &mut self,
        caller: Address,
        params: &SwapExactIn,
    ) -> ExchangeResult<Vec<U256>> {
        self.transact(caller, |exchange, bank, ctx| {
            exchange.swap_exact_tokens_for_tokens(ctx, bank, params)
        })
    }

    /// Authorize `spender` to move `caller`'s `token`
    pub fn approve(
        &mut self,
        caller: Address,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> ExchangeResult<()> {
        self.transact(caller, |_, bank, ctx| {
            bank.approve(&token, ctx.caller, spender, amount)
                .map_err(|e| ExchangeError::from_token(token, e))
        })
    }

    pub fn get_price(&self, token_a: Address, token_b: Address) -> ExchangeResult<U256> {
        self.exchange.get_price(token_a, token_b)
    }

    pub fn get_reserves(&self, token_a: Address, token_b: Address) -> (U256, U256) {
        self.exchange.get_reserves(token_a, token_b)
    }
}
