//! Pool operations
//!
//! Liquidity provision, redemption and single-hop exact-input swaps against
//! the registry's pairs, moving external tokens through a [`TokenBank`].
//!
//! # Atomicity
//!
//! Every operation runs all of its checks before its first effect, including
//! slippage bounds and the caller's allowance and balance as the bank reports
//! them. A rejected call therefore leaves no trace. A bank that refuses a
//! transfer it reported as possible can still interrupt a call midway; run
//! operations through [`Ledger`](crate::Ledger) to have such a call rolled
//! back as well.
//!
//! # Inherited behaviour
//!
//! - Keys are ordered; `(A, B)` and `(B, A)` are separate pools.
//! - Shares minted on every deposit are `sqrt(amount_a * amount_b)`, also on
//!   top-ups, regardless of the supply already outstanding.
//! - Swaps always price `path[0] -> path[1]` against the key's slot order.

use amm::{ConstantProductPool, MathError, V2Math};
use ethereum_types::{Address, U256};
use token::{
    share_token_address, FungibleToken, ShareToken, TokenBank, TokenError, NULL_ADDRESS,
};
use tracing::info;

use crate::context::CallContext;
use crate::error::{ExchangeError, ExchangeResult};
use crate::events::ExchangeEvent;
use crate::pair::{Pair, PairKey};
use crate::params::{
    AddLiquidity, LiquidityReceipt, RedemptionReceipt, RemoveLiquidity, SwapExactIn,
};
use crate::registry::PoolRegistry;

/// The exchange engine
///
/// `address` is both the custodian of pooled tokens and the sole authority
/// allowed to mint and burn the share tokens this instance creates.
#[derive(Debug, Clone)]
pub struct Exchange {
    address: Address,
    registry: PoolRegistry,
    events: Vec<ExchangeEvent>,
}

impl Exchange {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            registry: PoolRegistry::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Deposit a balanced amount of both tokens and mint shares to `to`
    ///
    /// The first deposit into an empty key sets its price with the desired
    /// amounts as given. Later deposits are cut down to the current reserve
    /// ratio on whichever side is in excess, bounded by the minimums.
    pub fn add_liquidity<B: TokenBank + ?Sized>(
        &mut self,
        ctx: &CallContext,
        bank: &mut B,
        params: &AddLiquidity,
    ) -> ExchangeResult<LiquidityReceipt> {
        ctx.ensure_not_expired(params.deadline)?;
        ensure_valid_pair(params.token_a, params.token_b)?;

        let key = PairKey::new(params.token_a, params.token_b);
        let authority = self.address;
        let share_address = share_token_address(authority, key.token_a, key.token_b);
        ensure_recipient(share_address, params.to)?;

        let (reserve_a, reserve_b, total_supply) = self
            .registry
            .get(&key)
            .map(|pair| (pair.reserve_a(), pair.reserve_b(), pair.total_supply()))
            .unwrap_or_default();
        let (amount_a, amount_b) = balanced_amounts(params, reserve_a, reserve_b)?;

        let product = amount_a
            .checked_mul(amount_b)
            .ok_or(MathError::Overflow("liquidity"))?;
        let liquidity = V2Math::integer_sqrt(product);
        reserve_a
            .checked_add(amount_a)
            .ok_or(MathError::Overflow("reserve A"))?;
        reserve_b
            .checked_add(amount_b)
            .ok_or(MathError::Overflow("reserve B"))?;
        total_supply
            .checked_add(liquidity)
            .ok_or(MathError::Overflow("share supply"))?;

        ensure_pullable(bank, key.token_a, ctx.caller, authority, amount_a)?;
        ensure_pullable(bank, key.token_b, ctx.caller, authority, amount_b)?;

        // checks done; effects from here on
        pull(bank, key.token_a, ctx.caller, authority, amount_a)?;
        pull(bank, key.token_b, ctx.caller, authority, amount_b)?;

        let mut emitted = Vec::with_capacity(3);
        let (pair, created) = self.registry.lookup_or_create(key, authority);
        if created {
            emitted.push(ExchangeEvent::PairCreated {
                token_a: key.token_a,
                token_b: key.token_b,
                share_token: share_address,
            });
        }

        let minted = bound_share(pair, &key)?
            .mint(authority, params.to, liquidity)
            .map_err(|e| ExchangeError::from_token(share_address, e))?;
        pair.deposit(amount_a, amount_b)?;

        emitted.push(ExchangeEvent::ShareTransfer {
            notification: minted,
        });
        emitted.push(ExchangeEvent::LiquidityAdded {
            provider: ctx.caller,
            to: params.to,
            token_a: key.token_a,
            token_b: key.token_b,
            amount_a,
            amount_b,
            liquidity,
        });
        self.events.extend(emitted);

        info!(
            "Added liquidity to ({:?}, {:?}): {} / {} for {} shares",
            key.token_a, key.token_b, amount_a, amount_b, liquidity
        );

        Ok(LiquidityReceipt {
            amount_a,
            amount_b,
            liquidity,
        })
    }

    /// Burn the caller's shares and pay out the proportional reserves to `to`
    pub fn remove_liquidity<B: TokenBank + ?Sized>(
        &mut self,
        ctx: &CallContext,
        bank: &mut B,
        params: &RemoveLiquidity,
    ) -> ExchangeResult<RedemptionReceipt> {
        ctx.ensure_not_expired(params.deadline)?;

        let key = PairKey::new(params.token_a, params.token_b);
        let authority = self.address;
        let pair = self
            .registry
            .get_bound_mut(&key)
            .ok_or_else(|| pair_not_found(&key))?;

        // supply before the burn, so redeeming everything drains the pool
        let total_supply = pair.total_supply();
        let (reserve_a, reserve_b) = pair.reserves();

        let amount_a = V2Math::share_of(reserve_a, params.liquidity, total_supply)?;
        let amount_b = V2Math::share_of(reserve_b, params.liquidity, total_supply)?;
        if amount_a < params.amount_a_min {
            return Err(ExchangeError::SlippageExceeded {
                asset: "token A",
                amount: amount_a,
                limit: params.amount_a_min,
            });
        }
        if amount_b < params.amount_b_min {
            return Err(ExchangeError::SlippageExceeded {
                asset: "token B",
                amount: amount_b,
                limit: params.amount_b_min,
            });
        }
        ensure_recipient(key.token_a, params.to)?;

        // the burn is the first effect and fails on its own when the caller
        // holds fewer than `liquidity` shares
        let share = bound_share(pair, &key)?;
        let share_address = share.address();
        let burned = share
            .burn(authority, ctx.caller, params.liquidity)
            .map_err(|e| ExchangeError::from_token(share_address, e))?;

        pair.withdraw(amount_a, amount_b)?;
        push(bank, key.token_a, authority, params.to, amount_a)?;
        push(bank, key.token_b, authority, params.to, amount_b)?;

        self.events.push(ExchangeEvent::ShareTransfer {
            notification: burned,
        });
        self.events.push(ExchangeEvent::LiquidityRemoved {
            provider: ctx.caller,
            to: params.to,
            token_a: key.token_a,
            token_b: key.token_b,
            amount_a,
            amount_b,
            liquidity: params.liquidity,
        });

        info!(
            "Removed liquidity from ({:?}, {:?}): {} shares for {} / {}",
            key.token_a, key.token_b, params.liquidity, amount_a, amount_b
        );

        Ok(RedemptionReceipt { amount_a, amount_b })
    }

    /// Sell exactly `amount_in` of `path[0]` for at least `amount_out_min` of `path[1]`
    ///
    /// Returns `[amount_in, amount_out]`.
    pub fn swap_exact_tokens_for_tokens<B: TokenBank + ?Sized>(
        &mut self,
        ctx: &CallContext,
        bank: &mut B,
        params: &SwapExactIn,
    ) -> ExchangeResult<Vec<U256>> {
        if params.path.len() != 2 {
            return Err(ExchangeError::UnsupportedPath {
                len: params.path.len(),
            });
        }
        ctx.ensure_not_expired(params.deadline)?;

        let key = PairKey::new(params.path[0], params.path[1]);
        let authority = self.address;
        let pair = self
            .registry
            .get_bound_mut(&key)
            .ok_or_else(|| pair_not_found(&key))?;

        let amount_out = pair.amount_out(params.amount_in)?;
        if amount_out < params.amount_out_min {
            return Err(ExchangeError::SlippageExceeded {
                asset: "output",
                amount: amount_out,
                limit: params.amount_out_min,
            });
        }
        pair.reserve_a()
            .checked_add(params.amount_in)
            .ok_or(MathError::Overflow("reserve A"))?;
        ensure_recipient(key.token_b, params.to)?;
        ensure_pullable(bank, key.token_a, ctx.caller, authority, params.amount_in)?;

        pull(bank, key.token_a, ctx.caller, authority, params.amount_in)?;
        pair.apply_swap(params.amount_in, amount_out)?;
        push(bank, key.token_b, authority, params.to, amount_out)?;

        self.events.push(ExchangeEvent::Swap {
            sender: ctx.caller,
            to: params.to,
            token_in: key.token_a,
            token_out: key.token_b,
            amount_in: params.amount_in,
            amount_out,
        });

        info!(
            "Swapped {} {:?} for {} {:?}",
            params.amount_in, key.token_a, amount_out, key.token_b
        );

        Ok(vec![params.amount_in, amount_out])
    }

    /// Price of `token_a` in `token_b` for the `(token_a, token_b)` key, scaled by 1e18
    pub fn get_price(&self, token_a: Address, token_b: Address) -> ExchangeResult<U256> {
        let (reserve_a, reserve_b) = self.get_reserves(token_a, token_b);
        Ok(V2Math::spot_price(reserve_a, reserve_b)?)
    }

    /// Fee-adjusted output for an exact input against arbitrary reserves
    pub fn get_amount_out(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> ExchangeResult<U256> {
        Ok(V2Math::get_amount_out(amount_in, reserve_in, reserve_out)?)
    }

    /// Reserves of the `(token_a, token_b)` key; zero for a key never deposited into
    pub fn get_reserves(&self, token_a: Address, token_b: Address) -> (U256, U256) {
        self.registry
            .get(&PairKey::new(token_a, token_b))
            .map(|pair| pair.reserves())
            .unwrap_or_default()
    }

    pub fn pair(&self, token_a: Address, token_b: Address) -> Option<&Pair> {
        self.registry.get(&PairKey::new(token_a, token_b))
    }

    pub fn share_token(&self, token_a: Address, token_b: Address) -> Option<&ShareToken> {
        self.pair(token_a, token_b).and_then(|pair| pair.share_token())
    }

    /// Shares of the `(token_a, token_b)` key held by `holder`
    pub fn share_balance(&self, token_a: Address, token_b: Address, holder: &Address) -> U256 {
        self.share_token(token_a, token_b)
            .map(|share| share.balance_of(holder))
            .unwrap_or_default()
    }

    pub fn pair_count(&self) -> usize {
        self.registry.len()
    }

    /// Notifications emitted so far, oldest first
    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    /// Drain the notification journal
    pub fn take_events(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }
}

fn ensure_valid_pair(token_a: Address, token_b: Address) -> ExchangeResult<()> {
    if token_a == token_b {
        return Err(ExchangeError::InvalidPair("identical tokens"));
    }
    if token_a == NULL_ADDRESS || token_b == NULL_ADDRESS {
        return Err(ExchangeError::InvalidPair("void token"));
    }
    Ok(())
}

/// Deposit amounts honouring the current reserve ratio
fn balanced_amounts(
    params: &AddLiquidity,
    reserve_a: U256,
    reserve_b: U256,
) -> ExchangeResult<(U256, U256)> {
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((params.amount_a_desired, params.amount_b_desired));
    }

    let amount_b_optimal = V2Math::quote(params.amount_a_desired, reserve_a, reserve_b)?;
    if amount_b_optimal <= params.amount_b_desired {
        if amount_b_optimal < params.amount_b_min {
            return Err(ExchangeError::SlippageExceeded {
                asset: "token B",
                amount: amount_b_optimal,
                limit: params.amount_b_min,
            });
        }
        return Ok((params.amount_a_desired, amount_b_optimal));
    }

    let amount_a_optimal = V2Math::quote(params.amount_b_desired, reserve_b, reserve_a)?;
    if amount_a_optimal > params.amount_a_desired {
        return Err(ExchangeError::SlippageExceeded {
            asset: "token A",
            amount: amount_a_optimal,
            limit: params.amount_a_desired,
        });
    }
    if amount_a_optimal < params.amount_a_min {
        return Err(ExchangeError::SlippageExceeded {
            asset: "token A",
            amount: amount_a_optimal,
            limit: params.amount_a_min,
        });
    }
    Ok((amount_a_optimal, params.amount_b_desired))
}

fn bound_share<'a>(pair: &'a mut Pair, key: &PairKey) -> ExchangeResult<&'a mut ShareToken> {
    pair.share_token_mut().ok_or_else(|| pair_not_found(key))
}

fn pair_not_found(key: &PairKey) -> ExchangeError {
    ExchangeError::PairNotFound {
        token_a: key.token_a,
        token_b: key.token_b,
    }
}

fn ensure_recipient(token: Address, to: Address) -> ExchangeResult<()> {
    if to == NULL_ADDRESS {
        return Err(ExchangeError::from_token(
            token,
            TokenError::InvalidAccount("transfer to the void address"),
        ));
    }
    Ok(())
}

/// Fail the way [`pull`] would, without moving anything
///
/// Allowance is checked before balance, matching `transfer_from`.
fn ensure_pullable<B: TokenBank + ?Sized>(
    bank: &B,
    token: Address,
    owner: Address,
    custodian: Address,
    amount: U256,
) -> ExchangeResult<()> {
    let fail = |e: TokenError| ExchangeError::from_token(token, e);

    let allowed = bank.allowance(&token, &owner, &custodian).map_err(fail)?;
    if allowed < amount {
        return Err(fail(TokenError::AllowanceExceeded {
            allowed,
            need: amount,
        }));
    }
    let have = bank.balance_of(&token, &owner).map_err(fail)?;
    if have < amount {
        return Err(fail(TokenError::InsufficientBalance { have, need: amount }));
    }
    Ok(())
}

/// Move `amount` of `token` from `owner` into the custodian's balance
fn pull<B: TokenBank + ?Sized>(
    bank: &mut B,
    token: Address,
    owner: Address,
    custodian: Address,
    amount: U256,
) -> ExchangeResult<()> {
    bank.transfer_from(&token, custodian, owner, custodian, amount)
        .map_err(|e| ExchangeError::from_token(token, e))
}

/// Move `amount` of `token` out of the custodian's balance to `to`
fn push<B: TokenBank + ?Sized>(
    bank: &mut B,
    token: Address,
    custodian: Address,
    to: Address,
    amount: U256,
) -> ExchangeResult<()> {
    bank.transfer(&token, custodian, to, amount)
        .map_err(|e| ExchangeError::from_token(token, e))
}
