//! # Pairswap Exchange Engine
//!
//! ## Purpose
//!
//! Constant product market making over any number of independent token
//! pairs. Providers deposit both tokens of a pair and receive shares; traders
//! swap one token of a pair for the other at the reserve ratio net of a 0.3%
//! fee; providers later burn shares for a proportional cut of the reserves.
//! The pool's own reserve ratio is the only price.
//!
//! ## Components
//!
//! - [`PoolRegistry`]: ordered `(token_a, token_b)` key -> [`Pair`] record,
//!   creating the per-pair [`ShareToken`](token::ShareToken) lazily
//! - [`Exchange`]: add/remove liquidity, exact-input swaps, price queries
//! - [`Ledger`]: serialized, all-or-nothing execution of exchange calls
//!
//! ## Integration Points
//!
//! - **Token movement**: any [`TokenBank`](token::TokenBank) implementation
//! - **Math**: [`amm::V2Math`] for every amount computed
//! - **Notifications**: [`ExchangeEvent`] journal on the exchange, token
//!   notifications on the bank
//!
//! ```rust
//! use exchange::{AddLiquidity, Exchange, Ledger};
//! use token::{address_from_label, InMemoryTokenBank, StandardToken, TokenMetadata, U256};
//!
//! let alice = address_from_label("alice");
//! let (usdc, weth) = (address_from_label("USDC"), address_from_label("WETH"));
//! let meta = |s: &str| TokenMetadata { name: s.into(), symbol: s.into(), decimals: 18 };
//!
//! let mut bank = InMemoryTokenBank::new();
//! for (addr, sym) in [(usdc, "USDC"), (weth, "WETH")] {
//!     let token = StandardToken::new(addr, meta(sym))
//!         .with_balance(alice, U256::from(10_000u64))
//!         .unwrap();
//!     bank.register(token).unwrap();
//! }
//!
//! let exchange = Exchange::new(address_from_label("exchange"));
//! let custodian = exchange.address();
//! let mut ledger = Ledger::new(exchange, bank, 1_000);
//! ledger.approve(alice, usdc, custodian, U256::MAX).unwrap();
//! ledger.approve(alice, weth, custodian, U256::MAX).unwrap();
//!
//! let receipt = ledger
//!     .add_liquidity(
//!         alice,
//!         &AddLiquidity {
//!             token_a: usdc,
//!             token_b: weth,
//!             amount_a_desired: U256::from(100u64),
//!             amount_b_desired: U256::from(400u64),
//!             amount_a_min: U256::zero(),
//!             amount_b_min: U256::zero(),
//!             to: alice,
//!             deadline: 1_000,
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(receipt.liquidity, U256::from(200u64));
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod exchange;
pub mod ledger;
pub mod pair;
pub mod params;
pub mod registry;

pub use context::CallContext;
pub use error::{ExchangeError, ExchangeResult};
pub use events::ExchangeEvent;
pub use exchange::Exchange;
pub use ledger::Ledger;
pub use pair::{Pair, PairKey};
pub use params::{AddLiquidity, LiquidityReceipt, RedemptionReceipt, RemoveLiquidity, SwapExactIn};
pub use registry::PoolRegistry;
