//! # Pairswap Simulator
//!
//! Replays a scenario of liquidity and swap steps against an in-memory
//! ledger seeded from configuration, and reports the final pool state.

pub mod report;
pub mod runner;
pub mod scenario;

pub use report::{display_price, PairReport, Report};
pub use runner::{Simulation, StepError, StepOutcome, StepRecord, TokenInfo};
pub use scenario::{Scenario, Step};
