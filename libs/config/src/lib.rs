//! # Pairswap Configuration
//!
//! Layered configuration for Pairswap services: a base TOML file, an optional
//! per-environment overlay, and `PAIRSWAP_`-prefixed environment variables,
//! plus the shared tracing bootstrap.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use config::{init_logging, SimulatorConfig};
//! use std::path::Path;
//!
//! let settings = SimulatorConfig::load(Path::new("config/simulator.toml"), Some("dev"))?;
//! init_logging(&settings.logging)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod amount;
pub mod error;
pub mod logging;
pub mod settings;

pub use amount::Amount;
pub use error::ConfigError;
pub use logging::init_logging;
pub use settings::{
    resolve_account, ClockConfig, ExchangeConfig, LoggingConfig, OutputConfig, SimulatorConfig,
    TokenConfig,
};
