//! Simulator configuration
//!
//! Loaded from a TOML file with environment-specific overrides. Sources are
//! layered lowest to highest:
//!
//! 1. the base file (required)
//! 2. `environments/<env>.toml` next to the base file (optional)
//! 3. `PAIRSWAP_<SECTION>__<KEY>` environment variables

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use ethereum_types::Address;
use serde::{Deserialize, Serialize};
use token::{address_from_label, parse_address};
use tracing::{debug, info, warn};

use crate::amount::Amount;
use crate::error::ConfigError;

/// Largest decimals value whose unit `10^decimals` fits in 256 bits
pub const MAX_DECIMALS: u8 = 77;

pub const DEFAULT_START_TIMESTAMP: u64 = 1_700_000_000;

/// Main simulator configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub exchange: ExchangeConfig,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Tokens registered at genesis
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `exchange=debug,warn`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Identity of the exchange: an explicit address, else derived from `label`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub label: String,
    pub address: Option<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            label: "pairswap-exchange".to_string(),
            address: None,
        }
    }
}

impl ExchangeConfig {
    pub fn resolve(&self) -> Result<Address, ConfigError> {
        match &self.address {
            Some(address) => parse_field("exchange.address", address),
            None => Ok(address_from_label(&self.label)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Ledger timestamp before the first step, in seconds
    pub start_timestamp: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_timestamp: DEFAULT_START_TIMESTAMP,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report file; stdout when unset. `$VAR` references are expanded.
    pub report: Option<String>,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: None,
            pretty: true,
        }
    }
}

/// A token registered at genesis
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    pub symbol: String,
    pub name: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Hex address; derived from the symbol when unset
    pub address: Option<String>,
    /// Genesis balances keyed by account label or hex address
    #[serde(default)]
    pub balances: BTreeMap<String, Amount>,
}

fn default_decimals() -> u8 {
    18
}

impl TokenConfig {
    pub fn resolve_address(&self) -> Result<Address, ConfigError> {
        match &self.address {
            Some(address) => parse_field(&format!("tokens.{}.address", self.symbol), address),
            None => Ok(address_from_label(&self.symbol)),
        }
    }

    /// Genesis balances with resolved holders
    pub fn resolved_balances(&self) -> Result<Vec<(Address, Amount)>, ConfigError> {
        self.balances
            .iter()
            .map(|(holder, amount)| Ok((resolve_account(holder)?, *amount)))
            .collect()
    }
}

/// Account reference: `0x`-prefixed hex address, otherwise a label
pub fn resolve_account(reference: &str) -> Result<Address, ConfigError> {
    if reference.starts_with("0x") {
        parse_field("account", reference)
    } else {
        Ok(address_from_label(reference))
    }
}

fn parse_field(field: &str, value: &str) -> Result<Address, ConfigError> {
    parse_address(value).map_err(|_| ConfigError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl SimulatorConfig {
    /// Load configuration from files with environment overrides
    pub fn load(base_path: &Path, environment: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder().add_source(File::from(base_path).required(true));

        if let Some(env) = environment {
            let env_file = environment_file(base_path, env);
            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PAIRSWAP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: SimulatorConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.expand_env_vars()?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {:?}", base_path))?;

        debug!(
            "Loaded configuration with {} tokens from {:?}",
            config.tokens.len(),
            base_path
        );
        Ok(config)
    }

    /// Expand environment variables in path values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        if let Some(report) = &self.output.report {
            let expanded = shellexpand::env(report).context("Failed to expand report path")?;
            self.output.report = Some(expanded.to_string());
        }
        Ok(())
    }

    /// Reject duplicate tokens and unparsable identities
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.exchange.resolve()?;

        let mut symbols = HashSet::new();
        let mut addresses = HashSet::new();
        for token in &self.tokens {
            if !symbols.insert(token.symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(token.symbol.clone()));
            }
            if !addresses.insert(token.resolve_address()?) {
                return Err(ConfigError::DuplicateAddress(token.symbol.clone()));
            }
            if token.decimals > MAX_DECIMALS {
                return Err(ConfigError::UnsupportedDecimals {
                    symbol: token.symbol.clone(),
                    decimals: token.decimals,
                    max: MAX_DECIMALS,
                });
            }
            token.resolved_balances()?;
        }
        Ok(())
    }

    pub fn token(&self, symbol: &str) -> Option<&TokenConfig> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn report_path(&self) -> Option<PathBuf> {
        self.output.report.as_ref().map(PathBuf::from)
    }
}

fn environment_file(base_path: &Path, env: &str) -> PathBuf {
    base_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("environments")
        .join(format!("{}.toml", env))
}
