//! Configuration loading from TOML files.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::logging::LoggingConfig;

/// Exclusive minimum deposit: 0.01 of an 18-decimal base unit.
const DEFAULT_MIN_DEPOSIT: u128 = 10_000_000_000_000_000;

const DEFAULT_FEED_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub engine: EngineConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Lifecycle engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Account allowed to register assets and withdraw pooled collateral.
    pub owner: String,
    /// Feed identifier for the base (settlement) asset.
    pub base_feed: String,
    /// Deposits must strictly exceed this, in base-unit wei.
    #[serde(default = "default_min_deposit")]
    pub min_deposit: u128,
}

/// Price-feed adapter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the aggregator API. Must end with a slash.
    pub api_url: String,
    #[serde(default = "default_feed_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_min_deposit() -> u128 {
    DEFAULT_MIN_DEPOSIT
}

fn default_feed_timeout_ms() -> u64 {
    DEFAULT_FEED_TIMEOUT_MS
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.engine.owner.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "engine.owner",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.engine.base_feed.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "engine.base_feed",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.engine.min_deposit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.min_deposit",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.feed.api_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "feed.api_url",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                owner: "owner".into(),
                base_feed: "base-usd".into(),
                min_deposit: DEFAULT_MIN_DEPOSIT,
            },
            feed: FeedConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_url: "https://feeds.example.com/v1/".into(),
            timeout_ms: DEFAULT_FEED_TIMEOUT_MS,
        }
    }
}
