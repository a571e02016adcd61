use alloy_primitives::{I256, U256};
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Price-feed and normalization errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The feed reported a non-positive raw price.
    #[error("feed answer must be positive, got {answer}")]
    InvalidPrice { answer: I256 },

    /// No feed is registered for the asset.
    #[error("no price feed registered for asset '{asset}'")]
    UnsupportedToken { asset: String },

    /// The feed could not be read (transport or decode failure).
    #[error("feed '{feed}' unavailable: {reason}")]
    FeedUnavailable { feed: String, reason: String },

    /// Rescaling the answer to 18 decimals overflowed.
    #[error("overflow normalizing feed answer {answer} with {decimals} decimals")]
    NormalizeOverflow { answer: I256, decimals: u8 },
}

/// Position ledger errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The nonce does not address an existing position for the account.
    #[error("no position at nonce {nonce} for account '{account}' (history length {len})")]
    InvalidNonce {
        account: String,
        nonce: u64,
        len: u64,
    },

    /// The position has already reached a terminal status.
    #[error("position at nonce {nonce} is not open")]
    NotOpen { nonce: u64 },
}

/// Lifecycle business-rule, resource, and access-control errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Deposit must strictly exceed the minimum threshold.
    #[error("deposit {deposit} does not exceed the minimum {minimum}")]
    TooSmall { deposit: U256, minimum: U256 },

    /// The computed position size truncated to zero.
    #[error("computed position size is zero")]
    InvalidSize,

    /// Liquidation attempted on a position whose settlement is still positive.
    #[error("position is not eligible for liquidation, withdrawal {withdrawal} is positive")]
    NotEligible { withdrawal: I256 },

    /// The pooled collateral cannot cover the payout.
    #[error("pooled collateral {available} cannot cover {required}")]
    InsufficientBalance { required: U256, available: U256 },

    /// The external native-currency transfer was refused.
    #[error("collateral transfer to '{to}' failed: {reason}")]
    TransferFailed { to: String, reason: String },

    /// A guarded operation was entered while another is in flight.
    #[error("reentrant call rejected")]
    ReentrantCall,

    /// Admin-only operation called by a non-owner account.
    #[error("caller '{caller}' is not the owner")]
    NotOwner { caller: String },

    /// The asset already has a registered feed; registrations are immutable.
    #[error("asset '{asset}' already has a registered feed")]
    AlreadyRegistered { asset: String },

    /// Empty identifiers are rejected at the admin boundary.
    #[error("{field} must not be empty")]
    EmptyId { field: &'static str },

    /// Checked arithmetic failed; never silently wrapped.
    #[error("arithmetic overflow computing {op}")]
    Overflow { op: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "http-feed")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "http-feed")]
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
