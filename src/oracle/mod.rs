//! Price capability: the feed trait, the asset-to-feed registry, and
//! normalization to 18-decimal fixed point.
//!
//! The lifecycle engine never touches a concrete feed; it goes through
//! [`PriceFeed`], for which there is one production adapter
//! ([`crate::adapter::HttpPriceFeed`], behind the `http-feed` feature) and
//! one deterministic test double ([`crate::testkit::StaticPriceFeed`]).

pub mod normalizer;

use std::collections::HashMap;

use alloy_primitives::I256;

use crate::domain::{AssetId, FeedId};
use crate::error::{EngineError, OracleError};

pub use normalizer::{normalize, read_normalized, PRICE_DECIMALS};

/// The most recent reading of one feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRound {
    /// Raw price in the feed's native decimals. Signed: real aggregators
    /// report signed answers, and non-positive values are rejected during
    /// normalization.
    pub answer: I256,
    /// Unix timestamp of the reading. Trusted as-is; no staleness check.
    pub updated_at: i64,
    /// Feed-assigned round counter.
    pub round_id: u64,
}

/// Source of raw prices for registered feeds.
pub trait PriceFeed {
    /// Read the latest round for a feed.
    fn latest_round(&self, feed: &FeedId) -> Result<PriceRound, OracleError>;

    /// Number of decimals the feed's answers carry.
    fn decimals(&self, feed: &FeedId) -> Result<u8, OracleError>;

    /// Get the source name for logging/debugging.
    fn source_name(&self) -> &'static str;
}

/// Mapping from tracked assets to their price feeds.
///
/// Registrations are immutable: once an asset has a feed it cannot be
/// overwritten.
#[derive(Debug, Default)]
pub struct FeedRegistry {
    feeds: HashMap<AssetId, FeedId>,
}

impl FeedRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            feeds: HashMap::new(),
        }
    }

    /// Register a feed for an asset. Fails if the asset already has one.
    pub fn register(&mut self, asset: AssetId, feed: FeedId) -> Result<(), EngineError> {
        if self.feeds.contains_key(&asset) {
            return Err(EngineError::AlreadyRegistered {
                asset: asset.to_string(),
            });
        }
        self.feeds.insert(asset, feed);
        Ok(())
    }

    /// Look up the feed for an asset.
    #[must_use]
    pub fn resolve(&self, asset: &AssetId) -> Option<&FeedId> {
        self.feeds.get(asset)
    }

    /// Look up the feed for an asset, surfacing absence as `UnsupportedToken`.
    pub fn require(&self, asset: &AssetId) -> Result<&FeedId, OracleError> {
        self.resolve(asset).ok_or_else(|| OracleError::UnsupportedToken {
            asset: asset.to_string(),
        })
    }
}
