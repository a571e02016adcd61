//! Deterministic price-feed double.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::I256;
use parking_lot::Mutex;

use crate::domain::FeedId;
use crate::error::OracleError;
use crate::oracle::{PriceFeed, PriceRound};

#[derive(Debug, Clone)]
struct FeedEntry {
    answer: I256,
    decimals: u8,
    round_id: u64,
}

/// In-memory [`PriceFeed`] whose answers are scripted by the test.
///
/// Clones share state, so a test can keep a handle and move another clone
/// into the engine, then change prices between operations.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceFeed {
    feeds: Arc<Mutex<HashMap<FeedId, FeedEntry>>>,
}

impl StaticPriceFeed {
    /// Create a feed with no scripted answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the latest answer for a feed, bumping its round id.
    pub fn set_answer(&self, feed: &FeedId, answer: i128, decimals: u8) {
        let mut feeds = self.feeds.lock();
        let round_id = feeds.get(feed).map_or(1, |e| e.round_id + 1);
        feeds.insert(
            feed.clone(),
            FeedEntry {
                answer: answer.to_string().parse().unwrap(),
                decimals,
                round_id,
            },
        );
    }

    /// Drop a feed so subsequent reads fail `FeedUnavailable`.
    pub fn remove(&self, feed: &FeedId) {
        self.feeds.lock().remove(feed);
    }

    fn entry(&self, feed: &FeedId) -> Result<FeedEntry, OracleError> {
        self.feeds
            .lock()
            .get(feed)
            .cloned()
            .ok_or_else(|| OracleError::FeedUnavailable {
                feed: feed.to_string(),
                reason: "no scripted answer".into(),
            })
    }
}

impl PriceFeed for StaticPriceFeed {
    fn latest_round(&self, feed: &FeedId) -> Result<PriceRound, OracleError> {
        let entry = self.entry(feed)?;
        Ok(PriceRound {
            answer: entry.answer,
            updated_at: 0,
            round_id: entry.round_id,
        })
    }

    fn decimals(&self, feed: &FeedId) -> Result<u8, OracleError> {
        Ok(self.entry(feed)?.decimals)
    }

    fn source_name(&self) -> &'static str {
        "static-test-feed"
    }
}
