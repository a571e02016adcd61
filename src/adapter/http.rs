//! Blocking REST adapter for a Chainlink-style aggregator API.
//!
//! Expects `GET {base}/feeds/{id}/latest` returning the latest round and
//! `GET {base}/feeds/{id}/decimals` returning the feed's precision. Answers
//! arrive as decimal strings so 256-bit values survive JSON.

use std::time::Duration;

use alloy_primitives::I256;
use serde::Deserialize;
use url::Url;

use crate::config::FeedConfig;
use crate::domain::FeedId;
use crate::error::{OracleError, Result};
use crate::oracle::{PriceFeed, PriceRound};

/// REST-backed [`PriceFeed`] implementation.
pub struct HttpPriceFeed {
    client: reqwest::blocking::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct LatestRoundBody {
    answer: String,
    updated_at: i64,
    round_id: u64,
}

#[derive(Debug, Deserialize)]
struct DecimalsBody {
    decimals: u8,
}

impl HttpPriceFeed {
    /// Create an adapter against `base_url` (must end with a slash so feed
    /// paths join underneath it).
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Create an adapter from a [`FeedConfig`].
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url)?;
        Self::new(base_url, Duration::from_millis(config.timeout_ms))
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        feed: &FeedId,
        path: &str,
    ) -> std::result::Result<T, OracleError> {
        let unavailable = |reason: String| OracleError::FeedUnavailable {
            feed: feed.to_string(),
            reason,
        };

        let url = self
            .base_url
            .join(path)
            .map_err(|e| unavailable(e.to_string()))?;
        self.client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(|response| response.json::<T>())
            .map_err(|e| unavailable(e.to_string()))
    }
}

impl PriceFeed for HttpPriceFeed {
    fn latest_round(&self, feed: &FeedId) -> std::result::Result<PriceRound, OracleError> {
        let body: LatestRoundBody =
            self.get_json(feed, &format!("feeds/{}/latest", feed.as_str()))?;
        let answer: I256 = body.answer.parse().map_err(|_| OracleError::FeedUnavailable {
            feed: feed.to_string(),
            reason: format!("unparseable answer '{}'", body.answer),
        })?;
        Ok(PriceRound {
            answer,
            updated_at: body.updated_at,
            round_id: body.round_id,
        })
    }

    fn decimals(&self, feed: &FeedId) -> std::result::Result<u8, OracleError> {
        let body: DecimalsBody =
            self.get_json(feed, &format!("feeds/{}/decimals", feed.as_str()))?;
        Ok(body.decimals)
    }

    fn source_name(&self) -> &'static str {
        "http-aggregator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_accepts_default_settings() {
        let feed = HttpPriceFeed::from_config(&FeedConfig::default()).unwrap();
        assert_eq!(feed.source_name(), "http-aggregator");
    }

    #[test]
    fn from_config_rejects_garbage_url() {
        let config = FeedConfig {
            api_url: "not a url".into(),
            timeout_ms: 100,
        };
        assert!(HttpPriceFeed::from_config(&config).is_err());
    }

    #[test]
    fn unreachable_host_surfaces_feed_unavailable() {
        // Reserved TLD, never resolves.
        let feed = HttpPriceFeed::new(
            Url::parse("http://feeds.invalid/v1/").unwrap(),
            Duration::from_millis(50),
        )
        .unwrap();

        let err = feed.latest_round(&FeedId::new("btc-usd")).unwrap_err();
        assert!(matches!(err, OracleError::FeedUnavailable { .. }));
    }
}
