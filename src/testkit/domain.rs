//! Builders for identifiers, fixed-point amounts, and a canonical engine
//! fixture so tests focus on assertions rather than construction
//! boilerplate.

use alloy_primitives::{I256, U256};

use crate::domain::{AccountId, AssetId, FeedId};
use crate::engine::ShortEngine;

use super::oracle::StaticPriceFeed;
use super::transfer::RecordingTransfer;

/// Create an [`AccountId`] from a string.
pub fn account(id: &str) -> AccountId {
    AccountId::new(id)
}

/// Create an [`AssetId`] from a string.
pub fn asset(id: &str) -> AssetId {
    AssetId::new(id)
}

/// Create a [`FeedId`] from a string.
pub fn feed_id(id: &str) -> FeedId {
    FeedId::new(id)
}

/// `v` whole 18-decimal base units.
#[must_use]
pub fn e18(v: u128) -> U256 {
    U256::from(v) * U256::from(10u64).pow(U256::from(18u64))
}

/// Signed fixed-point literal.
#[must_use]
pub fn i256(v: i128) -> I256 {
    v.to_string().parse().unwrap()
}

/// A pre-wired engine: owner `owner`, base feed `base-usd` at 3000 (8
/// decimals), asset `wbtc` registered against `btc-usd` at 100000 (8
/// decimals), default minimum deposit, and a 10-unit pre-funded pool.
///
/// Returns handles to the shared feed and transfer doubles alongside the
/// engine.
pub fn funded_engine() -> (
    ShortEngine<StaticPriceFeed, RecordingTransfer>,
    StaticPriceFeed,
    RecordingTransfer,
) {
    let owner = account("owner");
    let feeds = StaticPriceFeed::new();
    let transfers = RecordingTransfer::new();

    feeds.set_answer(&feed_id("base-usd"), 300_000_000_000, 8); // 3000
    feeds.set_answer(&feed_id("btc-usd"), 10_000_000_000_000, 8); // 100000

    let mut engine = ShortEngine::new(
        owner.clone(),
        feed_id("base-usd"),
        U256::from(10_000_000_000_000_000u128), // 0.01
        feeds.clone(),
        transfers.clone(),
    );
    engine
        .register_asset(&owner, asset("wbtc"), feed_id("btc-usd"))
        .unwrap();
    engine.fund(e18(10)).unwrap();

    (engine, feeds, transfers)
}
