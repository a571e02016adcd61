//! Shortvault - leveraged short position lifecycle engine.
//!
//! Participants open short exposure to a tracked asset by depositing
//! base-currency collateral into a shared pool, and later close out or get
//! liquidated based on a live price reading. All arithmetic is 256-bit
//! integer fixed point (18 decimals): no floats, no silent overflow, and
//! division truncation is preserved exactly.
//!
//! # Architecture
//!
//! - [`domain`] - core types: identifiers, [`Position`](domain::Position),
//!   the append-only per-account [`PositionLedger`](domain::PositionLedger),
//!   the [`settle`](domain::settle) formula, and the pooled
//!   [`CollateralVault`](domain::CollateralVault).
//! - [`oracle`] - the [`PriceFeed`](oracle::PriceFeed) capability, the
//!   asset-to-feed [`FeedRegistry`](oracle::FeedRegistry), and 18-decimal
//!   normalization.
//! - [`engine`] - the [`ShortEngine`](engine::ShortEngine) orchestrating
//!   open/close/liquidate, its reentrancy guard, the
//!   [`CollateralTransfer`](engine::CollateralTransfer) port, and the
//!   observable event log.
//! - [`adapter`] - production oracle adapters (requires the `http-feed`
//!   feature).
//! - [`config`] / [`logging`] - TOML configuration and `tracing` setup.
//! - [`error`] - error types for the crate.
//! - [`testkit`] - deterministic doubles and fixtures (requires the
//!   `testkit` feature).
//!
//! # Example
//!
//! Normalizing a raw 8-decimal feed answer to the common 18-decimal
//! representation:
//!
//! ```
//! use alloy_primitives::I256;
//! use shortvault::oracle::normalize;
//!
//! let answer: I256 = "5000000000".parse().unwrap(); // 50.00000000 at 8 decimals
//! let normalized = normalize(answer, 8).unwrap();
//! assert_eq!(normalized.to_string(), "50000000000000000000");
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod oracle;

#[cfg(feature = "http-feed")]
pub mod adapter;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
