//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`oracle`] — deterministic [`PriceFeed`](crate::oracle::PriceFeed)
//!   double with scriptable answers.
//! - [`transfer`] — recording
//!   [`CollateralTransfer`](crate::engine::CollateralTransfer) double that
//!   can be told to reject.
//! - [`domain`] — builders for identifiers, fixed-point amounts, and a
//!   canonical pre-wired engine fixture.

pub mod domain;
pub mod oracle;
pub mod transfer;
