//! Exchange-agnostic core types: identifiers, positions, the per-account
//! ledger, the settlement formula, and the pooled collateral vault.

pub mod id;
pub mod ledger;
pub mod position;
pub mod settlement;
pub mod vault;

pub use id::{AccountId, AssetId, FeedId};
pub use ledger::PositionLedger;
pub use position::{Position, PositionStatus, TerminalStatus, SENTINEL_CLOSE_PRICE};
pub use settlement::{settle, Settlement};
pub use vault::CollateralVault;
