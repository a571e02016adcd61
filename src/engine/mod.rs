//! Lifecycle orchestration: the engine, its reentrancy guard, the transfer
//! port, and the observable event log.

pub mod events;
pub mod guard;
pub mod lifecycle;
pub mod transfer;

pub use events::EngineEvent;
pub use guard::{CallPermit, ReentrancyGuard};
pub use lifecycle::ShortEngine;
pub use transfer::{CollateralTransfer, TransferError};
