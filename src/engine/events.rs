//! Observable lifecycle notifications.
//!
//! The engine records these in call order; field sets are exact and
//! order-significant for log-based harnesses.

use alloy_primitives::{I256, U256};

use crate::domain::{AccountId, AssetId};

/// One lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A position was opened.
    PositionOpened {
        account: AccountId,
        nonce: u64,
        asset: AssetId,
        entry_price: U256,
        size: U256,
    },
    /// A position was closed with a payout.
    PositionClosed {
        account: AccountId,
        nonce: u64,
        close_price: U256,
        withdrawal: I256,
    },
    /// A position was liquidated; no payout was made.
    PositionLiquidated { account: AccountId, nonce: u64 },
}

impl EngineEvent {
    /// The account the event belongs to.
    #[must_use]
    pub fn account(&self) -> &AccountId {
        match self {
            EngineEvent::PositionOpened { account, .. }
            | EngineEvent::PositionClosed { account, .. }
            | EngineEvent::PositionLiquidated { account, .. } => account,
        }
    }

    /// The nonce of the position the event refers to.
    #[must_use]
    pub fn nonce(&self) -> u64 {
        match self {
            EngineEvent::PositionOpened { nonce, .. }
            | EngineEvent::PositionClosed { nonce, .. }
            | EngineEvent::PositionLiquidated { nonce, .. } => *nonce,
        }
    }
}
