//! Native-currency transfer port.

use alloy_primitives::U256;
use thiserror::Error;

use crate::domain::AccountId;

/// Reported by a transfer channel when it cannot move funds.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct TransferError {
    pub reason: String,
}

impl TransferError {
    /// Create a transfer error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Moves native currency out of the pooled collateral to an account.
///
/// The engine treats any failure as fatal for the whole operation: no
/// state is mutated when a transfer is refused.
pub trait CollateralTransfer {
    /// Transfer `amount` to `to`.
    fn transfer(&self, to: &AccountId, amount: U256) -> Result<(), TransferError>;

    /// Get the channel name for logging/debugging.
    fn channel_name(&self) -> &'static str;
}
