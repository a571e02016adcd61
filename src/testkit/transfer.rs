//! Recording collateral-transfer double.

use std::sync::Arc;

use alloy_primitives::U256;
use parking_lot::Mutex;

use crate::domain::AccountId;
use crate::engine::{CollateralTransfer, TransferError};

#[derive(Debug, Default)]
struct State {
    sent: Vec<(AccountId, U256)>,
    reject: bool,
}

/// Records every transfer; can be told to reject them all.
///
/// Clones share state, so a test can keep a handle and move another clone
/// into the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransfer {
    inner: Arc<Mutex<State>>,
}

impl RecordingTransfer {
    /// Create an accepting transfer double.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent transfers fail (or succeed again).
    pub fn set_reject(&self, reject: bool) {
        self.inner.lock().reject = reject;
    }

    /// Every successful transfer so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<(AccountId, U256)> {
        self.inner.lock().sent.clone()
    }
}

impl CollateralTransfer for RecordingTransfer {
    fn transfer(&self, to: &AccountId, amount: U256) -> Result<(), TransferError> {
        let mut state = self.inner.lock();
        if state.reject {
            return Err(TransferError::new("transfer rejected by test double"));
        }
        state.sent.push((to.clone(), amount));
        Ok(())
    }

    fn channel_name(&self) -> &'static str {
        "recording"
    }
}
