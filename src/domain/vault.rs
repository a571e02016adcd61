//! Pooled collateral balance.
//!
//! A single explicitly-owned counter; every mutation funnels through the
//! checked `credit`/`debit` pair, so the balance can never go negative and
//! never wraps.

use alloy_primitives::U256;

use crate::error::EngineError;

/// The shared native-currency pool backing all open positions.
#[derive(Debug, Default)]
pub struct CollateralVault {
    balance: U256,
}

impl CollateralVault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balance: U256::ZERO,
        }
    }

    /// Current pooled balance.
    #[must_use]
    pub fn balance(&self) -> U256 {
        self.balance
    }

    /// Add to the pool.
    pub fn credit(&mut self, amount: U256) -> Result<(), EngineError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(EngineError::Overflow { op: "vault credit" })?;
        Ok(())
    }

    /// Remove from the pool. Fails rather than going negative.
    pub fn debit(&mut self, amount: U256) -> Result<(), EngineError> {
        if self.balance < amount {
            return Err(EngineError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}
