//! Reentrancy protection for state-mutating operations.
//!
//! Execution is single-threaded and transactional; the only hazard is a
//! collaborator re-entering the engine mid-transfer. Entry hands out an
//! RAII permit, so release happens on every exit path, early error returns
//! included. No manual flag management.

use parking_lot::{Mutex, MutexGuard};

use crate::error::EngineError;

/// Scoped mutual-exclusion region around each public mutating operation.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    lock: Mutex<()>,
}

/// Proof of exclusive entry. Dropping it releases the guard.
#[derive(Debug)]
pub struct CallPermit<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl ReentrancyGuard {
    /// Create a released guard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }

    /// Enter the guarded region, failing fast if already inside it.
    pub fn enter(&self) -> Result<CallPermit<'_>, EngineError> {
        self.lock
            .try_lock()
            .map(|guard| CallPermit { _guard: guard })
            .ok_or(EngineError::ReentrantCall)
    }
}
