//! Append-only, per-account position store.
//!
//! The nonce of a position is its zero-based index at append time. Indices
//! are stable for the account's lifetime: positions are never deleted or
//! reordered, so history stays queryable forever.

use std::collections::HashMap;

use alloy_primitives::U256;

use super::{AccountId, Position, TerminalStatus};
use crate::error::LedgerError;

/// Arena-style ledger: one contiguous growable sequence per account.
#[derive(Debug, Default)]
pub struct PositionLedger {
    accounts: HashMap<AccountId, Vec<Position>>,
}

impl PositionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Append a position to the account's sequence and return its nonce.
    pub fn append(&mut self, account: &AccountId, position: Position) -> u64 {
        let sequence = self.accounts.entry(account.clone()).or_default();
        sequence.push(position);
        (sequence.len() - 1) as u64
    }

    /// Number of positions ever opened by the account.
    #[must_use]
    pub fn len(&self, account: &AccountId) -> u64 {
        self.accounts.get(account).map_or(0, |s| s.len() as u64)
    }

    /// Returns true if the account has no position history.
    #[must_use]
    pub fn is_empty(&self, account: &AccountId) -> bool {
        self.len(account) == 0
    }

    /// Full history for an account, oldest first. Empty if none.
    #[must_use]
    pub fn positions(&self, account: &AccountId) -> &[Position] {
        self.accounts.get(account).map_or(&[], |s| s.as_slice())
    }

    /// Look up a position by account and nonce.
    pub fn get(&self, account: &AccountId, nonce: u64) -> Result<&Position, LedgerError> {
        self.accounts
            .get(account)
            .and_then(|s| s.get(nonce as usize))
            .ok_or_else(|| LedgerError::InvalidNonce {
                account: account.to_string(),
                nonce,
                len: self.len(account),
            })
    }

    /// Write the single terminal transition for a position.
    ///
    /// Fails with `NotOpen` if the position already terminated; the caller
    /// must have validated eligibility before calling.
    pub fn set_terminal(
        &mut self,
        account: &AccountId,
        nonce: u64,
        terminal: TerminalStatus,
        close_price: U256,
    ) -> Result<(), LedgerError> {
        let len = self.len(account);
        let position = self
            .accounts
            .get_mut(account)
            .and_then(|s| s.get_mut(nonce as usize))
            .ok_or_else(|| LedgerError::InvalidNonce {
                account: account.to_string(),
                nonce,
                len,
            })?;

        if !position.is_open() {
            return Err(LedgerError::NotOpen { nonce });
        }

        position.set_terminal(terminal, close_price);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetId, PositionStatus, SENTINEL_CLOSE_PRICE};

    fn position() -> Position {
        Position::open(AssetId::new("wbtc"), U256::from(100u64), U256::from(3u64))
    }

    fn account(id: &str) -> AccountId {
        AccountId::new(id)
    }

    #[test]
    fn append_assigns_sequential_nonces_from_zero() {
        let mut ledger = PositionLedger::new();
        let alice = account("alice");

        assert_eq!(ledger.append(&alice, position()), 0);
        assert_eq!(ledger.append(&alice, position()), 1);
        assert_eq!(ledger.append(&alice, position()), 2);
        assert_eq!(ledger.len(&alice), 3);
    }

    #[test]
    fn nonce_sequences_are_independent_per_account() {
        let mut ledger = PositionLedger::new();
        let alice = account("alice");
        let bob = account("bob");

        assert_eq!(ledger.append(&alice, position()), 0);
        assert_eq!(ledger.append(&alice, position()), 1);
        assert_eq!(ledger.append(&bob, position()), 0);
        assert_eq!(ledger.len(&alice), 2);
        assert_eq!(ledger.len(&bob), 1);
    }

    #[test]
    fn get_unknown_nonce_fails_invalid_nonce() {
        let mut ledger = PositionLedger::new();
        let alice = account("alice");
        ledger.append(&alice, position());

        let err = ledger.get(&alice, 1).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidNonce {
                account: "alice".into(),
                nonce: 1,
                len: 1
            }
        );
    }

    #[test]
    fn get_for_account_without_history_fails_invalid_nonce() {
        let ledger = PositionLedger::new();
        let err = ledger.get(&account("nobody"), 0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidNonce { len: 0, .. }));
    }

    #[test]
    fn positions_returns_empty_slice_for_unknown_account() {
        let ledger = PositionLedger::new();
        assert!(ledger.positions(&account("nobody")).is_empty());
        assert!(ledger.is_empty(&account("nobody")));
    }

    #[test]
    fn set_terminal_closes_an_open_position() {
        let mut ledger = PositionLedger::new();
        let alice = account("alice");
        let nonce = ledger.append(&alice, position());

        ledger
            .set_terminal(&alice, nonce, TerminalStatus::Closed, U256::from(90u64))
            .unwrap();

        let p = ledger.get(&alice, nonce).unwrap();
        assert_eq!(p.status(), PositionStatus::Closed);
        assert_eq!(p.close_price(), U256::from(90u64));
    }

    #[test]
    fn set_terminal_twice_fails_not_open() {
        let mut ledger = PositionLedger::new();
        let alice = account("alice");
        let nonce = ledger.append(&alice, position());

        ledger
            .set_terminal(
                &alice,
                nonce,
                TerminalStatus::Liquidated,
                SENTINEL_CLOSE_PRICE,
            )
            .unwrap();

        let err = ledger
            .set_terminal(&alice, nonce, TerminalStatus::Closed, U256::from(90u64))
            .unwrap_err();
        assert_eq!(err, LedgerError::NotOpen { nonce });

        // The first terminal write is untouched.
        let p = ledger.get(&alice, nonce).unwrap();
        assert_eq!(p.status(), PositionStatus::Liquidated);
        assert_eq!(p.close_price(), SENTINEL_CLOSE_PRICE);
    }

    #[test]
    fn set_terminal_unknown_nonce_fails_invalid_nonce() {
        let mut ledger = PositionLedger::new();
        let err = ledger
            .set_terminal(
                &account("alice"),
                7,
                TerminalStatus::Closed,
                U256::from(1u64),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidNonce { nonce: 7, .. }));
    }

    #[test]
    fn terminated_positions_remain_queryable() {
        let mut ledger = PositionLedger::new();
        let alice = account("alice");
        let n0 = ledger.append(&alice, position());
        let n1 = ledger.append(&alice, position());

        ledger
            .set_terminal(&alice, n0, TerminalStatus::Closed, U256::from(90u64))
            .unwrap();

        assert_eq!(ledger.len(&alice), 2);
        assert_eq!(
            ledger.get(&alice, n0).unwrap().status(),
            PositionStatus::Closed
        );
        assert!(ledger.get(&alice, n1).unwrap().is_open());
    }
}
