//! Short position state and its single terminal transition.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};

use super::AssetId;

/// Close price recorded when a position is liquidated without a meaningful
/// market price: the maximum representable value.
pub const SENTINEL_CLOSE_PRICE: U256 = U256::MAX;

/// Status of a position. Monotonic: `Open` transitions exactly once to one
/// of the terminal variants and never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    /// Exposure is live; settlement has not happened.
    Open,
    /// Self-initiated exit with a positive payout.
    Closed,
    /// Resolved at or below break-even; no payout was made.
    Liquidated,
}

impl PositionStatus {
    /// Returns true if the position is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, PositionStatus::Open)
    }

    /// Returns true if the position reached a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        match self {
            PositionStatus::Open => false,
            PositionStatus::Closed | PositionStatus::Liquidated => true,
        }
    }
}

/// The two outcomes a position can terminate with.
///
/// A separate type so that the ledger's terminal write cannot be handed
/// `Open` by mistake; the conversion below is the only way back into
/// [`PositionStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Closed,
    Liquidated,
}

impl From<TerminalStatus> for PositionStatus {
    fn from(terminal: TerminalStatus) -> Self {
        match terminal {
            TerminalStatus::Closed => PositionStatus::Closed,
            TerminalStatus::Liquidated => PositionStatus::Liquidated,
        }
    }
}

/// One leveraged short exposure.
///
/// Immutable after creation except for the single `status`/`close_price`
/// write performed by the ledger when the position terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    asset: AssetId,
    entry_price: U256,
    size: U256,
    status: PositionStatus,
    close_price: U256,
    opened_at: DateTime<Utc>,
}

impl Position {
    /// Create a freshly opened position.
    ///
    /// `entry_price` and `size` are normalized 18-decimal fixed-point values;
    /// the lifecycle engine validates both are non-zero before calling this.
    #[must_use]
    pub fn open(asset: AssetId, entry_price: U256, size: U256) -> Self {
        Self {
            asset,
            entry_price,
            size,
            status: PositionStatus::Open,
            close_price: U256::ZERO,
            opened_at: Utc::now(),
        }
    }

    /// Get the tracked asset.
    #[must_use]
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// Get the normalized entry price.
    #[must_use]
    pub fn entry_price(&self) -> U256 {
        self.entry_price
    }

    /// Get the normalized unit exposure.
    #[must_use]
    pub fn size(&self) -> U256 {
        self.size
    }

    /// Get the current status.
    #[must_use]
    pub fn status(&self) -> PositionStatus {
        self.status
    }

    /// Get the recorded close price. Zero while open; the sentinel when
    /// liquidated without a recorded market price.
    #[must_use]
    pub fn close_price(&self) -> U256 {
        self.close_price
    }

    /// Get when the position was opened.
    #[must_use]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Returns true if the position is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Write the terminal status and close price. The ledger guards that the
    /// position is still open before calling this.
    pub(crate) fn set_terminal(&mut self, terminal: TerminalStatus, close_price: U256) {
        self.status = terminal.into();
        self.close_price = close_price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> Position {
        Position::open(AssetId::new("wbtc"), U256::from(100u64), U256::from(3u64))
    }

    #[test]
    fn open_position_has_open_status_and_zero_close_price() {
        let p = position();
        assert!(p.is_open());
        assert_eq!(p.status(), PositionStatus::Open);
        assert_eq!(p.close_price(), U256::ZERO);
        assert_eq!(p.asset().as_str(), "wbtc");
        assert_eq!(p.entry_price(), U256::from(100u64));
        assert_eq!(p.size(), U256::from(3u64));
    }

    #[test]
    fn status_is_terminal() {
        assert!(!PositionStatus::Open.is_terminal());
        assert!(PositionStatus::Closed.is_terminal());
        assert!(PositionStatus::Liquidated.is_terminal());
    }

    #[test]
    fn terminal_status_converts_exhaustively() {
        assert_eq!(
            PositionStatus::from(TerminalStatus::Closed),
            PositionStatus::Closed
        );
        assert_eq!(
            PositionStatus::from(TerminalStatus::Liquidated),
            PositionStatus::Liquidated
        );
    }

    #[test]
    fn set_terminal_closed_records_close_price() {
        let mut p = position();
        p.set_terminal(TerminalStatus::Closed, U256::from(90u64));
        assert_eq!(p.status(), PositionStatus::Closed);
        assert_eq!(p.close_price(), U256::from(90u64));
        assert!(!p.is_open());
    }

    #[test]
    fn set_terminal_liquidated_records_sentinel() {
        let mut p = position();
        p.set_terminal(TerminalStatus::Liquidated, SENTINEL_CLOSE_PRICE);
        assert_eq!(p.status(), PositionStatus::Liquidated);
        assert_eq!(p.close_price(), U256::MAX);
    }

    #[test]
    fn terminal_write_preserves_entry_fields() {
        let mut p = position();
        p.set_terminal(TerminalStatus::Closed, U256::from(90u64));
        assert_eq!(p.entry_price(), U256::from(100u64));
        assert_eq!(p.size(), U256::from(3u64));
        assert_eq!(p.asset().as_str(), "wbtc");
    }
}
