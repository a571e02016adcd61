//! Settlement of a short position against a live price pair.
//!
//! All arithmetic is signed 256-bit fixed point with checked operations.
//! Division truncates toward zero with no rounding correction; the small,
//! consistent dust this produces is part of the contract and is preserved
//! bit-for-bit.

use alloy_primitives::{I256, U256};

use super::Position;
use crate::error::EngineError;

/// Outcome of evaluating a position against current prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Signed native-currency amount owed to the position holder.
    /// Non-positive means the position is liquidation-eligible.
    pub withdrawal: I256,
    /// The tracked-asset price the settlement was computed at.
    pub close_price: U256,
}

impl Settlement {
    /// Returns true if the holder is owed a payout.
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.withdrawal > I256::ZERO
    }
}

/// Compute the signed withdrawal amount for a position.
///
/// ```text
/// pnl        = entry_price - tracked_price        (positive when price fell)
/// withdrawal = (entry_price + pnl) * size / base_price
/// ```
///
/// The position was sized in base-asset terms at open, so re-expressing
/// `entry_price + pnl` at the current base price recovers the
/// native-currency payout.
pub fn settle(
    position: &Position,
    base_price: U256,
    tracked_price: U256,
) -> Result<Settlement, EngineError> {
    let entry = to_signed(position.entry_price(), "entry price")?;
    let tracked = to_signed(tracked_price, "tracked price")?;
    let size = to_signed(position.size(), "position size")?;
    let base = to_signed(base_price, "base price")?;

    let pnl = entry
        .checked_sub(tracked)
        .ok_or(EngineError::Overflow { op: "pnl" })?;
    let value = entry
        .checked_add(pnl)
        .ok_or(EngineError::Overflow { op: "position value" })?;
    let withdrawal = value
        .checked_mul(size)
        .and_then(|v| v.checked_div(base))
        .ok_or(EngineError::Overflow { op: "withdrawal" })?;

    Ok(Settlement {
        withdrawal,
        close_price: tracked_price,
    })
}

/// Reinterpret an unsigned price as signed, failing rather than flipping
/// sign for values above `I256::MAX`.
fn to_signed(value: U256, op: &'static str) -> Result<I256, EngineError> {
    let signed = I256::from_raw(value);
    if signed.is_negative() {
        return Err(EngineError::Overflow { op });
    }
    Ok(signed)
}
