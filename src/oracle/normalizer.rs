//! Conversion of raw feed answers to a common 18-decimal representation.

use alloy_primitives::{I256, U256};

use super::{PriceFeed, PriceRound};
use crate::domain::FeedId;
use crate::error::OracleError;

/// Every normalized price carries this many decimals.
pub const PRICE_DECIMALS: u8 = 18;

/// Normalize a raw feed answer to 18-decimal fixed point.
///
/// Fails with `InvalidPrice` for non-positive answers. Feeds with more than
/// 18 decimals lose precision to floor division; that loss is part of the
/// contract and is reproduced exactly.
pub fn normalize(answer: I256, decimals: u8) -> Result<U256, OracleError> {
    if answer <= I256::ZERO {
        return Err(OracleError::InvalidPrice { answer });
    }
    let raw = answer.unsigned_abs();

    let overflow = || OracleError::NormalizeOverflow { answer, decimals };
    match decimals.cmp(&PRICE_DECIMALS) {
        std::cmp::Ordering::Less => {
            let scale = pow10(u32::from(PRICE_DECIMALS - decimals)).ok_or_else(overflow)?;
            raw.checked_mul(scale).ok_or_else(overflow)
        }
        std::cmp::Ordering::Greater => {
            let scale = pow10(u32::from(decimals - PRICE_DECIMALS)).ok_or_else(overflow)?;
            Ok(raw / scale)
        }
        std::cmp::Ordering::Equal => Ok(raw),
    }
}

/// Read one feed and normalize its latest answer.
pub fn read_normalized<P: PriceFeed + ?Sized>(
    source: &P,
    feed: &FeedId,
) -> Result<U256, OracleError> {
    let PriceRound { answer, .. } = source.latest_round(feed)?;
    let decimals = source.decimals(feed)?;
    normalize(answer, decimals)
}

fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}
