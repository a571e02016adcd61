//! Position lifecycle orchestration: open, close, liquidate.
//!
//! Each public operation is one transaction: every precondition is checked
//! before any mutation, failures abort atomically with a specific error, and
//! the external transfer is ordered after validation but before any ledger or
//! vault write so a reentrant observer never sees a half-updated ledger. The
//! reentrancy guard on top of that ordering is defense in depth.

use alloy_primitives::U256;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::domain::{
    settle, AccountId, AssetId, CollateralVault, FeedId, Position, PositionLedger, Settlement,
    TerminalStatus, SENTINEL_CLOSE_PRICE,
};
use crate::error::{EngineError, LedgerError, Result};
use crate::oracle::{read_normalized, FeedRegistry, PriceFeed};

use super::events::EngineEvent;
use super::guard::ReentrancyGuard;
use super::transfer::CollateralTransfer;

/// The lifecycle engine.
///
/// Owns the ledger, the feed registry, and the pooled collateral; reads
/// prices through `P` and pays out through `T`. Mutating operations take the
/// caller's [`AccountId`] explicitly: `close` only addresses the caller's own
/// ledger sequence, which is the ownership check, while `liquidate` targets
/// any account and is deliberately permissionless.
pub struct ShortEngine<P, T> {
    owner: AccountId,
    base_feed: FeedId,
    min_deposit: U256,
    registry: FeedRegistry,
    ledger: PositionLedger,
    vault: CollateralVault,
    feed: P,
    transfers: T,
    guard: ReentrancyGuard,
    events: Vec<EngineEvent>,
}

impl<P: PriceFeed, T: CollateralTransfer> ShortEngine<P, T> {
    /// Create an engine with an empty ledger, registry, and vault.
    pub fn new(owner: AccountId, base_feed: FeedId, min_deposit: U256, feed: P, transfers: T) -> Self {
        Self {
            owner,
            base_feed,
            min_deposit,
            registry: FeedRegistry::new(),
            ledger: PositionLedger::new(),
            vault: CollateralVault::new(),
            feed,
            transfers,
            guard: ReentrancyGuard::new(),
            events: Vec::new(),
        }
    }

    /// Create an engine from a validated [`EngineConfig`].
    pub fn from_config(config: &EngineConfig, feed: P, transfers: T) -> Self {
        Self::new(
            AccountId::new(config.owner.clone()),
            FeedId::new(config.base_feed.clone()),
            U256::from(config.min_deposit),
            feed,
            transfers,
        )
    }

    /// Open a leveraged short on `asset`, depositing `deposit` native
    /// currency into the pool. Returns the new position's nonce.
    pub fn open(&mut self, caller: &AccountId, asset: &AssetId, deposit: U256) -> Result<u64> {
        let _permit = self.guard.enter()?;

        if deposit <= self.min_deposit {
            return Err(EngineError::TooSmall {
                deposit,
                minimum: self.min_deposit,
            }
            .into());
        }
        let feed = self.registry.require(asset)?.clone();

        let base_price = read_normalized(&self.feed, &self.base_feed)?;
        let entry_price = read_normalized(&self.feed, &feed)?;

        // size = deposit * basePrice / entryPrice, all 18-decimal fixed point.
        let size = deposit
            .checked_mul(base_price)
            .and_then(|v| v.checked_div(entry_price))
            .ok_or(EngineError::Overflow { op: "position size" })?;
        if size.is_zero() {
            return Err(EngineError::InvalidSize.into());
        }

        self.vault.credit(deposit)?;
        let nonce = self
            .ledger
            .append(caller, Position::open(asset.clone(), entry_price, size));

        info!(
            account = %caller,
            nonce,
            asset = %asset,
            entry_price = %entry_price,
            size = %size,
            "position opened"
        );
        self.events.push(EngineEvent::PositionOpened {
            account: caller.clone(),
            nonce,
            asset: asset.clone(),
            entry_price,
            size,
        });
        Ok(nonce)
    }

    /// Close the caller's position at `nonce`.
    ///
    /// A positive settlement pays out from the pool and marks the position
    /// `Closed`. A non-positive settlement transfers nothing and marks it
    /// `Liquidated` with the sentinel close price: there is no partial-loss
    /// withdrawal path, even for the owner.
    pub fn close(&mut self, caller: &AccountId, nonce: u64) -> Result<Settlement> {
        let _permit = self.guard.enter()?;

        let settlement = self.settle_position(caller, nonce)?;
        if settlement.is_profitable() {
            let payout = settlement.withdrawal.unsigned_abs();
            if self.vault.balance() < payout {
                return Err(EngineError::InsufficientBalance {
                    required: payout,
                    available: self.vault.balance(),
                }
                .into());
            }
            self.transfers.transfer(caller, payout).map_err(|e| {
                EngineError::TransferFailed {
                    to: caller.to_string(),
                    reason: e.reason,
                }
            })?;
            self.vault.debit(payout)?;
            self.ledger
                .set_terminal(caller, nonce, TerminalStatus::Closed, settlement.close_price)?;

            info!(
                account = %caller,
                nonce,
                close_price = %settlement.close_price,
                payout = %payout,
                "position closed"
            );
            self.events.push(EngineEvent::PositionClosed {
                account: caller.clone(),
                nonce,
                close_price: settlement.close_price,
                withdrawal: settlement.withdrawal,
            });
        } else {
            self.ledger.set_terminal(
                caller,
                nonce,
                TerminalStatus::Liquidated,
                SENTINEL_CLOSE_PRICE,
            )?;

            warn!(
                account = %caller,
                nonce,
                withdrawal = %settlement.withdrawal,
                "losing position resolved as liquidation"
            );
            self.events.push(EngineEvent::PositionLiquidated {
                account: caller.clone(),
                nonce,
            });
        }
        Ok(settlement)
    }

    /// Liquidate `account`'s position at `nonce`. Callable by any party;
    /// only positions at or below break-even are eligible.
    pub fn liquidate(&mut self, account: &AccountId, nonce: u64) -> Result<()> {
        let _permit = self.guard.enter()?;

        let settlement = self.settle_position(account, nonce)?;
        if settlement.is_profitable() {
            return Err(EngineError::NotEligible {
                withdrawal: settlement.withdrawal,
            }
            .into());
        }

        self.ledger.set_terminal(
            account,
            nonce,
            TerminalStatus::Liquidated,
            SENTINEL_CLOSE_PRICE,
        )?;

        warn!(account = %account, nonce, "position liquidated");
        self.events.push(EngineEvent::PositionLiquidated {
            account: account.clone(),
            nonce,
        });
        Ok(())
    }

    /// Register a price feed for an asset. Owner-only; registrations are
    /// immutable once set.
    pub fn register_asset(&mut self, caller: &AccountId, asset: AssetId, feed: FeedId) -> Result<()> {
        let _permit = self.guard.enter()?;

        self.ensure_owner(caller)?;
        if asset.as_str().is_empty() {
            return Err(EngineError::EmptyId { field: "asset id" }.into());
        }
        if feed.as_str().is_empty() {
            return Err(EngineError::EmptyId { field: "feed id" }.into());
        }

        self.registry.register(asset.clone(), feed.clone())?;
        info!(asset = %asset, feed = %feed, "asset registered");
        Ok(())
    }

    /// Withdraw pooled collateral to the owner. Owner-only.
    pub fn withdraw(&mut self, caller: &AccountId, amount: U256) -> Result<()> {
        let _permit = self.guard.enter()?;

        self.ensure_owner(caller)?;
        if self.vault.balance() < amount {
            return Err(EngineError::InsufficientBalance {
                required: amount,
                available: self.vault.balance(),
            }
            .into());
        }
        self.transfers.transfer(caller, amount).map_err(|e| {
            EngineError::TransferFailed {
                to: caller.to_string(),
                reason: e.reason,
            }
        })?;
        self.vault.debit(amount)?;

        info!(amount = %amount, "owner withdrawal");
        Ok(())
    }

    /// Credit the pool without opening a position; lets the pool be seeded
    /// so profitable closes can pay out more than their own deposit.
    pub fn fund(&mut self, amount: U256) -> Result<()> {
        let _permit = self.guard.enter()?;
        self.vault.credit(amount)?;
        Ok(())
    }

    /// Look up a position by account and nonce.
    pub fn position(&self, account: &AccountId, nonce: u64) -> Result<&Position> {
        Ok(self.ledger.get(account, nonce)?)
    }

    /// Full position history for an account, oldest first.
    #[must_use]
    pub fn positions(&self, account: &AccountId) -> &[Position] {
        self.ledger.positions(account)
    }

    /// The feed registered for an asset, if any.
    #[must_use]
    pub fn feed_for(&self, asset: &AssetId) -> Option<&FeedId> {
        self.registry.resolve(asset)
    }

    /// Current pooled collateral balance.
    #[must_use]
    pub fn pool_balance(&self) -> U256 {
        self.vault.balance()
    }

    /// The owner account.
    #[must_use]
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// The exclusive minimum deposit.
    #[must_use]
    pub fn min_deposit(&self) -> U256 {
        self.min_deposit
    }

    /// Events recorded so far, in call order.
    #[must_use]
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Validate the position is open and settle it at current prices.
    /// Read-only: no state is touched.
    fn settle_position(&self, account: &AccountId, nonce: u64) -> Result<Settlement> {
        let position = self.ledger.get(account, nonce)?;
        if !position.is_open() {
            return Err(LedgerError::NotOpen { nonce }.into());
        }
        let feed = self.registry.require(position.asset())?;
        let base_price = read_normalized(&self.feed, &self.base_feed)?;
        let tracked_price = read_normalized(&self.feed, feed)?;
        Ok(settle(position, base_price, tracked_price)?)
    }

    fn ensure_owner(&self, caller: &AccountId) -> Result<()> {
        if caller != &self.owner {
            return Err(EngineError::NotOwner {
                caller: caller.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl<P, T> std::fmt::Debug for ShortEngine<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortEngine")
            .field("owner", &self.owner)
            .field("base_feed", &self.base_feed)
            .field("min_deposit", &self.min_deposit)
            .field("pool_balance", &self.vault.balance())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{account, asset, e18, feed_id, funded_engine};
    use crate::testkit::oracle::StaticPriceFeed;
    use crate::testkit::transfer::RecordingTransfer;

    #[test]
    fn open_requires_deposit_strictly_above_minimum() {
        let (mut engine, feeds, _) = funded_engine();
        feeds.set_answer(&feed_id("btc-usd"), 10_000_000_000_000, 8); // 100000 @ 8dp

        let minimum = engine.min_deposit();
        let err = engine
            .open(&account("alice"), &asset("wbtc"), minimum)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::TooSmall { .. })
        ));

        // One unit above the threshold is accepted.
        let nonce = engine
            .open(&account("alice"), &asset("wbtc"), minimum + U256::from(1u64))
            .unwrap();
        assert_eq!(nonce, 0);
    }

    #[test]
    fn open_unregistered_asset_fails_unsupported_token() {
        let (mut engine, _, _) = funded_engine();
        let err = engine
            .open(&account("alice"), &asset("unlisted"), e18(1))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Oracle(crate::error::OracleError::UnsupportedToken { .. })
        ));
        assert!(engine.positions(&account("alice")).is_empty());
    }

    #[test]
    fn extreme_price_ratio_fails_invalid_size_explicitly() {
        let owner = account("owner");
        let feeds = StaticPriceFeed::new();
        let transfers = RecordingTransfer::new();
        let mut engine = ShortEngine::new(
            owner.clone(),
            feed_id("base-usd"),
            U256::ZERO,
            feeds.clone(),
            transfers,
        );
        engine
            .register_asset(&owner, asset("wbtc"), feed_id("btc-usd"))
            .unwrap();

        // Base worth 1 wei-unit, tracked asset astronomically priced:
        // size = 1 * 1 / 1e30 truncates to zero.
        feeds.set_answer(&feed_id("base-usd"), 1, 18);
        feeds.set_answer(&feed_id("btc-usd"), 1_000_000_000_000_000_000_000_000_000_000, 18);

        let err = engine
            .open(&account("alice"), &asset("wbtc"), U256::from(1u64))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::InvalidSize)
        ));
        assert_eq!(engine.pool_balance(), U256::ZERO);
    }

    #[test]
    fn register_asset_rejects_non_owner_and_empty_ids() {
        let (mut engine, _, _) = funded_engine();

        let err = engine
            .register_asset(&account("mallory"), asset("weth"), feed_id("eth-usd"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::NotOwner { .. })
        ));

        let owner = engine.owner().clone();
        let err = engine
            .register_asset(&owner, asset(""), feed_id("eth-usd"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::EmptyId { field: "asset id" })
        ));

        let err = engine
            .register_asset(&owner, asset("weth"), feed_id(""))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::EmptyId { field: "feed id" })
        ));

        engine
            .register_asset(&owner, asset("weth"), feed_id("eth-usd"))
            .unwrap();
        let err = engine
            .register_asset(&owner, asset("weth"), feed_id("eth-usd"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::AlreadyRegistered { .. })
        ));
    }

    #[test]
    fn withdraw_is_owner_only_and_balance_checked() {
        let (mut engine, _, transfers) = funded_engine();
        engine.fund(U256::from(100u64)).unwrap();

        let err = engine
            .withdraw(&account("mallory"), U256::from(1u64))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::NotOwner { .. })
        ));

        let owner = engine.owner().clone();
        let before = engine.pool_balance();
        let err = engine.withdraw(&owner, before + U256::from(1u64)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Engine(EngineError::InsufficientBalance { .. })
        ));

        engine.withdraw(&owner, U256::from(100u64)).unwrap();
        assert_eq!(engine.pool_balance(), before - U256::from(100u64));
        assert_eq!(transfers.sent(), vec![(owner, U256::from(100u64))]);
    }
}
