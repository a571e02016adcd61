//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account identity - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new `AccountId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Tracked-asset identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    /// Create a new `AssetId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the asset ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Price-feed identifier - newtype for type safety.
///
/// Identifies one aggregator feed at the oracle boundary; the registry
/// maps assets to these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedId(String);

impl FeedId {
    /// Create a new `FeedId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the feed ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FeedId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for FeedId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_new_and_as_str() {
        let id = AccountId::new("alice");
        assert_eq!(id.as_str(), "alice");
    }

    #[test]
    fn account_id_from_string() {
        let id = AccountId::from("bob".to_string());
        assert_eq!(id.as_str(), "bob");
    }

    #[test]
    fn account_id_display() {
        let id = AccountId::new("carol");
        assert_eq!(format!("{}", id), "carol");
    }

    #[test]
    fn asset_id_new_and_as_str() {
        let id = AssetId::new("wbtc");
        assert_eq!(id.as_str(), "wbtc");
    }

    #[test]
    fn asset_id_from_str() {
        let id = AssetId::from("weth");
        assert_eq!(id.as_str(), "weth");
    }

    #[test]
    fn asset_id_display() {
        let id = AssetId::new("wbtc");
        assert_eq!(format!("{}", id), "wbtc");
    }

    #[test]
    fn feed_id_new_and_as_str() {
        let id = FeedId::new("btc-usd");
        assert_eq!(id.as_str(), "btc-usd");
    }

    #[test]
    fn feed_id_from_string() {
        let id = FeedId::from("eth-usd".to_string());
        assert_eq!(id.as_str(), "eth-usd");
    }

    #[test]
    fn feed_id_display() {
        let id = FeedId::new("btc-usd");
        assert_eq!(format!("{}", id), "btc-usd");
    }
}
