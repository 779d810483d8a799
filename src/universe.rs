//! The set of assets considered in one analysis cycle.

use std::collections::BTreeSet;

use crate::services::market_data::MarketAsset;

pub const DEFAULT_STABLECOINS: &[&str] = &[
    "tether",
    "usd-coin",
    "binance-usd",
    "dai",
    "paxos-standard",
    "true-usd",
];

pub const DEFAULT_WATCHLIST: &[&str] = &[
    "bitcoin",
    "ethereum",
    "solana",
    "cardano",
    "polkadot",
    "litecoin",
    "binancecoin",
];

pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Ordered, de-duplicated asset identifiers plus an exclusion set.
///
/// Excluded identifiers may appear in `assets` (they are part of what the
/// source returned) but are never yielded by [`AssetUniverse::candidates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetUniverse {
    assets: Vec<String>,
    excluded: BTreeSet<String>,
}

impl AssetUniverse {
    pub fn watchlist<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut assets: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into().trim().to_lowercase();
            if !id.is_empty() && !assets.contains(&id) {
                assets.push(id);
            }
        }
        Self {
            assets,
            excluded: BTreeSet::new(),
        }
    }

    /// Highest market caps first, truncated to `limit`, with `stablecoins`
    /// excluded from the candidate pool. Assets without a market cap sort last.
    pub fn top_by_market_cap<S: AsRef<str>>(
        mut listed: Vec<MarketAsset>,
        limit: usize,
        stablecoins: &[S],
    ) -> Self {
        listed.sort_by(|a, b| {
            let a = a.market_cap.unwrap_or(f64::NEG_INFINITY);
            let b = b.market_cap.unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
        listed.truncate(limit);
        Self::watchlist(listed.into_iter().map(|asset| asset.id)).excluding(stablecoins)
    }

    pub fn excluding<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
        self.excluded
            .extend(ids.iter().map(|id| id.as_ref().trim().to_lowercase()));
        self
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded.contains(id)
    }

    /// Every listed asset, including excluded ones.
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Assets eligible for analysis, in universe order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> + '_ {
        self.assets
            .iter()
            .map(String::as_str)
            .filter(move |id| !self.excluded.contains(*id))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
