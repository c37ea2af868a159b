//! User watchlist backed by a key-value store.
//!
//! Each entry lives under `watchlist:{type}:{SYMBOL}`, so (symbol, type) is
//! the identity and adding the same asset twice is a no-op. Listing follows
//! insertion order.

use crate::core::clock::Clock;
use crate::db::{KeyValueStore, StoreError};
use crate::models::asset::{Asset, AssetType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const WATCHLIST_PREFIX: &str = "watchlist:";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub asset: Asset,
    pub added_at: DateTime<Utc>,
    /// Insertion order, one past the highest sequence present when added.
    #[serde(default)]
    pub sequence: u64,
}

pub fn entry_key(symbol: &str, asset_type: AssetType) -> String {
    format!(
        "{}{}:{}",
        WATCHLIST_PREFIX,
        asset_type,
        symbol.trim().to_uppercase()
    )
}

pub struct Watchlist {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl Watchlist {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Entries in the order they were added. Unreadable entries are skipped.
    pub async fn entries(&self) -> Result<Vec<WatchlistEntry>, StoreError> {
        let raw = self.store.list(WATCHLIST_PREFIX).await?;
        let mut entries: Vec<WatchlistEntry> = raw
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_str(&value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping unreadable watchlist entry");
                    None
                }
            })
            .collect();
        // Stable: concurrent adds sharing a sequence stay in time, then key order.
        entries.sort_by_key(|entry| (entry.sequence, entry.added_at));
        Ok(entries)
    }

    pub async fn list(&self) -> Result<Vec<Asset>, StoreError> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .map(|entry| entry.asset)
            .collect())
    }

    /// Returns `false` when the asset was already present; the stored entry is
    /// left untouched in that case.
    pub async fn add(&self, asset: Asset) -> Result<bool, StoreError> {
        let key = entry_key(&asset.symbol, asset.asset_type);
        let sequence = self
            .entries()
            .await?
            .iter()
            .map(|entry| entry.sequence)
            .max()
            .unwrap_or(0)
            + 1;

        let entry = WatchlistEntry {
            asset,
            added_at: self.clock.now(),
            sequence,
        };
        let added = self
            .store
            .put_if_absent(&key, serde_json::to_string(&entry)?)
            .await?;
        if added {
            info!(key = %key, sequence, "Added to watchlist");
        }
        Ok(added)
    }

    pub async fn remove(&self, symbol: &str, asset_type: AssetType) -> Result<bool, StoreError> {
        let key = entry_key(symbol, asset_type);
        let removed = self.store.delete(&key).await?;
        if removed {
            info!(key = %key, "Removed from watchlist");
        }
        Ok(removed)
    }

    pub async fn contains(&self, symbol: &str, asset_type: AssetType) -> Result<bool, StoreError> {
        Ok(self
            .store
            .get(&entry_key(symbol, asset_type))
            .await?
            .is_some())
    }
}
