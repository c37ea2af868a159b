//! Wiring of configured collaborators.

use crate::config::Config;
use crate::core::clock::Clock;
use crate::db::{InMemoryStore, KeyValueStore, RedisStore};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::services::mock::MockMarketDataProvider;
use crate::services::rest::RestMarketDataProvider;
use std::sync::Arc;
use tracing::{info, warn};

/// REST provider when `MARKET_DATA_URL` is set, the mock generator otherwise.
pub fn build_provider(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn MarketDataProvider>, MarketDataError> {
    match &config.market_data_url {
        Some(url) => {
            info!(url = %url, "Using REST market data provider");
            Ok(Arc::new(RestMarketDataProvider::new(
                url.clone(),
                config.market_data_timeout,
                config.market_data_max_retries,
            )?))
        }
        None => {
            info!(history_days = config.history_days, "Using mock market data provider");
            Ok(Arc::new(MockMarketDataProvider::with_history_days(
                clock,
                config.history_days,
            )))
        }
    }
}

/// Redis when configured and reachable; otherwise an in-memory store.
pub async fn build_store(config: &Config) -> Arc<dyn KeyValueStore> {
    if let Some(url) = &config.redis_url {
        match RedisStore::connect(url, config.redis_namespace.clone()).await {
            Ok(store) => return Arc::new(store),
            Err(e) => {
                warn!(
                    error = %e,
                    "Failed to connect to Redis - watchlist and preferences will not persist"
                );
            }
        }
    }
    Arc::new(InMemoryStore::new())
}
