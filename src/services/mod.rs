//! Collaborators around the analysis engine: market data, watchlist, currency.

pub mod currency;
pub mod market_data;
pub mod mock;
pub mod rest;
pub mod watchlist;

pub use currency::{Currency, CurrencyPreferences};
pub use market_data::{MarketDataError, MarketDataProvider};
pub use mock::MockMarketDataProvider;
pub use rest::RestMarketDataProvider;
pub use watchlist::{Watchlist, WatchlistEntry};
