//! Deterministic mock market data.
//!
//! Prices are derived from a hash of the symbol, so the same symbol always
//! produces the same base price and history. Daily quote changes are seeded by
//! the calendar date of the injected clock and stay stable for that day.

use crate::core::clock::Clock;
use crate::models::asset::{Asset, AssetType};
use crate::models::market::{PricePoint, PriceSeries};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use chrono::Datelike;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_HISTORY_DAYS: usize = 100;
const ONE_DAY_MS: i64 = 24 * 60 * 60 * 1000;
const SEARCH_LIMIT: usize = 5;

const STOCK_PRICES: [(&str, f64); 8] = [
    ("AAPL", 175.50),
    ("GOOGL", 142.30),
    ("MSFT", 378.85),
    ("AMZN", 151.20),
    ("TSLA", 248.50),
    ("META", 485.20),
    ("NVDA", 875.60),
    ("NFLX", 485.30),
];

const CRYPTO_PRICES: [(&str, &str, f64); 8] = [
    ("BITCOIN", "Bitcoin", 43250.00),
    ("ETHEREUM", "Ethereum", 2650.50),
    ("SOLANA", "Solana", 98.75),
    ("CARDANO", "Cardano", 0.52),
    ("POLKADOT", "Polkadot", 7.25),
    ("CHAINLINK", "Chainlink", 14.80),
    ("AVALANCHE", "Avalanche", 36.40),
    ("POLYGON", "Polygon", 0.85),
];

/// Linear congruential generator producing values in [0, 1).
pub struct SeededRandom {
    value: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { value: seed }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.value = (self.value * 9301 + 49297) % 233280;
        self.value as f64 / 233280.0
    }
}

/// 32-bit `h * 31 + c` string hash over UTF-16 code units, made non-negative.
pub fn symbol_seed(symbol: &str) -> u64 {
    let hash = symbol.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    i64::from(hash).unsigned_abs()
}

/// Round to cents, halves toward positive infinity.
fn round_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct MockMarketDataProvider {
    clock: Arc<dyn Clock>,
    history_days: usize,
}

impl MockMarketDataProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_history_days(clock, DEFAULT_HISTORY_DAYS)
    }

    pub fn with_history_days(clock: Arc<dyn Clock>, history_days: usize) -> Self {
        Self {
            clock,
            history_days,
        }
    }

    fn daily_seed(&self) -> u64 {
        let today = self.clock.now();
        symbol_seed(&format!(
            "{}-{}-{}",
            today.year(),
            today.month0(),
            today.day()
        ))
    }

    /// History of `history_days + 1` daily points ending at the clock's now.
    pub fn generate_history(&self, symbol: &str) -> PriceSeries {
        let mut random = SeededRandom::new(symbol_seed(symbol));
        let mut current_price = 100.0 + random.next_f64() * 200.0;
        let now = self.clock.now().timestamp_millis();

        let points: Vec<PricePoint> = (0..=self.history_days as i64)
            .rev()
            .map(|days_ago| {
                let change = (random.next_f64() - 0.48) * 0.05;
                current_price *= 1.0 + change;
                let volume = 1_000_000.0 + random.next_f64() * 5_000_000.0;
                PricePoint::new(now - days_ago * ONE_DAY_MS, current_price.max(1.0))
                    .with_volume(volume.round() as u64)
            })
            .collect();

        // Timestamps ascend and prices are floored at 1, so this cannot fail.
        PriceSeries::new(points).unwrap_or_default()
    }

    fn stock_quote(&self, symbol: &str) -> Asset {
        let symbol = symbol.to_uppercase();
        let seed = symbol_seed(&symbol);
        let base_price = STOCK_PRICES
            .iter()
            .find(|(ticker, _)| *ticker == symbol)
            .map(|(_, price)| *price)
            .unwrap_or_else(|| 50.0 + SeededRandom::new(seed).next_f64() * 200.0);

        let mut daily = SeededRandom::new(seed + self.daily_seed());
        let change_percent = (daily.next_f64() - 0.5) * 4.0;
        let change = base_price * (change_percent / 100.0);

        Asset {
            name: format!("{} Inc.", symbol),
            symbol,
            asset_type: AssetType::Stock,
            price: round_cents(base_price),
            change24h: round_cents(change),
            change_percent24h: round_cents(change_percent),
        }
    }

    fn crypto_quote(&self, symbol: &str) -> Asset {
        let seed = symbol_seed(&symbol.to_lowercase());
        let symbol = symbol.to_uppercase();
        let known = CRYPTO_PRICES.iter().find(|(id, _, _)| *id == symbol);
        let base_price = known
            .map(|(_, _, price)| *price)
            .unwrap_or_else(|| 0.1 + SeededRandom::new(seed).next_f64() * 100.0);

        let mut daily = SeededRandom::new(seed + self.daily_seed());
        let change_percent = (daily.next_f64() - 0.5) * 6.0;
        let change = base_price * (change_percent / 100.0);

        Asset {
            name: known
                .map(|(_, name, _)| name.to_string())
                .unwrap_or_else(|| capitalize(&symbol)),
            symbol,
            asset_type: AssetType::Crypto,
            price: round_cents(base_price),
            change24h: round_cents(change),
            change_percent24h: round_cents(change_percent),
        }
    }
}

/// Empty query lists the whole universe, otherwise a case-insensitive
/// substring match capped at five results.
pub fn search_listings(query: &str, asset_type: AssetType) -> Vec<Asset> {
    let query = query.trim().to_lowercase();
    let listings: Vec<Asset> = match asset_type {
        AssetType::Stock => STOCK_PRICES
            .iter()
            .map(|(ticker, _)| {
                Asset::listing(*ticker, format!("{} Inc.", ticker), AssetType::Stock)
            })
            .collect(),
        AssetType::Crypto => CRYPTO_PRICES
            .iter()
            .map(|(id, name, _)| Asset::listing(*id, *name, AssetType::Crypto))
            .collect(),
    };

    if query.is_empty() {
        return listings;
    }

    listings
        .into_iter()
        .filter(|asset| asset.symbol.to_lowercase().contains(&query))
        .take(SEARCH_LIMIT)
        .collect()
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn fetch_quote(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Asset, MarketDataError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MarketDataError::UnknownSymbol(symbol.to_string()));
        }

        let asset = match asset_type {
            AssetType::Stock => self.stock_quote(symbol),
            AssetType::Crypto => self.crypto_quote(symbol),
        };
        debug!(symbol = %asset.symbol, price = asset.price, "MockMarketDataProvider: quote");
        Ok(asset)
    }

    async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries, MarketDataError> {
        if symbol.trim().is_empty() {
            return Err(MarketDataError::UnknownSymbol(symbol.to_string()));
        }
        Ok(self.generate_history(symbol))
    }

    async fn search(
        &self,
        query: &str,
        asset_type: AssetType,
    ) -> Result<Vec<Asset>, MarketDataError> {
        Ok(search_listings(query, asset_type))
    }
}
