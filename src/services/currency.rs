//! Display currency conversion and the persisted currency preference.

use crate::db::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

pub const CURRENCY_KEY: &str = "preferences:currency";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Units of this currency per USD. Static rates, no live feed.
    pub fn rate(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Eur => 0.92,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

pub fn convert(amount_usd: f64, currency: Currency) -> f64 {
    amount_usd * currency.rate()
}

/// `$175.50`, `€161.46`
pub fn format_price(amount_usd: f64, currency: Currency) -> String {
    format!("{}{:.2}", currency.symbol(), convert(amount_usd, currency))
}

/// The user's display currency, persisted in the key-value store.
pub struct CurrencyPreferences {
    store: Arc<dyn KeyValueStore>,
}

impl CurrencyPreferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Falls back to USD when nothing usable is stored.
    pub async fn get(&self) -> Result<Currency, StoreError> {
        let stored = self.store.get(CURRENCY_KEY).await?;
        Ok(match stored {
            Some(code) => code.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Ignoring stored currency preference");
                Currency::default()
            }),
            None => Currency::default(),
        })
    }

    pub async fn set(&self, currency: Currency) -> Result<(), StoreError> {
        self.store.put(CURRENCY_KEY, currency.code().to_string()).await
    }
}
