//! Environment-driven configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by the binaries (`dotenvy`).

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::services::mock::DEFAULT_HISTORY_DAYS;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment environment name (`ENVIRONMENT`), `development` when unset.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    /// In-memory storage is used when unset.
    pub redis_url: Option<String>,
    pub redis_namespace: String,
    /// The deterministic mock provider is used when unset.
    pub market_data_url: Option<String>,
    pub market_data_timeout: Duration,
    pub market_data_max_retries: usize,
    pub history_days: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8080,
            redis_url: None,
            redis_namespace: "tradesight".to_string(),
            market_data_url: None,
            market_data_timeout: Duration::from_millis(5000),
            market_data_max_retries: 3,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset or blank variables keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var(&var, "PORT", defaults.port)?,
            redis_url: var("REDIS_URL"),
            redis_namespace: var("REDIS_NAMESPACE").unwrap_or(defaults.redis_namespace),
            market_data_url: var("MARKET_DATA_URL"),
            market_data_timeout: Duration::from_millis(parse_var(
                &var,
                "MARKET_DATA_TIMEOUT_MS",
                defaults.market_data_timeout.as_millis() as u64,
            )?),
            market_data_max_retries: parse_var(
                &var,
                "MARKET_DATA_MAX_RETRIES",
                defaults.market_data_max_retries,
            )?,
            history_days: parse_var(&var, "HISTORY_DAYS", defaults.history_days)?,
        })
    }
}

fn parse_var<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
