//! Technical indicators and explainable BUY/SELL/HOLD signals for stocks and crypto.
//!
//! The pipeline is [`indicators::IndicatorEngine`] followed by
//! [`signals::SignalEngine`], packaged by [`core::AnalysisOrchestrator`].
//! Market data, the watchlist and currency display are collaborators in
//! [`services`].

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
