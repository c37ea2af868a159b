//! Shared data models spanning the engine layers.

pub mod asset;
pub mod indicators;
pub mod market;
pub mod signal;

pub use asset::{Asset, AssetAnalysis, AssetType};
pub use indicators::{BollingerBandsIndicator, IndicatorSet, MacdIndicator};
pub use market::{PricePoint, PriceSeries, SeriesError};
pub use signal::{PriceTarget, SignalClass, SignalProbability, TradingSignal};
