//! Price history models

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            price,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("price at index {index} must be positive and finite, got {price}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("timestamp at index {index} ({timestamp}) precedes the previous point ({previous})")]
    OutOfOrder {
        index: usize,
        timestamp: i64,
        previous: i64,
    },
}

/// Ordered price history for one asset. The last point is the current price.
///
/// The series is immutable once built; the only way in is through
/// [`PriceSeries::new`], which enforces non-decreasing timestamps and positive
/// prices. An empty series is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    index,
                    price: point.price,
                });
            }
            if index > 0 && point.timestamp < points[index - 1].timestamp {
                return Err(SeriesError::OutOfOrder {
                    index,
                    timestamp: point.timestamp,
                    previous: points[index - 1].timestamp,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Price of the last point, or 0 for an empty series.
    pub fn current_price(&self) -> f64 {
        self.last().map(|p| p.price).unwrap_or(0.0)
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Volume projection; missing volumes count as 0.
    pub fn volumes(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.volume.unwrap_or(0) as f64)
            .collect()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}
