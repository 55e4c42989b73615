//! Market chart domain — historical price series for one coin.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod normalize;
pub mod wire;

use crate::error::HttpError;
use crate::shared::{CoinId, Currency, DayRange};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

pub use normalize::{normalize, NormalizeError};

/// A single sample of a price, market-cap or volume series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Ascending samples for one asset over one request window.
///
/// Fetched series are never edited in place; a re-fetch replaces the whole value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(Vec<TimeSeriesPoint>);

impl TimeSeries {
    pub fn new(points: Vec<TimeSeriesPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.0
    }

    pub fn first(&self) -> Option<&TimeSeriesPoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().map(|p| p.time)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.value)
    }

    /// Whether both series carry the same sample timestamps.
    pub fn is_aligned_with(&self, other: &TimeSeries) -> bool {
        self.len() == other.len() && self.timestamps().eq(other.timestamps())
    }
}

impl From<Vec<(i64, f64)>> for TimeSeries {
    fn from(pairs: Vec<(i64, f64)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(time, value)| TimeSeriesPoint { time, value })
                .collect(),
        )
    }
}

/// Price, market-cap and volume history for one coin/currency/window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: TimeSeries,
    pub market_caps: TimeSeries,
    pub total_volumes: TimeSeries,
}

/// Anything that can produce one coin's market chart in a single attempt.
///
/// Retries are layered on top by the caller, so implementations should not
/// retry internally.
pub trait MarketChartSource {
    fn market_chart(
        &self,
        coin: &CoinId,
        days: DayRange,
        currency: &Currency,
    ) -> impl Future<Output = Result<MarketChart, HttpError>>;
}

impl<S: MarketChartSource + ?Sized> MarketChartSource for Arc<S> {
    fn market_chart(
        &self,
        coin: &CoinId,
        days: DayRange,
        currency: &Currency,
    ) -> impl Future<Output = Result<MarketChart, HttpError>> {
        (**self).market_chart(coin, days, currency)
    }
}
