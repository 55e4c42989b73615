//! Conversions from wire types to domain types for market charts.

use super::wire::{MarketChartResponse, PricePair};
use super::{MarketChart, TimeSeries, TimeSeriesPoint};

impl From<PricePair> for TimeSeriesPoint {
    fn from(p: PricePair) -> Self {
        Self {
            time: p.0,
            value: p.1,
        }
    }
}

fn series(pairs: Vec<PricePair>) -> TimeSeries {
    TimeSeries::new(pairs.into_iter().map(TimeSeriesPoint::from).collect())
}

impl From<MarketChartResponse> for MarketChart {
    fn from(r: MarketChartResponse) -> Self {
        Self {
            prices: series(r.prices),
            market_caps: series(r.market_caps),
            total_volumes: series(r.total_volumes),
        }
    }
}
