//! Wire types for the historical market-chart endpoint (REST).

use crate::shared::serde_util::{null_as_zero, timestamp_ms};
use serde::{Deserialize, Serialize};

/// One `[timestamp_ms, value]` pair as the provider sends it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePair(
    #[serde(deserialize_with = "timestamp_ms::deserialize")] pub i64,
    #[serde(deserialize_with = "null_as_zero::deserialize")] pub f64,
);

/// REST response for `coins/{id}/market_chart`.
///
/// Every field is optional on the wire; a missing series decodes as empty so
/// the caller decides whether emptiness is an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<PricePair>,
    #[serde(default)]
    pub market_caps: Vec<PricePair>,
    #[serde(default)]
    pub total_volumes: Vec<PricePair>,
}
