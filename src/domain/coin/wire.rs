//! Wire types for coin listing and coin detail responses (REST).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of `coins/markets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketResponse {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

/// `image` object of `coins/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageResponse {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Per-currency amounts, keyed by lowercase currency code.
pub type CurrencyAmounts = HashMap<String, Option<f64>>;

/// `market_data` object of `coins/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketDataResponse {
    #[serde(default)]
    pub current_price: CurrencyAmounts,
    #[serde(default)]
    pub market_cap: CurrencyAmounts,
    #[serde(default)]
    pub total_volume: CurrencyAmounts,
    #[serde(default)]
    pub high_24h: CurrencyAmounts,
    #[serde(default)]
    pub low_24h: CurrencyAmounts,
    #[serde(default)]
    pub price_change_24h_in_currency: CurrencyAmounts,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

/// REST response for `coins/{id}` (only the fields the dashboard reads).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinDetailResponse {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: ImageResponse,
    #[serde(default)]
    pub description: HashMap<String, String>,
    #[serde(default)]
    pub market_data: Option<MarketDataResponse>,
}
