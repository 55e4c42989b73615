//! Coin domain — market listings, coin detail, dashboard listing state.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::{CoinId, Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use state::{CoinListing, SortKey};

/// One coin's market snapshot, as shown in the grid and list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: Option<u32>,
    pub total_volume: f64,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: f64,
    pub price_change_percentage_24h: f64,
}

impl CoinMarket {
    pub fn is_gaining(&self) -> bool {
        self.price_change_percentage_24h >= 0.0
    }

    /// Case-insensitive match on name or symbol. `query` must already be lowercased.
    pub(crate) fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.symbol.to_lowercase().contains(query)
    }
}

/// Coin detail page data, with amounts in one quote currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub image: Option<String>,
    /// English description (may contain provider HTML).
    pub description: String,
    pub currency: Currency,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    /// Absolute 24h change in `currency`.
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("coin response has an empty id")]
    MissingId,
    #[error("coin {0} has an empty name")]
    MissingName(String),
}
