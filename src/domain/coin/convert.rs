//! Conversions from wire types to domain types for coins.

use super::wire::{CoinDetailResponse, CoinMarketResponse, CurrencyAmounts};
use super::{CoinDetail, CoinMarket, ValidationError};
use crate::shared::{CoinId, Currency};

impl TryFrom<CoinMarketResponse> for CoinMarket {
    type Error = ValidationError;

    fn try_from(r: CoinMarketResponse) -> Result<Self, Self::Error> {
        if r.id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        Ok(Self {
            id: CoinId::from(r.id),
            symbol: r.symbol,
            name: r.name,
            image: r.image,
            current_price: r.current_price.unwrap_or_default(),
            market_cap: r.market_cap.unwrap_or_default(),
            market_cap_rank: r.market_cap_rank,
            total_volume: r.total_volume.unwrap_or_default(),
            high_24h: r.high_24h,
            low_24h: r.low_24h,
            price_change_24h: r.price_change_24h.unwrap_or_default(),
            price_change_percentage_24h: r.price_change_percentage_24h.unwrap_or_default(),
        })
    }
}

fn amount_in(amounts: &CurrencyAmounts, currency: &Currency) -> Option<f64> {
    amounts.get(currency.as_str()).copied().flatten()
}

impl CoinDetail {
    /// Build a detail view from `coins/{id}`, picking amounts in `currency`.
    pub fn from_response(
        r: CoinDetailResponse,
        currency: &Currency,
    ) -> Result<Self, ValidationError> {
        if r.id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        if r.name.trim().is_empty() {
            return Err(ValidationError::MissingName(r.id));
        }

        let market = r.market_data.unwrap_or_default();
        Ok(Self {
            id: CoinId::from(r.id),
            name: r.name,
            symbol: r.symbol,
            image: r.image.large.or(r.image.small).or(r.image.thumb),
            description: r.description.get("en").cloned().unwrap_or_default(),
            currency: currency.clone(),
            current_price: amount_in(&market.current_price, currency),
            market_cap: amount_in(&market.market_cap, currency),
            total_volume: amount_in(&market.total_volume, currency),
            high_24h: amount_in(&market.high_24h, currency),
            low_24h: amount_in(&market.low_24h, currency),
            price_change_24h: amount_in(&market.price_change_24h_in_currency, currency),
            price_change_percentage_24h: market.price_change_percentage_24h,
        })
    }
}
