//! Market chart sub-client — historical price/market-cap/volume series.

use super::wire::MarketChartResponse;
use super::{MarketChart, MarketChartSource};
use crate::client::CryptoClient;
use crate::error::{HttpError, SdkError};
use crate::http::{CryptoHttp, RetryPolicy};
use crate::shared::{CoinId, Currency, DayRange};

pub(crate) fn market_chart_url(
    base_url: &str,
    coin: &CoinId,
    days: DayRange,
    currency: &Currency,
) -> String {
    format!(
        "{}/coins/{}/market_chart?vs_currency={}&days={}",
        base_url,
        urlencoding::encode(coin.as_str()),
        urlencoding::encode(currency.as_str()),
        days
    )
}

/// Sub-client for historical chart queries.
pub struct MarketCharts<'a> {
    pub(crate) client: &'a CryptoClient,
}

impl<'a> MarketCharts<'a> {
    /// Fetch one coin's history with the fixed-delay price-history retry policy.
    pub async fn get(
        &self,
        coin: &CoinId,
        days: DayRange,
        currency: &Currency,
    ) -> Result<MarketChart, SdkError> {
        let http = &self.client.http;
        let url = market_chart_url(http.base_url(), coin, days, currency);
        let retry = RetryPolicy::Custom(self.client.pipeline_config.retry.clone());
        let resp: MarketChartResponse = http.get(&url, retry).await?;
        Ok(resp.into())
    }
}

impl MarketChartSource for CryptoHttp {
    async fn market_chart(
        &self,
        coin: &CoinId,
        days: DayRange,
        currency: &Currency,
    ) -> Result<MarketChart, HttpError> {
        let url = market_chart_url(self.base_url(), coin, days, currency);
        tracing::debug!(coin = %coin, days = days.days(), currency = %currency, "Fetching market chart");
        let resp: MarketChartResponse = self.get(&url, RetryPolicy::None).await?;
        Ok(resp.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_chart_url() {
        let url = market_chart_url(
            "https://api.coingecko.com/api/v3",
            &CoinId::from("bitcoin"),
            DayRange::NINETY_DAYS,
            &Currency::usd(),
        );
        assert_eq!(
            url,
            "https://api.coingecko.com/api/v3/coins/bitcoin/market_chart?vs_currency=usd&days=90"
        );
    }
}
