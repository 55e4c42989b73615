//! Coins sub-client — market listings, trending, coin detail with TTL cache.

use super::wire::{CoinDetailResponse, CoinMarketResponse};
use super::{CoinDetail, CoinMarket};
use crate::client::CryptoClient;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::{CoinId, Currency};
use std::time::Instant;

/// Listing page size used by the dashboard.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Number of coins in the trending carousel.
pub const TRENDING_COUNT: u32 = 10;

/// Sub-client for coin listing and detail operations.
pub struct Coins<'a> {
    pub(crate) client: &'a CryptoClient,
}

impl<'a> Coins<'a> {
    /// Coins ordered by market cap, descending.
    pub async fn markets(
        &self,
        currency: &Currency,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<CoinMarket>, SdkError> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}&sparkline=false",
            self.client.http.base_url(),
            urlencoding::encode(currency.as_str()),
            per_page.unwrap_or(DEFAULT_PER_PAGE),
            page.unwrap_or(1).max(1),
        );
        self.fetch_listing(&url).await
    }

    /// Top coins by the provider's own ranking, with 24h change.
    pub async fn trending(&self, currency: &Currency) -> Result<Vec<CoinMarket>, SdkError> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=gecko_desc&per_page={}&page=1&sparkline=false&price_change_percentage=24h",
            self.client.http.base_url(),
            urlencoding::encode(currency.as_str()),
            TRENDING_COUNT,
        );
        self.fetch_listing(&url).await
    }

    /// Get a coin's detail in `currency`. Uses TTL cache.
    pub async fn get(&self, id: &CoinId, currency: &Currency) -> Result<CoinDetail, SdkError> {
        let key = (id.clone(), currency.clone());
        {
            let cache = self.client.coin_cache.read().await;
            if let Some((detail, fetched_at)) = cache.get(&key) {
                if fetched_at.elapsed() < self.client.coin_cache_ttl {
                    return Ok(detail.clone());
                }
            }
        }

        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&community_data=false&developer_data=false",
            self.client.http.base_url(),
            urlencoding::encode(id.as_str()),
        );
        let resp: CoinDetailResponse = self
            .client
            .http
            .get(&url, RetryPolicy::Idempotent)
            .await?;
        let detail = CoinDetail::from_response(resp, currency)
            .map_err(|e| SdkError::Validation(e.to_string()))?;

        self.client
            .coin_cache
            .write()
            .await
            .insert(key, (detail.clone(), Instant::now()));
        Ok(detail)
    }

    /// Invalidate every cached detail for a coin.
    pub async fn invalidate(&self, id: &CoinId) {
        self.client
            .coin_cache
            .write()
            .await
            .retain(|(cached_id, _), _| cached_id != id);
    }

    /// Clear the coin detail cache.
    pub async fn clear_cache(&self) {
        self.client.coin_cache.write().await.clear();
    }

    async fn fetch_listing(&self, url: &str) -> Result<Vec<CoinMarket>, SdkError> {
        let rows: Vec<CoinMarketResponse> = self
            .client
            .http
            .get(url, RetryPolicy::Idempotent)
            .await?;

        let mut coins = Vec::with_capacity(rows.len());
        for row in rows {
            match CoinMarket::try_from(row) {
                Ok(coin) => coins.push(coin),
                Err(e) => tracing::warn!(error = %e, "Skipping malformed listing row"),
            }
        }
        Ok(coins)
    }
}
