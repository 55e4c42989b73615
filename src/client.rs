//! High-level client — `CryptoClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::assistant::client::Assistant;
use crate::assistant::AssistantConfig;
use crate::domain::coin::client::Coins;
use crate::domain::coin::CoinDetail;
use crate::domain::compare::{ComparisonPipeline, PipelineConfig};
use crate::domain::market_chart::client::MarketCharts;
use crate::error::SdkError;
use crate::http::{CryptoHttp, DEFAULT_REQUEST_TIMEOUT};
use crate::shared::{CoinId, Currency};

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::assistant::client::Assistant as AssistantClient;
pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::market_chart::client::MarketCharts as MarketChartsClient;

/// The primary entry point for the CryptoSage SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.coins()`, `client.charts()`, etc.
pub struct CryptoClient {
    pub(crate) http: CryptoHttp,
    /// Coin detail cache: (id, currency) → (CoinDetail, fetched_at)
    pub(crate) coin_cache: Arc<RwLock<HashMap<(CoinId, Currency), (CoinDetail, Instant)>>>,
    /// Cache TTL for coin details
    pub(crate) coin_cache_ttl: Duration,
    pub(crate) pipeline_config: PipelineConfig,
    pub(crate) assistant_config: Option<AssistantConfig>,
}

impl CryptoClient {
    pub fn builder() -> CryptoClientBuilder {
        CryptoClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn charts(&self) -> MarketCharts<'_> {
        MarketCharts { client: self }
    }

    pub fn assistant(&self) -> Assistant<'_> {
        Assistant { client: self }
    }

    /// Create a comparison pipeline with its own state.
    ///
    /// Not embedded in `CryptoClient`: a pipeline's state belongs to one chart
    /// on screen, so its lifetime is managed by the application.
    pub fn comparison(&self) -> ComparisonPipeline<CryptoHttp> {
        ComparisonPipeline::new(self.http.clone(), self.pipeline_config.clone())
    }

    pub fn pipeline_config(&self) -> &PipelineConfig {
        &self.pipeline_config
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.coin_cache.write().await.clear();
    }
}

impl Clone for CryptoClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            coin_cache: self.coin_cache.clone(),
            coin_cache_ttl: self.coin_cache_ttl,
            pipeline_config: self.pipeline_config.clone(),
            assistant_config: self.assistant_config.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CryptoClientBuilder {
    base_url: String,
    coin_cache_ttl: Duration,
    request_timeout: Duration,
    pipeline: PipelineConfig,
    assistant: Option<AssistantConfig>,
}

impl Default for CryptoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            coin_cache_ttl: Duration::from_secs(60),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            pipeline: PipelineConfig::default(),
            assistant: None,
        }
    }
}

impl CryptoClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn coin_cache_ttl(mut self, ttl: Duration) -> Self {
        self.coin_cache_ttl = ttl;
        self
    }

    /// Per-request timeout. Ignored on WASM, where the browser owns timeouts.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn pipeline(mut self, config: PipelineConfig) -> Self {
        self.pipeline = config;
        self
    }

    /// Enable the chat assistant. The key is checked in `build()`.
    pub fn assistant(mut self, config: AssistantConfig) -> Self {
        self.assistant = Some(config);
        self
    }

    pub fn build(self) -> Result<CryptoClient, SdkError> {
        if let Some(config) = &self.assistant {
            config.validate()?;
        }
        Ok(CryptoClient {
            http: CryptoHttp::new(&self.base_url, self.request_timeout)?,
            coin_cache: Arc::new(RwLock::new(HashMap::new())),
            coin_cache_ttl: self.coin_cache_ttl,
            pipeline_config: self.pipeline,
            assistant_config: self.assistant,
        })
    }
}
