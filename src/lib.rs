//! # CryptoSage SDK
//!
//! Market data, asset comparison charts, a persisted watchlist and a chat
//! assistant for the CryptoSage dashboard. Supports native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Newtypes, domain models, normalization, chart assembly (always available, WASM-safe)
//! 2. **HTTP API** — `CryptoHttp` with per-endpoint retry policies, plus the
//!    rate-limited, generation-guarded comparison pipeline built on it
//! 3. **High-Level Client** — `CryptoClient` with nested sub-clients and caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptosage_sdk::prelude::*;
//!
//! let client = CryptoClient::builder().build()?;
//!
//! let coins = client.coins().markets(&Currency::usd(), None, None).await?;
//!
//! let pipeline = client.comparison();
//! let request = ComparisonRequest::new("bitcoin", DayRange::ONE_DAY, Currency::usd())
//!     .with_secondary("ethereum");
//! pipeline.run(request).await;
//! pipeline.set_view_mode(ViewMode::Percentage).await;
//! let chart = pipeline.chart().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Chat assistant: prompts, fallback answers, completion client.
pub mod assistant;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `CryptoClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{CoinId, Currency, DayRange};

    // Domain types — coins
    pub use crate::domain::coin::{CoinDetail, CoinListing, CoinMarket, SortKey};

    // Domain types — market chart
    pub use crate::domain::market_chart::{
        normalize, MarketChart, MarketChartSource, NormalizeError, TimeSeries, TimeSeriesPoint,
    };

    // Domain types — comparison
    pub use crate::domain::compare::{
        assemble, format_label, Axis, ChartMemo, ColorRole, ComparisonRequest, ComparisonResult,
        ComparisonState, Dataset, FetchPhase, RenderableChart, Settlement, ViewMode, ViewToggle,
    };
    #[cfg(feature = "http")]
    pub use crate::domain::compare::{ComparisonPipeline, PipelineConfig, RunOutcome};

    // Domain types — watchlist
    pub use crate::domain::watchlist::{MemoryStore, Watchlist, WatchlistStore};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::domain::watchlist::FileStore;

    // Assistant
    pub use crate::assistant::{AssistantConfig, ChartSummary, ChatMessage, ChatRole};

    // Errors
    pub use crate::error::{ComparisonError, HttpError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AssistantClient, CoinsClient, CryptoClient, CryptoClientBuilder, MarketChartsClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
