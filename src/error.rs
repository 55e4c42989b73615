//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Comparison error: {0}")]
    Comparison(#[from] ComparisonError),

    #[error("Watchlist error: {0}")]
    Watchlist(#[from] WatchlistError),

    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Failed to decode response body: {0}")]
    Decode(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Terminal failures of one comparison run.
#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error("No price data returned for {0}")]
    EmptyPrimary(String),

    #[error("Price history for {coin} is malformed: {reason}")]
    InvalidPayload { coin: String, reason: String },

    #[error("Failed to fetch price history for {coin}: {source}")]
    Fetch {
        coin: String,
        #[source]
        source: HttpError,
    },
}

impl ComparisonError {
    /// Message suitable for an inline error panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyPrimary(_) | Self::InvalidPayload { .. } => {
                "No chart data available for the selected coin."
            }
            Self::Fetch { .. } => "Failed to load chart data. Please try again later.",
        }
    }
}

/// Watchlist persistence errors.
#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored watchlist is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Watchlist store lock poisoned")]
    Poisoned,
}

/// Chat assistant errors.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("Invalid API key format, expected prefix '{0}'")]
    InvalidApiKey(&'static str),

    #[error("Chat completion returned no choices")]
    EmptyCompletion,

    #[error("Chat request failed: {0}")]
    Http(#[from] HttpError),
}
