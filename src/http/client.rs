//! Low-level HTTP client — `CryptoHttp`.
//!
//! Builds requests, maps status codes onto [`HttpError`], and applies the
//! per-call retry policy. Sub-clients in `domain/<name>/client.rs` own the
//! URLs; this type only knows how to move JSON.

use crate::error::HttpError;
use crate::http::retry::{retry_with, RetryConfig, RetryPolicy};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default per-request timeout on native targets.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the market-data REST API.
#[derive(Clone)]
pub struct CryptoHttp {
    base_url: String,
    client: Client,
}

impl CryptoHttp {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(request_timeout)
                .pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = request_timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, &[], retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, String)],
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), headers, retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        headers: &[(&str, String)],
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body, headers).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c,
        };

        retry_with(&config, url, || self.do_request(&method, url, body, headers)).await
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
        headers: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let mut req = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            let text = resp.text().await?;
            return serde_json::from_str(&text).map_err(|e| HttpError::Decode(e.to_string()));
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        Err(status_to_error(status_code, body_text, retry_after_ms))
    }
}

/// Map a non-success status onto the error taxonomy.
fn status_to_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        401 | 403 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        408 => HttpError::Timeout,
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}
