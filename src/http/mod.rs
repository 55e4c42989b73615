//! HTTP client layer — `CryptoHttp` with per-request retry policies.

pub mod client;
pub mod retry;

pub use client::{CryptoHttp, DEFAULT_REQUEST_TIMEOUT};
pub use retry::{retry_with, RetryConfig, RetryPolicy};
