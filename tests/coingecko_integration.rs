//! Integration tests against the live market-data API.
//!
//! These tests hit the public CoinGecko endpoints (and, when
//! `CRYPTOSAGE_AI_API_KEY` is set in `.env`, the chat completion endpoint).
//!
//! All tests are `#[ignore]` because they require network access.
//!
//! Run with:
//! ```bash
//! cargo test --features native --test coingecko_integration -- --ignored
//! ```

#![cfg(feature = "native")]

use std::time::Duration;

use cryptosage_sdk::assistant::{AssistantConfig, ChartSummary};
use cryptosage_sdk::client::CryptoClient;
use cryptosage_sdk::domain::compare::{ComparisonRequest, RunOutcome, ViewMode};
use cryptosage_sdk::shared::{CoinId, Currency, DayRange};

fn client() -> CryptoClient {
    dotenvy::dotenv().ok();
    let mut builder = CryptoClient::builder().request_timeout(Duration::from_secs(20));
    if let Ok(config) = AssistantConfig::from_env() {
        builder = builder.assistant(config);
    }
    builder.build().expect("client should build")
}

#[tokio::test]
#[ignore]
async fn test_markets_listing() {
    let coins = client()
        .coins()
        .markets(&Currency::usd(), None, Some(20))
        .await
        .expect("markets should load");
    assert!(!coins.is_empty());
    assert!(coins.iter().any(|c| c.id.as_str() == "bitcoin"));
}

#[tokio::test]
#[ignore]
async fn test_coin_detail_is_cached() {
    let client = client();
    let id = CoinId::from("bitcoin");
    let first = client.coins().get(&id, &Currency::inr()).await.expect("detail");
    let second = client.coins().get(&id, &Currency::inr()).await.expect("cached detail");
    assert_eq!(first.name, "Bitcoin");
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore]
async fn test_live_comparison_run() {
    let pipeline = client().comparison();
    let request = ComparisonRequest::new("bitcoin", DayRange::ONE_DAY, Currency::usd())
        .with_secondary("ethereum");

    match pipeline.run(request).await {
        RunOutcome::Success(result) => {
            assert!(!result.primary.is_empty());
            assert!(result.secondary.is_some());
        }
        other => panic!("comparison failed: {other:?}"),
    }

    pipeline.set_view_mode(ViewMode::Percentage).await;
    let chart = pipeline.chart().await;
    assert_eq!(chart.datasets[0].points[0], 0.0);
}

#[tokio::test]
#[ignore]
async fn test_chart_analysis() {
    let client = client();
    let chart = client
        .charts()
        .get(&CoinId::from("bitcoin"), DayRange::THIRTY_DAYS, &Currency::usd())
        .await
        .expect("chart should load");
    let summary = ChartSummary::from_chart(&chart, None);
    let reply = client
        .assistant()
        .analyze_chart(&summary, "Bitcoin", "30 Days")
        .await;
    assert!(!reply.is_empty());
}
