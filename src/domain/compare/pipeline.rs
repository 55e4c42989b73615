//! Comparison pipeline — rate-limited, generation-guarded dual fetch.
//!
//! One run fetches the primary coin, pauses, then fetches the secondary coin.
//! Each fetch goes through the price-history retry policy. Every state write
//! is tagged with the run's generation, so only the newest run can commit.

use super::state::{ComparisonState, FetchPhase};
use super::{ComparisonRequest, ComparisonResult, RenderableChart, ViewMode};
use crate::domain::market_chart::{MarketChartSource, TimeSeries};
use crate::error::{ComparisonError, HttpError};
use crate::http::{retry_with, RetryConfig};
use crate::shared::CoinId;
use async_lock::RwLock;
use chrono::{FixedOffset, Offset, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Pause between the primary and secondary requests.
pub const DEFAULT_INTER_REQUEST_DELAY: Duration = Duration::from_millis(2000);

/// Pipeline tuning.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Retry policy for each single-coin fetch.
    pub retry: RetryConfig,
    /// Pause between the two fetches of one run.
    pub inter_request_delay: Duration,
    /// Offset used when formatting chart labels.
    pub utc_offset: FixedOffset,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::price_history(),
            inter_request_delay: DEFAULT_INTER_REQUEST_DELAY,
            utc_offset: Utc.fix(),
        }
    }
}

/// How one `run` ended, from the caller's point of view.
#[derive(Debug)]
pub enum RunOutcome {
    /// The run committed this result.
    Success(ComparisonResult),
    /// The run committed this error.
    Failed(ComparisonError),
    /// A newer run (or teardown) took over; nothing was written.
    Superseded,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Drives comparison runs against a [`MarketChartSource`] and owns the shared
/// [`ComparisonState`].
///
/// Cheap to clone; clones share the same state, so a run started from one
/// clone supersedes runs started from any other.
#[derive(Clone)]
pub struct ComparisonPipeline<S> {
    source: S,
    config: PipelineConfig,
    state: Arc<RwLock<ComparisonState>>,
}

impl<S: MarketChartSource> ComparisonPipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self::with_state(source, config, Arc::new(RwLock::new(ComparisonState::new())))
    }

    /// Build a pipeline over an existing shared state.
    pub fn with_state(
        source: S,
        config: PipelineConfig,
        state: Arc<RwLock<ComparisonState>>,
    ) -> Self {
        Self {
            source,
            config,
            state,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> &Arc<RwLock<ComparisonState>> {
        &self.state
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> ComparisonState {
        self.state.read().await.clone()
    }

    /// Fetch and commit one comparison.
    ///
    /// Starting a run supersedes any run still in flight.
    pub async fn run(&self, request: ComparisonRequest) -> RunOutcome {
        let generation = self.state.write().await.begin(request.clone());
        tracing::info!(
            generation,
            primary = %request.primary,
            secondary = ?request.secondary,
            days = request.days.days(),
            currency = %request.currency,
            "Starting comparison run"
        );

        let primary = match self.fetch_prices(&request.primary, &request).await {
            Ok(series) if series.is_empty() => {
                let err = ComparisonError::EmptyPrimary(request.primary.to_string());
                return self.settle_error(generation, err).await;
            }
            Ok(series) => series,
            Err(err) => return self.settle_error(generation, err).await,
        };

        let secondary = match &request.secondary {
            None => None,
            Some(id) => {
                if !self.advance(generation, FetchPhase::Waiting).await {
                    return RunOutcome::Superseded;
                }
                futures_timer::Delay::new(self.config.inter_request_delay).await;
                if !self.advance(generation, FetchPhase::FetchingSecondary).await {
                    return RunOutcome::Superseded;
                }

                match self.fetch_prices(id, &request).await {
                    Ok(series) if series.is_empty() => {
                        tracing::warn!(coin = %id, "Secondary coin returned no prices");
                        None
                    }
                    Ok(series) => Some(series),
                    Err(ComparisonError::InvalidPayload { reason, .. }) => {
                        tracing::warn!(
                            coin = %id,
                            %reason,
                            "Secondary coin returned a malformed payload"
                        );
                        None
                    }
                    Err(err) => return self.settle_error(generation, err).await,
                }
            }
        };

        let result = ComparisonResult { primary, secondary };
        if !result.is_aligned() {
            tracing::warn!(
                generation,
                "Primary and secondary series have different sample timestamps"
            );
        }

        if self.state.write().await.succeed(generation, result.clone()) {
            tracing::info!(generation, points = result.primary.len(), "Comparison run settled");
            RunOutcome::Success(result)
        } else {
            tracing::debug!(generation, "Dropping superseded comparison result");
            RunOutcome::Superseded
        }
    }

    /// Switch the presentation mode. Never refetches.
    pub async fn set_view_mode(&self, mode: ViewMode) {
        self.state.write().await.set_view_mode(mode);
    }

    pub async fn toggle_view_mode(&self) -> ViewMode {
        self.state.write().await.toggle_view_mode()
    }

    /// Chart for the committed result in the current view mode.
    pub async fn chart(&self) -> RenderableChart {
        self.state.read().await.chart(&self.config.utc_offset)
    }

    /// Invalidate any in-flight run.
    pub async fn teardown(&self) {
        self.state.write().await.teardown();
    }

    async fn fetch_prices(
        &self,
        coin: &CoinId,
        request: &ComparisonRequest,
    ) -> Result<TimeSeries, ComparisonError> {
        let target = format!("market_chart/{}", coin);
        retry_with(&self.config.retry, &target, || {
            self.source.market_chart(coin, request.days, &request.currency)
        })
        .await
        .map(|chart| chart.prices)
        .map_err(|source| match source {
            HttpError::Decode(reason) => ComparisonError::InvalidPayload {
                coin: coin.to_string(),
                reason,
            },
            source => ComparisonError::Fetch {
                coin: coin.to_string(),
                source,
            },
        })
    }

    async fn advance(&self, generation: u64, phase: FetchPhase) -> bool {
        let advanced = self.state.write().await.advance(generation, phase);
        if !advanced {
            tracing::debug!(generation, ?phase, "Comparison run superseded");
        }
        advanced
    }

    async fn settle_error(&self, generation: u64, err: ComparisonError) -> RunOutcome {
        if self.state.write().await.fail(generation, err.user_message()) {
            tracing::error!(generation, error = %err, "Comparison run failed");
            RunOutcome::Failed(err)
        } else {
            tracing::debug!(generation, error = %err, "Dropping superseded comparison error");
            RunOutcome::Superseded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compare::Settlement;
    use crate::domain::market_chart::MarketChart;
    use crate::shared::{Currency, DayRange};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Serves canned responses per coin and records every call.
    #[derive(Default)]
    struct Canned {
        calls: Mutex<Vec<String>>,
        failures_left: AtomicUsize,
    }

    impl Canned {
        fn failing(times: usize) -> Self {
            Self {
                failures_left: AtomicUsize::new(times),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MarketChartSource for Canned {
        async fn market_chart(
            &self,
            coin: &CoinId,
            _days: DayRange,
            _currency: &Currency,
        ) -> Result<MarketChart, HttpError> {
            self.calls.lock().unwrap().push(coin.to_string());
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(HttpError::ServerError {
                    status: 500,
                    body: "flaky".to_string(),
                });
            }
            let prices = match coin.as_str() {
                "malformed" => {
                    return Err(HttpError::Decode(
                        "invalid type: null, expected a sequence".to_string(),
                    ))
                }
                "empty" => TimeSeries::default(),
                "bitcoin" => TimeSeries::from(vec![(0, 100.0), (1, 110.0)]),
                _ => TimeSeries::from(vec![(0, 10.0), (1, 9.0)]),
            };
            Ok(MarketChart {
                prices,
                ..Default::default()
            })
        }
    }

    fn instant_config() -> PipelineConfig {
        PipelineConfig {
            retry: RetryConfig::fixed(3, Duration::ZERO),
            inter_request_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    fn request(primary: &str) -> ComparisonRequest {
        ComparisonRequest::new(primary, DayRange::THIRTY_DAYS, Currency::inr())
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.inter_request_delay, Duration::from_millis(2000));
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
    }

    #[tokio::test]
    async fn test_run_fetches_primary_then_secondary() {
        let source = Arc::new(Canned::default());
        let pipeline = ComparisonPipeline::new(source.clone(), instant_config());

        let outcome = pipeline
            .run(request("bitcoin").with_secondary("ethereum"))
            .await;
        assert!(outcome.is_success());
        assert_eq!(source.calls(), ["bitcoin", "ethereum"]);

        let state = pipeline.snapshot().await;
        assert_eq!(state.phase(), FetchPhase::Settled(Settlement::Success));
        assert!(state.result().unwrap().secondary.is_some());
    }

    #[tokio::test]
    async fn test_empty_primary_skips_secondary() {
        let source = Arc::new(Canned::default());
        let pipeline = ComparisonPipeline::new(source.clone(), instant_config());

        let outcome = pipeline.run(request("empty").with_secondary("ethereum")).await;
        assert!(matches!(
            outcome,
            RunOutcome::Failed(ComparisonError::EmptyPrimary(_))
        ));
        assert_eq!(source.calls(), ["empty"]);

        let state = pipeline.snapshot().await;
        assert_eq!(
            state.error(),
            Some("No chart data available for the selected coin.")
        );
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_empty_secondary_is_absent() {
        let pipeline = ComparisonPipeline::new(Canned::default(), instant_config());
        match pipeline.run(request("bitcoin").with_secondary("empty")).await {
            RunOutcome::Success(result) => assert!(result.secondary.is_none()),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_primary_fails_without_retrying() {
        let source = Arc::new(Canned::default());
        let pipeline = ComparisonPipeline::new(source.clone(), instant_config());

        let outcome = pipeline
            .run(request("malformed").with_secondary("ethereum"))
            .await;
        assert!(matches!(
            outcome,
            RunOutcome::Failed(ComparisonError::InvalidPayload { ref coin, .. })
                if coin == "malformed"
        ));
        assert_eq!(source.calls(), ["malformed"]);
        assert_eq!(
            pipeline.snapshot().await.error(),
            Some("No chart data available for the selected coin.")
        );
    }

    #[tokio::test]
    async fn test_malformed_secondary_is_absent() {
        let source = Arc::new(Canned::default());
        let pipeline = ComparisonPipeline::new(source.clone(), instant_config());

        match pipeline.run(request("bitcoin").with_secondary("malformed")).await {
            RunOutcome::Success(result) => assert!(result.secondary.is_none()),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(source.calls(), ["bitcoin", "malformed"]);
    }

    #[tokio::test]
    async fn test_flaky_source_recovers_within_budget() {
        let source = Arc::new(Canned::failing(3));
        let pipeline = ComparisonPipeline::new(source.clone(), instant_config());

        assert!(pipeline.run(request("bitcoin")).await.is_success());
        assert_eq!(source.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_persistent_failure_reports_error() {
        let source = Arc::new(Canned::failing(usize::MAX));
        let pipeline = ComparisonPipeline::new(source.clone(), instant_config());

        let outcome = pipeline.run(request("bitcoin").with_secondary("ethereum")).await;
        match outcome {
            RunOutcome::Failed(ComparisonError::Fetch { coin, source: err }) => {
                assert_eq!(coin, "bitcoin");
                assert!(matches!(
                    err,
                    HttpError::MaxRetriesExceeded { attempts: 4, .. }
                ));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(source.calls().len(), 4);
        assert_eq!(
            pipeline.snapshot().await.error(),
            Some("Failed to load chart data. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_view_mode_change_does_not_fetch() {
        let source = Arc::new(Canned::default());
        let pipeline = ComparisonPipeline::new(source.clone(), instant_config());
        pipeline.run(request("bitcoin")).await;

        let absolute = pipeline.chart().await;
        pipeline.set_view_mode(ViewMode::Percentage).await;
        let percent = pipeline.chart().await;

        assert_eq!(source.calls().len(), 1);
        assert_eq!(absolute.datasets[0].points, [100.0, 110.0]);
        assert_eq!(percent.datasets[0].points[1].round(), 10.0);
    }

    #[tokio::test]
    async fn test_teardown_leaves_idle() {
        let pipeline = ComparisonPipeline::new(Canned::default(), instant_config());
        pipeline.run(request("bitcoin")).await;
        pipeline.teardown().await;
        assert_eq!(pipeline.snapshot().await.phase(), FetchPhase::Idle);
    }
}
