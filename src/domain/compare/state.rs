//! Comparison state containers — app-owned, SDK-provided update logic.

use super::{assemble, ComparisonRequest, ComparisonResult, RenderableChart, ViewMode};
use chrono::FixedOffset;

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Error,
}

/// Where the current run is. Only the run holding the latest generation moves this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPhase {
    #[default]
    Idle,
    FetchingPrimary,
    /// Pausing between the two requests to stay under the provider's rate limit.
    Waiting,
    FetchingSecondary,
    Settled(Settlement),
}

impl FetchPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::FetchingPrimary | Self::Waiting | Self::FetchingSecondary
        )
    }
}

/// Absolute/percentage presentation switch. Flipping it never triggers a fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewToggle {
    mode: ViewMode,
}

impl ViewToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ViewMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn toggle(&mut self) -> ViewMode {
        self.mode = match self.mode {
            ViewMode::Absolute => ViewMode::Percentage,
            ViewMode::Percentage => ViewMode::Absolute,
        };
        self.mode
    }
}

/// State of one comparison chart.
///
/// Every run is tagged with a generation number. Starting a run or tearing the
/// chart down bumps the generation, and updates carrying an older generation
/// are ignored, so a slow superseded run can never overwrite a newer result.
///
/// The app owns instances of this type. The SDK provides update methods.
#[derive(Debug, Clone, Default)]
pub struct ComparisonState {
    generation: u64,
    request: Option<ComparisonRequest>,
    phase: FetchPhase,
    result: Option<ComparisonResult>,
    error: Option<String>,
    view: ViewToggle,
}

impl ComparisonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run for `request`. Returns the generation the run must present
    /// with every later update.
    pub fn begin(&mut self, request: ComparisonRequest) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.request = Some(request);
        self.phase = FetchPhase::FetchingPrimary;
        self.result = None;
        self.error = None;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Move a still-current run to `phase`. Returns `false` if the run is stale.
    pub fn advance(&mut self, generation: u64, phase: FetchPhase) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Commit a run's result. Returns `false` (and changes nothing) if stale.
    pub fn succeed(&mut self, generation: u64, result: ComparisonResult) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.result = Some(result);
        self.error = None;
        self.phase = FetchPhase::Settled(Settlement::Success);
        true
    }

    /// Record a run's failure. Returns `false` (and changes nothing) if stale.
    pub fn fail(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.result = None;
        self.error = Some(message.into());
        self.phase = FetchPhase::Settled(Settlement::Error);
        true
    }

    /// Invalidate any in-flight run, e.g. when the chart goes away.
    pub fn teardown(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = FetchPhase::Idle;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> Option<&ComparisonRequest> {
        self.request.as_ref()
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_in_flight()
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        self.result.as_ref()
    }

    /// User-facing error text of the last settled run.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view.set(mode);
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view.toggle()
    }

    /// Chart for the committed result in the current view mode.
    /// Empty while loading, after an error, or before the first run.
    pub fn chart(&self, offset: &FixedOffset) -> RenderableChart {
        match (&self.result, &self.request) {
            (Some(result), Some(request)) => assemble(result, self.view.mode(), request, offset),
            _ => RenderableChart::empty(),
        }
    }
}

/// Caches the last assembled chart, keyed by generation and view mode.
///
/// A fresh result or a mode flip rebuilds; anything else returns the cached chart.
#[derive(Debug, Clone)]
pub struct ChartMemo {
    offset: FixedOffset,
    key: Option<(u64, ViewMode, bool)>,
    chart: RenderableChart,
}

impl ChartMemo {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            key: None,
            chart: RenderableChart::empty(),
        }
    }

    pub fn get_or_assemble(&mut self, state: &ComparisonState) -> &RenderableChart {
        let key = (state.generation(), state.view_mode(), state.result().is_some());
        if self.key != Some(key) {
            self.chart = state.chart(&self.offset);
            self.key = Some(key);
        }
        &self.chart
    }
}
