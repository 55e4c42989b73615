//! Comparison domain — two coins' price histories on one chart.
//!
//! Data flow: a [`ComparisonRequest`] is run by the pipeline (two retrying
//! fetches, primary first, with a pause in between), the committed
//! [`ComparisonResult`] lives in [`ComparisonState`], and [`assemble`] derives
//! a [`RenderableChart`] from it for the current [`ViewMode`].

pub mod assemble;
pub mod labels;
#[cfg(feature = "http")]
pub mod pipeline;
pub mod state;

use crate::domain::market_chart::TimeSeries;
use crate::shared::{CoinId, Currency, DayRange};
use serde::{Deserialize, Serialize};

pub use assemble::assemble;
pub use labels::format_label;
#[cfg(feature = "http")]
pub use pipeline::{ComparisonPipeline, PipelineConfig, RunOutcome};
pub use state::{ChartMemo, ComparisonState, FetchPhase, Settlement, ViewToggle};

/// The fetch key of one comparison. Changing any field means a new run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub primary: CoinId,
    pub secondary: Option<CoinId>,
    pub days: DayRange,
    pub currency: Currency,
}

impl ComparisonRequest {
    pub fn new(primary: impl Into<CoinId>, days: DayRange, currency: Currency) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            days,
            currency,
        }
    }

    pub fn with_secondary(mut self, secondary: impl Into<CoinId>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }
}

/// Committed output of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Never empty.
    pub primary: TimeSeries,
    pub secondary: Option<TimeSeries>,
}

impl ComparisonResult {
    /// Whether the secondary series (if any) shares the primary's timestamps.
    pub fn is_aligned(&self) -> bool {
        self.secondary
            .as_ref()
            .map_or(true, |s| self.primary.is_aligned_with(s))
    }
}

/// How series values are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Raw prices in the quote currency.
    #[default]
    Absolute,
    /// Percent change from the first sample of the window.
    Percentage,
}

impl ViewMode {
    /// Short unit name used in dataset labels.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::Absolute => "Price",
            Self::Percentage => "% Change",
        }
    }
}

/// Stable color assignment per series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
}

impl ColorRole {
    pub fn border(&self) -> &'static str {
        match self {
            Self::Primary => "#9370DB",
            Self::Secondary => "#4CAF50",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::Primary => "rgba(147, 112, 219, 0.2)",
            Self::Secondary => "rgba(76, 175, 80, 0.2)",
        }
    }
}

/// Y axis a dataset is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "y")]
    Left,
    #[serde(rename = "y1")]
    Right,
}

impl Axis {
    /// Renderer-side axis id.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Left => "y",
            Self::Right => "y1",
        }
    }
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub points: Vec<f64>,
    pub label: String,
    pub color: ColorRole,
    pub axis: Axis,
}

/// Axis presentation derived alongside the datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub primary_axis_title: String,
    pub show_secondary_axis: bool,
}

/// Render-ready chart input. An empty chart means "show the no-data placeholder".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderableChart {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
}

impl RenderableChart {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_serde() {
        let m: ViewMode = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(m, ViewMode::Percentage);
        assert_eq!(ViewMode::default(), ViewMode::Absolute);
    }

    #[test]
    fn test_axis_ids() {
        assert_eq!(serde_json::to_string(&Axis::Right).unwrap(), "\"y1\"");
        assert_eq!(Axis::Left.id(), "y");
    }

    #[test]
    fn test_request_builder() {
        let req = ComparisonRequest::new("bitcoin", DayRange::ONE_DAY, Currency::usd())
            .with_secondary("ethereum");
        assert_eq!(req.secondary, Some(CoinId::from("ethereum")));
    }

    #[test]
    fn test_result_alignment() {
        let primary = TimeSeries::from(vec![(1, 1.0), (2, 2.0)]);
        let aligned = ComparisonResult {
            primary: primary.clone(),
            secondary: Some(TimeSeries::from(vec![(1, 9.0), (2, 8.0)])),
        };
        let gap = ComparisonResult {
            primary: primary.clone(),
            secondary: Some(TimeSeries::from(vec![(1, 9.0)])),
        };
        let single = ComparisonResult {
            primary,
            secondary: None,
        };
        assert!(aligned.is_aligned());
        assert!(!gap.is_aligned());
        assert!(single.is_aligned());
    }
}
