//! Chart assembly: committed series + view mode → renderer input.

use super::labels::format_label;
use super::{
    Axis, ChartOptions, ColorRole, ComparisonRequest, ComparisonResult, Dataset, RenderableChart,
    ViewMode,
};
use crate::domain::market_chart::{normalize, TimeSeries};
use chrono::FixedOffset;

const PERCENT_AXIS_TITLE: &str = "Percentage Change (%)";

/// Build the renderable chart for `result` in `mode`.
///
/// Pure: the same inputs always produce the same chart. Labels come from the
/// primary series only; a secondary series is plotted against them as-is, so
/// differently-sampled series will not line up (a warning is logged).
///
/// Returns an empty chart when the primary series is empty or cannot be
/// normalized. A secondary series that cannot be normalized is left out.
pub fn assemble(
    result: &ComparisonResult,
    mode: ViewMode,
    request: &ComparisonRequest,
    offset: &FixedOffset,
) -> RenderableChart {
    if result.primary.is_empty() {
        return RenderableChart::empty();
    }

    if !result.is_aligned() {
        tracing::warn!(
            primary = %request.primary,
            secondary = ?request.secondary,
            "Comparison series are sampled differently; datasets share the primary labels"
        );
    }

    let Some(primary) = present(&result.primary, mode, request.primary.as_str()) else {
        return RenderableChart::empty();
    };

    let labels = result
        .primary
        .timestamps()
        .map(|t| format_label(t, request.days, offset))
        .collect();

    let mut datasets = vec![dataset(
        &primary,
        request.primary.as_str(),
        mode,
        request,
        ColorRole::Primary,
        Axis::Left,
    )];

    let secondary_id = request
        .secondary
        .as_ref()
        .map(|id| id.as_str())
        .unwrap_or("secondary");
    let secondary = result
        .secondary
        .as_ref()
        .filter(|s| !s.is_empty())
        .and_then(|s| present(s, mode, secondary_id));

    if let Some(secondary) = secondary {
        let axis = match mode {
            ViewMode::Absolute => Axis::Right,
            ViewMode::Percentage => Axis::Left,
        };
        datasets.push(dataset(
            &secondary,
            secondary_id,
            mode,
            request,
            ColorRole::Secondary,
            axis,
        ));
    }

    let options = ChartOptions {
        primary_axis_title: match mode {
            ViewMode::Absolute => request.primary.to_string(),
            ViewMode::Percentage => PERCENT_AXIS_TITLE.to_string(),
        },
        show_secondary_axis: datasets.iter().any(|d| d.axis == Axis::Right),
    };

    RenderableChart {
        labels,
        datasets,
        options,
    }
}

/// The series as it should be plotted in `mode`, or `None` if it cannot be.
fn present(series: &TimeSeries, mode: ViewMode, coin: &str) -> Option<TimeSeries> {
    match mode {
        ViewMode::Absolute => Some(series.clone()),
        ViewMode::Percentage => match normalize(series) {
            Ok(normalized) => Some(normalized),
            Err(e) => {
                tracing::warn!(coin, error = %e, "Dropping series from percentage view");
                None
            }
        },
    }
}

fn dataset(
    series: &TimeSeries,
    coin: &str,
    mode: ViewMode,
    request: &ComparisonRequest,
    color: ColorRole,
    axis: Axis,
) -> Dataset {
    Dataset {
        points: series.values().collect(),
        label: format!(
            "{} {} (Past {} Days)",
            coin,
            mode.unit_label(),
            request.days
        ),
        color,
        axis,
    }
}
