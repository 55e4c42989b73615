//! Percentage-change normalization for relative comparison.

use super::{TimeSeries, TimeSeriesPoint};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NormalizeError {
    /// The first sample cannot serve as a divisor.
    #[error("cannot normalize against a first value of {0}")]
    DegenerateBaseline(f64),
}

/// Rewrite each value as its percent change from the first sample:
/// `(value - first) / first * 100`.
///
/// An empty series normalizes to an empty series. A zero or non-finite first
/// value is rejected rather than producing `NaN`/`inf` points.
pub fn normalize(series: &TimeSeries) -> Result<TimeSeries, NormalizeError> {
    let Some(first) = series.first() else {
        return Ok(TimeSeries::default());
    };

    let base = first.value;
    if base == 0.0 || !base.is_finite() {
        return Err(NormalizeError::DegenerateBaseline(base));
    }

    Ok(TimeSeries::new(
        series
            .points()
            .iter()
            .map(|p| TimeSeriesPoint::new(p.time, (p.value - base) / base * 100.0))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_point_is_zero() {
        for base in [0.0001, 1.0, 64250.5, -3.0] {
            let s = TimeSeries::from(vec![(0, base), (1, base * 2.0)]);
            let n = normalize(&s).unwrap();
            assert_eq!(n.points()[0].value, 0.0);
        }
    }

    #[test]
    fn test_percent_changes() {
        let s = TimeSeries::from(vec![(10, 200.0), (20, 250.0), (30, 150.0)]);
        let n = normalize(&s).unwrap();
        let values: Vec<_> = n.values().collect();
        assert_eq!(values, [0.0, 25.0, -25.0]);
        let times: Vec<_> = n.timestamps().collect();
        assert_eq!(times, [10, 20, 30]);
    }

    #[test]
    fn test_empty_series() {
        let n = normalize(&TimeSeries::default()).unwrap();
        assert!(n.is_empty());
    }

    #[test]
    fn test_zero_baseline_rejected() {
        let s = TimeSeries::from(vec![(0, 0.0), (1, 5.0)]);
        assert_eq!(normalize(&s), Err(NormalizeError::DegenerateBaseline(0.0)));
    }

    #[test]
    fn test_nan_baseline_rejected() {
        let s = TimeSeries::from(vec![(0, f64::NAN)]);
        assert!(normalize(&s).is_err());
    }
}
