//! Descriptive statistics over cleaned distance sequences.
//!
//! Thin reporting helpers. Callers must validity-filter distances first;
//! a single NaN would otherwise poison every aggregate below.

use std::collections::BTreeMap;
use std::fmt;

/// Descriptive summary of a distance sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Median.
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Number of values.
    pub n: usize,
}

impl Summary {
    /// Compute a summary, or `None` for an empty slice.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Summary> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        Some(Summary {
            mean,
            std: variance.sqrt(),
            median,
            min: sorted[0],
            max: sorted[n - 1],
            n,
        })
    }
}

impl fmt::Display for Summary {
    /// Renders `mean ± std (median [min-max]), n: count`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} ± {:.2} ({:.2} [{:.2}-{:.2}]), n: {}",
            self.mean, self.std, self.median, self.min, self.max, self.n
        )
    }
}

/// Integer-scaled histogram binning for distance values.
///
/// Distances are often well below 1, so each value is scaled by `n_bins`
/// and truncated to an integer bin. Returns `(bin, count)` pairs in
/// ascending bin order.
#[must_use]
pub fn histogram(values: &[f64], n_bins: usize) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for value in values {
        let bin = (value * n_bins as f64) as i64;
        *counts.entry(bin).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_known_values() {
        let summary = Summary::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((summary.mean - 2.5).abs() < 1e-12);
        assert!((summary.median - 2.5).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.n, 4);
        // Population std of 1..4 is sqrt(1.25).
        assert!((summary.std - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summary_odd_median() {
        let summary = Summary::from_values(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(summary.median, 2.0);
    }

    #[test]
    fn test_summary_empty_is_none() {
        assert!(Summary::from_values(&[]).is_none());
    }

    #[test]
    fn test_summary_display_format() {
        let summary = Summary::from_values(&[0.5, 0.5]).unwrap();
        assert_eq!(summary.to_string(), "0.50 ± 0.00 (0.50 [0.50-0.50]), n: 2");
    }

    #[test]
    fn test_histogram_bins() {
        let bins = histogram(&[0.01, 0.02, 0.5, 0.99], 30);
        // 0.01*30=0.3 → bin 0, 0.02*30=0.6 → bin 0, 0.5*30=15, 0.99*30=29.7 → 29.
        assert_eq!(bins, vec![(0, 2), (15, 1), (29, 1)]);
    }

    #[test]
    fn test_histogram_empty() {
        assert!(histogram(&[], 10).is_empty());
    }
}
