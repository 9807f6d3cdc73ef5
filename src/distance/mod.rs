//! Distance computation over pooled embeddings and token sequences.
//!
//! Three independent operations, no shared mutable state:
//!
//! 1. [`cosine_distance`] between two pooled sentence vectors.
//! 2. [`word_mover_distance`] between two tokenized sentences, delegated to
//!    an injected [`TransportDistance`] capability.
//! 3. [`pairwise_distance`] over a matrix of vectors, strictly-lower
//!    triangle only, validity-filtered.
//!
//! The pairwise paths are O(N²) in pairs and O(N²·F) in raw computation,
//! intended for offline batch evaluation, not real-time use. With the
//! `parallel` feature the pair loop fans out over rayon; pairs are
//! independent and the model is shared read-only, so no locking is needed.

mod transport;

pub use transport::{SinkhornTransport, TransportDistance};

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::filter::{filter_distances, is_valid_distance};
use crate::{Error, Result};

/// Named metric for batched pairwise distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// 1 − cosine similarity.
    Cosine,
    /// Euclidean (L2) distance.
    Euclidean,
}

impl Metric {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Cosine => "cosine",
            Metric::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(Metric::Cosine),
            "euclidean" => Ok(Metric::Euclidean),
            other => Err(Error::invalid_input(format!("unknown metric {other:?}"))),
        }
    }
}

fn cosine_from_pairs(pairs: impl Iterator<Item = (f32, f32)>) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (a, b) in pairs {
        let (a, b) = (f64::from(a), f64::from(b));
        dot += a * b;
        norm_a += a * a;
        norm_b += b * b;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        // Undefined for a zero-norm vector; the sentinel is caught by the
        // validity filter downstream.
        return f64::NAN;
    }
    let distance = 1.0 - dot / denom;
    // Identical vectors land within float noise of zero; snap so duplicate
    // pairs read as exact zeros and the strict >0 filter excludes them.
    if distance.abs() < 1e-12 {
        0.0
    } else {
        distance.max(0.0)
    }
}

fn euclidean_from_pairs(pairs: impl Iterator<Item = (f32, f32)>) -> f64 {
    pairs
        .map(|(a, b)| {
            let d = f64::from(a) - f64::from(b);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Cosine distance (1 − cosine similarity) between two vectors.
///
/// Callers must resolve absent pooled embeddings (`None` from the encoder)
/// before calling; the vectors here are assumed present and of equal length.
/// A zero-norm input yields `NaN`, which the validity filter discards.
///
/// # Examples
///
/// ```
/// use semdist::distance::cosine_distance;
///
/// let a = [1.0, 0.0];
/// let b = [0.0, 1.0];
/// assert!((cosine_distance(&a, &a)).abs() < 1e-12);
/// assert!((cosine_distance(&a, &b) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    cosine_from_pairs(a.iter().copied().zip(b.iter().copied()))
}

/// Euclidean distance between two vectors.
#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    euclidean_from_pairs(a.iter().copied().zip(b.iter().copied()))
}

fn row_distance(matrix: &Array2<f32>, i: usize, j: usize, metric: Metric) -> f64 {
    let pairs = matrix
        .row(i)
        .iter()
        .copied()
        .zip(matrix.row(j).iter().copied());
    match metric {
        Metric::Cosine => cosine_from_pairs(pairs),
        Metric::Euclidean => euclidean_from_pairs(pairs),
    }
}

/// All-pairs distances under `metric`, strictly-lower triangle, unfiltered.
///
/// Entry order is row-major over pairs `(i, j)` with `i > j`. For an `N`-row
/// matrix the result has exactly `N(N-1)/2` entries: the diagonal
/// (self-comparisons) and the symmetric upper triangle are never emitted.
#[must_use]
pub fn pairwise_distance_raw(matrix: &Array2<f32>, metric: Metric) -> Vec<f64> {
    let n = matrix.nrows();
    let pairs: Vec<(usize, usize)> = (1..n).flat_map(|i| (0..i).map(move |j| (i, j))).collect();

    #[cfg(feature = "parallel")]
    let distances = {
        use rayon::prelude::*;
        pairs
            .par_iter()
            .map(|&(i, j)| row_distance(matrix, i, j, metric))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let distances = pairs
        .iter()
        .map(|&(i, j)| row_distance(matrix, i, j, metric))
        .collect();

    distances
}

/// All-pairs distances under `metric`, validity-filtered.
///
/// The only structurally expected zero is a duplicate-sentence pair; the
/// filter's strict `> 0` policy excludes it along with NaN/Inf sentinels.
#[must_use]
pub fn pairwise_distance(matrix: &Array2<f32>, metric: Metric) -> Vec<f64> {
    let raw = pairwise_distance_raw(matrix, metric);
    let total = raw.len();
    let clean = filter_distances(raw);
    let dropped = total - clean.len();
    if dropped > 0 {
        log::debug!("[distance] pairwise {metric}: dropped {dropped} of {total} values");
    }
    clean
}

/// Word Mover's Distance between two sentences.
///
/// The engine's responsibility is tokenization (whitespace split) and
/// nothing else: the optimal-transport computation itself is delegated to
/// the injected `transport` capability. Callers validate the returned
/// scalar with the validity filter.
#[must_use]
pub fn word_mover_distance(
    transport: &dyn TransportDistance,
    sentence_a: &str,
    sentence_b: &str,
) -> f64 {
    let tokens_a: Vec<&str> = sentence_a.split_whitespace().collect();
    let tokens_b: Vec<&str> = sentence_b.split_whitespace().collect();
    transport.transport_distance(&tokens_a, &tokens_b)
}

/// Pairwise Word Mover's Distance over a list of sentences.
///
/// All unordered pairs `i < j`, validity-filtered. Quadratic in sentence
/// count; the dominant runtime of corpus-scale evaluation.
#[must_use]
pub fn pairwise_wmd<S: AsRef<str>>(transport: &dyn TransportDistance, sentences: &[S]) -> Vec<f64> {
    let tokenized: Vec<Vec<&str>> = sentences
        .iter()
        .map(|s| s.as_ref().split_whitespace().collect())
        .collect();

    let n = tokenized.len();
    let mut distances = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    let mut dropped = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = transport.transport_distance(&tokenized[i], &tokenized[j]);
            if is_valid_distance(d) {
                distances.push(d);
            } else {
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        log::debug!("[distance] pairwise wmd: dropped {dropped} invalid values");
    }
    distances
}
