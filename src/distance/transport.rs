//! Injected optimal-transport capability for Word Mover's Distance.
//!
//! The distance engine does not implement optimal transport itself; it
//! tokenizes and validity-filters, and hands the transport computation to a
//! [`TransportDistance`] implementation. The seam keeps the engine testable
//! with a stub transport and lets a caller substitute an exact-EMD solver.
//!
//! The provided [`SinkhornTransport`] solves the entropic-regularized
//! problem in log domain: scaling vectors are stored as logarithms and
//! normalized with log-sum-exp, which keeps the iteration stable for the
//! small regularization values WMD needs.

use std::collections::BTreeMap;

use crate::embedding::EmbeddingModel;

/// Optimal-transport distance between two token sequences.
///
/// Given two token multisets and a word-to-vector lookup, an implementation
/// computes the minimum cost to transform the word-vector distribution of
/// one sequence into the other, weighted by per-word transport cost.
pub trait TransportDistance {
    /// Transport distance between `tokens_a` and `tokens_b`.
    ///
    /// Returns a non-negative scalar; `INFINITY` or `NaN` signal an
    /// uncomputable pair and are discarded by the validity filter.
    fn transport_distance(&self, tokens_a: &[&str], tokens_b: &[&str]) -> f64;
}

/// Word Mover's Distance via log-stabilized Sinkhorn iterations.
///
/// Each sentence becomes a normalized bag-of-words distribution over its
/// in-vocabulary tokens; the ground cost between two words is the Euclidean
/// distance between their embedding vectors. Out-of-vocabulary tokens are
/// dropped from the distribution; a sentence with zero covered tokens has
/// no distribution to transport and the distance is `INFINITY`.
pub struct SinkhornTransport<'a> {
    model: &'a EmbeddingModel,
    regularization: f64,
    max_iterations: usize,
    threshold: f64,
}

impl<'a> SinkhornTransport<'a> {
    /// Create a solver over `model` with default parameters
    /// (ε = 0.1, 200 iterations).
    #[must_use]
    pub fn new(model: &'a EmbeddingModel) -> Self {
        SinkhornTransport {
            model,
            regularization: 0.1,
            max_iterations: 200,
            threshold: 1e-9,
        }
    }

    /// Set the entropy regularization ε. Smaller values approach the exact
    /// transport cost at the price of slower convergence.
    #[must_use]
    pub fn with_regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization.max(1e-6);
        self
    }

    /// Set the maximum number of Sinkhorn iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Normalized bag-of-words distribution over in-vocabulary tokens.
    ///
    /// Ordered by word so repeated evaluation sums in the same order and
    /// stays bit-reproducible.
    fn nbow(&self, tokens: &[&str]) -> (Vec<&'a [f32]>, Vec<f64>) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for token in tokens {
            if self.model.contains(token) {
                *counts.entry(*token).or_insert(0) += 1;
            }
        }
        let total: usize = counts.values().sum();
        let mut vectors = Vec::with_capacity(counts.len());
        let mut weights = Vec::with_capacity(counts.len());
        for (word, count) in counts {
            if let Some(vector) = self.model.get(word) {
                vectors.push(vector);
                weights.push(count as f64 / total as f64);
            }
        }
        (vectors, weights)
    }
}

impl TransportDistance for SinkhornTransport<'_> {
    fn transport_distance(&self, tokens_a: &[&str], tokens_b: &[&str]) -> f64 {
        let (source, a) = self.nbow(tokens_a);
        let (target, b) = self.nbow(tokens_b);

        if source.is_empty() || target.is_empty() {
            // No covered tokens on one side: nothing to transport.
            return f64::INFINITY;
        }

        let cost: Vec<Vec<f64>> = source
            .iter()
            .map(|s| target.iter().map(|t| euclidean_f32(s, t)).collect())
            .collect();

        sinkhorn_cost(
            &cost,
            &a,
            &b,
            self.regularization,
            self.max_iterations,
            self.threshold,
        )
    }
}

fn euclidean_f32(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = values.iter().map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Entropic-regularized transport cost between distributions `a` and `b`
/// under `cost`, via log-domain Sinkhorn iterations.
fn sinkhorn_cost(
    cost: &[Vec<f64>],
    a: &[f64],
    b: &[f64],
    regularization: f64,
    max_iterations: usize,
    threshold: f64,
) -> f64 {
    let n = a.len();
    let m = b.len();

    // Gibbs kernel in log domain: log K = -C/ε.
    let log_k: Vec<Vec<f64>> = cost
        .iter()
        .map(|row| row.iter().map(|&c| -c / regularization).collect())
        .collect();

    let log_a: Vec<f64> = a.iter().map(|&w| w.ln()).collect();
    let log_b: Vec<f64> = b.iter().map(|&w| w.ln()).collect();

    let mut log_u = vec![0.0f64; n];
    let mut log_v = vec![0.0f64; m];
    let mut row_terms = vec![0.0f64; m];
    let mut col_terms = vec![0.0f64; n];

    for _ in 0..max_iterations {
        let mut delta = 0.0f64;

        for i in 0..n {
            for j in 0..m {
                row_terms[j] = log_k[i][j] + log_v[j];
            }
            let next = log_a[i] - log_sum_exp(&row_terms);
            delta = delta.max((next - log_u[i]).abs());
            log_u[i] = next;
        }

        for j in 0..m {
            for (i, term) in col_terms.iter_mut().enumerate() {
                *term = log_k[i][j] + log_u[i];
            }
            log_v[j] = log_b[j] - log_sum_exp(&col_terms);
        }

        if delta < threshold {
            break;
        }
    }

    // ⟨γ, C⟩ with γ_ij = exp(log u_i + log K_ij + log v_j).
    let mut total = 0.0f64;
    for i in 0..n {
        for j in 0..m {
            let plan = (log_u[i] + log_k[i][j] + log_v[j]).exp();
            total += plan * cost[i][j];
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;

    fn toy_model() -> EmbeddingModel {
        let mut vectors = StdHashMap::new();
        vectors.insert("hello".to_string(), vec![10.0, 0.0]);
        vectors.insert("world".to_string(), vec![0.0, 10.0]);
        vectors.insert("there".to_string(), vec![10.0, 10.0]);
        EmbeddingModel::from_vectors(2, vectors).unwrap()
    }

    #[test]
    fn test_identical_sentences_have_near_zero_cost() {
        let model = toy_model();
        let transport = SinkhornTransport::new(&model);
        let d = transport.transport_distance(&["hello", "world"], &["hello", "world"]);
        assert!(d.abs() < 1e-3, "expected ~0, got {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let model = toy_model();
        let transport = SinkhornTransport::new(&model);
        let ab = transport.transport_distance(&["hello"], &["world", "there"]);
        let ba = transport.transport_distance(&["world", "there"], &["hello"]);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_single_word_pair_equals_ground_cost() {
        let model = toy_model();
        let transport = SinkhornTransport::new(&model);
        let d = transport.transport_distance(&["hello"], &["world"]);
        // One-point distributions: the plan is fixed, cost is the
        // Euclidean distance between the two word vectors.
        let expected = f64::sqrt(200.0);
        assert!((d - expected).abs() < 1e-6, "expected {expected}, got {d}");
    }

    #[test]
    fn test_uncovered_side_is_infinite() {
        let model = toy_model();
        let transport = SinkhornTransport::new(&model);
        assert!(transport
            .transport_distance(&["zzz"], &["hello"])
            .is_infinite());
        assert!(transport.transport_distance(&[], &["hello"]).is_infinite());
    }

    #[test]
    fn test_oov_tokens_are_dropped_not_fatal() {
        let model = toy_model();
        let transport = SinkhornTransport::new(&model);
        let with_oov = transport.transport_distance(&["hello", "zzz"], &["world"]);
        let without = transport.transport_distance(&["hello"], &["world"]);
        assert!((with_oov - without).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_words_shift_mass() {
        let model = toy_model();
        let transport = SinkhornTransport::new(&model);
        // Repeating "hello" moves weight toward it, lowering the cost of a
        // target near "hello".
        let balanced = transport.transport_distance(&["hello", "world"], &["hello"]);
        let skewed = transport.transport_distance(&["hello", "hello", "hello", "world"], &["hello"]);
        assert!(skewed < balanced);
    }
}
