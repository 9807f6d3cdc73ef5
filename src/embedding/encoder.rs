//! Sentence encoding by mean pooling of word vectors.
//!
//! A sentence embedding is the per-dimension arithmetic mean of its
//! in-vocabulary word vectors. Bag-of-words pooling discards word order;
//! that loss is a deliberate, known approximation.

use ndarray::{Array2, ArrayView1};

use super::EmbeddingModel;

/// Encode a sentence into a single pooled vector.
///
/// The sentence is split on single-space boundaries; tokens missing from
/// the vocabulary are skipped. Returns `None` iff zero tokens are covered:
/// the result is all-or-nothing over the covered words, never partial.
///
/// Out-of-vocabulary sentences are an expected, frequent condition, so this
/// is an absent result rather than an error.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use semdist::embedding::{encode, EmbeddingModel};
///
/// let mut vectors = HashMap::new();
/// vectors.insert("hello".to_string(), vec![1.0, 0.0]);
/// vectors.insert("world".to_string(), vec![0.0, 1.0]);
/// let model = EmbeddingModel::from_vectors(2, vectors).unwrap();
///
/// // "foo" is out of vocabulary: mean of the remaining two vectors.
/// assert_eq!(encode(&model, "hello world foo"), Some(vec![0.5, 0.5]));
/// assert_eq!(encode(&model, "foo bar"), None);
/// ```
#[must_use]
pub fn encode(model: &EmbeddingModel, sentence: &str) -> Option<Vec<f32>> {
    let mut pooled = vec![0.0f32; model.dimension()];
    let mut covered = 0usize;

    for word in sentence.split(' ') {
        if let Some(vector) = model.get(word) {
            for (sum, component) in pooled.iter_mut().zip(vector) {
                *sum += component;
            }
            covered += 1;
        }
    }

    if covered == 0 {
        return None;
    }

    let scale = 1.0 / covered as f32;
    for component in &mut pooled {
        *component *= scale;
    }
    Some(pooled)
}

/// Result of encoding a batch of sentences.
///
/// The matrix preserves sentence input order. A sentence with zero covered
/// words occupies an all-zero row *and* has its index recorded in
/// `uncovered`: the zero row keeps the matrix rectangular for vectorized
/// consumers, while the index list disambiguates it from a genuine
/// zero-mean embedding.
#[derive(Debug, Clone)]
pub struct BatchEncoding {
    /// `(N, F)` matrix of pooled embeddings, one row per input sentence.
    pub matrix: Array2<f32>,
    /// Indices of sentences with zero vocabulary-covered words.
    pub uncovered: Vec<usize>,
}

impl BatchEncoding {
    /// Whether the sentence at `index` produced a real embedding.
    #[must_use]
    pub fn is_covered(&self, index: usize) -> bool {
        !self.uncovered.contains(&index)
    }
}

/// Encode a batch of sentences into an `(N, F)` matrix.
///
/// A per-sentence encoding failure never aborts the batch; it degrades to a
/// zero row recorded in [`BatchEncoding::uncovered`].
#[must_use]
pub fn batch_encode<S: AsRef<str>>(model: &EmbeddingModel, sentences: &[S]) -> BatchEncoding {
    let mut matrix = Array2::zeros((sentences.len(), model.dimension()));
    let mut uncovered = Vec::new();

    for (i, sentence) in sentences.iter().enumerate() {
        match encode(model, sentence.as_ref()) {
            Some(vector) => matrix
                .row_mut(i)
                .assign(&ArrayView1::from(vector.as_slice())),
            None => uncovered.push(i),
        }
    }

    if !uncovered.is_empty() {
        log::debug!(
            "[encoder] {} of {} sentences had no covered words",
            uncovered.len(),
            sentences.len()
        );
    }
    BatchEncoding { matrix, uncovered }
}
