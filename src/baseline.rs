//! Random-sentence baseline generation.
//!
//! Real corpus distances only mean something against an expected
//! "no semantic relation" distribution. Baseline sentences are produced
//! either by sampling the corpus itself or by drawing words from a
//! vocabulary list under a log-normal sentence-length model, then pushed
//! through the exact same canonicalization, encoding, and distance logic as
//! genuine transcripts. Any systematic difference then reflects semantic
//! structure in the real corpus rather than an artifact of generation.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

use crate::corpus::PairedCorpus;
use crate::text::canonicalize;
use crate::{Error, Result};

/// Location parameter of the log-normal sentence-length model.
const LENGTH_LOCATION: f64 = 8.0;
/// Scale parameter of the log-normal sentence-length model.
const LENGTH_SCALE: f64 = 3.0;
/// Inclusive sentence-length bounds, in words.
const LENGTH_BOUNDS: (f64, f64) = (2.0, 15.0);

static LENGTH_DIST: Lazy<LogNormal<f64>> = Lazy::new(|| {
    LogNormal::new(LENGTH_LOCATION, LENGTH_SCALE).expect("length model parameters are valid")
});

/// Seeded generator of random baseline sentences.
///
/// Backed by a ChaCha stream cipher so runs are reproducible from the seed.
pub struct RandomBaseline {
    rng: ChaCha8Rng,
}

impl RandomBaseline {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        RandomBaseline {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Sample `n` distinct ground-truth sentences from the corpus, without
    /// replacement.
    ///
    /// These are real sentences, not generated ones; they baseline the
    /// distance distribution of unrelated-but-natural language.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientCorpus`] if the corpus has fewer than `n`
    /// unique ground-truth sentences.
    pub fn sample_corpus(&mut self, corpus: &PairedCorpus, n: usize) -> Result<Vec<String>> {
        let unique: Vec<&str> = corpus
            .gt_sentences()
            .into_iter()
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .collect();
        if unique.len() < n {
            return Err(Error::insufficient_corpus(n, unique.len()));
        }
        let picked = rand::seq::index::sample(&mut self.rng, unique.len(), n);
        Ok(picked.iter().map(|i| unique[i].to_string()).collect())
    }

    /// Generate `n` synthetic sentences from a vocabulary list.
    ///
    /// Per sentence: a length is drawn from LogNormal(8, 3), clipped to
    /// [2, 15] words and rounded to the nearest integer; that many words are
    /// sampled uniformly *with* replacement; the result is canonicalized
    /// exactly like a real transcript.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `vocab` is empty.
    pub fn generate(&mut self, vocab: &[String], n: usize) -> Result<Vec<String>> {
        if vocab.is_empty() {
            return Err(Error::invalid_input("empty vocabulary"));
        }
        Ok((0..n).map(|_| self.random_sentence(vocab)).collect())
    }

    fn random_sentence(&mut self, vocab: &[String]) -> String {
        let (lo, hi) = LENGTH_BOUNDS;
        let n_words = LENGTH_DIST.sample(&mut self.rng).clamp(lo, hi).round() as usize;

        let words: Vec<&str> = (0..n_words)
            .map(|_| vocab[self.rng.gen_range(0..vocab.len())].as_str())
            .collect();
        canonicalize(&words.join(" "))
    }
}

/// Load a vocabulary list, one word per line, lower-cased.
///
/// The conventional source is the unix dictionary (`/usr/share/dict/words`).
pub fn load_vocabulary(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut vocab = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if !word.is_empty() {
            vocab.push(word);
        }
    }
    log::info!("[baseline] loaded {} vocabulary words", vocab.len());
    Ok(vocab)
}
