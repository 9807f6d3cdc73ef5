//! Embedding model loading and sentence encoding.
//!
//! An [`EmbeddingModel`] is a word → fixed-length vector mapping loaded once
//! at startup and treated as immutable thereafter: there is no mutation API
//! after construction, so a shared `&EmbeddingModel` can be handed to
//! parallel workers without locking.
//!
//! Two dictionary formats are supported:
//!
//! | Family | Format | Dimension |
//! |----------|----------------------------------------|-----------|
//! | word2vec | binary vendor container | 300 |
//! | glove | one `word f1 f2 ... fN` line per word | 300 |
//!
//! Loading is fail-fast: a malformed line aborts with [`Error::Parse`]
//! carrying the offending line number, because a silently skipped line
//! corrupts vocabulary coverage for every downstream distance.

mod encoder;

pub use encoder::{batch_encode, encode, BatchEncoding};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::config::{EmbeddingConfig, EmbeddingFamily};
use crate::{Error, Result};

/// Immutable word → vector mapping with O(1) membership tests.
#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

/// Borrowed membership-only view of a model's vocabulary.
///
/// Consumers that only need `contains` take this instead of the full model,
/// keeping the membership test separate from vector access.
#[derive(Debug, Clone, Copy)]
pub struct VocabularySet<'a> {
    vectors: &'a HashMap<String, Vec<f32>>,
}

impl VocabularySet<'_> {
    /// Whether the vocabulary contains `word` (case-sensitive, as stored).
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Number of words in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the vocabulary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl EmbeddingModel {
    /// Load a dictionary-style embedding model described by `config`.
    ///
    /// Loading a full-size model is memory- and time-intensive (hundreds of
    /// thousands of entries); both loaders stream the file rather than
    /// materializing it.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedModel`] for families without a dictionary loader,
    /// [`Error::Parse`] for malformed content, [`Error::Io`] for read
    /// failures.
    pub fn load(config: &EmbeddingConfig) -> Result<Self> {
        let expected_dim = config.family.dimension();
        log::info!(
            "[store] loading {} model from {}",
            config.family,
            config.model_path.display()
        );
        let model = match config.family {
            EmbeddingFamily::Glove => Self::load_glove(&config.model_path, expected_dim)?,
            EmbeddingFamily::Word2vec => Self::load_word2vec(&config.model_path, expected_dim)?,
            EmbeddingFamily::Bert => {
                return Err(Error::unsupported_model(
                    "bert is a contextual family with no dictionary loader",
                ))
            }
        };
        log::info!(
            "[store] loaded {} words ({} dims)",
            model.len(),
            model.dimension()
        );
        Ok(model)
    }

    /// Build a model from an in-memory mapping.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if any vector's length differs from
    /// `dimension`.
    pub fn from_vectors(dimension: usize, vectors: HashMap<String, Vec<f32>>) -> Result<Self> {
        for (word, vector) in &vectors {
            if vector.len() != dimension {
                return Err(Error::invalid_input(format!(
                    "vector for {word:?} has {} dims, expected {dimension}",
                    vector.len()
                )));
            }
        }
        Ok(EmbeddingModel { dimension, vectors })
    }

    /// Parse a GloVe plain-text model: one word plus space-delimited floats
    /// per line.
    fn load_glove(path: &Path, expected_dim: usize) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut vectors = HashMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split(' ');
            let word = tokens
                .next()
                .ok_or_else(|| Error::parse(format!("line {}: missing word", line_no + 1)))?;
            let vector = tokens
                .map(|t| {
                    t.parse::<f32>().map_err(|_| {
                        Error::parse(format!("line {}: bad float {t:?}", line_no + 1))
                    })
                })
                .collect::<Result<Vec<f32>>>()?;
            if vector.len() != expected_dim {
                return Err(Error::parse(format!(
                    "line {}: {} dims, expected {expected_dim}",
                    line_no + 1,
                    vector.len()
                )));
            }
            vectors.insert(word.to_string(), vector);
        }

        Ok(EmbeddingModel {
            dimension: expected_dim,
            vectors,
        })
    }

    /// Parse the word2vec binary vendor container: an ASCII header line
    /// `"<vocab_size> <dim>\n"`, then per entry a space-terminated word
    /// followed by `dim` little-endian f32 values.
    fn load_word2vec(path: &Path, expected_dim: usize) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);

        let mut header = Vec::new();
        reader.read_until(b'\n', &mut header)?;
        let header = std::str::from_utf8(&header)
            .map_err(|_| Error::parse("header is not valid UTF-8"))?
            .trim();
        let mut fields = header.split_whitespace();
        let vocab_size: usize = fields
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| Error::parse(format!("bad header {header:?}")))?;
        let dim: usize = fields
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| Error::parse(format!("bad header {header:?}")))?;
        if dim != expected_dim {
            return Err(Error::parse(format!(
                "model has {dim} dims, expected {expected_dim}"
            )));
        }

        let mut vectors = HashMap::with_capacity(vocab_size);
        let mut payload = vec![0u8; dim * 4];
        for entry in 0..vocab_size {
            let mut word_bytes = Vec::new();
            reader.read_until(b' ', &mut word_bytes)?;
            // Entries may be newline-separated in addition to the
            // space terminator.
            while word_bytes.first() == Some(&b'\n') {
                word_bytes.remove(0);
            }
            if word_bytes.last() == Some(&b' ') {
                word_bytes.pop();
            }
            if word_bytes.is_empty() {
                return Err(Error::parse(format!("entry {entry}: empty word")));
            }
            let word = String::from_utf8(word_bytes)
                .map_err(|_| Error::parse(format!("entry {entry}: word is not valid UTF-8")))?;

            reader
                .read_exact(&mut payload)
                .map_err(|_| Error::parse(format!("entry {entry}: truncated vector")))?;
            let vector: Vec<f32> = payload
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            vectors.insert(word, vector);
        }

        Ok(EmbeddingModel {
            dimension: expected_dim,
            vectors,
        })
    }

    /// Embedding dimension of every vector in this model.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Vector for `word`, or `None` when it is out of vocabulary.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Whether `word` is in the vocabulary (case-sensitive, as stored).
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Membership-only view of the vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> VocabularySet<'_> {
        VocabularySet {
            vectors: &self.vectors,
        }
    }

    /// Number of words in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the vocabulary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
