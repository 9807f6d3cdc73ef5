//! Configuration types for embedding models.
//!
//! All configuration is explicit and passed in at construction. There is no
//! ambient global state: file paths, the per-family dimension table, and the
//! contextual sequence-length cap all live on [`EmbeddingConfig`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default cap on sentence length (in words) for contextual families.
///
/// Dictionary families (word2vec, GloVe) pool per-word vectors and ignore
/// this value.
pub const DEFAULT_MAX_SEQ_LEN: usize = 100;

/// Supported embedding model families.
///
/// Each family has a fixed embedding dimension; every vector produced under
/// a family has exactly that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingFamily {
    /// Google News word2vec, binary vendor format, 300 dimensions.
    Word2vec,
    /// Stanford GloVe, plain-text format, 300 dimensions.
    Glove,
    /// Contextual BERT-family encoder, 1024 dimensions.
    Bert,
}

impl EmbeddingFamily {
    /// All supported families.
    #[must_use]
    pub fn all() -> [EmbeddingFamily; 3] {
        [
            EmbeddingFamily::Word2vec,
            EmbeddingFamily::Glove,
            EmbeddingFamily::Bert,
        ]
    }

    /// Fixed embedding dimension for this family.
    #[must_use]
    pub fn dimension(&self) -> usize {
        match self {
            EmbeddingFamily::Word2vec => 300,
            EmbeddingFamily::Glove => 300,
            EmbeddingFamily::Bert => 1024,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingFamily::Word2vec => "word2vec",
            EmbeddingFamily::Glove => "glove",
            EmbeddingFamily::Bert => "bert",
        }
    }
}

impl fmt::Display for EmbeddingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "word2vec" => Ok(EmbeddingFamily::Word2vec),
            "glove" => Ok(EmbeddingFamily::Glove),
            "bert" => Ok(EmbeddingFamily::Bert),
            other => Err(Error::unsupported_model(other)),
        }
    }
}

/// Configuration for loading an embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Which embedding family the model file contains.
    pub family: EmbeddingFamily,
    /// Path to the model file (binary for word2vec, plain text for GloVe).
    pub model_path: PathBuf,
    /// Maximum sequence length in words, contextual families only.
    #[serde(default = "default_max_seq_len")]
    pub max_seq_len: usize,
}

fn default_max_seq_len() -> usize {
    DEFAULT_MAX_SEQ_LEN
}

impl EmbeddingConfig {
    /// Create a configuration with the default sequence-length cap.
    pub fn new(family: EmbeddingFamily, model_path: impl Into<PathBuf>) -> Self {
        EmbeddingConfig {
            family,
            model_path: model_path.into(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}
