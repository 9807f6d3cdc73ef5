//! # semdist
//!
//! Semantic-distance evaluation of ASR transcripts against human ground
//! truth.
//!
//! ASR quality is usually reported as word error rate, but a literal edit
//! distance treats "I feel hopeless" → "I feel homeless" the same as a
//! harmless substitution. This crate measures the *semantic* gap instead:
//! sentences become pooled word-embedding vectors, and pairs are compared
//! with cosine distance and Word Mover's Distance, against a
//! random-sentence baseline that calibrates what "no semantic relation"
//! looks like for the same corpus.
//!
//! ## Pipeline
//!
//! ```text
//! sentence pairs → encoder (+ embedding store) → pooled vectors
//!     → distance engine → raw distances → validity filter → statistics
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use semdist::{
//!     baseline::RandomBaseline,
//!     config::{EmbeddingConfig, EmbeddingFamily},
//!     distance::{self, SinkhornTransport},
//!     embedding::{self, EmbeddingModel},
//!     filter,
//! };
//!
//! let config = EmbeddingConfig::new(EmbeddingFamily::Glove, "glove.840B.300d.txt");
//! let model = EmbeddingModel::load(&config)?;
//!
//! let gt = embedding::encode(&model, "i feel hopeless").ok_or("no coverage")?;
//! let asr = embedding::encode(&model, "i feel homeless").ok_or("no coverage")?;
//! let cosine = distance::cosine_distance(&gt, &asr);
//!
//! let transport = SinkhornTransport::new(&model);
//! let wmd = distance::word_mover_distance(&transport, "i feel hopeless", "i feel homeless");
//! let clean = filter::filter_distances([cosine, wmd]);
//! ```
//!
//! ## Design
//!
//! - The embedding store is immutable after load and freely shared across
//!   threads; the `parallel` feature fans the O(N²) pairwise loop out over
//!   rayon with no locking.
//! - The optimal-transport computation behind WMD is an injected
//!   [`distance::TransportDistance`] capability, so the engine's own logic
//!   is testable against a stub and the solver is swappable.
//! - One validity policy (finite and strictly positive) is enforced at
//!   every boundary where distances leave the engine.
//! - Per-sentence encoding failure is an absent result, never an error;
//!   model-loading failure is loud and fatal.

#![warn(missing_docs)]

pub mod baseline;
pub mod config;
pub mod corpus;
pub mod distance;
pub mod embedding;
mod error;
pub mod filter;
pub mod stats;
pub mod text;

pub use error::{Error, Result};
