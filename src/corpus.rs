//! Paired ground-truth / ASR corpus.
//!
//! The corpus is produced by an external preprocessing pipeline as a JSON
//! mapping from an utterance identifier to its human ground-truth sentence
//! and the ASR hypothesis for the same audio. Sentences arrive already
//! canonicalized; this module only loads and filters them.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A single ground-truth / ASR sentence pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedUtterance {
    /// Human ground-truth transcription.
    pub gt: String,
    /// ASR hypothesis for the same utterance.
    #[serde(default, alias = "pred")]
    pub asr: String,
    /// Speaker tag (`T` therapist, `P` patient), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

/// Mapping from utterance identifier to sentence pair.
///
/// Backed by a `BTreeMap` so iteration order is deterministic; seeded
/// baseline sampling over the corpus is therefore reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairedCorpus(BTreeMap<String, PairedUtterance>);

impl PairedCorpus {
    /// Create an empty corpus.
    #[must_use]
    pub fn new() -> Self {
        PairedCorpus(BTreeMap::new())
    }

    /// Insert a sentence pair under the given identifier.
    pub fn insert(&mut self, id: impl Into<String>, utterance: PairedUtterance) {
        self.0.insert(id.into(), utterance);
    }

    /// Load a paired corpus from a JSON file.
    ///
    /// With `skip_empty`, entries whose ground truth or ASR side is empty
    /// after trimming are dropped; a sentence that was entirely scrubbed
    /// canonicalizes to the empty string and carries no signal.
    pub fn from_json_file(path: impl AsRef<Path>, skip_empty: bool) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let mut corpus: PairedCorpus = serde_json::from_reader(reader)?;
        if skip_empty {
            let before = corpus.len();
            corpus
                .0
                .retain(|_, u| !u.gt.trim().is_empty() && !u.asr.trim().is_empty());
            let dropped = before - corpus.len();
            if dropped > 0 {
                log::debug!("[corpus] dropped {dropped} empty entries");
            }
        }
        Ok(corpus)
    }

    /// Number of sentence pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the corpus contains no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (identifier, pair) entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PairedUtterance)> {
        self.0.iter()
    }

    /// All ground-truth sentences, in identifier order.
    #[must_use]
    pub fn gt_sentences(&self) -> Vec<&str> {
        self.0.values().map(|u| u.gt.as_str()).collect()
    }

    /// All ASR sentences, in identifier order.
    #[must_use]
    pub fn asr_sentences(&self) -> Vec<&str> {
        self.0.values().map(|u| u.asr.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a PairedCorpus {
    type Item = (&'a String, &'a PairedUtterance);
    type IntoIter = std::collections::btree_map::Iter<'a, String, PairedUtterance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(gt: &str, asr: &str) -> PairedUtterance {
        PairedUtterance {
            gt: gt.to_string(),
            asr: asr.to_string(),
            speaker: None,
        }
    }

    #[test]
    fn test_parse_paired_json() {
        let json = r#"{
            "a1": {"gt": "hello world", "asr": "hello word", "speaker": "T"},
            "a2": {"gt": "how are you", "pred": "how are you"}
        }"#;
        let corpus: PairedCorpus = serde_json::from_str(json).unwrap();
        assert_eq!(corpus.len(), 2);
        let (_, first) = corpus.iter().next().unwrap();
        assert_eq!(first.gt, "hello world");
        assert_eq!(first.speaker.as_deref(), Some("T"));
        // `pred` is the legacy field name for the ASR side.
        assert_eq!(corpus.asr_sentences()[1], "how are you");
    }

    #[test]
    fn test_gt_sentences_follow_identifier_order() {
        let mut corpus = PairedCorpus::new();
        corpus.insert("b", pair("second", "second"));
        corpus.insert("a", pair("first", "first"));
        assert_eq!(corpus.gt_sentences(), vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"x": {"gt": "a", "asr": "b", "wer": 0.5}}"#;
        let corpus: PairedCorpus = serde_json::from_str(json).unwrap();
        assert_eq!(corpus.len(), 1);
    }
}
