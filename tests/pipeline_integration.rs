//! End-to-end pipeline tests: corpus → encoder → distance → filter → stats.

use std::collections::HashMap;
use std::io::Write;

use semdist::baseline::RandomBaseline;
use semdist::corpus::PairedCorpus;
use semdist::distance::{
    self, cosine_distance, pairwise_distance, pairwise_distance_raw, Metric, SinkhornTransport,
    TransportDistance,
};
use semdist::embedding::{batch_encode, encode, EmbeddingModel};
use semdist::filter::filter_distances;
use semdist::stats::Summary;
use tempfile::NamedTempFile;

fn session_model() -> EmbeddingModel {
    let mut vectors = HashMap::new();
    vectors.insert("i".to_string(), vec![1.0, 1.0, 0.0]);
    vectors.insert("feel".to_string(), vec![0.0, 2.0, 1.0]);
    vectors.insert("hopeless".to_string(), vec![-3.0, 0.0, 4.0]);
    vectors.insert("homeless".to_string(), vec![-2.0, 1.0, 5.0]);
    vectors.insert("fine".to_string(), vec![4.0, 0.5, -1.0]);
    vectors.insert("today".to_string(), vec![0.5, -1.0, 0.5]);
    EmbeddingModel::from_vectors(3, vectors).unwrap()
}

fn session_corpus_json() -> String {
    r#"{
        "s01": {"gt": "i feel hopeless", "asr": "i feel homeless", "speaker": "P"},
        "s02": {"gt": "i feel fine today", "asr": "i feel fine today", "speaker": "P"},
        "s03": {"gt": "", "asr": "noise"},
        "s04": {"gt": "hopeless today", "asr": "homeless today", "speaker": "T"}
    }"#
    .to_string()
}

#[test]
fn corpus_pairs_flow_through_cosine_and_wmd() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(session_corpus_json().as_bytes()).unwrap();
    file.flush().unwrap();

    let corpus = PairedCorpus::from_json_file(file.path(), true).unwrap();
    // The empty-gt entry is dropped at load time.
    assert_eq!(corpus.len(), 3);

    let model = session_model();
    let transport = SinkhornTransport::new(&model);

    let mut cosines = Vec::new();
    let mut wmds = Vec::new();
    for (_, pair) in &corpus {
        let gt = encode(&model, &pair.gt).unwrap();
        let asr = encode(&model, &pair.asr).unwrap();
        cosines.push(cosine_distance(&gt, &asr));
        wmds.push(distance::word_mover_distance(&transport, &pair.gt, &pair.asr));
    }

    // The identical pair contributes an exact 0 to both sequences; the
    // shared validity policy drops it everywhere.
    let clean_cosine = filter_distances(cosines.clone());
    let clean_wmd = filter_distances(wmds.clone());
    assert_eq!(cosines.len(), 3);
    assert_eq!(clean_cosine.len(), 2);
    assert!(clean_wmd.len() >= 2);
    assert!(clean_cosine.iter().all(|&d| d > 0.0 && d.is_finite()));

    let summary = Summary::from_values(&clean_cosine).unwrap();
    assert_eq!(summary.n, 2);
    assert!(summary.min > 0.0);
}

#[test]
fn batch_pairwise_distance_counts_match_lower_triangle() {
    let model = session_model();
    let sentences = [
        "i feel hopeless",
        "i feel homeless",
        "i feel fine today",
        "hopeless today",
        "zzz unknown words",
    ];
    let batch = batch_encode(&model, &sentences);
    assert_eq!(batch.uncovered, vec![4]);

    let raw = pairwise_distance_raw(&batch.matrix, Metric::Cosine);
    assert_eq!(raw.len(), 5 * 4 / 2);

    // The zero row only survives into the clean sequence if its cosine is
    // computable; a zero-norm row yields NaN and is filtered.
    let clean = pairwise_distance(&batch.matrix, Metric::Cosine);
    assert!(clean.len() < raw.len());
    assert!(clean.iter().all(|&d| d.is_finite() && d > 0.0));
}

#[test]
fn euclidean_and_cosine_agree_on_validity() {
    let model = session_model();
    let sentences = ["i feel hopeless", "i feel fine today", "hopeless today"];
    let batch = batch_encode(&model, &sentences);

    for metric in [Metric::Cosine, Metric::Euclidean] {
        let clean = pairwise_distance(&batch.matrix, metric);
        assert_eq!(clean.len(), 3, "metric {metric}");
    }
}

#[test]
fn corpus_baseline_feeds_the_same_pipeline() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(session_corpus_json().as_bytes()).unwrap();
    file.flush().unwrap();
    let corpus = PairedCorpus::from_json_file(file.path(), true).unwrap();

    let mut baseline = RandomBaseline::new(11);
    let sentences = baseline.sample_corpus(&corpus, 3).unwrap();
    assert_eq!(sentences.len(), 3);

    let model = session_model();
    let batch = batch_encode(&model, &sentences);
    assert!(batch.uncovered.is_empty());

    let clean = pairwise_distance(&batch.matrix, Metric::Cosine);
    // 3 corpus sentences → 3 pairs, all distinct sentences, no zeros.
    assert_eq!(clean.len(), 3);
}

#[test]
fn wmd_on_near_miss_is_smaller_than_unrelated() {
    let model = session_model();
    let transport = SinkhornTransport::new(&model);

    let near = distance::word_mover_distance(&transport, "i feel hopeless", "i feel homeless");
    let far = distance::word_mover_distance(&transport, "i feel hopeless", "fine today");
    assert!(near > 0.0);
    assert!(near < far, "near={near} far={far}");
}

/// Engine logic must be testable independent of the real solver.
struct TokenCountTransport;

impl TransportDistance for TokenCountTransport {
    fn transport_distance(&self, a: &[&str], b: &[&str]) -> f64 {
        (a.len() as f64 - b.len() as f64).abs()
    }
}

#[test]
fn transport_capability_is_swappable() {
    let d = distance::word_mover_distance(&TokenCountTransport, "one two three", "one");
    assert!((d - 2.0).abs() < 1e-12);
}
