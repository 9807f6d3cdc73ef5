//! File-backed embedding store loading tests.

use std::io::Write;

use semdist::config::{EmbeddingConfig, EmbeddingFamily};
use semdist::embedding::EmbeddingModel;
use semdist::Error;
use tempfile::NamedTempFile;

const DIM: usize = 300;

fn glove_line(word: &str, seed: f32) -> String {
    let floats: Vec<String> = (0..DIM)
        .map(|i| format!("{}", seed + i as f32 * 0.5))
        .collect();
    format!("{} {}", word, floats.join(" "))
}

fn write_temp(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn glove_loads_streamed_lines() {
    let contents = format!(
        "{}\n{}\n",
        glove_line("hello", 1.0),
        glove_line("world", 2.0)
    );
    let file = write_temp(contents.as_bytes());

    let config = EmbeddingConfig::new(EmbeddingFamily::Glove, file.path());
    let model = EmbeddingModel::load(&config).unwrap();

    assert_eq!(model.len(), 2);
    assert_eq!(model.dimension(), DIM);
    assert!(model.contains("hello"));
    assert!(!model.contains("HELLO"));

    let vector = model.get("world").unwrap();
    assert_eq!(vector.len(), DIM);
    assert_eq!(vector[0], 2.0);
    assert_eq!(vector[1], 2.5);
}

#[test]
fn glove_malformed_float_aborts_with_line_number() {
    let mut bad = glove_line("ok", 1.0);
    bad.push('\n');
    bad.push_str("broken 0.1 not-a-float 0.3\n");
    let file = write_temp(bad.as_bytes());

    let config = EmbeddingConfig::new(EmbeddingFamily::Glove, file.path());
    let err = EmbeddingModel::load(&config).unwrap_err();

    match err {
        Error::Parse(msg) => assert!(msg.contains("line 2"), "unexpected message: {msg}"),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn glove_wrong_dimension_aborts() {
    let file = write_temp(b"tiny 0.1 0.2 0.3\n");

    let config = EmbeddingConfig::new(EmbeddingFamily::Glove, file.path());
    let err = EmbeddingModel::load(&config).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

fn word2vec_bytes(entries: &[(&str, f32)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(format!("{} {}\n", entries.len(), DIM).as_bytes());
    for (word, seed) in entries {
        bytes.extend_from_slice(word.as_bytes());
        bytes.push(b' ');
        for i in 0..DIM {
            bytes.extend_from_slice(&(seed + i as f32).to_le_bytes());
        }
        bytes.push(b'\n');
    }
    bytes
}

#[test]
fn word2vec_loads_binary_container() {
    let file = write_temp(&word2vec_bytes(&[("hello", 1.0), ("world", -3.0)]));

    let config = EmbeddingConfig::new(EmbeddingFamily::Word2vec, file.path());
    let model = EmbeddingModel::load(&config).unwrap();

    assert_eq!(model.len(), 2);
    let vector = model.get("world").unwrap();
    assert_eq!(vector[0], -3.0);
    assert_eq!(vector[2], -1.0);
}

#[test]
fn word2vec_truncated_payload_aborts() {
    let mut bytes = word2vec_bytes(&[("hello", 1.0)]);
    bytes.truncate(bytes.len() - 10);
    let file = write_temp(&bytes);

    let config = EmbeddingConfig::new(EmbeddingFamily::Word2vec, file.path());
    let err = EmbeddingModel::load(&config).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn word2vec_bad_header_aborts() {
    let file = write_temp(b"not a header\n");

    let config = EmbeddingConfig::new(EmbeddingFamily::Word2vec, file.path());
    let err = EmbeddingModel::load(&config).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn bert_has_no_dictionary_loader() {
    let file = write_temp(b"");
    let config = EmbeddingConfig::new(EmbeddingFamily::Bert, file.path());
    let err = EmbeddingModel::load(&config).unwrap_err();
    assert!(matches!(err, Error::UnsupportedModel(_)));
}
