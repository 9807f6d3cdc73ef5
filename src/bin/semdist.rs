//! semdist - semantic distance evaluation CLI
//!
//! Compares ASR transcripts against human ground truth with embedding-based
//! distances, and calibrates them against a random-sentence baseline.
//!
//! # Usage
//!
//! ```bash
//! # Cosine + WMD over every gt/ASR pair in a corpus
//! semdist distances --family glove --model glove.840B.300d.txt \
//!     --corpus paired.json
//!
//! # Random baseline from a vocabulary list, compared to the corpus
//! semdist baseline --family glove --model glove.840B.300d.txt \
//!     --corpus paired.json --vocab /usr/share/dict/words -n 500
//!
//! # Baseline from the corpus itself (real but unrelated sentences)
//! semdist baseline --family glove --model glove.840B.300d.txt \
//!     --corpus paired.json --use-corpus -n 500
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use semdist::baseline::{load_vocabulary, RandomBaseline};
use semdist::config::{EmbeddingConfig, EmbeddingFamily};
use semdist::corpus::PairedCorpus;
use semdist::distance::{self, Metric, SinkhornTransport};
use semdist::embedding::{self, EmbeddingModel};
use semdist::filter::filter_distances;
use semdist::stats::Summary;
use semdist::{Error, Result};

#[derive(Parser)]
#[command(name = "semdist", version, about = "Semantic distance evaluation of ASR transcripts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute cosine and WMD distances between paired gt/ASR sentences.
    Distances {
        /// Embedding family: word2vec | glove | bert.
        #[arg(long)]
        family: String,
        /// Path to the embedding model file.
        #[arg(long)]
        model: PathBuf,
        /// Path to the paired-corpus JSON file.
        #[arg(long)]
        corpus: PathBuf,
        /// Keep entries whose gt or ASR side is empty.
        #[arg(long)]
        keep_empty: bool,
    },
    /// Compare corpus distances against a random-sentence baseline.
    Baseline {
        /// Embedding family: word2vec | glove | bert.
        #[arg(long)]
        family: String,
        /// Path to the embedding model file.
        #[arg(long)]
        model: PathBuf,
        /// Path to the paired-corpus JSON file.
        #[arg(long)]
        corpus: PathBuf,
        /// Number of baseline sentences to generate.
        #[arg(short, long, default_value_t = 500)]
        n: usize,
        /// Sample real sentences from the corpus instead of generating
        /// synthetic ones.
        #[arg(long)]
        use_corpus: bool,
        /// Vocabulary list (one word per line); required unless --use-corpus.
        #[arg(long)]
        vocab: Option<PathBuf>,
        /// Pairwise metric: cosine | euclidean.
        #[arg(long, default_value = "cosine")]
        metric: String,
        /// RNG seed for reproducible baselines.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Distances {
            family,
            model,
            corpus,
            keep_empty,
        } => run_distances(&family, &model, &corpus, keep_empty),
        Command::Baseline {
            family,
            model,
            corpus,
            n,
            use_corpus,
            vocab,
            metric,
            seed,
        } => run_baseline(
            &family,
            &model,
            &corpus,
            n,
            use_corpus,
            vocab.as_deref(),
            &metric,
            seed,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_model(family: &str, model_path: &std::path::Path) -> Result<EmbeddingModel> {
    let family: EmbeddingFamily = family.parse()?;
    let config = EmbeddingConfig::new(family, model_path);
    EmbeddingModel::load(&config)
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("progress bar template is valid");
    pb.set_style(style.progress_chars("#>-"));
    pb.set_message(message);
    pb
}

fn run_distances(
    family: &str,
    model_path: &std::path::Path,
    corpus_path: &std::path::Path,
    keep_empty: bool,
) -> Result<()> {
    let model = load_model(family, model_path)?;
    let corpus = PairedCorpus::from_json_file(corpus_path, !keep_empty)?;
    log::info!("[distances] {} sentence pairs", corpus.len());

    let transport = SinkhornTransport::new(&model);
    let mut cosines = Vec::with_capacity(corpus.len());
    let mut wmds = Vec::with_capacity(corpus.len());
    let mut unencodable = 0usize;

    let pb = progress_bar(corpus.len(), "computing distances");
    for (_, pair) in &corpus {
        pb.inc(1);

        match (
            embedding::encode(&model, &pair.gt),
            embedding::encode(&model, &pair.asr),
        ) {
            (Some(gt), Some(asr)) => cosines.push(distance::cosine_distance(&gt, &asr)),
            _ => unencodable += 1,
        }

        wmds.push(distance::word_mover_distance(&transport, &pair.gt, &pair.asr));
    }
    pb.finish_and_clear();

    if unencodable > 0 {
        log::warn!("[distances] {unencodable} pairs had no vocabulary coverage");
    }

    print_summary("cosine", cosines);
    print_summary("wmd", wmds);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_baseline(
    family: &str,
    model_path: &std::path::Path,
    corpus_path: &std::path::Path,
    n: usize,
    use_corpus: bool,
    vocab_path: Option<&std::path::Path>,
    metric: &str,
    seed: u64,
) -> Result<()> {
    let metric: Metric = metric.parse()?;
    let model = load_model(family, model_path)?;
    let corpus = PairedCorpus::from_json_file(corpus_path, true)?;

    let mut baseline = RandomBaseline::new(seed);
    let sentences = if use_corpus {
        baseline.sample_corpus(&corpus, n)?
    } else {
        let vocab_path = vocab_path
            .ok_or_else(|| Error::invalid_input("--vocab is required unless --use-corpus"))?;
        let vocab = load_vocabulary(vocab_path)?;
        baseline.generate(&vocab, n)?
    };
    log::info!("[baseline] generated {} sentences", sentences.len());

    let random_batch = embedding::batch_encode(&model, &sentences);
    let random_dists = distance::pairwise_distance(&random_batch.matrix, metric);

    let gt_sentences = corpus.gt_sentences();
    let corpus_batch = embedding::batch_encode(&model, &gt_sentences);
    let corpus_dists = distance::pairwise_distance(&corpus_batch.matrix, metric);

    println!("metric: {metric}");
    print_summary("random", random_dists);
    print_summary("corpus", corpus_dists);
    Ok(())
}

fn print_summary(label: &str, distances: Vec<f64>) {
    let total = distances.len();
    let clean = filter_distances(distances);
    let dropped = total - clean.len();

    println!("------ {label} ------");
    match Summary::from_values(&clean) {
        Some(summary) => {
            println!("{summary}");
            if dropped > 0 {
                println!("(excluded {dropped} invalid of {total} values)");
            }
        }
        None => println!("no valid distances (of {total} values)"),
    }
}
