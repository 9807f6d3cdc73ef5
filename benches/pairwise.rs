//! Benchmark for the batched pairwise distance hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use semdist::distance::{pairwise_distance, Metric};

fn embedding_matrix(n: usize, f: usize) -> Array2<f32> {
    // Deterministic pseudo-embeddings; values are irrelevant to the cost.
    Array2::from_shape_fn((n, f), |(i, j)| ((i * 31 + j * 17) % 101) as f32 * 0.01 - 0.5)
}

fn bench_pairwise(c: &mut Criterion) {
    let matrix = embedding_matrix(200, 300);

    c.bench_function("pairwise_cosine_200x300", |b| {
        b.iter(|| pairwise_distance(black_box(&matrix), Metric::Cosine))
    });

    c.bench_function("pairwise_euclidean_200x300", |b| {
        b.iter(|| pairwise_distance(black_box(&matrix), Metric::Euclidean))
    });
}

criterion_group!(benches, bench_pairwise);
criterion_main!(benches);
