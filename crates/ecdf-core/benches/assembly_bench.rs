use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ecdf_core::{absolute_difference, ecdf_vector_list, ecdf_vector_list_bootstrap, SubsetPartition};
use rand::prelude::*;

fn generate_uniform_data(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.gen::<f64>() * 10.0).collect()
}

fn bins(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64 * 10.0 / (n + 1) as f64).collect()
}

fn bench_subset_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("SubsetPairs");
    let bins = bins(16);

    for &subsets in &[2usize, 4, 8, 16] {
        let data = generate_uniform_data(subsets * 25, 42);
        let partition = SubsetPartition::from_sizes(&vec![25; subsets]);
        group.bench_with_input(BenchmarkId::new("k", subsets), &data, |b, data| {
            b.iter(|| ecdf_vector_list(black_box(data), &bins, &absolute_difference, partition.indices()))
        });
    }
    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bootstrap");
    let bins = bins(16);

    for &size in &[50usize, 100, 200] {
        let a = generate_uniform_data(size, 1);
        let b_data = generate_uniform_data(size, 2);
        group.bench_with_input(BenchmarkId::new("n", size), &size, |b, _| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                ecdf_vector_list_bootstrap(
                    black_box(&a),
                    black_box(&b_data),
                    &bins,
                    &absolute_difference,
                    100,
                    &mut rng,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_subset_pairs, bench_bootstrap);
criterion_main!(benches);
