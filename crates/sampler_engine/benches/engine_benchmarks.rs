//! Criterion benchmarks for sampler_engine.
//!
//! Benchmarks cover:
//! - Uniform generation, one at a time and batched
//! - Binomial replicates at the reference trial count
//! - Fixed and weighted multinomial replicates
//! - Exponential variates into a reused buffer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sampler_engine::rng::{UniformEngine, UniformSource};
use sampler_engine::{CountMatrix, Sampler};

fn bench_uniform_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniform_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("next_uniform", n_samples),
            &n_samples,
            |b, &n| {
                let mut engine = UniformEngine::from_seed(42);
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n {
                        sum += engine.next_uniform();
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("fill_uniform", n_samples),
            &n_samples,
            |b, &n| {
                let mut engine = UniformEngine::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    engine.fill_uniform(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

fn bench_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial");
    group.sample_size(20);

    for k in [10, 100] {
        group.bench_with_input(BenchmarkId::new("n_100000", k), &k, |b, &k| {
            let mut sampler = Sampler::from_seed(42);
            let mut out = vec![0u64; k];
            b.iter(|| {
                sampler.binomial_into(0.5, 100_000, k, &mut out).unwrap();
                black_box(out.iter().sum::<u64>())
            });
        });
    }

    group.finish();
}

fn bench_multinomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("multinomial");

    group.bench_function("fixed_6x1000x20", |b| {
        let mut sampler = Sampler::from_seed(42);
        let mut out = CountMatrix::zeros(20, 6);
        b.iter(|| {
            sampler.multinomial_fixed_into(6, 1000, 20, &mut out).unwrap();
            black_box(out.as_slice()[0])
        });
    });

    for categories in [5, 50, 500] {
        let thetas = vec![1.0 / categories as f64; categories];
        group.bench_with_input(
            BenchmarkId::new("dynamic_1000x20", categories),
            &thetas,
            |b, thetas| {
                let mut sampler = Sampler::from_seed(42);
                let mut out = CountMatrix::zeros(20, thetas.len());
                b.iter(|| {
                    let discarded = sampler
                        .multinomial_dynamic_into(thetas, 1000, 20, &mut out)
                        .unwrap();
                    black_box((discarded, out.as_slice()[0]))
                });
            },
        );
    }

    group.finish();
}

fn bench_exponential(c: &mut Criterion) {
    let mut group = c.benchmark_group("exponential");

    for n_samples in [1_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("lambda_2", n_samples),
            &n_samples,
            |b, &n| {
                let mut sampler = Sampler::from_seed(42);
                let mut out = vec![0.0; n];
                b.iter(|| {
                    sampler.exponential_into(2.0, n, &mut out).unwrap();
                    black_box(out.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_uniform_generation,
    bench_binomial,
    bench_multinomial,
    bench_exponential
);
criterion_main!(benches);
