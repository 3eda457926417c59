//! Criterion benchmarks for the permutation engine.
//!
//! Measures the five crossover operators on a fixed pair of parents and a
//! short end-to-end run, independent of any real fitness domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evoperm::random::create_rng;
use evoperm::{Crossover, Engine, EngineConfig};
use rand::seq::SliceRandom;

fn random_permutation(n: usize, rng: &mut impl rand::Rng) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    for n in [50usize, 200] {
        let mut rng = create_rng(42);
        let p1 = random_permutation(n, &mut rng);
        let p2 = random_permutation(n, &mut rng);

        for strategy in Crossover::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), n),
                &(&p1, &p2),
                |b, (p1, p2)| {
                    b.iter(|| black_box(strategy.recombine(p1.as_slice(), p2.as_slice(), &mut rng)))
                },
            );
        }
    }
    group.finish();
}

fn bench_engine_run(c: &mut Criterion) {
    let fitness = |genes: &[usize]| {
        genes
            .windows(2)
            .map(|w| (w[0] as f64 - w[1] as f64).abs())
            .sum::<f64>()
    };

    let mut group = c.benchmark_group("engine");
    for strategy in [Crossover::Order, Crossover::Cycle] {
        let config = EngineConfig::default()
            .with_population_size(30)
            .with_chromosome_size(50)
            .with_iterations(50)
            .with_crossover(strategy)
            .with_seed(42);

        group.bench_function(BenchmarkId::new("run_50_generations", strategy.name()), |b| {
            b.iter(|| Engine::run(&fitness, black_box(&config)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_crossover, bench_engine_run);
criterion_main!(benches);
