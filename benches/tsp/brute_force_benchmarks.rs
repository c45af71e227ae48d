use brute_tsp::graph::{seeded_random_graph, GeneratorConfig};
use brute_tsp::tsp::{BruteForceSolver, CycleEnumerator, SolverConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("brute_force_solve");
    group.sample_size(10);

    for n in [8usize, 10, 12] {
        let graph = seeded_random_graph(&GeneratorConfig::new(n), 42).unwrap();

        group.bench_with_input(BenchmarkId::new("sequential", n), &graph, |b, graph| {
            b.iter(|| BruteForceSolver::new(black_box(graph)).solve().unwrap())
        });

        group.bench_with_input(BenchmarkId::new("parallel", n), &graph, |b, graph| {
            let config = SolverConfig::new().with_parallel(true);
            b.iter(|| {
                BruteForceSolver::with_config(black_box(graph), config.clone())
                    .solve()
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_enumerate_dense(c: &mut Criterion) {
    // Every chord accepted: the densest graphs the generator produces.
    let config = GeneratorConfig::new(10).with_chords(10, 1.0);
    let graph = seeded_random_graph(&config, 7).unwrap();

    c.bench_function("enumerate_dense_10", |b| {
        b.iter(|| CycleEnumerator::new(black_box(&graph)).enumerate().unwrap())
    });
}

criterion_group!(benches, bench_solve, bench_enumerate_dense);
criterion_main!(benches);
