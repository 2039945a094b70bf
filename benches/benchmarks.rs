//! Benchmarks for Holocell operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holocell::{ConceptEncoding, Engine, EngineConfig, Hypervector, Primitives, Similarity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_random(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    c.bench_function("random", |b| b.iter(|| Primitives::random(&mut rng)));
}

fn benchmark_bind(c: &mut Criterion) {
    let mut a = Hypervector::from_seed(1);
    let other = Hypervector::from_seed(2);

    c.bench_function("bind", |b| {
        b.iter(|| Primitives::bind(black_box(&mut a), black_box(&other)))
    });
}

fn benchmark_bundle(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let base = Hypervector::from_seed(1);
    let other = Hypervector::from_seed(2);

    c.bench_function("bundle", |b| {
        b.iter(|| {
            let mut a = base.clone();
            Primitives::bundle(&mut a, black_box(&other), &mut rng);
            a
        })
    });
}

fn benchmark_permute(c: &mut Criterion) {
    let mut a = Hypervector::from_seed(1);

    c.bench_function("permute", |b| b.iter(|| Primitives::permute(black_box(&mut a))));
}

fn benchmark_resonance(c: &mut Criterion) {
    let a = Hypervector::from_seed(1);
    let other = Hypervector::from_seed(2);

    c.bench_function("resonance", |b| {
        b.iter(|| Similarity::resonance(black_box(&a), black_box(&other)))
    });
}

fn benchmark_query_1000(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig {
        concept_encoding: ConceptEncoding::Hashed { seed: 0 },
        ..EngineConfig::seeded(4)
    })
    .unwrap();
    for i in 0..1000 {
        engine.inject(&format!("concept_{}", i)).unwrap();
    }

    c.bench_function("query_1000", |b| {
        b.iter(|| engine.query(black_box("concept_500")))
    });
}

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    group.sample_size(10);

    for &size in &[100usize, 1000] {
        group.bench_function(format!("population_{}", size), |b| {
            b.iter_batched(
                || {
                    let engine = Engine::new(EngineConfig::seeded(5)).unwrap();
                    for i in 0..size {
                        engine.inject(&format!("cell_{}", i)).unwrap();
                    }
                    engine
                },
                |engine| engine.tick(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_random,
    benchmark_bind,
    benchmark_bundle,
    benchmark_permute,
    benchmark_resonance,
    benchmark_query_1000,
    benchmark_tick,
);
criterion_main!(benches);
