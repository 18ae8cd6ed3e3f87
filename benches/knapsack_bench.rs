//! Criterion benchmarks for the knapsack engines.
//!
//! Uses synthetic catalogues of increasing size and times a single
//! iteration of each engine from a fixed seeded state.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use knapsack_metaheur::engine::{Engine, EngineConfig, SearchEngine};
use knapsack_metaheur::ga::{CrossoverMethod, GaConfig, MutationMethod, Selection};
use knapsack_metaheur::knapsack::{Item, ItemCatalogue, Knapsack};
use knapsack_metaheur::pso::PsoConfig;
use knapsack_metaheur::random::create_rng;
use knapsack_metaheur::sa::SaConfig;

// ===========================================================================
// Synthetic instance
// ===========================================================================

/// `n` items with scattered weights and values; capacity holds about a
/// third of the total weight.
fn synthetic(n: usize) -> Knapsack {
    let items: Vec<Item> = (0..n)
        .map(|i| {
            let k = i as u64;
            Item::new(i + 1, 5 + (k * 37) % 61, 10 + (k * 53) % 89)
        })
        .collect();
    let catalogue = ItemCatalogue::from_items(items).expect("contiguous ids");
    let capacity = catalogue.total_weight() / 3;
    Knapsack::new(catalogue, capacity).expect("non-empty catalogue")
}

fn bench_step(c: &mut Criterion, group_name: &str, config: impl Fn() -> EngineConfig) {
    let mut group = c.benchmark_group(group_name);
    group.sample_size(10);

    for &n in &[50usize, 150, 500] {
        let mut rng = create_rng(42);
        let engine = Engine::build(synthetic(n), config(), &mut rng).expect("valid config");
        group.bench_with_input(BenchmarkId::from_parameter(n), &engine, |b, engine| {
            b.iter_batched(
                || engine.clone(),
                |mut e| black_box(e.step(&mut rng)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_step(c: &mut Criterion) {
    bench_step(c, "ga_step", || {
        GaConfig::default()
            .with_population_size(256)
            .with_selection(Selection::Tournament)
            .with_crossover(CrossoverMethod::OnePoint)
            .with_mutation(MutationMethod::BitFlip)
            .into()
    });
}

fn bench_ga_roulette_step(c: &mut Criterion) {
    bench_step(c, "ga_roulette_step", || {
        GaConfig::default()
            .with_population_size(256)
            .with_selection(Selection::Roulette)
            .with_crossover(CrossoverMethod::TwoPoint)
            .with_mutation(MutationMethod::Displacement)
            .into()
    });
}

fn bench_pso_step(c: &mut Criterion) {
    bench_step(c, "pso_step", || PsoConfig::default().into());
}

fn bench_sa_step(c: &mut Criterion) {
    bench_step(c, "sa_step", || SaConfig::default().into());
}

criterion_group!(
    benches,
    bench_ga_step,
    bench_ga_roulette_step,
    bench_pso_step,
    bench_sa_step
);
criterion_main!(benches);
