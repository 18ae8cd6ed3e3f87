//! Property tests for the invariants shared by all engines.

use knapsack_metaheur::ga::operators::{crossover, mutate, splice};
use knapsack_metaheur::ga::{CrossoverMethod, GaConfig, MutationMethod, Population};
use knapsack_metaheur::knapsack::{Item, ItemCatalogue, Knapsack, INFEASIBLE_FITNESS};
use knapsack_metaheur::pso::{PsoConfig, Swarm};
use knapsack_metaheur::random::create_rng;
use knapsack_metaheur::sa::{Annealer, SaConfig};
use proptest::prelude::*;

/// An instance of 2..=24 items with weights 1..=40, values 2..=60, and a
/// capacity that admits every single item.
fn instance() -> impl Strategy<Value = Knapsack> {
    prop::collection::vec((1u64..=40, 2u64..=60), 2..=24).prop_flat_map(|pairs| {
        let total: u64 = pairs.iter().map(|&(w, _)| w).sum();
        (Just(pairs), 40u64..=total.max(40))
    })
    .prop_map(|(pairs, capacity)| {
        let items = pairs
            .iter()
            .enumerate()
            .map(|(i, &(w, v))| Item::new(i + 1, w, v))
            .collect();
        Knapsack::new(ItemCatalogue::from_items(items).unwrap(), capacity).unwrap()
    })
}

fn mutation_method() -> impl Strategy<Value = MutationMethod> {
    prop::sample::select(MutationMethod::ALL.to_vec())
}

fn crossover_method() -> impl Strategy<Value = CrossoverMethod> {
    prop_oneof![Just(CrossoverMethod::OnePoint), Just(CrossoverMethod::TwoPoint)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_candidates_are_valid(knapsack in instance(), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        for _ in 0..10 {
            let c = knapsack.random_candidate(0.01, &mut rng);
            prop_assert_eq!(c.len(), knapsack.len());
            prop_assert!(c.weight() <= knapsack.capacity());
            prop_assert!(knapsack.is_valid(&c));
        }
    }

    #[test]
    fn overweight_fitness_is_sentinel(knapsack in instance(), bits in prop::collection::vec(any::<bool>(), 24)) {
        let selection: Vec<bool> = bits[..knapsack.len()].to_vec();
        let c = knapsack.evaluate(selection);
        if c.weight() > knapsack.capacity() {
            prop_assert_eq!(c.fitness(), INFEASIBLE_FITNESS);
        } else {
            prop_assert_eq!(c.fitness(), c.value());
        }
    }

    #[test]
    fn crossover_yields_two_full_length_children(
        knapsack in instance(),
        method in crossover_method(),
        seed in any::<u64>(),
    ) {
        let mut rng = create_rng(seed);
        let p1 = knapsack.random_candidate(0.01, &mut rng);
        let p2 = knapsack.random_candidate(0.01, &mut rng);
        let (c1, c2) = crossover(&knapsack, &p1, &p2, method, 10, &mut rng);
        prop_assert_eq!(c1.len(), knapsack.len());
        prop_assert_eq!(c2.len(), knapsack.len());
        prop_assert!(knapsack.is_valid(&c1));
        prop_assert!(knapsack.is_valid(&c2));
    }

    #[test]
    fn splice_preserves_genes(
        bits in prop::collection::vec(any::<(bool, bool)>(), 1..40),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (p1, p2): (Vec<bool>, Vec<bool>) = bits.into_iter().unzip();
        let n = p1.len();
        let (x, y) = (a.index(n + 1), b.index(n + 1));
        let (cut1, cut2) = (x.min(y), x.max(y));
        let (c1, c2) = splice(&p1, &p2, cut1, cut2);
        prop_assert_eq!(c1.len(), n);
        prop_assert_eq!(c2.len(), n);
        for i in 0..n {
            // Each position keeps the parents' pair of genes, possibly swapped.
            prop_assert!((c1[i] == p1[i] && c2[i] == p2[i]) || (c1[i] == p2[i] && c2[i] == p1[i]));
        }
    }

    #[test]
    fn mutation_is_valid_or_noop(
        knapsack in instance(),
        method in mutation_method(),
        seed in any::<u64>(),
    ) {
        let mut rng = create_rng(seed);
        let original = knapsack.random_candidate(0.01, &mut rng);
        let mutated = mutate(&knapsack, &original, method, 10, &mut rng);
        prop_assert_eq!(mutated.len(), knapsack.len());
        if mutated.selection() != original.selection() {
            prop_assert!(knapsack.is_valid(&mutated));
        } else {
            prop_assert_eq!(&mutated, &original);
        }
    }

    #[test]
    fn permutation_mutations_preserve_item_count(
        bits in prop::collection::vec(any::<bool>(), 2..40),
        method in mutation_method(),
        seed in any::<u64>(),
    ) {
        prop_assume!(method != MutationMethod::BitFlip);
        let mut rng = create_rng(seed);
        let mut selection = bits.clone();
        method.apply(&mut selection, &mut rng);
        prop_assert_eq!(selection.len(), bits.len());
        prop_assert_eq!(
            selection.iter().filter(|&&b| b).count(),
            bits.iter().filter(|&&b| b).count()
        );
    }

    #[test]
    fn population_size_is_invariant(knapsack in instance(), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let config = GaConfig::default().with_population_size(16).with_elitism_ratio(0.125);
        let mut population = Population::new(knapsack, config, &mut rng).unwrap();
        for _ in 0..5 {
            population.evolve(&mut rng);
            prop_assert_eq!(population.individuals().len(), 16);
            prop_assert_eq!(population.count_invalid(), 0);
        }
    }

    #[test]
    fn pso_velocity_stays_bounded(
        knapsack in instance(),
        seed in any::<u64>(),
        min_v in 0.0f64..8.0,
        max_v in 0.0f64..8.0,
    ) {
        let config = PsoConfig::default()
            .with_particle_count(8)
            .with_velocity_bounds(min_v, max_v);
        let limit = config.velocity_limit();
        let mut rng = create_rng(seed);
        let mut swarm = Swarm::new(knapsack, config, &mut rng).unwrap();
        for _ in 0..5 {
            swarm.step(&mut rng);
            for p in swarm.particles() {
                prop_assert!(p.velocity().iter().all(|v| v.abs() <= limit));
            }
        }
    }

    #[test]
    fn sa_best_never_decreases(knapsack in instance(), seed in any::<u64>()) {
        let config = SaConfig::default().with_initial_temperature(20.0).with_cooling_rate(0.05);
        let mut rng = create_rng(seed);
        let mut annealer = Annealer::new(knapsack, config, &mut rng).unwrap();
        let mut last_best = annealer.best().fitness();
        let mut last_temperature = annealer.temperature();
        while let Some(best) = annealer.step(&mut rng) {
            prop_assert!(best.fitness() >= last_best);
            prop_assert!(annealer.temperature() < last_temperature);
            last_best = best.fitness();
            last_temperature = annealer.temperature();
        }
        prop_assert!(annealer.temperature() < 1.0);
    }
}

#[test]
fn one_point_splice_scenario() {
    let p1 = [true, false, true, false];
    let p2 = [false, true, false, true];
    let (c1, c2) = splice(&p1, &p2, 2, 4);
    assert_eq!(c1, vec![true, false, false, true]);
    assert_eq!(c2, vec![false, true, true, false]);
}
