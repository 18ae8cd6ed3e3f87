//! GA generation loop.
//!
//! [`Population`] owns one generation of candidates and advances it one
//! generation per [`evolve`](Population::evolve) call:
//! elite extraction → selection → offspring → mutation → elite re-merge.

use super::config::GaConfig;
use super::operators::{crossover, mutate};
use crate::error::KnapsackError;
use crate::knapsack::{sort_by_fitness_desc, Candidate, FitnessStats, Knapsack};
use rand::Rng;
use tracing::trace;

/// A generation of candidates evolving under a [`GaConfig`].
///
/// # Usage
///
/// ```
/// use knapsack_metaheur::ga::{GaConfig, Population};
/// use knapsack_metaheur::knapsack::{ItemCatalogue, Knapsack};
/// use knapsack_metaheur::random::create_rng;
///
/// let catalogue = ItemCatalogue::parse("#;weight;value\n1;10;60\n2;20;100\n3;30;120\n").unwrap();
/// let knapsack = Knapsack::new(catalogue, 50).unwrap();
/// let mut rng = create_rng(42);
///
/// let config = GaConfig::default().with_population_size(20);
/// let mut population = Population::new(knapsack, config, &mut rng).unwrap();
/// let best = population.evolve(&mut rng);
/// assert!(best.weight() <= 50);
/// ```
#[derive(Debug, Clone)]
pub struct Population {
    knapsack: Knapsack,
    config: GaConfig,
    individuals: Vec<Candidate>,
    generation: usize,
}

impl Population {
    /// Creates a population of random candidates.
    pub fn new<R: Rng>(
        knapsack: Knapsack,
        config: GaConfig,
        rng: &mut R,
    ) -> Result<Self, KnapsackError> {
        config.validate()?;

        let individuals = (0..config.population_size)
            .map(|_| knapsack.random_candidate(config.fill_exit_probability, rng))
            .collect();

        Ok(Self {
            knapsack,
            config,
            individuals,
            generation: 0,
        })
    }

    /// Creates a population from given candidates.
    ///
    /// The count must equal `config.population_size` and every selection
    /// must cover the catalogue.
    pub fn with_individuals(
        knapsack: Knapsack,
        config: GaConfig,
        individuals: Vec<Candidate>,
    ) -> Result<Self, KnapsackError> {
        config.validate()?;

        if individuals.len() != config.population_size {
            return Err(KnapsackError::InvalidConfig(format!(
                "expected {} individuals, got {}",
                config.population_size,
                individuals.len()
            )));
        }
        if let Some(bad) = individuals.iter().find(|c| c.len() != knapsack.len()) {
            return Err(KnapsackError::InvalidConfig(format!(
                "individual has {} genes, catalogue has {} items",
                bad.len(),
                knapsack.len()
            )));
        }

        // Fitness is recomputed against this instance's capacity.
        let individuals = individuals
            .into_iter()
            .map(|c| knapsack.evaluate(c.into_selection()))
            .collect();

        Ok(Self {
            knapsack,
            config,
            individuals,
            generation: 0,
        })
    }

    /// Advances one generation and returns its fittest candidate.
    pub fn evolve<R: Rng>(&mut self, rng: &mut R) -> Candidate {
        // 1. Snapshot the elite before selection reshapes the population.
        let elite = self.extract_elite();

        // 2. Select parents.
        let selected = self.config.selection.select(
            &mut self.individuals,
            self.config.tournament_size,
            self.config.tournament_rule,
            rng,
        );

        // 3. Offspring production.
        let offspring = self.produce_offspring(selected, rng);

        // 4. Offspring mutation.
        let mut offspring = self.mutate_offspring(offspring, rng);

        // 5. Refresh fitness of every offspring.
        refresh_fitness(&self.knapsack, &mut offspring, self.config.parallel);

        // 6. Merge the elite back in.
        self.individuals = merge_elite(elite, offspring, self.config.population_size, rng);
        self.generation += 1;

        debug_assert_eq!(self.individuals.len(), self.config.population_size);

        sort_by_fitness_desc(&mut self.individuals);
        self.individuals[0].clone()
    }

    /// Sorts the population and deep-copies its top `elite_count` candidates.
    fn extract_elite(&mut self) -> Vec<Candidate> {
        sort_by_fitness_desc(&mut self.individuals);
        let count = self.config.elite_count().min(self.individuals.len());
        trace!(generation = self.generation, elite = count, "elite extracted");
        self.individuals[..count].to_vec()
    }

    /// Pairs parents without replacement until the offspring pool is full.
    ///
    /// Each pair is crossed with probability `crossover_ratio`, otherwise
    /// both parents pass through unchanged.
    fn produce_offspring<R: Rng>(&self, mut pool: Vec<Candidate>, rng: &mut R) -> Vec<Candidate> {
        let target = pool.len();
        let mut children = Vec::with_capacity(target);

        while children.len() < target && pool.len() >= 2 {
            let parent1 = pool.swap_remove(rng.random_range(0..pool.len()));
            let parent2 = pool.swap_remove(rng.random_range(0..pool.len()));

            if rng.random_range(0.0..1.0) < self.config.crossover_ratio {
                let (c1, c2) = crossover(
                    &self.knapsack,
                    &parent1,
                    &parent2,
                    self.config.crossover,
                    self.config.conception_attempts,
                    rng,
                );
                children.push(c1);
                children.push(c2);
            } else {
                children.push(parent1);
                children.push(parent2);
            }
        }

        children
    }

    /// Mutates each offspring independently with probability `mutation_ratio`.
    fn mutate_offspring<R: Rng>(&self, offspring: Vec<Candidate>, rng: &mut R) -> Vec<Candidate> {
        offspring
            .into_iter()
            .map(|child| {
                if rng.random_range(0.0..1.0) < self.config.mutation_ratio {
                    mutate(
                        &self.knapsack,
                        &child,
                        self.config.mutation,
                        self.config.mutation_attempts,
                        rng,
                    )
                } else {
                    child
                }
            })
            .collect()
    }

    /// The fittest candidate; ties go to the earliest.
    pub fn fittest(&self) -> &Candidate {
        self.individuals
            .iter()
            .reduce(|best, c| if c.fitness() > best.fitness() { c } else { best })
            .expect("population must not be empty")
    }

    pub fn individuals(&self) -> &[Candidate] {
        &self.individuals
    }

    pub fn knapsack(&self) -> &Knapsack {
        &self.knapsack
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness summary of the current generation.
    pub fn stats(&self) -> FitnessStats {
        FitnessStats::from_fitness(self.individuals.iter().map(Candidate::fitness))
    }

    /// Number of candidates failing the validity check.
    pub fn count_invalid(&self) -> usize {
        self.individuals
            .iter()
            .filter(|c| !self.knapsack.is_valid(c))
            .count()
    }
}

/// Starts from the elite and fills up by drawing offspring at random.
///
/// Surplus offspring are discarded at random rather than by fitness.
fn merge_elite<R: Rng>(
    elite: Vec<Candidate>,
    mut offspring: Vec<Candidate>,
    size: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    let mut next = elite;
    next.reserve(size.saturating_sub(next.len()));

    while next.len() < size && !offspring.is_empty() {
        let idx = rng.random_range(0..offspring.len());
        next.push(offspring.swap_remove(idx));
    }
    next
}

/// Recomputes fitness for every candidate.
#[cfg(feature = "parallel")]
fn refresh_fitness(knapsack: &Knapsack, candidates: &mut [Candidate], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        candidates.par_iter_mut().for_each(|c| {
            *c = knapsack.evaluate(std::mem::take(c).into_selection());
        });
    } else {
        for c in candidates.iter_mut() {
            *c = knapsack.evaluate(std::mem::take(c).into_selection());
        }
    }
}

/// Recomputes fitness for every candidate.
#[cfg(not(feature = "parallel"))]
fn refresh_fitness(knapsack: &Knapsack, candidates: &mut [Candidate], _parallel: bool) {
    for c in candidates.iter_mut() {
        *c = knapsack.evaluate(std::mem::take(c).into_selection());
    }
}

// ============================================================================
// Tests
// ============================================================================
