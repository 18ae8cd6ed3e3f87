//! Parent selection strategies.
//!
//! Both strategies replace a whole generation: given `n` candidates they
//! return `n` picks (cloned, with replacement).
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::error::KnapsackError;
use crate::knapsack::{sort_by_fitness_desc, Candidate};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Parent selection strategy.
///
/// # Examples
///
/// ```
/// use knapsack_metaheur::ga::Selection;
///
/// let sel: Selection = "RWS".parse().unwrap();
/// assert_eq!(sel, Selection::Roulette);
/// assert!("XYZ".parse::<Selection>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection, `"RWS"`.
    ///
    /// # Complexity
    /// O(n) to build the wheel, O(log n) per pick
    #[cfg_attr(feature = "serde", serde(rename = "RWS"))]
    Roulette,

    /// Tournament selection, `"TS"`. Size and winner rule come from
    /// [`GaConfig`](super::GaConfig).
    ///
    /// # Complexity
    /// O(n log n) sort, then O(k) per pick
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "TS"))]
    Tournament,
}

impl Selection {
    /// The short identifier used in configuration files.
    pub fn identifier(&self) -> &'static str {
        match self {
            Selection::Roulette => "RWS",
            Selection::Tournament => "TS",
        }
    }

    /// Replaces `population.len()` slots with selected parents.
    ///
    /// Tournament selection sorts `population` (fitness descending) in place.
    pub fn select<R: Rng>(
        &self,
        population: &mut [Candidate],
        tournament_size: usize,
        rule: TournamentRule,
        rng: &mut R,
    ) -> Vec<Candidate> {
        let count = population.len();
        match self {
            Selection::Roulette => roulette_wheel(population, count, rng),
            Selection::Tournament => tournament(population, tournament_size, rule, count, rng),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Selection {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RWS" => Ok(Selection::Roulette),
            "TS" => Ok(Selection::Tournament),
            other => Err(KnapsackError::UnknownMethod {
                kind: "selection",
                value: other.to_string(),
            }),
        }
    }
}

/// How a tournament picks its winner among the sampled indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TournamentRule {
    /// Keep the candidate at the largest sampled index of the
    /// fitness-sorted population.
    ///
    /// Since the population is sorted best first, this favours the *less*
    /// fit of the sampled candidates. It reproduces the reference
    /// behaviour and is the default.
    #[default]
    HighestIndex,

    /// Keep the fittest of the sampled candidates (classic tournament).
    Fittest,
}

/// Roulette wheel selection.
///
/// Cumulative probabilities `fitness / total` are laid out in the current
/// population order; each pick draws `r` in `[0, 1)` and takes the first
/// candidate whose cumulative probability is `>= r`.
///
/// A population whose fitness sums to zero falls back to uniform picks.
pub fn roulette_wheel<R: Rng>(population: &[Candidate], count: usize, rng: &mut R) -> Vec<Candidate> {
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    let total: u64 = population.iter().map(Candidate::fitness).sum();
    if total == 0 {
        return (0..count)
            .map(|_| population[rng.random_range(0..n)].clone())
            .collect();
    }

    let mut cumulative = Vec::with_capacity(n);
    let mut running = 0.0;
    for candidate in population {
        running += candidate.fitness() as f64 / total as f64;
        cumulative.push(running);
    }

    (0..count)
        .map(|_| {
            let r: f64 = rng.random_range(0.0..1.0);
            // First index with cumulative >= r; the last slot absorbs rounding.
            let idx = cumulative.partition_point(|&c| c < r).min(n - 1);
            population[idx].clone()
        })
        .collect()
}

/// Tournament selection over the fitness-sorted population.
///
/// For every output slot, `size` indices are drawn uniformly with
/// replacement and the winner is chosen by `rule`.
pub fn tournament<R: Rng>(
    population: &mut [Candidate],
    size: usize,
    rule: TournamentRule,
    count: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }
    let size = size.max(1);

    sort_by_fitness_desc(population);

    (0..count)
        .map(|_| {
            let mut winner = rng.random_range(0..n);
            for _ in 1..size {
                let idx = rng.random_range(0..n);
                let better = match rule {
                    TournamentRule::HighestIndex => idx > winner,
                    TournamentRule::Fittest => {
                        population[idx].fitness() > population[winner].fitness()
                    }
                };
                if better {
                    winner = idx;
                }
            }
            population[winner].clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knapsack::{Item, ItemCatalogue, Knapsack};
    use crate::random::create_rng;

    /// One candidate per item, each selecting only that item.
    fn singletons(values: &[u64]) -> Vec<Candidate> {
        let items = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Item::new(i + 1, 1, v))
            .collect();
        let knapsack = Knapsack::new(ItemCatalogue::from_items(items).unwrap(), 100).unwrap();
        (0..values.len())
            .map(|i| {
                let mut sel = vec![false; values.len()];
                sel[i] = true;
                knapsack.evaluate(sel)
            })
            .collect()
    }

    fn counts(picks: &[Candidate], population: &[Candidate]) -> Vec<u32> {
        population
            .iter()
            .map(|c| picks.iter().filter(|p| *p == c).count() as u32)
            .collect()
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("RWS".parse::<Selection>().unwrap(), Selection::Roulette);
        assert_eq!("TS".parse::<Selection>().unwrap(), Selection::Tournament);
        let err = "rws".parse::<Selection>().unwrap_err();
        assert!(matches!(err, KnapsackError::UnknownMethod { kind: "selection", .. }));
        assert_eq!(Selection::Roulette.to_string(), "RWS");
    }

    #[test]
    fn test_roulette_is_proportional() {
        let pop = singletons(&[10, 30, 60]);
        let mut rng = create_rng(42);
        let picks = roulette_wheel(&pop, 10_000, &mut rng);
        let c = counts(&picks, &pop);

        assert!(c[2] > c[1] && c[1] > c[0], "expected proportional counts, got {c:?}");
        assert!((5500..6500).contains(&c[2]), "expected ~60%, got {c:?}");
    }

    #[test]
    fn test_roulette_zero_total_is_uniform() {
        let pop = singletons(&[0, 0, 0, 0]);
        let mut rng = create_rng(42);
        let picks = roulette_wheel(&pop, 10_000, &mut rng);
        // All candidates differ by selection, so counts are distinguishable.
        for c in counts(&picks, &pop) {
            assert!(c > 1500, "expected roughly uniform picks");
        }
    }

    #[test]
    fn test_roulette_output_size() {
        let mut pop = singletons(&[5, 6, 7, 8]);
        let mut rng = create_rng(1);
        let picks = Selection::Roulette.select(&mut pop, 3, TournamentRule::default(), &mut rng);
        assert_eq!(picks.len(), 4);
    }

    #[test]
    fn test_tournament_highest_index_favours_last_rank() {
        let mut pop = singletons(&[10, 50, 100, 80]);
        let mut rng = create_rng(42);
        let picks = tournament(&mut pop, 4, TournamentRule::HighestIndex, 10_000, &mut rng);

        // Sorted descending: [100, 80, 50, 10]; highest index holds fitness 10.
        let worst = picks.iter().filter(|c| c.fitness() == 10).count();
        let best = picks.iter().filter(|c| c.fitness() == 100).count();
        assert!(worst > 6000, "expected last rank to dominate, got {worst}");
        assert!(best < worst);
    }

    #[test]
    fn test_tournament_fittest_favours_best() {
        let mut pop = singletons(&[10, 50, 100, 80]);
        let mut rng = create_rng(42);
        let picks = tournament(&mut pop, 4, TournamentRule::Fittest, 10_000, &mut rng);
        let best = picks.iter().filter(|c| c.fitness() == 100).count();
        assert!(best > 6000, "expected best to dominate, got {best}");
    }

    #[test]
    fn test_tournament_size_one_is_uniform() {
        let mut pop = singletons(&[10, 20, 30, 40]);
        let mut rng = create_rng(42);
        let picks = tournament(&mut pop, 1, TournamentRule::HighestIndex, 10_000, &mut rng);
        for c in counts(&picks, &pop) {
            assert!(c > 1500, "expected roughly uniform picks");
        }
    }

    #[test]
    fn test_tournament_sorts_population() {
        let mut pop = singletons(&[10, 50, 100, 80]);
        let mut rng = create_rng(42);
        Selection::Tournament.select(&mut pop, 3, TournamentRule::HighestIndex, &mut rng);
        let f: Vec<u64> = pop.iter().map(Candidate::fitness).collect();
        assert_eq!(f, vec![100, 80, 50, 10]);
    }

    #[test]
    fn test_empty_population() {
        let mut rng = create_rng(42);
        assert!(roulette_wheel(&[], 5, &mut rng).is_empty());
        assert!(tournament(&mut [], 3, TournamentRule::Fittest, 5, &mut rng).is_empty());
    }
}
