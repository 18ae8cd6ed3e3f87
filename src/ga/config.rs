//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control one generation step.

use super::operators::{CrossoverMethod, MutationMethod};
use super::selection::{Selection, TournamentRule};
use crate::error::KnapsackError;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use knapsack_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1024);
/// assert_eq!(config.tournament_size, 3);
/// assert_eq!(config.elite_count(), 51);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knapsack_metaheur::ga::{CrossoverMethod, GaConfig, MutationMethod, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_methods("RWS", "2PX", "IVM")
///     .unwrap()
///     .with_elitism_ratio(0.1)
///     .with_mutation_ratio(0.2);
///
/// assert_eq!(config.selection, Selection::Roulette);
/// assert_eq!(config.crossover, CrossoverMethod::TwoPoint);
/// assert_eq!(config.mutation, MutationMethod::Inversion);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of candidates per generation. Must be even.
    pub population_size: usize,

    /// Indices sampled per tournament slot.
    pub tournament_size: usize,

    /// Winner rule for tournament selection.
    pub tournament_rule: TournamentRule,

    /// Fraction of the population carried over unchanged (0.0–1.0).
    ///
    /// The elite count is `floor(population_size * elitism_ratio)`.
    pub elitism_ratio: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover variant.
    pub crossover: CrossoverMethod,

    /// Mutation variant.
    pub mutation: MutationMethod,

    /// Probability of crossing a parent pair (0.0–1.0).
    ///
    /// When crossover is skipped, both parents pass through unchanged.
    pub crossover_ratio: f64,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_ratio: f64,

    /// Splices tried per crossover before falling back to the parents.
    pub conception_attempts: usize,

    /// Tries per mutation before falling back to the unmutated candidate.
    pub mutation_attempts: usize,

    /// Chance of stopping early after each item added to a random
    /// initial candidate.
    pub fill_exit_probability: f64,

    /// Whether to refresh fitness in parallel. Only honoured with the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1024,
            tournament_size: 3,
            tournament_rule: TournamentRule::default(),
            elitism_ratio: 0.05,
            selection: Selection::default(),
            crossover: CrossoverMethod::default(),
            mutation: MutationMethod::default(),
            crossover_ratio: 0.9,
            mutation_ratio: 0.1,
            conception_attempts: 10,
            mutation_attempts: 10,
            fill_exit_probability: 0.01,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_tournament_rule(mut self, rule: TournamentRule) -> Self {
        self.tournament_rule = rule;
        self
    }

    /// Sets the elitism ratio.
    pub fn with_elitism_ratio(mut self, ratio: f64) -> Self {
        self.elitism_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_crossover(mut self, crossover: CrossoverMethod) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: MutationMethod) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets selection, crossover and mutation from their identifiers.
    ///
    /// Fails on the first unrecognized identifier.
    pub fn with_methods(
        self,
        selection: &str,
        crossover: &str,
        mutation: &str,
    ) -> Result<Self, KnapsackError> {
        Ok(self
            .with_selection(selection.parse()?)
            .with_crossover(crossover.parse()?)
            .with_mutation(mutation.parse()?))
    }

    /// Sets the crossover ratio.
    pub fn with_crossover_ratio(mut self, ratio: f64) -> Self {
        self.crossover_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation ratio.
    pub fn with_mutation_ratio(mut self, ratio: f64) -> Self {
        self.mutation_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_conception_attempts(mut self, n: usize) -> Self {
        self.conception_attempts = n;
        self
    }

    pub fn with_mutation_attempts(mut self, n: usize) -> Self {
        self.mutation_attempts = n;
        self
    }

    pub fn with_fill_exit_probability(mut self, p: f64) -> Self {
        self.fill_exit_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel fitness refresh.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of elites carried into each new generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elitism_ratio) as usize
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        let invalid = |msg: &str| -> Result<(), KnapsackError> {
            Err(KnapsackError::InvalidConfig(msg.into()))
        };

        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.population_size % 2 != 0 {
            return invalid("population_size must be even");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.conception_attempts == 0 {
            return invalid("conception_attempts must be at least 1");
        }
        if self.mutation_attempts == 0 {
            return invalid("mutation_attempts must be at least 1");
        }
        for (name, ratio) in [
            ("elitism_ratio", self.elitism_ratio),
            ("crossover_ratio", self.crossover_ratio),
            ("mutation_ratio", self.mutation_ratio),
            ("fill_exit_probability", self.fill_exit_probability),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(KnapsackError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {ratio}"
                )));
            }
        }
        if self.elite_count() >= self.population_size {
            return invalid("elitism_ratio too high: elites fill entire population");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 1024);
        assert_eq!(config.tournament_size, 3);
        assert_eq!(config.tournament_rule, TournamentRule::HighestIndex);
        assert!((config.elitism_ratio - 0.05).abs() < 1e-10);
        assert_eq!(config.selection, Selection::Tournament);
        assert_eq!(config.crossover, CrossoverMethod::OnePoint);
        assert_eq!(config.mutation, MutationMethod::BitFlip);
        assert_eq!(config.conception_attempts, 10);
        assert_eq!(config.mutation_attempts, 10);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_tournament_size(5)
            .with_tournament_rule(TournamentRule::Fittest)
            .with_elitism_ratio(0.2)
            .with_crossover_ratio(0.8)
            .with_mutation_ratio(0.05)
            .with_conception_attempts(3)
            .with_mutation_attempts(4)
            .with_parallel(true);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.tournament_rule, TournamentRule::Fittest);
        assert!((config.elitism_ratio - 0.2).abs() < 1e-10);
        assert!((config.crossover_ratio - 0.8).abs() < 1e-10);
        assert!((config.mutation_ratio - 0.05).abs() < 1e-10);
        assert_eq!(config.conception_attempts, 3);
        assert_eq!(config.mutation_attempts, 4);
        assert!(config.parallel);
        assert_eq!(config.elite_count(), 40);
    }

    #[test]
    fn test_with_methods() {
        let config = GaConfig::default().with_methods("TS", "2PX", "DPM").unwrap();
        assert_eq!(config.selection, Selection::Tournament);
        assert_eq!(config.crossover, CrossoverMethod::TwoPoint);
        assert_eq!(config.mutation, MutationMethod::Displacement);
    }

    #[test]
    fn test_with_methods_fails_fast() {
        let err = GaConfig::default().with_methods("TS", "1PX", "ABC").unwrap_err();
        assert_eq!(
            err,
            KnapsackError::UnknownMethod {
                kind: "mutation",
                value: "ABC".into()
            }
        );
        assert!(GaConfig::default().with_methods("SUS", "1PX", "BFM").is_err());
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_elitism_ratio(1.5)
            .with_crossover_ratio(-0.5)
            .with_mutation_ratio(2.0);

        assert!((config.elitism_ratio - 1.0).abs() < 1e-10);
        assert!((config.crossover_ratio - 0.0).abs() < 1e-10);
        assert!((config.mutation_ratio - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_population_too_small() {
        assert!(GaConfig::default().with_population_size(0).validate().is_err());
    }

    #[test]
    fn test_validate_population_odd() {
        assert!(GaConfig::default().with_population_size(11).validate().is_err());
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elitism_ratio(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ratio_out_of_range() {
        let mut config = GaConfig::default();
        config.mutation_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_attempts() {
        assert!(GaConfig::default().with_conception_attempts(0).validate().is_err());
        assert!(GaConfig::default().with_mutation_attempts(0).validate().is_err());
        assert!(GaConfig::default().with_tournament_size(0).validate().is_err());
    }
}
