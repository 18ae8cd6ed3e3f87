//! SA trajectory state and step.

use super::config::SaConfig;
use crate::error::KnapsackError;
use crate::knapsack::{Candidate, FitnessStats, Knapsack};
use rand::Rng;
use tracing::debug;

/// Single-candidate annealing state.
///
/// # Usage
///
/// ```
/// use knapsack_metaheur::knapsack::{ItemCatalogue, Knapsack};
/// use knapsack_metaheur::random::create_rng;
/// use knapsack_metaheur::sa::{Annealer, SaConfig};
///
/// let catalogue = ItemCatalogue::parse("#;weight;value\n1;10;60\n2;20;100\n3;30;120\n").unwrap();
/// let knapsack = Knapsack::new(catalogue, 50).unwrap();
/// let mut rng = create_rng(42);
///
/// let mut annealer = Annealer::new(knapsack, SaConfig::default(), &mut rng).unwrap();
/// while let Some(best) = annealer.step(&mut rng) {
///     assert!(best.weight() <= 50);
/// }
/// assert!(annealer.is_frozen());
/// ```
#[derive(Debug, Clone)]
pub struct Annealer {
    knapsack: Knapsack,
    config: SaConfig,
    current: Candidate,
    best: Candidate,
    temperature: f64,
    steps: usize,
    accepted_moves: usize,
    improving_moves: usize,
}

impl Annealer {
    /// Creates an annealer starting from a random candidate.
    pub fn new<R: Rng>(
        knapsack: Knapsack,
        config: SaConfig,
        rng: &mut R,
    ) -> Result<Self, KnapsackError> {
        config.validate()?;
        let start = knapsack.random_candidate(config.fill_exit_probability, rng);
        Ok(Self::from_parts(knapsack, config, start))
    }

    /// Creates an annealer starting from a given candidate.
    pub fn with_start(
        knapsack: Knapsack,
        config: SaConfig,
        start: Candidate,
    ) -> Result<Self, KnapsackError> {
        config.validate()?;
        if start.len() != knapsack.len() {
            return Err(KnapsackError::InvalidConfig(format!(
                "start candidate has {} genes, catalogue has {} items",
                start.len(),
                knapsack.len()
            )));
        }
        let start = knapsack.evaluate(start.into_selection());
        Ok(Self::from_parts(knapsack, config, start))
    }

    fn from_parts(knapsack: Knapsack, config: SaConfig, start: Candidate) -> Self {
        Self {
            temperature: config.initial_temperature,
            knapsack,
            config,
            best: start.clone(),
            current: start,
            steps: 0,
            accepted_moves: 0,
            improving_moves: 0,
        }
    }

    /// Runs one annealing step and returns the best candidate so far.
    ///
    /// Returns `None` once the temperature is below the floor; further
    /// calls keep returning `None` without touching the state.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Option<Candidate> {
        if self.is_frozen() {
            return None;
        }

        let neighbor = self.neighbor(rng);

        if neighbor.fitness() > self.best.fitness() {
            self.best = neighbor.clone();
        }

        let p = self
            .config
            .acceptance
            .probability(self.current.fitness(), neighbor.fitness(), self.temperature);
        if p >= 1.0 || rng.random_range(0.0..1.0) < p {
            if neighbor.fitness() > self.current.fitness() {
                self.improving_moves += 1;
            }
            self.accepted_moves += 1;
            self.current = neighbor;
        }

        self.temperature *= self.config.alpha();
        self.steps += 1;

        if self.is_frozen() {
            debug!(
                steps = self.steps,
                temperature = self.temperature,
                best = self.best.fitness(),
                "temperature floor reached"
            );
        }

        Some(self.best.clone())
    }

    /// A valid single-bit-flip neighbor of the current candidate.
    ///
    /// Random flips are tried first; if none is valid within `4 * N` draws,
    /// every position is scanned in order. A candidate with no valid
    /// neighbor yields a copy of itself.
    pub fn neighbor<R: Rng>(&self, rng: &mut R) -> Candidate {
        let n = self.current.len();
        if n == 0 {
            return self.current.clone();
        }

        for _ in 0..4 * n {
            let candidate = self.flipped(rng.random_range(0..n));
            if self.knapsack.is_valid(&candidate) {
                return candidate;
            }
        }

        (0..n)
            .map(|i| self.flipped(i))
            .find(|c| self.knapsack.is_valid(c))
            .unwrap_or_else(|| self.current.clone())
    }

    fn flipped(&self, idx: usize) -> Candidate {
        let mut selection = self.current.selection().to_vec();
        selection[idx] = !selection[idx];
        self.knapsack.evaluate(selection)
    }

    /// Whether the temperature has fallen below the floor.
    pub fn is_frozen(&self) -> bool {
        self.temperature < self.config.min_temperature
    }

    pub fn current(&self) -> &Candidate {
        &self.current
    }

    pub fn best(&self) -> &Candidate {
        &self.best
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn knapsack(&self) -> &Knapsack {
        &self.knapsack
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// Number of completed steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Steps whose neighbor became the current candidate.
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    /// Accepted steps that strictly raised the current fitness.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    /// Fitness summary over the current and best candidates.
    pub fn stats(&self) -> FitnessStats {
        FitnessStats::from_fitness([self.current.fitness(), self.best.fitness()])
    }
}

/// Metropolis acceptance with energy equal to fitness.
///
/// Returns `min(1, exp((current - neighbor) / T))`: a neighbor of equal or
/// lower fitness is always accepted, and one that gains `d` fitness is
/// accepted with probability `exp(-d / T)`.
pub fn acceptance_probability(current: u64, neighbor: u64, temperature: f64) -> f64 {
    if neighbor <= current {
        return 1.0;
    }
    if temperature <= 0.0 {
        return 0.0;
    }
    let gain = (neighbor - current) as f64;
    (-gain / temperature).exp()
}

/// Orientation of the Metropolis rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acceptance {
    /// Energy is fitness, as in [`acceptance_probability`].
    ///
    /// Lower-fitness neighbors always replace the current candidate and
    /// higher-fitness ones only sometimes; the search relies on best
    /// tracking over every proposed neighbor. This is the reference
    /// behaviour and the default.
    #[default]
    FitnessEnergy,

    /// Energy is negated fitness (classic maximizing annealing).
    ///
    /// Non-worsening neighbors are always accepted; one that loses `d`
    /// fitness is accepted with probability `exp(-d / T)`.
    Maximizing,
}

impl Acceptance {
    /// Probability of moving from `current` to `neighbor` at `temperature`.
    pub fn probability(self, current: u64, neighbor: u64, temperature: f64) -> f64 {
        match self {
            Acceptance::FitnessEnergy => acceptance_probability(current, neighbor, temperature),
            Acceptance::Maximizing => acceptance_probability(neighbor, current, temperature),
        }
    }
}
