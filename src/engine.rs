//! Uniform per-iteration contract over the three engines.
//!
//! [`SearchEngine`] is implemented by [`Population`], [`Swarm`] and
//! [`Annealer`]. [`Engine`] wraps whichever one was chosen by an
//! [`EngineConfig`], so a driver can hold any of them behind one type.

use crate::error::KnapsackError;
use crate::ga::{GaConfig, Population};
use crate::knapsack::{Candidate, FitnessStats, Knapsack};
use crate::pso::{PsoConfig, Swarm};
use crate::sa::{Annealer, SaConfig};
use rand::Rng;

/// A search engine advanced one iteration at a time.
pub trait SearchEngine {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs one iteration and returns the best candidate it reports.
    ///
    /// `None` means the engine has terminated and will produce nothing
    /// further; it is not an error.
    fn step<R: Rng>(&mut self, rng: &mut R) -> Option<Candidate>;

    /// Best candidate held in the current state.
    fn best(&self) -> Candidate;

    /// Fitness summary of the current state.
    fn stats(&self) -> FitnessStats;
}

impl SearchEngine for Population {
    fn name(&self) -> &'static str {
        "ga"
    }

    fn step<R: Rng>(&mut self, rng: &mut R) -> Option<Candidate> {
        Some(self.evolve(rng))
    }

    fn best(&self) -> Candidate {
        self.fittest().clone()
    }

    fn stats(&self) -> FitnessStats {
        Population::stats(self)
    }
}

impl SearchEngine for Swarm {
    fn name(&self) -> &'static str {
        "pso"
    }

    fn step<R: Rng>(&mut self, rng: &mut R) -> Option<Candidate> {
        Some(Swarm::step(self, rng))
    }

    fn best(&self) -> Candidate {
        self.global_best().clone()
    }

    fn stats(&self) -> FitnessStats {
        Swarm::stats(self)
    }
}

impl SearchEngine for Annealer {
    fn name(&self) -> &'static str {
        "sa"
    }

    fn step<R: Rng>(&mut self, rng: &mut R) -> Option<Candidate> {
        Annealer::step(self, rng)
    }

    fn best(&self) -> Candidate {
        Annealer::best(self).clone()
    }

    fn stats(&self) -> FitnessStats {
        Annealer::stats(self)
    }
}

/// Engine selection together with its parameters.
///
/// With the `serde` feature this deserializes from an externally tagged
/// map, e.g. `{"genetic": {"population_size": 200}}`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EngineConfig {
    Genetic(GaConfig),
    Swarm(PsoConfig),
    Annealing(SaConfig),
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::Genetic(GaConfig::default())
    }
}

impl EngineConfig {
    /// Validates the wrapped configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        match self {
            EngineConfig::Genetic(c) => c.validate(),
            EngineConfig::Swarm(c) => c.validate(),
            EngineConfig::Annealing(c) => c.validate(),
        }
    }
}

impl From<GaConfig> for EngineConfig {
    fn from(config: GaConfig) -> Self {
        EngineConfig::Genetic(config)
    }
}

impl From<PsoConfig> for EngineConfig {
    fn from(config: PsoConfig) -> Self {
        EngineConfig::Swarm(config)
    }
}

impl From<SaConfig> for EngineConfig {
    fn from(config: SaConfig) -> Self {
        EngineConfig::Annealing(config)
    }
}

/// Any of the three engines.
///
/// # Examples
///
/// ```
/// use knapsack_metaheur::engine::{Engine, EngineConfig, SearchEngine};
/// use knapsack_metaheur::knapsack::{ItemCatalogue, Knapsack};
/// use knapsack_metaheur::pso::PsoConfig;
/// use knapsack_metaheur::random::create_rng;
///
/// let catalogue = ItemCatalogue::parse("#;weight;value\n1;10;60\n2;20;100\n3;30;120\n").unwrap();
/// let knapsack = Knapsack::new(catalogue, 50).unwrap();
/// let mut rng = create_rng(42);
///
/// let config = EngineConfig::from(PsoConfig::default().with_particle_count(10));
/// let mut engine = Engine::build(knapsack, config, &mut rng).unwrap();
/// assert_eq!(engine.name(), "pso");
/// assert!(engine.step(&mut rng).is_some());
/// ```
#[derive(Debug, Clone)]
pub enum Engine {
    Genetic(Population),
    Swarm(Swarm),
    Annealing(Annealer),
}

impl Engine {
    /// Validates `config` and initializes the chosen engine.
    pub fn build<R: Rng>(
        knapsack: Knapsack,
        config: EngineConfig,
        rng: &mut R,
    ) -> Result<Self, KnapsackError> {
        Ok(match config {
            EngineConfig::Genetic(c) => Engine::Genetic(Population::new(knapsack, c, rng)?),
            EngineConfig::Swarm(c) => Engine::Swarm(Swarm::new(knapsack, c, rng)?),
            EngineConfig::Annealing(c) => Engine::Annealing(Annealer::new(knapsack, c, rng)?),
        })
    }
}

impl SearchEngine for Engine {
    fn name(&self) -> &'static str {
        match self {
            Engine::Genetic(e) => e.name(),
            Engine::Swarm(e) => e.name(),
            Engine::Annealing(e) => e.name(),
        }
    }

    fn step<R: Rng>(&mut self, rng: &mut R) -> Option<Candidate> {
        match self {
            Engine::Genetic(e) => SearchEngine::step(e, rng),
            Engine::Swarm(e) => SearchEngine::step(e, rng),
            Engine::Annealing(e) => SearchEngine::step(e, rng),
        }
    }

    fn best(&self) -> Candidate {
        match self {
            Engine::Genetic(e) => SearchEngine::best(e),
            Engine::Swarm(e) => SearchEngine::best(e),
            Engine::Annealing(e) => SearchEngine::best(e),
        }
    }

    fn stats(&self) -> FitnessStats {
        match self {
            Engine::Genetic(e) => SearchEngine::stats(e),
            Engine::Swarm(e) => SearchEngine::stats(e),
            Engine::Annealing(e) => SearchEngine::stats(e),
        }
    }
}
