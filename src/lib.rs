//! Metaheuristic search for the 0/1 knapsack problem.
//!
//! Three interchangeable engines share one candidate representation:
//!
//! - **Genetic Algorithm (GA)**: Population-based evolution with roulette
//!   or tournament selection, 1-/2-point crossover, five mutation variants
//!   and elitism.
//! - **Particle Swarm Optimization (PSO)**: Binary PSO where velocities map
//!   to bit probabilities through a sigmoid.
//! - **Simulated Annealing (SA)**: Single-candidate bit-flip trajectory with
//!   Metropolis acceptance and geometric cooling.
//!
//! Every engine implements [`engine::SearchEngine`], whose `step()` returns
//! the best candidate of that iteration. [`runner::SearchRunner`] drives an
//! engine for a fixed iteration budget.
//!
//! # Architecture
//!
//! The item catalogue is immutable and shared by reference count across all
//! candidates. Each engine owns its state outright and draws randomness only
//! from the generator passed into each call, so a seeded run is
//! reproducible. Infeasible intermediate candidates are absorbed by bounded
//! retries with fallback; only configuration errors are returned to the
//! caller.
//!
//! # Example
//!
//! ```
//! use knapsack_metaheur::engine::{Engine, EngineConfig};
//! use knapsack_metaheur::ga::GaConfig;
//! use knapsack_metaheur::knapsack::{ItemCatalogue, Knapsack};
//! use knapsack_metaheur::random::create_rng;
//! use knapsack_metaheur::runner::SearchRunner;
//!
//! let text = "#;weight;value\n1;10;60\n2;20;100\n3;30;120\n4;15;75\n";
//! let knapsack = Knapsack::new(ItemCatalogue::parse(text)?, 45)?;
//!
//! let config = GaConfig::default()
//!     .with_population_size(32)
//!     .with_methods("RWS", "2PX", "EXM")?;
//!
//! let mut rng = create_rng(42);
//! let mut engine = Engine::build(knapsack, EngineConfig::from(config), &mut rng)?;
//! let result = SearchRunner::run(&mut engine, 50, &mut rng);
//!
//! assert!(result.best.weight() <= 45);
//! println!("best {} = {}", result.best, result.best.fitness());
//! # Ok::<(), knapsack_metaheur::error::KnapsackError>(())
//! ```

pub mod engine;
pub mod error;
pub mod ga;
pub mod knapsack;
pub mod pso;
pub mod random;
pub mod runner;
pub mod sa;
