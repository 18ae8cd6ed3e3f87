//! Genetic Algorithm engine.
//!
//! Each generation runs a fixed pipeline over a fixed-size [`Population`]:
//!
//! 1. Copy the top `elitism_ratio` share of candidates aside (the elite)
//! 2. Select parents with [`Selection`] (roulette wheel or tournament)
//! 3. Pair parents without replacement and cross them with [`CrossoverMethod`]
//! 4. Mutate offspring with [`MutationMethod`]
//! 5. Re-merge the elite and refill from the offspring at random
//!
//! Crossover and mutation retry a bounded number of times and fall back to
//! their inputs, so an initial population of feasible candidates stays
//! feasible.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, ratios, operators)
//! - [`Population`]: Owns one generation and advances it
//!
//! # Submodules
//!
//! - [`operators`]: Bit-string crossover and the five mutation variants
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
mod population;
mod selection;

pub use config::GaConfig;
pub use operators::{CrossoverMethod, MutationMethod};
pub use population::Population;
pub use selection::{Selection, TournamentRule};
