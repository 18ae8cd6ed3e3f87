//! Knapsack instance model.
//!
//! - [`Item`] / [`ItemCatalogue`]: the immutable, shared item list
//! - [`Knapsack`]: catalogue plus capacity; evaluates and generates candidates
//! - [`Candidate`]: a selection with cached weight, value and fitness
//!
//! Fitness is the total value of the selected items when they fit, and
//! [`INFEASIBLE_FITNESS`] otherwise. Higher fitness is better.

mod candidate;
#[cfg(test)]
pub(crate) mod fixtures;
mod item;

pub use candidate::{
    sort_by_fitness_desc, Candidate, FitnessStats, Knapsack, INFEASIBLE_FITNESS,
};
pub use item::{Item, ItemCatalogue};
