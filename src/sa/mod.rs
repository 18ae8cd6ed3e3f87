//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Each step proposes a valid single-bit-flip neighbor,
//! moves to it under a Metropolis rule whose randomness shrinks as the
//! temperature cools, and keeps the best candidate ever proposed.
//!
//! By default energy equals fitness, so the rule reads
//! `min(1, exp((f_current - f_neighbor) / T))`.
//! [`Acceptance::Maximizing`] negates the energy instead.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod annealer;
mod config;

pub use annealer::{acceptance_probability, Acceptance, Annealer};
pub use config::SaConfig;
