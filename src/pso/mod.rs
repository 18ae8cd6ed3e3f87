//! Binary Particle Swarm Optimization (PSO).
//!
//! Each particle carries a bit-string position and a real-valued velocity
//! per item. Velocities follow the canonical PSO rule and are clamped;
//! positions are resampled bit by bit with probability `sigmoid(v_i)`.
//!
//! Positions are not repaired, so particles may become overweight. They
//! then score [`INFEASIBLE_FITNESS`](crate::knapsack::INFEASIBLE_FITNESS)
//! and never displace a feasible personal or global best.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Kennedy & Eberhart (1997), "A Discrete Binary Version of the Particle
//!   Swarm Algorithm"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod particle;
mod swarm;

pub use config::PsoConfig;
pub use particle::{sigmoid, Particle};
pub use swarm::Swarm;
