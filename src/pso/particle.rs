//! Binary PSO particle.

use super::config::PsoConfig;
use crate::error::KnapsackError;
use crate::knapsack::{Candidate, Knapsack};
use rand::Rng;

/// Logistic function mapping a velocity to a bit probability.
///
/// ```
/// use knapsack_metaheur::pso::sigmoid;
///
/// assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
/// assert!(sigmoid(4.0) > 0.98);
/// ```
pub fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}

/// A swarm member: a position, a per-dimension velocity and the best
/// position this particle has visited.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    position: Candidate,
    velocity: Vec<f64>,
    personal_best: Candidate,
}

impl Particle {
    /// Creates a particle at `position`; the personal best starts there.
    ///
    /// Fails if `velocity` does not have one entry per dimension.
    pub fn new(position: Candidate, velocity: Vec<f64>) -> Result<Self, KnapsackError> {
        if position.len() != velocity.len() {
            return Err(KnapsackError::InvalidConfig(format!(
                "velocity has {} entries, position has {} genes",
                velocity.len(),
                position.len()
            )));
        }
        Ok(Self::at(position, velocity))
    }

    fn at(position: Candidate, velocity: Vec<f64>) -> Self {
        Self {
            personal_best: position.clone(),
            position,
            velocity,
        }
    }

    /// Creates a particle at a random position with velocities drawn
    /// uniformly from `[-min_velocity, max_velocity]`.
    pub fn random<R: Rng>(knapsack: &Knapsack, config: &PsoConfig, rng: &mut R) -> Self {
        let position = knapsack.random_candidate(config.fill_exit_probability, rng);
        let velocity = (0..knapsack.len())
            .map(|_| rng.random_range(-config.min_velocity..=config.max_velocity))
            .collect();
        Self::at(position, velocity)
    }

    pub fn position(&self) -> &Candidate {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn personal_best(&self) -> &Candidate {
        &self.personal_best
    }

    pub fn fitness(&self) -> u64 {
        self.position.fitness()
    }

    /// Replaces the personal best on strict improvement. Returns whether it
    /// changed.
    pub fn update_personal_best(&mut self) -> bool {
        if self.position.fitness() > self.personal_best.fitness() {
            self.personal_best = self.position.clone();
            true
        } else {
            false
        }
    }

    /// Applies `v' = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)` per
    /// dimension, then clamps.
    pub fn update_velocity<R: Rng>(&mut self, global_best: &[bool], config: &PsoConfig, rng: &mut R) {
        let position = self.position.selection();
        let personal = self.personal_best.selection();

        for (i, v) in self.velocity.iter_mut().enumerate() {
            let x = bit(position[i]);
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();

            let next = config.inertia * *v
                + config.cognitive * r1 * (bit(personal[i]) - x)
                + config.social * r2 * (bit(global_best[i]) - x);

            *v = config.clamp_velocity(next);
        }
    }

    /// Resamples every bit with probability `sigmoid(v_i)` of being set,
    /// then re-evaluates fitness.
    pub fn update_position<R: Rng>(&mut self, knapsack: &Knapsack, rng: &mut R) {
        let mut selection = std::mem::take(&mut self.position).into_selection();
        for (bit, &v) in selection.iter_mut().zip(&self.velocity) {
            *bit = rng.random::<f64>() < sigmoid(v);
        }
        self.position = knapsack.evaluate(selection);
    }
}

fn bit(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
