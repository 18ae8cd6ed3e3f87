//! Swarm update loop.

use super::config::PsoConfig;
use super::particle::Particle;
use crate::error::KnapsackError;
use crate::knapsack::{Candidate, FitnessStats, Knapsack};
use rand::Rng;
use tracing::trace;

/// A set of particles sharing one global best position.
///
/// Particles are kept sorted by fitness, highest first, between steps.
#[derive(Debug, Clone)]
pub struct Swarm {
    knapsack: Knapsack,
    config: PsoConfig,
    particles: Vec<Particle>,
    global_best: Candidate,
    iteration: usize,
}

impl Swarm {
    /// Creates a swarm of random particles.
    ///
    /// The global best starts at the fittest initial particle.
    pub fn new<R: Rng>(
        knapsack: Knapsack,
        config: PsoConfig,
        rng: &mut R,
    ) -> Result<Self, KnapsackError> {
        config.validate()?;

        let particles = (0..config.particle_count)
            .map(|_| Particle::random(&knapsack, &config, rng))
            .collect();

        Ok(Self::from_particles(knapsack, config, particles))
    }

    fn from_particles(knapsack: Knapsack, config: PsoConfig, mut particles: Vec<Particle>) -> Self {
        sort_particles(&mut particles);
        let global_best = particles
            .first()
            .map(|p| p.position().clone())
            .unwrap_or_else(|| knapsack.empty_candidate());

        Self {
            knapsack,
            config,
            particles,
            global_best,
            iteration: 0,
        }
    }

    /// Runs one PSO iteration and returns the global best.
    ///
    /// The global best is refreshed from the fittest particle at the start
    /// of the step, so a position first reached in this step is reported
    /// on the next one.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Candidate {
        self.refresh_global_best();

        let global_best = self.global_best.selection();
        for particle in &mut self.particles {
            particle.update_personal_best();
            particle.update_velocity(global_best, &self.config, rng);
            particle.update_position(&self.knapsack, rng);
        }

        sort_particles(&mut self.particles);
        self.iteration += 1;

        self.global_best.clone()
    }

    /// Adopts the fittest particle's position on strict improvement.
    fn refresh_global_best(&mut self) {
        if let Some(leader) = self.particles.first() {
            if leader.fitness() > self.global_best.fitness() {
                trace!(
                    iteration = self.iteration,
                    previous = self.global_best.fitness(),
                    fitness = leader.fitness(),
                    "global best improved"
                );
                self.global_best = leader.position().clone();
            }
        }
    }

    pub fn global_best(&self) -> &Candidate {
        &self.global_best
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn knapsack(&self) -> &Knapsack {
        &self.knapsack
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Fitness summary over current particle positions.
    pub fn stats(&self) -> FitnessStats {
        FitnessStats::from_fitness(self.particles.iter().map(Particle::fitness))
    }
}

fn sort_particles(particles: &mut [Particle]) {
    particles.sort_by(|a, b| b.fitness().cmp(&a.fitness()));
}
