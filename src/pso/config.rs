//! PSO configuration.

use crate::error::KnapsackError;

/// Configuration for binary Particle Swarm Optimization.
///
/// # Examples
///
/// ```
/// use knapsack_metaheur::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_particle_count(50)
///     .with_inertia(0.9)
///     .with_coefficients(2.0, 2.0)
///     .with_velocity_bounds(6.0, 6.0);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.velocity_limit(), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    pub particle_count: usize,

    /// Inertia weight `w`: how much of the previous velocity is kept.
    pub inertia: f64,

    /// Cognitive coefficient `c1`: pull toward the particle's personal best.
    pub cognitive: f64,

    /// Social coefficient `c2`: pull toward the swarm's global best.
    pub social: f64,

    /// Magnitude of the lower velocity bound; velocities are clamped to
    /// `[-min_velocity, max_velocity]`.
    pub min_velocity: f64,

    /// Upper velocity bound.
    pub max_velocity: f64,

    /// Chance of stopping early after each item added to a random
    /// initial position.
    pub fill_exit_probability: f64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            min_velocity: 4.0,
            max_velocity: 4.0,
            fill_exit_probability: 0.01,
        }
    }
}

impl PsoConfig {
    pub fn with_particle_count(mut self, n: usize) -> Self {
        self.particle_count = n;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    /// Sets the cognitive (`c1`) and social (`c2`) coefficients.
    pub fn with_coefficients(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    /// Sets the velocity clamp `[-min, max]`.
    pub fn with_velocity_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_velocity = min;
        self.max_velocity = max;
        self
    }

    pub fn with_fill_exit_probability(mut self, p: f64) -> Self {
        self.fill_exit_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Largest absolute velocity any dimension can hold.
    pub fn velocity_limit(&self) -> f64 {
        self.min_velocity.max(self.max_velocity)
    }

    /// Clamps a velocity into `[-min_velocity, max_velocity]`.
    pub fn clamp_velocity(&self, v: f64) -> f64 {
        v.clamp(-self.min_velocity, self.max_velocity)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.particle_count == 0 {
            return Err(KnapsackError::InvalidConfig(
                "particle_count must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() {
                return Err(KnapsackError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("min_velocity", self.min_velocity),
            ("max_velocity", self.max_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(KnapsackError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.fill_exit_probability) {
            return Err(KnapsackError::InvalidConfig(format!(
                "fill_exit_probability must be in [0, 1], got {}",
                self.fill_exit_probability
            )));
        }
        Ok(())
    }
}
