//! SA configuration.

use super::annealer::Acceptance;
use crate::error::KnapsackError;

/// Configuration for the Simulated Annealing engine.
///
/// Cooling is geometric: after every step the temperature is multiplied by
/// `1 - cooling_rate`. The engine stops once the temperature falls below
/// `min_temperature`.
///
/// # Examples
///
/// ```
/// use knapsack_metaheur::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.01);
///
/// assert!(config.validate().is_ok());
/// assert!((config.alpha() - 0.99).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaConfig {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Fraction of the temperature removed per step, in (0, 1).
    pub cooling_rate: f64,

    /// Temperature floor; below it the engine reports termination.
    pub min_temperature: f64,

    /// Early-exit chance when filling the initial candidate. Zero fills
    /// the knapsack as far as the random order allows.
    pub fill_exit_probability: f64,

    /// Orientation of the Metropolis rule.
    pub acceptance: Acceptance,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.005,
            min_temperature: 1.0,
            fill_exit_probability: 0.0,
            acceptance: Acceptance::default(),
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_fill_exit_probability(mut self, p: f64) -> Self {
        self.fill_exit_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Geometric cooling factor `1 - cooling_rate`.
    pub fn alpha(&self) -> f64 {
        1.0 - self.cooling_rate
    }

    /// Number of steps before the temperature drops below the floor.
    ///
    /// Returns 0 when the initial temperature is already below it.
    pub fn step_budget(&self) -> usize {
        if self.initial_temperature < self.min_temperature {
            return 0;
        }
        let steps = (self.min_temperature / self.initial_temperature).ln() / self.alpha().ln();
        steps.floor() as usize + 1
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(KnapsackError::InvalidConfig(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.min_temperature > 0.0) {
            return Err(KnapsackError::InvalidConfig(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(KnapsackError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.005).abs() < 1e-10);
        assert!((config.min_temperature - 1.0).abs() < 1e-10);
        assert_eq!(config.acceptance, Acceptance::FitnessEnergy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_step_budget() {
        // 100 * 0.995^k < 1  <=>  k > ln(0.01) / ln(0.995) ~= 918.8
        assert_eq!(SaConfig::default().step_budget(), 919);

        let cold = SaConfig::default().with_initial_temperature(0.5);
        assert_eq!(cold.step_budget(), 0);
    }

    #[test]
    fn test_validate_bad_temperature() {
        assert!(SaConfig::default()
            .with_initial_temperature(-1.0)
            .validate()
            .is_err());
        assert!(SaConfig::default()
            .with_initial_temperature(f64::INFINITY)
            .validate()
            .is_err());
        assert!(SaConfig::default().with_min_temperature(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(SaConfig::default().with_cooling_rate(0.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(f64::NAN).validate().is_err());
    }
}
