//! Annealing configuration.

use crate::error::ConfigError;

/// Configuration for the layout annealer.
///
/// Cooling is geometric: after each outer iteration the temperature is
/// multiplied by `cooling_rate`, and the search stops once it falls to
/// `termination_threshold` or below.
///
/// # Examples
///
/// ```
/// use u_keylayout::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.9)
///     .with_max_iter_per_temperature(200)
///     .with_max_swaps_per_proposal(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Starting temperature. Higher values accept more worsening moves early.
    pub initial_temperature: f64,

    /// Multiplicative decay per outer iteration, in (0, 1).
    pub cooling_rate: f64,

    /// Proposals evaluated at each temperature level.
    pub max_iter_per_temperature: usize,

    /// Upper bound on transpositions applied by one proposal.
    pub max_swaps_per_proposal: usize,

    /// Temperature floor. The outer loop runs while `T > threshold`.
    pub termination_threshold: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
            max_iter_per_temperature: 100,
            max_swaps_per_proposal: 5,
            termination_threshold: 1e-6,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iter_per_temperature(mut self, n: usize) -> Self {
        self.max_iter_per_temperature = n;
        self
    }

    pub fn with_max_swaps_per_proposal(mut self, n: usize) -> Self {
        self.max_swaps_per_proposal = n;
        self
    }

    pub fn with_termination_threshold(mut self, t: f64) -> Self {
        self.termination_threshold = t;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Rejects anything that would keep the outer loop from terminating
    /// or the proposer from producing a neighbor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(ConfigError::InitialTemperature(self.initial_temperature));
        }
        if !(self.termination_threshold > 0.0)
            || self.termination_threshold >= self.initial_temperature
        {
            return Err(ConfigError::TerminationThreshold {
                threshold: self.termination_threshold,
                initial: self.initial_temperature,
            });
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::CoolingRate(self.cooling_rate));
        }
        if self.max_iter_per_temperature == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.max_swaps_per_proposal == 0 {
            return Err(ConfigError::ZeroSwaps);
        }
        Ok(())
    }

    /// Number of outer iterations the schedule will run.
    ///
    /// Follows the same floating-point multiplications as the search, so
    /// it matches the run exactly. Returns 0 for an invalid configuration.
    pub fn outer_iterations(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut temperature = self.initial_temperature;
        let mut count = 0;
        while temperature > self.termination_threshold {
            count += 1;
            temperature *= self.cooling_rate;
        }
        count
    }

    /// Temperature after `k` cooling steps, `T0 * rate^k`.
    ///
    /// For 1-based outer iteration `k` this is the value the loop cools to
    /// once the iteration's proposals are done.
    pub fn temperature_after(&self, k: usize) -> f64 {
        let exponent = k.min(i32::MAX as usize) as i32;
        self.initial_temperature * self.cooling_rate.powi(exponent)
    }
}
