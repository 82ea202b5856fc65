//! Tuner configuration.

use serde::{Deserialize, Serialize};

/// Boltzmann's constant, used purely as a scaling factor in the acceptance
/// probability. At the default temperatures this makes worsening moves
/// vanishingly likely while still accepting equal-cost moves.
pub const BOLTZMANN: f64 = 1.380_648_527_9e-23;

/// Configuration for a tuning run.
///
/// Defaults match the curated training setup: temperature 5000 cooled by
/// 0.95 over 5000 steps, up to 1000 inner steps per temperature.
///
/// # Examples
///
/// ```
/// use commerce_extraction::tuner::TunerConfig;
///
/// let config = TunerConfig::default()
///     .with_cooling_steps(200)
///     .with_steps_per_temp(50)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunerConfig {
    /// Starting temperature. Higher values keep worsening moves plausible
    /// for longer.
    pub initial_temperature: f64,

    /// Number of outer cooling iterations.
    pub cooling_steps: usize,

    /// Geometric decay factor applied after each cooling step, in (0, 1).
    pub cooling_fraction: f64,

    /// Maximum inner iterations per temperature; the inner loop also exits
    /// early as soon as an iteration leaves the current cost unchanged.
    pub steps_per_temp: usize,

    /// RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 5000.0,
            cooling_steps: 5000,
            cooling_fraction: 0.95,
            steps_per_temp: 1000,
            seed: None,
        }
    }
}

impl TunerConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_steps(mut self, n: usize) -> Self {
        self.cooling_steps = n;
        self
    }

    pub fn with_cooling_fraction(mut self, fraction: f64) -> Self {
        self.cooling_fraction = fraction;
        self
    }

    pub fn with_steps_per_temp(mut self, n: usize) -> Self {
        self.steps_per_temp = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.cooling_fraction <= 0.0 || self.cooling_fraction >= 1.0 {
            return Err(format!(
                "cooling_fraction must be in (0, 1), got {}",
                self.cooling_fraction
            ));
        }
        if self.cooling_steps == 0 {
            return Err("cooling_steps must be at least 1".into());
        }
        if self.steps_per_temp == 0 {
            return Err("steps_per_temp must be at least 1".into());
        }
        Ok(())
    }
}
