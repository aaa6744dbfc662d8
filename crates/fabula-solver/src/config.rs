//! Tuning constants for the solver pipeline
//!
//! All values are compile-time defaults, independent of any single request.
//! The constraint units are unitless; only the relative magnitudes matter,
//! and `validate` enforces the ordering `0 < epsilon < min_duration` the
//! encoding relies on.

use crate::error::SolverError;
use serde::{Deserialize, Serialize};

/// Configuration for the solver pipeline.
///
/// # Examples
///
/// ```
/// use fabula_solver::SolverConfig;
///
/// // Default configuration (standard 1000-unit display)
/// let config = SolverConfig::default();
/// assert_eq!(config.scale, 1000.0);
///
/// // Narrow displays
/// let config = SolverConfig::compact();
/// assert_eq!(config.scale, 600.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Slack used to encode strict inequalities (`x < y` becomes
    /// `x - y <= -epsilon`). Must be positive and well below `min_duration`.
    pub epsilon: f64,

    /// Minimum duration of an interval event in constraint units, so an
    /// interval can never collapse to a point even under tight chains.
    pub min_duration: f64,

    /// Width of the display axis the placer maps distances onto.
    pub scale: f64,

    /// Padding kept free at each edge of the display axis.
    pub padding: f64,

    /// Minimum rendered width of an interval on the display axis.
    pub min_interval_width: f64,

    /// Upper bound on relaxation rounds; each round removes one assertion,
    /// so the effective bound is also capped by the assertion count.
    pub max_relaxation_rounds: usize,
}

impl Default for SolverConfig {
    /// Default configuration for a standard 1000-unit display
    ///
    /// - epsilon: 0.001 (strict-inequality slack)
    /// - min_duration: 1.0 (constraint units)
    /// - scale: 1000, padding: 50, min interval width: 20
    /// - relaxation cap: 100 rounds
    fn default() -> Self {
        Self {
            epsilon: 0.001,
            min_duration: 1.0,
            scale: 1000.0,
            padding: 50.0,
            min_interval_width: 20.0,
            max_relaxation_rounds: 100,
        }
    }
}

impl SolverConfig {
    /// Preset for narrow displays (minimaps, sidebars).
    pub fn compact() -> Self {
        Self {
            scale: 600.0,
            padding: 20.0,
            min_interval_width: 10.0,
            ..Default::default()
        }
    }

    /// Validate the configuration.
    ///
    /// The encoding of strict inequalities and minimum durations is only
    /// sound when `0 < epsilon < min_duration`, and the placer needs a
    /// usable range between the pads.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(SolverError::InvalidConfig(
                "epsilon must be finite and positive".to_string(),
            ));
        }
        if !(self.min_duration > self.epsilon && self.min_duration.is_finite()) {
            return Err(SolverError::InvalidConfig(format!(
                "min_duration {} must be finite and greater than epsilon {}",
                self.min_duration, self.epsilon
            )));
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(SolverError::InvalidConfig(
                "scale must be finite and positive".to_string(),
            ));
        }
        if self.padding < 0.0 || 2.0 * self.padding >= self.scale {
            return Err(SolverError::InvalidConfig(format!(
                "padding {} must be non-negative and leave room inside scale {}",
                self.padding, self.scale
            )));
        }
        if self.min_interval_width <= 0.0
            || self.min_interval_width >= self.scale - 2.0 * self.padding
        {
            return Err(SolverError::InvalidConfig(format!(
                "min_interval_width {} must fit inside the padded range",
                self.min_interval_width
            )));
        }
        if self.max_relaxation_rounds == 0 {
            return Err(SolverError::InvalidConfig(
                "max_relaxation_rounds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Usable width of the display axis between the pads.
    pub fn usable_range(&self) -> f64 {
        self.scale - 2.0 * self.padding
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
