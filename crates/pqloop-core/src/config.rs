//! Network timing and randomness configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with PQLOOP_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing, coupling and randomness settings for a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Nominal toggle period in milliseconds.
    #[serde(default = "default_nominal_period")]
    pub nominal_period_ms: u64,

    /// Lower bound of a unit's base period, as a multiple of nominal.
    #[serde(default = "default_period_min_factor")]
    pub period_min_factor: f64,

    /// Upper bound of a unit's base period, as a multiple of nominal.
    #[serde(default = "default_period_max_factor")]
    pub period_max_factor: f64,

    /// Period multiplier applied while the neighbor slot reads 1.
    #[serde(default = "default_coupling_factor")]
    pub coupling_factor: f64,

    /// Floor of the effective period, as a fraction of nominal.
    #[serde(default = "default_min_period_factor")]
    pub min_period_factor: f64,

    /// Delay each unit's first toggle by a random phase in `[0, base)`.
    #[serde(default = "default_true")]
    pub random_phase: bool,

    /// Measurement settle delay range in milliseconds.
    #[serde(default = "default_settle_min")]
    pub settle_min_ms: u64,

    #[serde(default = "default_settle_max")]
    pub settle_max_ms: u64,

    /// Pause after each unsuccessful search round, in milliseconds.
    #[serde(default = "default_round_pause")]
    pub round_pause_ms: u64,

    /// How long `stop()` waits for units before reporting stragglers.
    #[serde(default = "default_stop_grace")]
    pub stop_grace_ms: u64,

    /// Master entropy seed. OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default value functions
fn default_nominal_period() -> u64 {
    1000
}

fn default_period_min_factor() -> f64 {
    0.5
}

fn default_period_max_factor() -> f64 {
    2.0
}

fn default_coupling_factor() -> f64 {
    0.5
}

fn default_min_period_factor() -> f64 {
    0.1
}

fn default_true() -> bool {
    true
}

fn default_settle_min() -> u64 {
    100
}

fn default_settle_max() -> u64 {
    300
}

fn default_round_pause() -> u64 {
    500
}

fn default_stop_grace() -> u64 {
    1000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            nominal_period_ms: default_nominal_period(),
            period_min_factor: default_period_min_factor(),
            period_max_factor: default_period_max_factor(),
            coupling_factor: default_coupling_factor(),
            min_period_factor: default_min_period_factor(),
            random_phase: true,
            settle_min_ms: default_settle_min(),
            settle_max_ms: default_settle_max(),
            round_pause_ms: default_round_pause(),
            stop_grace_ms: default_stop_grace(),
            seed: None,
        }
    }
}

impl NetworkConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: NetworkConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => NetworkConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `PQLOOP_*` environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary variable lookup.
    ///
    /// Only variables that are set and parse cleanly override the current
    /// values; everything else is left unchanged.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse().ok())
        }

        if let Some(v) = parsed(&lookup, "PQLOOP_NOMINAL_PERIOD_MS") {
            self.nominal_period_ms = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_PERIOD_MIN_FACTOR") {
            self.period_min_factor = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_PERIOD_MAX_FACTOR") {
            self.period_max_factor = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_COUPLING_FACTOR") {
            self.coupling_factor = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_MIN_PERIOD_FACTOR") {
            self.min_period_factor = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_RANDOM_PHASE") {
            self.random_phase = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_SETTLE_MIN_MS") {
            self.settle_min_ms = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_SETTLE_MAX_MS") {
            self.settle_max_ms = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_ROUND_PAUSE_MS") {
            self.round_pause_ms = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_STOP_GRACE_MS") {
            self.stop_grace_ms = v;
        }
        if let Some(v) = parsed(&lookup, "PQLOOP_SEED") {
            self.seed = Some(v);
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nominal_period_ms == 0 {
            return Err(ConfigError::ValidationError(
                "nominal_period_ms must be greater than 0".to_string(),
            ));
        }
        if !(self.period_min_factor > 0.0 && self.period_min_factor <= self.period_max_factor) {
            return Err(ConfigError::ValidationError(format!(
                "period factors must satisfy 0 < min <= max, got {} and {}",
                self.period_min_factor, self.period_max_factor
            )));
        }
        let longest = self.nominal_period().as_secs_f64() * self.period_max_factor;
        if Duration::try_from_secs_f64(longest).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "period_max_factor {} makes the longest period unrepresentable",
                self.period_max_factor
            )));
        }
        for (name, value) in [
            ("coupling_factor", self.coupling_factor),
            ("min_period_factor", self.min_period_factor),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        if self.settle_min_ms > self.settle_max_ms {
            return Err(ConfigError::ValidationError(format!(
                "settle range is inverted: {}ms > {}ms",
                self.settle_min_ms, self.settle_max_ms
            )));
        }
        Ok(())
    }

    pub fn nominal_period(&self) -> Duration {
        Duration::from_millis(self.nominal_period_ms)
    }

    /// Smallest period a unit may ever wait.
    pub fn period_floor(&self) -> Duration {
        self.nominal_period().mul_f64(self.min_period_factor)
    }

    pub fn round_pause(&self) -> Duration {
        Duration::from_millis(self.round_pause_ms)
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }

    /// Map a uniform draw in `[0, 1)` onto the settle range.
    pub fn settle_delay(&self, u: f64) -> Duration {
        let span_ns = (self.settle_max_ms - self.settle_min_ms) as f64 * 1e6;
        Duration::from_millis(self.settle_min_ms)
            + Duration::from_nanos((span_ns * u.clamp(0.0, 1.0)) as u64)
    }

    /// Map a uniform draw in `[0, 1)` onto the base period range.
    pub fn base_period(&self, u: f64) -> Duration {
        let factor = self.period_min_factor
            + (self.period_max_factor - self.period_min_factor) * u.clamp(0.0, 1.0);
        self.nominal_period().mul_f64(factor)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = NetworkConfig::default();
        assert_eq!(config.nominal_period_ms, 1000);
        assert_eq!(config.stop_grace_ms, 1000);
        assert!(config.random_phase);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_period_floor() {
        let config = NetworkConfig::default();
        let floor = config.period_floor().as_secs_f64();
        assert!((floor - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_base_period_spans_range() {
        let config = NetworkConfig::default();
        assert_eq!(config.base_period(0.0), Duration::from_millis(500));
        assert_eq!(config.base_period(1.0), Duration::from_millis(2000));
    }

    #[test]
    fn test_settle_delay_spans_range() {
        let config = NetworkConfig::default();
        assert_eq!(config.settle_delay(0.0), Duration::from_millis(100));
        assert_eq!(config.settle_delay(0.5), Duration::from_millis(200));
    }

    #[test]
    fn test_validate_zero_period() {
        let mut config = NetworkConfig::default();
        config.nominal_period_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_inverted_factors() {
        let mut config = NetworkConfig::default();
        config.period_min_factor = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unrepresentable_max_factor() {
        let mut config = NetworkConfig::default();
        config.period_max_factor = 1e300;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        config.period_max_factor = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_coupling_out_of_range() {
        let mut config = NetworkConfig::default();
        config.coupling_factor = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_inverted_settle_range() {
        let mut config = NetworkConfig::default();
        config.settle_min_ms = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config: NetworkConfig =
            serde_yaml_ng::from_str("nominal_period_ms: 250\nseed: 9\n").unwrap();
        assert_eq!(config.nominal_period_ms, 250);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.settle_max_ms, 300);
    }

    #[test]
    fn test_merge_vars_overrides_only_valid_values() {
        let vars: HashMap<&str, &str> = [
            ("PQLOOP_STOP_GRACE_MS", "250"),
            ("PQLOOP_SEED", "17"),
            ("PQLOOP_COUPLING_FACTOR", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = NetworkConfig::default()
            .merge_vars(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.stop_grace_ms, 250);
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.coupling_factor, 0.5);
    }
}
