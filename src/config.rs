//! Simulation configuration
//!
//! Loaded from JSON (every field optional, missing fields take their defaults) and
//! overridden field by field from the command line.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::classifier::{ClassifierVariant, Thresholds};
use crate::error::SimError;

/// Default delay between evaluations (milliseconds)
pub const DEFAULT_INTERVAL_MS: u64 = 2_000;

/// Default delay between embedded send/receive steps (milliseconds)
pub const DEFAULT_EXCHANGE_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Delay between ticks (milliseconds)
    pub interval_ms: u64,
    /// Stop after this many ticks; run until stopped when absent
    pub max_iterations: Option<u64>,
    /// Seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Classifier input variant
    pub variant: ClassifierVariant,
    /// Classification thresholds
    pub thresholds: Thresholds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            max_iterations: None,
            seed: None,
            variant: ClassifierVariant::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON configuration without validating it.
    ///
    /// Use this when overrides are still to be applied; validate the merged result.
    pub fn parse_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config = Self::parse_json(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.interval_ms == 0 && self.max_iterations.is_none() {
            return Err(SimError::InvalidConfig(
                "interval_ms of 0 requires max_iterations".to_string(),
            ));
        }
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Band;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(2));
        assert_eq!(config.max_iterations, None);
        assert_eq!(config.variant, ClassifierVariant::MovementAware);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SimulationConfig::from_json(r#"{"seed": 7, "variant": "basic"}"#).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.variant, ClassifierVariant::Basic);
        assert_eq!(config.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = SimulationConfig {
            interval_ms: 250,
            max_iterations: Some(10),
            seed: Some(1234),
            ..Default::default()
        };
        config.thresholds.excellent.humidity_pct = Band::new(35, 55);

        let json = config.to_json().unwrap();
        let loaded = SimulationConfig::from_json(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_unbounded_busy_loop() {
        let result = SimulationConfig::from_json(r#"{"interval_ms": 0}"#);
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));

        let bounded = SimulationConfig::from_json(r#"{"interval_ms": 0, "max_iterations": 3}"#);
        assert!(bounded.is_ok());
    }

    #[test]
    fn test_parse_defers_validation_to_merged_config() {
        let mut config = SimulationConfig::parse_json(r#"{"interval_ms": 0}"#).unwrap();
        assert!(config.validate().is_err());

        config.max_iterations = Some(3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_band() {
        let json = r#"{
            "thresholds": {
                "excellent": {
                    "temperature_c": { "min": 30, "max": 20 },
                    "humidity_pct": { "min": 30, "max": 60 }
                },
                "ideal": {
                    "temperature_c": { "min": 10, "max": 35 },
                    "humidity_pct": { "min": 20, "max": 70 }
                },
                "optimized": {
                    "temperature_c": { "min": -10, "max": 40 },
                    "humidity_pct": { "min": 0, "max": 100 }
                }
            }
        }"#;

        let result = SimulationConfig::from_json(json);
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = SimulationConfig::from_json("not valid json");
        assert!(matches!(result, Err(SimError::JsonError(_))));
    }
}
