//! Simulation parameters

use super::rest::RestDetector;
use crate::error::{GrnError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lowest concentration a protein may take
pub const ZERO: f64 = 1e-10;

/// Step cap for stabilisation
pub const INIT_PERIOD: usize = 10_000;

/// Window of the rest detector
pub const REST_STEP: usize = 100;

/// Drift tolerated by the rest detector
pub const REST_EPSILON: f64 = ZERO;

/// Parameters of the discrete-time recurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrnConfig {
    /// Concentration floor
    pub zero: f64,
    /// Maximum steps run by stabilisation
    pub init_period: usize,
    /// Steps compared by the rest detector, also the minimum before it may fire
    pub rest_window: usize,
    /// Largest per-protein drift still counted as rest
    pub rest_epsilon: f64,
    /// Steepness of the transfer table `exp(beta * (s - umax))`
    pub beta: f64,
    /// Multiplier on every production delta
    pub rate: f64,
}

impl Default for GrnConfig {
    fn default() -> Self {
        Self {
            zero: ZERO,
            init_period: INIT_PERIOD,
            rest_window: REST_STEP,
            rest_epsilon: REST_EPSILON,
            beta: 1.0,
            rate: 1.0,
        }
    }
}

impl GrnConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.zero > 0.0 && self.zero.is_finite()) {
            return Err(GrnError::InvalidConfig(format!("zero must be positive, got {}", self.zero)));
        }
        if self.rest_window == 0 {
            return Err(GrnError::InvalidConfig("rest_window must be at least 1".into()));
        }
        if !(self.rest_epsilon >= 0.0) {
            return Err(GrnError::InvalidConfig(format!(
                "rest_epsilon must be non-negative, got {}",
                self.rest_epsilon
            )));
        }
        if !(self.beta > 0.0 && self.beta.is_finite()) {
            return Err(GrnError::InvalidConfig(format!("beta must be positive, got {}", self.beta)));
        }
        if !self.rate.is_finite() {
            return Err(GrnError::InvalidConfig(format!("rate must be finite, got {}", self.rate)));
        }
        Ok(())
    }

    pub fn rest_detector(&self) -> RestDetector {
        RestDetector {
            window: self.rest_window,
            epsilon: self.rest_epsilon,
        }
    }

    /// Load and validate a JSON configuration; missing fields take defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GrnError::unreadable(path, e))?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| GrnError::unreadable(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GrnConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.init_period, 10_000);
        assert_eq!(config.rest_window, 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            GrnConfig { zero: 0.0, ..GrnConfig::default() },
            GrnConfig { rest_window: 0, ..GrnConfig::default() },
            GrnConfig { rest_epsilon: -1.0, ..GrnConfig::default() },
            GrnConfig { beta: f64::NAN, ..GrnConfig::default() },
            GrnConfig { rate: f64::INFINITY, ..GrnConfig::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(GrnError::InvalidConfig(_))), "{:?}", config);
        }
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grn.json");
        std::fs::write(&path, r#"{ "beta": 0.5, "rest_window": 20 }"#).unwrap();
        let config = GrnConfig::load(&path).unwrap();
        assert_eq!(config.beta, 0.5);
        assert_eq!(config.rest_window, 20);
        assert_eq!(config.init_period, INIT_PERIOD);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grn.json");
        let config = GrnConfig { rate: 0.25, ..GrnConfig::default() };
        config.save(&path).unwrap();
        assert_eq!(GrnConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            GrnConfig::load(dir.path().join("missing.json")),
            Err(GrnError::SourceUnreadable { .. })
        ));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(GrnConfig::load(&path), Err(GrnError::Config(_))));

        std::fs::write(&path, r#"{ "zero": -1.0 }"#).unwrap();
        assert!(matches!(GrnConfig::load(&path), Err(GrnError::InvalidConfig(_))));
    }
}
