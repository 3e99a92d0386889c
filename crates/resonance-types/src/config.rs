// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{ResonanceError, ResonanceResult};

/// Default classifier target: coherence at or above this is RESONANT.
pub const DEFAULT_TARGET: f64 = 0.85;
/// Default classifier floor: coherence below this is AUTO_TUNING.
pub const DEFAULT_FLOOR: f64 = 0.65;
/// Default weight of the primary (semantic) score in the composite.
pub const DEFAULT_W_PRIMARY: f64 = 0.6;
/// Default weight of the secondary (affective) score in the composite.
pub const DEFAULT_W_SECONDARY: f64 = 0.4;
/// Composite score below which the harmonizer broadcasts a re-tuning pulse.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.75;
/// Penalty weights for (extractive, domination, disembodiment).
pub const DEFAULT_PENALTY_WEIGHTS: [f64; 3] = [1.0, 1.2, 1.0];
/// Reward weights for (reciprocity, co-creation, humility).
pub const DEFAULT_REWARD_WEIGHTS: [f64; 3] = [1.0, 1.1, 1.0];
/// Scale of the entropy-preserving regularizer.
pub const DEFAULT_REGULARIZATION_BETA: f64 = 0.1;

/// Runtime configuration for the Resonance Kernel.
///
/// The composite weights and the harmonizer alert threshold are
/// independent knobs; nothing derives one from the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceConfig {
    /// Coherence must be >= this to be RESONANT.
    /// Default: 0.85.
    pub target: f64,

    /// Coherence below this is AUTO_TUNING; between floor and target
    /// is REFLECTIVE.
    /// Default: 0.65.
    pub floor: f64,

    /// Weight for the primary score in the composite.
    /// Default: 0.6.
    pub w_primary: f64,

    /// Weight for the secondary score in the composite.
    /// Default: 0.4.
    pub w_secondary: f64,

    /// Harmonizer cutoff for composite scores.
    /// Default: 0.75.
    pub alert_threshold: f64,

    /// Relational loss penalty weights (lambda).
    pub penalty_weights: [f64; 3],

    /// Relational loss reward weights (gamma).
    pub reward_weights: [f64; 3],

    /// Beta for the entropy-preserving regularizer.
    /// Default: 0.1.
    pub regularization_beta: f64,
}

impl Default for ResonanceConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            floor: DEFAULT_FLOOR,
            w_primary: DEFAULT_W_PRIMARY,
            w_secondary: DEFAULT_W_SECONDARY,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            penalty_weights: DEFAULT_PENALTY_WEIGHTS,
            reward_weights: DEFAULT_REWARD_WEIGHTS,
            regularization_beta: DEFAULT_REGULARIZATION_BETA,
        }
    }
}

impl ResonanceConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> ResonanceResult<()> {
        for (name, value) in [
            ("target", self.target),
            ("floor", self.floor),
            ("alert_threshold", self.alert_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ResonanceError::Config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if self.floor > self.target {
            return Err(ResonanceError::Config(format!(
                "floor must not exceed target, got floor={} target={}",
                self.floor, self.target
            )));
        }
        if (self.w_primary + self.w_secondary - 1.0).abs() > 1e-9 {
            return Err(ResonanceError::Config(format!(
                "w_primary + w_secondary must equal 1.0, got {} + {} = {}",
                self.w_primary,
                self.w_secondary,
                self.w_primary + self.w_secondary
            )));
        }
        if self
            .penalty_weights
            .iter()
            .chain(self.reward_weights.iter())
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ResonanceError::Config(
                "penalty and reward weights must be finite and >= 0".to_string(),
            ));
        }
        if self.regularization_beta.is_nan() || self.regularization_beta < 0.0 {
            return Err(ResonanceError::Config(format!(
                "regularization_beta must be >= 0, got {}",
                self.regularization_beta
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ResonanceResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ResonanceError::Config(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ResonanceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_floor_above_target_rejected() {
        let config = ResonanceConfig {
            floor: 0.9,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ResonanceError::Config(_))));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = ResonanceConfig {
            alert_threshold: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("alert_threshold"));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = ResonanceConfig {
            w_primary: 0.7,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let config = ResonanceConfig {
            penalty_weights: [1.0, -0.2, 1.0],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ResonanceConfig::from_json(r#"{"target": 0.9, "floor": 0.5}"#).unwrap();
        assert_eq!(config.target, 0.9);
        assert_eq!(config.floor, 0.5);
        assert_eq!(config.w_primary, DEFAULT_W_PRIMARY);
        assert_eq!(config.alert_threshold, DEFAULT_ALERT_THRESHOLD);
    }

    #[test]
    fn test_from_json_garbage() {
        let err = ResonanceConfig::from_json("not json").unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }
}
