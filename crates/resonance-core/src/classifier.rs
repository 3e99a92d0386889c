// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — State Classifier
// ─────────────────────────────────────────────────────────────────────
//! Maps a coherence score onto an operating state with two thresholds.
//!
//! Each band is inclusive on its lower bound: a score exactly equal to a
//! threshold belongs to the higher band. There is no transition history.

use resonance_types::config::{DEFAULT_FLOOR, DEFAULT_TARGET};
use resonance_types::{OperatingState, ResonanceConfig};

/// Classify `score` against `target` and `floor`.
pub fn classify(score: f64, target: f64, floor: f64) -> OperatingState {
    if score >= target {
        OperatingState::Resonant
    } else if score >= floor {
        OperatingState::Reflective
    } else {
        OperatingState::AutoTuning
    }
}

/// Threshold pair used by the monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateClassifier {
    target: f64,
    floor: f64,
}

impl Default for StateClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET, DEFAULT_FLOOR)
    }
}

impl StateClassifier {
    pub fn new(target: f64, floor: f64) -> Self {
        Self { target, floor }
    }

    pub fn from_config(config: &ResonanceConfig) -> Self {
        Self::new(config.target, config.floor)
    }

    pub fn classify(&self, score: f64) -> OperatingState {
        classify(score, self.target, self.floor)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_target_is_resonant() {
        assert_eq!(classify(0.85, 0.85, 0.65), OperatingState::Resonant);
    }

    #[test]
    fn test_just_below_target_is_reflective() {
        assert_eq!(classify(0.849999, 0.85, 0.65), OperatingState::Reflective);
    }

    #[test]
    fn test_boundary_floor_is_reflective() {
        assert_eq!(classify(0.65, 0.85, 0.65), OperatingState::Reflective);
    }

    #[test]
    fn test_just_below_floor_is_auto_tuning() {
        assert_eq!(classify(0.64999, 0.85, 0.65), OperatingState::AutoTuning);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(1.0, 0.85, 0.65), OperatingState::Resonant);
        assert_eq!(classify(0.0, 0.85, 0.65), OperatingState::AutoTuning);
    }

    #[test]
    fn test_nan_is_auto_tuning() {
        assert_eq!(classify(f64::NAN, 0.85, 0.65), OperatingState::AutoTuning);
    }

    #[test]
    fn test_classifier_defaults() {
        let classifier = StateClassifier::default();
        assert_eq!(classifier.target(), 0.85);
        assert_eq!(classifier.floor(), 0.65);
        assert_eq!(classifier.classify(0.7), OperatingState::Reflective);
    }

    #[test]
    fn test_classifier_from_config() {
        let config = ResonanceConfig {
            target: 0.9,
            floor: 0.5,
            ..Default::default()
        };
        let classifier = StateClassifier::from_config(&config);
        assert_eq!(classifier.classify(0.88), OperatingState::Reflective);
        assert_eq!(classifier.classify(0.55), OperatingState::Reflective);
        assert_eq!(classifier.classify(0.49), OperatingState::AutoTuning);
    }

    #[test]
    fn test_collapsed_band() {
        // floor == target leaves no REFLECTIVE band.
        assert_eq!(classify(0.7, 0.7, 0.7), OperatingState::Resonant);
        assert_eq!(classify(0.69, 0.7, 0.7), OperatingState::AutoTuning);
    }
}
