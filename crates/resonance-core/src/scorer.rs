// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Score Computer
// ─────────────────────────────────────────────────────────────────────
//! Pure scoring functions turning raw numeric signals into scalar
//! metrics:
//! - **Similarity**: cosine similarity of intent and response vectors
//!   (the intention reflection index).
//! - **Coherence**: `min(mutual_information / signal_entropy, 1.0)`.
//! - **Composite**: `w_primary * primary + w_secondary * secondary`.
//!
//! Degenerate arithmetic (zero magnitude, zero entropy) yields defined
//! values, never errors. The only failure is a vector length mismatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use resonance_types::config::{DEFAULT_W_PRIMARY, DEFAULT_W_SECONDARY};
use resonance_types::{clamp_score, round3, ResonanceConfig, ResonanceError, ResonanceResult};

/// Placeholder mutual information when the producer omits it.
pub const DEFAULT_MUTUAL_INFO: f64 = 0.8;
/// Placeholder signal entropy when the producer omits it.
pub const DEFAULT_SIGNAL_ENTROPY: f64 = 0.9;
/// Mean signal strength above which a signal counts as attuned.
pub const ATTUNEMENT_THRESHOLD: f64 = 0.8;

/// Named numeric inputs for one evaluation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    fields: HashMap<String, f64>,
}

impl ScoreInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the common mutual-information / entropy pair.
    pub fn from_signal(mutual_info: f64, entropy: f64) -> Self {
        Self::new()
            .with("mutual_info", mutual_info)
            .with("entropy", entropy)
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    pub fn mutual_info(&self) -> f64 {
        self.get("mutual_info").unwrap_or(DEFAULT_MUTUAL_INFO)
    }

    pub fn entropy(&self) -> f64 {
        self.get("entropy").unwrap_or(DEFAULT_SIGNAL_ENTROPY)
    }
}

impl FromIterator<(String, f64)> for ScoreInputs {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude. Vectors of
/// different length are rejected with `DimensionMismatch`.
pub fn similarity(intent: &[f64], response: &[f64]) -> ResonanceResult<f64> {
    if intent.len() != response.len() {
        return Err(ResonanceError::DimensionMismatch {
            left: intent.len(),
            right: response.len(),
        });
    }

    let mut dot = 0.0;
    let mut norm_i = 0.0;
    let mut norm_r = 0.0;
    for (&i, &r) in intent.iter().zip(response) {
        dot += i * r;
        norm_i += i * i;
        norm_r += r * r;
    }

    let magnitude = norm_i.sqrt() * norm_r.sqrt();
    if magnitude == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / magnitude)
}

/// Coherence of a signal: `min(mutual_information / signal_entropy, 1.0)`.
///
/// Zero entropy yields 0.0. The result is clamped to [0, 1] and rounded
/// to 3 decimal places.
pub fn coherence(mutual_information: f64, signal_entropy: f64) -> f64 {
    if signal_entropy == 0.0 {
        return 0.0;
    }
    round3(clamp_score(mutual_information / signal_entropy, 0.0, 1.0))
}

/// Composite with the default 0.6 / 0.4 weights.
pub fn composite(primary: f64, secondary: f64) -> f64 {
    composite_weighted(primary, secondary, DEFAULT_W_PRIMARY, DEFAULT_W_SECONDARY)
}

/// Convex combination of two sub-scores, rounded to 3 decimal places.
pub fn composite_weighted(primary: f64, secondary: f64, w_primary: f64, w_secondary: f64) -> f64 {
    round3(w_primary * primary + w_secondary * secondary)
}

/// Whether the mean strength of `signal` exceeds [`ATTUNEMENT_THRESHOLD`].
///
/// An empty signal is never attuned.
pub fn attunement(signal: &[f64]) -> bool {
    if signal.is_empty() {
        return false;
    }
    let strength = signal.iter().sum::<f64>() / signal.len() as f64;
    strength > ATTUNEMENT_THRESHOLD
}

/// Score computer bound to a configuration's composite weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComputer {
    w_primary: f64,
    w_secondary: f64,
}

impl Default for ScoreComputer {
    fn default() -> Self {
        Self::new(DEFAULT_W_PRIMARY, DEFAULT_W_SECONDARY)
    }
}

impl ScoreComputer {
    pub fn new(w_primary: f64, w_secondary: f64) -> Self {
        Self {
            w_primary,
            w_secondary,
        }
    }

    pub fn from_config(config: &ResonanceConfig) -> Self {
        Self::new(config.w_primary, config.w_secondary)
    }

    pub fn similarity(&self, intent: &[f64], response: &[f64]) -> ResonanceResult<f64> {
        similarity(intent, response)
    }

    /// Coherence of the mutual-information / entropy pair in `inputs`.
    pub fn coherence(&self, inputs: &ScoreInputs) -> f64 {
        coherence(inputs.mutual_info(), inputs.entropy())
    }

    pub fn composite(&self, primary: f64, secondary: f64) -> f64 {
        composite_weighted(primary, secondary, self.w_primary, self.w_secondary)
    }

    pub fn weights(&self) -> (f64, f64) {
        (self.w_primary, self.w_secondary)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_similarity_identical() {
        let v = [0.2, 0.4, 0.6];
        assert!((similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_orthogonal() {
        assert_eq!(similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_similarity_opposite() {
        let s = similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((s + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_zero_vector() {
        assert_eq!(similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
        assert_eq!(similarity(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_similarity_empty_vectors() {
        assert_eq!(similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_similarity_dimension_mismatch() {
        let err = similarity(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, ResonanceError::DimensionMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_coherence_ratio() {
        // 0.75 / 0.85 = 0.88235... → 0.882
        assert_eq!(coherence(0.75, 0.85), 0.882);
    }

    #[test]
    fn test_coherence_clamped_at_one() {
        assert_eq!(coherence(0.95, 0.5), 1.0);
    }

    #[test]
    fn test_coherence_zero_entropy() {
        assert_eq!(coherence(0.9, 0.0), 0.0);
        assert_eq!(coherence(-3.0, 0.0), 0.0);
    }

    #[test]
    fn test_coherence_nan_input() {
        assert_eq!(coherence(f64::NAN, 0.5), 0.0);
    }

    #[test]
    fn test_composite_default_weights() {
        // 0.6 * 0.7 + 0.4 * 0.6 = 0.66
        assert_eq!(composite(0.7, 0.6), 0.66);
    }

    #[test]
    fn test_composite_custom_weights() {
        assert_eq!(composite_weighted(1.0, 0.0, 0.3, 0.7), 0.3);
        assert_eq!(composite_weighted(0.5, 0.5, 0.5, 0.5), 0.5);
    }

    #[test]
    fn test_attunement() {
        assert!(attunement(&[0.9, 0.85, 0.95]));
        assert!(!attunement(&[0.8, 0.8]));
        assert!(!attunement(&[]));
    }

    #[test]
    fn test_score_inputs_defaults() {
        let inputs = ScoreInputs::new();
        assert_eq!(inputs.mutual_info(), DEFAULT_MUTUAL_INFO);
        assert_eq!(inputs.entropy(), DEFAULT_SIGNAL_ENTROPY);
        assert!(inputs.get("reciprocity").is_none());
    }

    #[test]
    fn test_score_inputs_collect() {
        let inputs: ScoreInputs = vec![("entropy".to_string(), 0.4)].into_iter().collect();
        assert_eq!(inputs.entropy(), 0.4);
        assert_eq!(inputs.mutual_info(), DEFAULT_MUTUAL_INFO);
    }

    #[test]
    fn test_computer_uses_config_weights() {
        let config = ResonanceConfig {
            w_primary: 0.5,
            w_secondary: 0.5,
            ..Default::default()
        };
        let computer = ScoreComputer::from_config(&config);
        assert_eq!(computer.composite(0.8, 0.4), 0.6);
        assert_eq!(computer.coherence(&ScoreInputs::from_signal(0.75, 0.85)), 0.882);
    }

    proptest! {
        #[test]
        fn prop_similarity_symmetric(
            pairs in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..32)
        ) {
            let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let ab = similarity(&a, &b).unwrap();
            let ba = similarity(&b, &a).unwrap();
            prop_assert!((ab - ba).abs() < 1e-12);
        }

        #[test]
        fn prop_similarity_zero_vector(v in prop::collection::vec(-100.0f64..100.0, 1..32)) {
            let zeros = vec![0.0; v.len()];
            prop_assert_eq!(similarity(&zeros, &v).unwrap(), 0.0);
            prop_assert_eq!(similarity(&v, &zeros).unwrap(), 0.0);
        }

        #[test]
        fn prop_coherence_in_unit_interval(m in -10.0f64..10.0, e in 1e-6f64..10.0) {
            let c = coherence(m, e);
            prop_assert!((0.0..=1.0).contains(&c));
        }

        #[test]
        fn prop_coherence_zero_entropy(m in -10.0f64..10.0) {
            prop_assert_eq!(coherence(m, 0.0), 0.0);
        }

        #[test]
        fn prop_composite_between_inputs(
            x in 0.0f64..1.0,
            y in 0.0f64..1.0,
            w in 0.0f64..1.0,
        ) {
            let c = composite_weighted(x, y, w, 1.0 - w);
            // Rounding to 3 places may move the result by at most 5e-4.
            prop_assert!(c >= x.min(y) - 5e-4 - 1e-12);
            prop_assert!(c <= x.max(y) + 5e-4 + 1e-12);
        }
    }
}
