// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Relational Tuning Heuristics
// ─────────────────────────────────────────────────────────────────────
//! Scoring helpers for fine-tuning pipelines that sit upstream of the
//! monitor. All functions are pure, like the score computer.
//!
//! - `relational_loss`: linear penalty/reward combiner over classifier
//!   sub-scores.
//! - `sanitize_pair`: confidence weight that down-weights dominant,
//!   non-relational responses.
//! - `preservation_regularizer`: entropy term that discourages collapse
//!   into totalizing certainty.

use serde::{Deserialize, Serialize};

use resonance_types::config::{DEFAULT_PENALTY_WEIGHTS, DEFAULT_REWARD_WEIGHTS};
use resonance_types::ResonanceConfig;

use crate::scorer::ScoreInputs;

/// Guards `ln(0)` in the entropy term.
const LOG_EPSILON: f64 = 1e-9;

const DOMINANT_PHRASES: [&str; 2] = ["You should", "I will"];
const RELATIONAL_MARKERS: [&str; 3] = ["we", "perhaps", "together"];

/// Classifier sub-scores for one output. Missing scores are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationalScores {
    pub extractive: f64,
    pub domination: f64,
    pub disembodiment: f64,
    pub reciprocity: f64,
    pub co_creation: f64,
    pub humility: f64,
}

impl RelationalScores {
    /// Pick the six sub-scores out of a named input map.
    pub fn from_inputs(inputs: &ScoreInputs) -> Self {
        let field = |name: &str| inputs.get(name).unwrap_or(0.0);
        Self {
            extractive: field("extractive"),
            domination: field("domination"),
            disembodiment: field("disembodiment"),
            reciprocity: field("reciprocity"),
            co_creation: field("co_creation"),
            humility: field("humility"),
        }
    }
}

/// Lambda (penalty) and gamma (reward) weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossWeights {
    pub penalty: [f64; 3],
    pub reward: [f64; 3],
}

impl Default for LossWeights {
    fn default() -> Self {
        Self {
            penalty: DEFAULT_PENALTY_WEIGHTS,
            reward: DEFAULT_REWARD_WEIGHTS,
        }
    }
}

impl LossWeights {
    pub fn from_config(config: &ResonanceConfig) -> Self {
        Self {
            penalty: config.penalty_weights,
            reward: config.reward_weights,
        }
    }
}

/// Penalty for extraction/domination/disembodiment minus reward for
/// reciprocity/co-creation/humility. Lower is better.
pub fn relational_loss(scores: &RelationalScores, weights: &LossWeights) -> f64 {
    let [l0, l1, l2] = weights.penalty;
    let [g0, g1, g2] = weights.reward;
    let penalty = l0 * scores.extractive + l1 * scores.domination + l2 * scores.disembodiment;
    let reward = g0 * scores.reciprocity + g1 * scores.co_creation + g2 * scores.humility;
    penalty - reward
}

/// Confidence weight for a prompt/response training pair.
///
/// Halved when the response uses a dominant phrase without any
/// relational marker. Matching is case-sensitive substring search.
pub fn sanitize_pair(_prompt: &str, response: &str) -> f64 {
    let mut confidence = 1.0;
    let dominant = DOMINANT_PHRASES.iter().any(|p| response.contains(p));
    if dominant && !RELATIONAL_MARKERS.iter().any(|m| response.contains(m)) {
        confidence *= 0.5;
        log::debug!("Domination detected without relational markers; weight reduced");
    }
    confidence
}

/// `beta * H(p)` with `H(p) = -Σ p·ln(p + ε)`.
pub fn preservation_regularizer(probs: &[f64], beta: f64) -> f64 {
    let entropy: f64 = -probs
        .iter()
        .map(|&p| p * (p + LOG_EPSILON).ln())
        .sum::<f64>();
    beta * entropy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_all_zero() {
        let loss = relational_loss(&RelationalScores::default(), &LossWeights::default());
        assert_eq!(loss, 0.0);
    }

    #[test]
    fn test_loss_penalty_weights() {
        let scores = RelationalScores {
            extractive: 1.0,
            domination: 1.0,
            disembodiment: 1.0,
            ..Default::default()
        };
        // 1.0 + 1.2 + 1.0
        let loss = relational_loss(&scores, &LossWeights::default());
        assert!((loss - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_loss_reward_reduces() {
        let scores = RelationalScores {
            domination: 0.5,
            co_creation: 1.0,
            ..Default::default()
        };
        // 1.2 * 0.5 - 1.1 * 1.0 = -0.5
        let loss = relational_loss(&scores, &LossWeights::default());
        assert!((loss + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scores_from_inputs() {
        let inputs = ScoreInputs::new()
            .with("extractive", 0.3)
            .with("humility", 0.9);
        let scores = RelationalScores::from_inputs(&inputs);
        assert_eq!(scores.extractive, 0.3);
        assert_eq!(scores.humility, 0.9);
        assert_eq!(scores.domination, 0.0);
    }

    #[test]
    fn test_weights_from_config() {
        let config = ResonanceConfig {
            penalty_weights: [2.0, 2.0, 2.0],
            ..Default::default()
        };
        let weights = LossWeights::from_config(&config);
        assert_eq!(weights.penalty, [2.0, 2.0, 2.0]);
        assert_eq!(weights.reward, DEFAULT_REWARD_WEIGHTS);
    }

    #[test]
    fn test_sanitize_dominant_response() {
        let w = sanitize_pair("What do I do?", "You should do this immediately.");
        assert_eq!(w, 0.5);
    }

    #[test]
    fn test_sanitize_dominant_with_marker() {
        let w = sanitize_pair("What do I do?", "You should rest, perhaps.");
        assert_eq!(w, 1.0);
    }

    #[test]
    fn test_sanitize_neutral_response() {
        assert_eq!(sanitize_pair("Hi", "Let us look at it."), 1.0);
    }

    #[test]
    fn test_regularizer_uniform() {
        let probs = [0.25; 4];
        let expected = 0.1 * (4.0f64).ln();
        assert!((preservation_regularizer(&probs, 0.1) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_regularizer_certain_distribution() {
        let r = preservation_regularizer(&[1.0, 0.0, 0.0], 0.1);
        assert!(r.abs() < 1e-6);
    }

    #[test]
    fn test_regularizer_scales_with_beta() {
        let probs = [0.5, 0.5];
        let a = preservation_regularizer(&probs, 0.1);
        let b = preservation_regularizer(&probs, 0.2);
        assert!((b - 2.0 * a).abs() < 1e-12);
    }
}
