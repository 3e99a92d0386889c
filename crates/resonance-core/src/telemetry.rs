// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Energy Telemetry
// ─────────────────────────────────────────────────────────────────────
//! Placeholder energy telemetry. The values carry no decision weight;
//! the random source is injected so hosts and tests control it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One energy telemetry sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTelemetry {
    /// Stand-in for compute draw, in [0.1, 0.9).
    pub computational_cost: f64,
    /// Stand-in for attention entropy, in [0.2, 0.8).
    pub cognitive_load: f64,
    /// Stand-in for input/output ratio, in [0.5, 1.0).
    pub relational_symmetry: f64,
}

impl EnergyTelemetry {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            computational_cost: rng.gen_range(0.1..0.9),
            cognitive_load: rng.gen_range(0.2..0.8),
            relational_symmetry: rng.gen_range(0.5..1.0),
        }
    }
}
