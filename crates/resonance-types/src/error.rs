// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Resonance Kernel failures.
///
/// Arithmetic edge cases (zero magnitude, zero entropy, empty audit
/// input) are defined return values and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResonanceError {
    /// Similarity scoring was given vectors of different lengths.
    #[error("dimension mismatch: intent has {left} components, response has {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// The source has no registered consent; nothing was scored.
    #[error("ingestion blocked: no consent registered for source '{source_id}'")]
    IngestionBlocked { source_id: String },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

pub type ResonanceResult<T> = Result<T, ResonanceError>;
