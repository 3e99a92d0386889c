// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, canonical invariants, and error
//! hierarchy for the Resonance Kernel — the coherence audit layer.

pub mod config;
pub mod error;
pub mod invariant;
pub mod score;

pub use config::ResonanceConfig;
pub use error::{ResonanceError, ResonanceResult};
pub use invariant::{Invariant, InvariantKind, InvariantSet};
pub use score::{
    clamp_score, round3, AuditRecord, AuditStatus, BreachEntry, LedgerEntry, LedgerEvent,
    OperatingState,
};
