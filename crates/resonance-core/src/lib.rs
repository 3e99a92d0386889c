// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Coherence scoring, state classification, consent gating, and the
//! append-only audit ledger for interaction governance.
//!
//! # Invariants
//!
//! 1. **Degenerate arithmetic is defined, not raised**: zero-magnitude
//!    vectors score 0.0 similarity, zero entropy scores 0.0 coherence,
//!    and an empty audit input scores 0.0 integrity. The only scoring
//!    error is a vector length mismatch.
//!
//! 2. **Consent precedes scoring**: `run_cycle` consults the consent
//!    gate first. A blocked source yields `IngestionBlocked` and writes
//!    nothing to the ledger.
//!
//! 3. **The ledger is append-only and totally ordered**: appends are
//!    serialized behind one write lock; `all()` clones under the read
//!    lock, so callers always observe a complete prefix.
//!
//! 4. **Decisions are values**: alerts, re-tuning pulses, and breach
//!    directives are returned to the host. Logging is incidental.

pub mod classifier;
pub mod consent;
pub mod ledger;
pub mod monitor;
pub mod scorer;
pub mod telemetry;
pub mod tuning;

pub use classifier::{classify, StateClassifier};
pub use consent::ConsentGate;
pub use ledger::{recovery_directive, AuditLedger, GENERAL_RECALIBRATION};
pub use monitor::{Alert, CycleReport, GovernanceMonitor, HarmonizerSignal, InputAttestation};
pub use scorer::{
    attunement, coherence, composite, composite_weighted, similarity, ScoreComputer, ScoreInputs,
};
pub use telemetry::EnergyTelemetry;
pub use tuning::{relational_loss, sanitize_pair, LossWeights, RelationalScores};
