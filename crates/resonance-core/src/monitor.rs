// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Governance Monitor
// ─────────────────────────────────────────────────────────────────────
//! Orchestrates one audit cycle: consent gate → coherence → state →
//! alert decision → ledger write.
//!
//! Every decision is returned as a value (`CycleReport`, `AuditRecord`,
//! `BreachEntry`, `HarmonizerSignal`). Logging is a side channel only;
//! display and routing belong to the host.

use serde::{Deserialize, Serialize};

use resonance_types::{
    AuditRecord, AuditStatus, BreachEntry, InvariantSet, OperatingState, ResonanceConfig,
    ResonanceError, ResonanceResult,
};

use crate::classifier::StateClassifier;
use crate::consent::ConsentGate;
use crate::ledger::AuditLedger;
use crate::scorer::{ScoreComputer, ScoreInputs};
use crate::tuning::{self, LossWeights, RelationalScores};

/// Metric name for consent-integrity audits.
pub const INPUT_INTEGRITY_METRIC: &str = "Input Integrity";
/// Metric name for coherence audits.
pub const COHERENCE_METRIC: &str = "Interaction Coherence";
/// Frequency blend (Hz) carried by a re-tuning pulse.
pub const RETUNING_BLEND_HZ: (u32, u32) = (396, 639);

const DEFAULT_SOURCE_TYPE: &str = "external";

/// Consent attestation for one input record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAttestation {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub consent_confirmed: bool,
}

impl InputAttestation {
    pub fn new(source: impl Into<String>, consent_confirmed: bool) -> Self {
        Self {
            source: source.into(),
            consent_confirmed,
        }
    }
}

/// Raised when a cycle lands in AUTO_TUNING. The host decides whether to
/// pause, log, or retry later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub coherence: f64,
    pub floor: f64,
    pub message: String,
}

/// Outcome of one evaluated cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub coherence: f64,
    pub state: OperatingState,
    pub alert: Option<Alert>,
    /// Invariant diagnostic prompts, populated in REFLECTIVE only.
    pub diagnostics: Vec<&'static str>,
    /// The record appended to the ledger for this cycle.
    pub record: AuditRecord,
}

impl CycleReport {
    pub fn is_alert(&self) -> bool {
        self.alert.is_some()
    }
}

/// Harmonizer decision for a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum HarmonizerSignal {
    /// Composite at or above the alert threshold; continue.
    Harmonic { composite: f64 },
    /// Composite below the alert threshold; coordinate a collective
    /// pause and recalibration.
    RetuningPulse {
        composite: f64,
        threshold: f64,
        blend_hz: (u32, u32),
    },
}

impl HarmonizerSignal {
    pub fn is_pulse(&self) -> bool {
        matches!(self, HarmonizerSignal::RetuningPulse { .. })
    }
}

/// Coherence governance monitor.
///
/// Thread-safe: the ledger and consent registry carry their own locks,
/// so every operation takes `&self`.
#[derive(Debug)]
pub struct GovernanceMonitor {
    config: ResonanceConfig,
    invariants: InvariantSet,
    scorer: ScoreComputer,
    classifier: StateClassifier,
    loss_weights: LossWeights,
    ledger: AuditLedger,
    consent: ConsentGate,
}

impl Default for GovernanceMonitor {
    fn default() -> Self {
        Self::build(ResonanceConfig::default())
    }
}

impl GovernanceMonitor {
    /// Create a monitor after validating `config`.
    pub fn new(config: ResonanceConfig) -> ResonanceResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ResonanceConfig) -> Self {
        Self {
            scorer: ScoreComputer::from_config(&config),
            classifier: StateClassifier::from_config(&config),
            loss_weights: LossWeights::from_config(&config),
            invariants: InvariantSet::load(),
            ledger: AuditLedger::new(),
            consent: ConsentGate::new(),
            config,
        }
    }

    pub fn register_source(&self, source_id: &str) {
        self.consent.register_source(source_id);
    }

    pub fn revoke_source(&self, source_id: &str) {
        self.consent.revoke_source(source_id);
    }

    /// Whether `source_id` may contribute data.
    pub fn check_consent(&self, source_id: &str) -> bool {
        self.consent.verify_consent(source_id, DEFAULT_SOURCE_TYPE)
    }

    /// Audit consent integrity across `inputs` and append the record.
    ///
    /// Integrity is the confirmed fraction; an empty slice scores 0.0.
    /// Status is SECURE only at full integrity.
    pub fn audit_inputs(&self, inputs: &[InputAttestation]) -> AuditRecord {
        let integrity = if inputs.is_empty() {
            0.0
        } else {
            let confirmed = inputs.iter().filter(|i| i.consent_confirmed).count();
            confirmed as f64 / inputs.len() as f64
        };
        let status = if integrity == 1.0 {
            AuditStatus::Secure
        } else {
            AuditStatus::Compromised
        };

        self.ledger
            .append_record(AuditRecord::new(INPUT_INTEGRITY_METRIC, integrity, status))
    }

    /// Score, classify, and record one cycle.
    pub fn evaluate_cycle(&self, inputs: &ScoreInputs) -> CycleReport {
        let coherence = self.scorer.coherence(inputs);
        let state = self.classifier.classify(coherence);

        let alert = match state {
            OperatingState::AutoTuning => {
                log::error!(
                    "COHERENCE DEGRADATION. Score: {coherence:.4} < Floor: {}",
                    self.classifier.floor()
                );
                Some(Alert {
                    coherence,
                    floor: self.classifier.floor(),
                    message: "Coherence below floor: apply corrective delay before next cycle"
                        .to_string(),
                })
            }
            _ => None,
        };

        let diagnostics = match state {
            OperatingState::Reflective => self.invariants.diagnostic_prompts(),
            _ => Vec::new(),
        };

        let record = self.ledger.append_record(AuditRecord::new(
            COHERENCE_METRIC,
            coherence,
            AuditStatus::Operating(state),
        ));

        CycleReport {
            coherence,
            state,
            alert,
            diagnostics,
            record,
        }
    }

    /// Consent gate followed by [`evaluate_cycle`](Self::evaluate_cycle).
    ///
    /// A source without consent is rejected before scoring and leaves no
    /// trace in the ledger.
    pub fn run_cycle(&self, source_id: &str, inputs: &ScoreInputs) -> ResonanceResult<CycleReport> {
        if !self.check_consent(source_id) {
            return Err(ResonanceError::IngestionBlocked {
                source_id: source_id.to_string(),
            });
        }
        Ok(self.evaluate_cycle(inputs))
    }

    /// Log a breach with its recovery directive.
    pub fn record_breach(&self, breach_code: &str, context: &str) -> BreachEntry {
        self.ledger.append_breach(breach_code, context)
    }

    /// Compare a composite score against the alert threshold.
    pub fn harmonize(&self, composite: f64) -> HarmonizerSignal {
        if composite < self.config.alert_threshold {
            log::error!(
                "ALERT: coherence degradation, composite {composite:.3} < {}; broadcasting re-tuning pulse",
                self.config.alert_threshold
            );
            HarmonizerSignal::RetuningPulse {
                composite,
                threshold: self.config.alert_threshold,
                blend_hz: RETUNING_BLEND_HZ,
            }
        } else {
            log::info!("Field harmonic at composite {composite:.3}");
            HarmonizerSignal::Harmonic { composite }
        }
    }

    /// Relational loss under the configured penalty and reward weights.
    pub fn relational_loss(&self, scores: &RelationalScores) -> f64 {
        tuning::relational_loss(scores, &self.loss_weights)
    }

    /// Entropy regularizer scaled by the configured beta.
    pub fn preservation_regularizer(&self, probs: &[f64]) -> f64 {
        tuning::preservation_regularizer(probs, self.config.regularization_beta)
    }

    pub fn scorer(&self) -> &ScoreComputer {
        &self.scorer
    }

    pub fn classifier(&self) -> &StateClassifier {
        &self.classifier
    }

    pub fn ledger(&self) -> &AuditLedger {
        &self.ledger
    }

    pub fn consent(&self) -> &ConsentGate {
        &self.consent
    }

    pub fn invariants(&self) -> &InvariantSet {
        &self.invariants
    }

    pub fn config(&self) -> &ResonanceConfig {
        &self.config
    }
}
