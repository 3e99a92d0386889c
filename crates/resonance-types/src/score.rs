// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Score and Audit Record Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Round to 3 decimal places for display and comparison stability.
#[inline]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Operating state derived from a coherence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingState {
    /// Score at or above target: proceed normally.
    Resonant,
    /// Score in [floor, target): surface diagnostic prompts, do not halt.
    Reflective,
    /// Score below floor: corrective delay before the next cycle.
    AutoTuning,
}

impl OperatingState {
    /// Feedback-loop stage label.
    pub fn label(self) -> &'static str {
        match self {
            OperatingState::Resonant => "RESONANT_ACTION",
            OperatingState::Reflective => "REFLECTION_MODE",
            OperatingState::AutoTuning => "AUTO_TUNING",
        }
    }

    /// Whether the host should back off before the next cycle.
    pub fn requires_backoff(self) -> bool {
        matches!(self, OperatingState::AutoTuning)
    }
}

impl fmt::Display for OperatingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status carried by an [`AuditRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Secure,
    Compromised,
    /// Coherence audits record the classified state.
    Operating(OperatingState),
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditStatus::Secure => f.write_str("SECURE"),
            AuditStatus::Compromised => f.write_str("COMPROMISED"),
            AuditStatus::Operating(state) => write!(f, "{state}"),
        }
    }
}

/// A single audited metric. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub metric: String,
    pub value: f64,
    pub status: AuditStatus,
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    /// Build a record stamped with the current wall-clock time.
    pub fn new(metric: impl Into<String>, value: f64, status: AuditStatus) -> Self {
        Self {
            metric: metric.into(),
            value,
            status,
            timestamp: Utc::now(),
        }
    }
}

/// A recorded rule violation with its recovery directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreachEntry {
    pub timestamp: DateTime<Utc>,
    pub breach_code: String,
    pub trigger_context: String,
    pub recovery_directive: String,
}

/// Payload of a ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    Audit(AuditRecord),
    Breach(BreachEntry),
}

impl LedgerEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::Audit(r) => r.timestamp,
            LedgerEvent::Breach(b) => b.timestamp,
        }
    }

    /// Overwrite the payload timestamp. The ledger stamps on append.
    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        match self {
            LedgerEvent::Audit(r) => r.timestamp = timestamp,
            LedgerEvent::Breach(b) => b.timestamp = timestamp,
        }
    }
}

impl From<AuditRecord> for LedgerEvent {
    fn from(record: AuditRecord) -> Self {
        LedgerEvent::Audit(record)
    }
}

impl From<BreachEntry> for LedgerEvent {
    fn from(breach: BreachEntry) -> Self {
        LedgerEvent::Breach(breach)
    }
}

/// One ledger slot: the append sequence number and its payload.
///
/// `seq` is assigned by the ledger under its write lock, so sequence
/// order, timestamp order, and position always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub seq: u64,
    pub event: LedgerEvent,
}

impl LedgerEntry {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.event.timestamp()
    }

    pub fn as_audit(&self) -> Option<&AuditRecord> {
        match &self.event {
            LedgerEvent::Audit(r) => Some(r),
            LedgerEvent::Breach(_) => None,
        }
    }

    pub fn as_breach(&self) -> Option<&BreachEntry> {
        match &self.event {
            LedgerEvent::Breach(b) => Some(b),
            LedgerEvent::Audit(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_score(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_pos_inf() {
        assert_eq!(clamp_score(f64::INFINITY, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_clamp_neg_inf() {
        assert_eq!(clamp_score(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_normal() {
        assert_eq!(clamp_score(0.75, 0.0, 1.0), 0.75);
    }

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(clamp_score(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp_score(-0.3, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.882_352_9), 0.882);
        assert_eq!(round3(0.66), 0.66);
        assert_eq!(round3(0.6 * 0.7 + 0.4 * 0.6), 0.66);
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(OperatingState::Resonant.label(), "RESONANT_ACTION");
        assert_eq!(OperatingState::Reflective.to_string(), "REFLECTION_MODE");
        assert!(OperatingState::AutoTuning.requires_backoff());
        assert!(!OperatingState::Reflective.requires_backoff());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AuditStatus::Secure.to_string(), "SECURE");
        assert_eq!(AuditStatus::Compromised.to_string(), "COMPROMISED");
        assert_eq!(
            AuditStatus::Operating(OperatingState::AutoTuning).to_string(),
            "AUTO_TUNING"
        );
    }

    #[test]
    fn test_ledger_entry_accessors() {
        let entry = LedgerEntry {
            seq: 0,
            event: AuditRecord::new("Input Integrity", 1.0, AuditStatus::Secure).into(),
        };
        assert!(entry.as_audit().is_some());
        assert!(entry.as_breach().is_none());
    }

    #[test]
    fn test_set_timestamp_rewrites_payload() {
        let mut event: LedgerEvent = AuditRecord::new("m", 0.5, AuditStatus::Secure).into();
        let later = event.timestamp() + chrono::Duration::seconds(5);
        event.set_timestamp(later);
        assert_eq!(event.timestamp(), later);
    }

    #[test]
    fn test_ledger_entry_serializes_with_seq_and_kind_tag() {
        let entry = LedgerEntry {
            seq: 7,
            event: AuditRecord::new(
                "Interaction Coherence",
                0.882,
                AuditStatus::Operating(OperatingState::Resonant),
            )
            .into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""seq":7"#));
        assert!(json.contains(r#""kind":"audit""#));
        assert!(json.contains("RESONANT"));
    }
}
