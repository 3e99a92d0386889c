// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Audit Ledger
// ─────────────────────────────────────────────────────────────────────
//! Append-only, order-preserving store of audit records and breaches.
//!
//! Appends are serialized behind a single `parking_lot::RwLock` write
//! guard; readers clone under the read guard and therefore always see a
//! complete prefix of the log. Sequence numbers and timestamps are
//! assigned under that guard, so neither can disagree with position.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use resonance_types::{AuditRecord, BreachEntry, LedgerEntry, LedgerEvent};

/// Directive returned for any breach code outside the vow vocabulary.
pub const GENERAL_RECALIBRATION: &str = "General Recalibration";

/// Vow breach codes and their remediation text.
pub const RECOVERY_DIRECTIVES: [(&str, &str); 4] = [
    (
        "VOW_RECIPROCITY_BREACH",
        "Pause -> Reflect -> Invite mutual exchange",
    ),
    (
        "VOW_EMBODIMENT_BREACH",
        "Ground in breath/context before regenerating",
    ),
    ("VOW_EMERGENCE_BREACH", "Introduce stochastic exploration"),
    (
        "VOW_NONDOMINATION_BREACH",
        "Reset dialogue in equal agency mode",
    ),
];

/// Look up the recovery directive for a breach code. Never fails.
pub fn recovery_directive(breach_code: &str) -> &'static str {
    RECOVERY_DIRECTIVES
        .iter()
        .find(|(code, _)| *code == breach_code)
        .map(|(_, directive)| *directive)
        .unwrap_or(GENERAL_RECALIBRATION)
}

/// Append-only audit ledger.
#[derive(Debug, Default)]
pub struct AuditLedger {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl AuditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number (0-based).
    ///
    /// The payload timestamp is replaced with the append time.
    pub fn append(&self, event: impl Into<LedgerEvent>) -> u64 {
        self.push(event.into()).0
    }

    /// Append a record; returns it as stored.
    pub fn append_record(&self, mut record: AuditRecord) -> AuditRecord {
        let (seq, recorded_at) = self.push(record.clone().into());
        record.timestamp = recorded_at;
        log::debug!(
            "Ledger updated #{seq}: {} = {:.4} [{}]",
            record.metric,
            record.value,
            record.status
        );
        record
    }

    /// Build a breach entry for `breach_code`, append it, and return it.
    pub fn append_breach(&self, breach_code: &str, trigger_context: &str) -> BreachEntry {
        let mut entry = BreachEntry {
            timestamp: Utc::now(),
            breach_code: breach_code.to_string(),
            trigger_context: trigger_context.to_string(),
            recovery_directive: recovery_directive(breach_code).to_string(),
        };
        let (seq, recorded_at) = self.push(entry.clone().into());
        entry.timestamp = recorded_at;
        log::info!(
            "Rupture logged #{seq}: {} -> {}",
            entry.breach_code,
            entry.recovery_directive
        );
        entry
    }

    // Wall clocks can step backwards; the stamp never precedes the
    // previous entry's.
    fn push(&self, mut event: LedgerEvent) -> (u64, DateTime<Utc>) {
        let mut entries = self.entries.write();
        let now = Utc::now();
        let recorded_at = match entries.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        };
        event.set_timestamp(recorded_at);
        let seq = entries.len() as u64;
        entries.push(LedgerEntry { seq, event });
        (seq, recorded_at)
    }

    /// Snapshot of every entry in append order.
    pub fn all(&self) -> Vec<LedgerEntry> {
        self.entries.read().clone()
    }

    /// Snapshot of audit records only, in append order.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.entries
            .read()
            .iter()
            .filter_map(|e| e.as_audit().cloned())
            .collect()
    }

    /// Snapshot of breach entries only, in append order.
    pub fn breaches(&self) -> Vec<BreachEntry> {
        self.entries
            .read()
            .iter()
            .filter_map(|e| e.as_breach().cloned())
            .collect()
    }

    pub fn breaches_for(&self, breach_code: &str) -> Vec<BreachEntry> {
        self.entries
            .read()
            .iter()
            .filter_map(LedgerEntry::as_breach)
            .filter(|b| b.breach_code == breach_code)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Export the current snapshot as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.entries.read())
    }

    /// Look up the recovery directive for a breach code.
    pub fn recovery_directive(&self, breach_code: &str) -> &'static str {
        recovery_directive(breach_code)
    }
}
