// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Consent Gate
// ─────────────────────────────────────────────────────────────────────
//! Boolean consent registry consulted before any source is scored.
//!
//! Absent consent is reported through the log only; blocked ingestion
//! never reaches the audit ledger.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Registry of sources that may contribute data.
///
/// Unregistered sources are treated as not consenting.
#[derive(Debug, Default)]
pub struct ConsentGate {
    registry: RwLock<HashMap<String, bool>>,
}

impl ConsentGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record consent for `source_id`.
    pub fn register_source(&self, source_id: &str) {
        self.registry.write().insert(source_id.to_string(), true);
        log::info!("Consent registered for source: {source_id}");
    }

    /// Withdraw consent for `source_id`. The entry stays in the registry.
    pub fn revoke_source(&self, source_id: &str) {
        self.registry.write().insert(source_id.to_string(), false);
        log::info!("Consent revoked for source: {source_id}");
    }

    /// Raw registry lookup without logging.
    pub fn is_consented(&self, source_id: &str) -> bool {
        self.registry
            .read()
            .get(source_id)
            .copied()
            .unwrap_or(false)
    }

    /// Consent handshake performed before every ingestion.
    pub fn verify_consent(&self, source_id: &str, source_type: &str) -> bool {
        log::debug!("Auditing consent for source: {source_id} ({source_type})");
        let consented = self.is_consented(source_id);
        if !consented {
            log::warn!("CONSENT_MISSING: halting ingestion from {source_id} ({source_type})");
        }
        consented
    }

    /// Number of sources with an entry, consenting or not.
    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }
}
