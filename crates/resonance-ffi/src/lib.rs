// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Resonance Kernel.
//!
//! Exposes `GovernanceMonitor`, `ResonanceConfig`, the record types, and
//! the pure scoring functions to Python via PyO3.
//!
//! # FFI Safety
//!
//! - Config is validated before a monitor is built.
//! - Rust errors map to Python exceptions: `DimensionMismatch` and
//!   config errors → `ValueError`, `IngestionBlocked` → `PermissionError`.
//! - Records cross the boundary by value; no references escape.
//!
//! Usage from Python:
//! ```python
//! from resonance_kernel import GovernanceMonitor
//!
//! monitor = GovernanceMonitor()
//! monitor.register_source("s1")
//! report = monitor.run_cycle("s1", {"mutual_info": 0.75, "entropy": 0.85})
//! ```

use std::collections::HashMap;

use pyo3::exceptions::{PyPermissionError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use resonance_core::{
    CycleReport, GovernanceMonitor, HarmonizerSignal, InputAttestation, RelationalScores,
    ScoreInputs,
};
use resonance_types::{AuditRecord, BreachEntry, ResonanceConfig, ResonanceError};

fn to_py_err(err: ResonanceError) -> PyErr {
    match err {
        ResonanceError::IngestionBlocked { .. } => PyPermissionError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

// ─── PyResonanceConfig ──────────────────────────────────────────────

/// Python-visible configuration for the Resonance Kernel.
#[pyclass(name = "ResonanceConfig")]
#[derive(Clone)]
struct PyResonanceConfig {
    inner: ResonanceConfig,
}

#[pymethods]
impl PyResonanceConfig {
    #[new]
    #[pyo3(signature = (
        target = 0.85,
        floor = 0.65,
        w_primary = 0.6,
        w_secondary = 0.4,
        alert_threshold = 0.75,
        penalty_weights = [1.0, 1.2, 1.0],
        reward_weights = [1.0, 1.1, 1.0],
        regularization_beta = 0.1,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        target: f64,
        floor: f64,
        w_primary: f64,
        w_secondary: f64,
        alert_threshold: f64,
        penalty_weights: [f64; 3],
        reward_weights: [f64; 3],
        regularization_beta: f64,
    ) -> PyResult<Self> {
        let config = ResonanceConfig {
            target,
            floor,
            w_primary,
            w_secondary,
            alert_threshold,
            penalty_weights,
            reward_weights,
            regularization_beta,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = ResonanceConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn target(&self) -> f64 {
        self.inner.target
    }

    #[getter]
    fn floor(&self) -> f64 {
        self.inner.floor
    }

    #[getter]
    fn alert_threshold(&self) -> f64 {
        self.inner.alert_threshold
    }

    #[getter]
    fn regularization_beta(&self) -> f64 {
        self.inner.regularization_beta
    }

    fn __repr__(&self) -> String {
        format!(
            "ResonanceConfig(target={}, floor={}, alert_threshold={})",
            self.inner.target, self.inner.floor, self.inner.alert_threshold
        )
    }
}

// ─── PyAuditRecord ──────────────────────────────────────────────────

/// Python-visible audit record.
#[pyclass(name = "AuditRecord")]
#[derive(Clone)]
struct PyAuditRecord {
    inner: AuditRecord,
}

#[pymethods]
impl PyAuditRecord {
    #[getter]
    fn metric(&self) -> &str {
        &self.inner.metric
    }

    #[getter]
    fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    fn status(&self) -> String {
        self.inner.status.to_string()
    }

    #[getter]
    fn timestamp(&self) -> String {
        self.inner.timestamp.to_rfc3339()
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("metric", &self.inner.metric)?;
        dict.set_item("value", self.inner.value)?;
        dict.set_item("status", self.inner.status.to_string())?;
        dict.set_item("timestamp", self.inner.timestamp.to_rfc3339())?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "AuditRecord(metric={:?}, value={:.4}, status={})",
            self.inner.metric, self.inner.value, self.inner.status
        )
    }
}

// ─── PyBreachEntry ──────────────────────────────────────────────────

/// Python-visible breach entry.
#[pyclass(name = "BreachEntry")]
#[derive(Clone)]
struct PyBreachEntry {
    inner: BreachEntry,
}

#[pymethods]
impl PyBreachEntry {
    #[getter]
    fn breach_code(&self) -> &str {
        &self.inner.breach_code
    }

    #[getter]
    fn trigger_context(&self) -> &str {
        &self.inner.trigger_context
    }

    #[getter]
    fn recovery_directive(&self) -> &str {
        &self.inner.recovery_directive
    }

    #[getter]
    fn timestamp(&self) -> String {
        self.inner.timestamp.to_rfc3339()
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("timestamp", self.inner.timestamp.to_rfc3339())?;
        dict.set_item("breach_code", &self.inner.breach_code)?;
        dict.set_item("trigger_context", &self.inner.trigger_context)?;
        dict.set_item("recovery_directive", &self.inner.recovery_directive)?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "BreachEntry(code={}, directive={:?})",
            self.inner.breach_code, self.inner.recovery_directive
        )
    }
}

// ─── PyCycleReport ──────────────────────────────────────────────────

/// Python-visible outcome of one audit cycle.
#[pyclass(name = "CycleReport")]
#[derive(Clone)]
struct PyCycleReport {
    inner: CycleReport,
}

#[pymethods]
impl PyCycleReport {
    #[getter]
    fn coherence(&self) -> f64 {
        self.inner.coherence
    }

    #[getter]
    fn state(&self) -> &'static str {
        self.inner.state.label()
    }

    #[getter]
    fn alert(&self) -> bool {
        self.inner.is_alert()
    }

    #[getter]
    fn alert_message(&self) -> Option<String> {
        self.inner.alert.as_ref().map(|a| a.message.clone())
    }

    #[getter]
    fn diagnostics(&self) -> Vec<&'static str> {
        self.inner.diagnostics.clone()
    }

    #[getter]
    fn record(&self) -> PyAuditRecord {
        PyAuditRecord {
            inner: self.inner.record.clone(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CycleReport(coherence={:.3}, state={}, alert={})",
            self.inner.coherence,
            self.inner.state,
            self.inner.is_alert()
        )
    }
}

// ─── PyGovernanceMonitor ────────────────────────────────────────────

/// Coherence governance monitor exposed to Python.
#[pyclass(name = "GovernanceMonitor")]
struct PyGovernanceMonitor {
    inner: GovernanceMonitor,
}

#[pymethods]
impl PyGovernanceMonitor {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyResonanceConfig>) -> PyResult<Self> {
        let config = config.map(|c| c.inner).unwrap_or_default();
        let inner = GovernanceMonitor::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn register_source(&self, source_id: &str) {
        self.inner.register_source(source_id);
    }

    fn revoke_source(&self, source_id: &str) {
        self.inner.revoke_source(source_id);
    }

    fn check_consent(&self, source_id: &str) -> bool {
        self.inner.check_consent(source_id)
    }

    /// Audit consent integrity.
    ///
    /// Args:
    ///     inputs: list of dicts with an optional truthy `consent_confirmed`
    ///         key and an optional `source` string. A non-string `source`
    ///         raises TypeError.
    fn audit_inputs(&self, inputs: Vec<Bound<'_, PyDict>>) -> PyResult<PyAuditRecord> {
        let mut attestations = Vec::with_capacity(inputs.len());
        for item in &inputs {
            let source = match item.get_item("source")? {
                Some(v) => v.extract::<String>()?,
                None => String::new(),
            };
            let confirmed = match item.get_item("consent_confirmed")? {
                Some(v) => v.is_truthy()?,
                None => false,
            };
            attestations.push(InputAttestation::new(source, confirmed));
        }
        Ok(PyAuditRecord {
            inner: self.inner.audit_inputs(&attestations),
        })
    }

    fn evaluate_cycle(&self, inputs: HashMap<String, f64>) -> PyCycleReport {
        let inputs: ScoreInputs = inputs.into_iter().collect();
        PyCycleReport {
            inner: self.inner.evaluate_cycle(&inputs),
        }
    }

    /// Consent-gated cycle. Raises PermissionError for blocked sources.
    fn run_cycle(&self, source_id: &str, inputs: HashMap<String, f64>) -> PyResult<PyCycleReport> {
        let inputs: ScoreInputs = inputs.into_iter().collect();
        let report = self.inner.run_cycle(source_id, &inputs).map_err(to_py_err)?;
        Ok(PyCycleReport { inner: report })
    }

    fn record_breach(&self, breach_code: &str, context: &str) -> PyBreachEntry {
        PyBreachEntry {
            inner: self.inner.record_breach(breach_code, context),
        }
    }

    /// Harmonizer decision as a dict with a `signal` key.
    fn harmonize<'py>(&self, py: Python<'py>, composite: f64) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        match self.inner.harmonize(composite) {
            HarmonizerSignal::Harmonic { composite } => {
                dict.set_item("signal", "harmonic")?;
                dict.set_item("composite", composite)?;
            }
            HarmonizerSignal::RetuningPulse {
                composite,
                threshold,
                blend_hz,
            } => {
                dict.set_item("signal", "retuning_pulse")?;
                dict.set_item("composite", composite)?;
                dict.set_item("threshold", threshold)?;
                dict.set_item("blend_hz", blend_hz)?;
            }
        }
        Ok(dict)
    }

    /// Relational loss over named sub-scores; missing scores count as 0.
    fn relational_loss(&self, scores: HashMap<String, f64>) -> f64 {
        let inputs: ScoreInputs = scores.into_iter().collect();
        self.inner.relational_loss(&RelationalScores::from_inputs(&inputs))
    }

    /// Entropy regularizer scaled by the configured beta.
    fn preservation_regularizer(&self, probs: Vec<f64>) -> f64 {
        self.inner.preservation_regularizer(&probs)
    }

    /// Ledger snapshot as a JSON array of `{seq, event}` objects.
    fn ledger_json(&self) -> PyResult<String> {
        self.inner
            .ledger()
            .to_json()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn ledger_len(&self) -> usize {
        self.inner.ledger().len()
    }
}

// ─── Pure scoring functions ─────────────────────────────────────────

/// Cosine similarity of two equal-length vectors.
#[pyfunction]
fn similarity(intent: Vec<f64>, response: Vec<f64>) -> PyResult<f64> {
    resonance_core::similarity(&intent, &response).map_err(to_py_err)
}

/// `min(mutual_info / entropy, 1.0)`, 0.0 for zero entropy.
#[pyfunction]
fn coherence(mutual_info: f64, entropy: f64) -> f64 {
    resonance_core::coherence(mutual_info, entropy)
}

#[pyfunction]
#[pyo3(signature = (primary, secondary, w_primary = 0.6, w_secondary = 0.4))]
fn composite(primary: f64, secondary: f64, w_primary: f64, w_secondary: f64) -> f64 {
    resonance_core::composite_weighted(primary, secondary, w_primary, w_secondary)
}

/// Classify a score; returns the state label.
#[pyfunction]
#[pyo3(signature = (score, target = 0.85, floor = 0.65))]
fn classify(score: f64, target: f64, floor: f64) -> &'static str {
    resonance_core::classify(score, target, floor).label()
}

#[pyfunction]
fn recovery_directive(breach_code: &str) -> &'static str {
    resonance_core::recovery_directive(breach_code)
}

// ─── Module Registration ────────────────────────────────────────────

/// Resonance Kernel — coherence audit layer.
///
/// - `ResonanceConfig` — configuration
/// - `GovernanceMonitor` — consent gate, scoring, ledger
/// - `AuditRecord`, `BreachEntry`, `CycleReport` — outcome values
/// - `similarity`, `coherence`, `composite`, `classify`,
///   `recovery_directive` — pure functions
#[pymodule]
fn resonance_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyResonanceConfig>()?;
    m.add_class::<PyAuditRecord>()?;
    m.add_class::<PyBreachEntry>()?;
    m.add_class::<PyCycleReport>()?;
    m.add_class::<PyGovernanceMonitor>()?;
    m.add_function(wrap_pyfunction!(similarity, m)?)?;
    m.add_function(wrap_pyfunction!(coherence, m)?)?;
    m.add_function(wrap_pyfunction!(composite, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(recovery_directive, m)?)?;
    Ok(())
}
