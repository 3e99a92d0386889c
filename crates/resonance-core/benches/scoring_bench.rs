// ─────────────────────────────────────────────────────────────────────
// Resonance Kernel — Scoring Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the per-cycle hot path: scoring,
//! classification, and ledger append.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use resonance_core::{
    classify, coherence, composite, similarity, GovernanceMonitor, InputAttestation, ScoreInputs,
};

// ── ScoreComputer ───────────────────────────────────────────────────

fn bench_similarity_768(c: &mut Criterion) {
    let intent: Vec<f64> = (0..768).map(|i| (i as f64 * 0.01).sin()).collect();
    let response: Vec<f64> = (0..768).map(|i| (i as f64 * 0.013).cos()).collect();
    c.bench_function("similarity_768", |b| {
        b.iter(|| similarity(black_box(&intent), black_box(&response)))
    });
}

fn bench_coherence_and_classify(c: &mut Criterion) {
    c.bench_function("coherence_classify", |b| {
        b.iter(|| {
            let score = coherence(black_box(0.75), black_box(0.85));
            classify(score, 0.85, 0.65)
        })
    });
}

fn bench_composite(c: &mut Criterion) {
    c.bench_function("composite", |b| {
        b.iter(|| composite(black_box(0.7), black_box(0.6)))
    });
}

// ── GovernanceMonitor ───────────────────────────────────────────────

fn bench_evaluate_cycle(c: &mut Criterion) {
    let monitor = GovernanceMonitor::default();
    let inputs = ScoreInputs::from_signal(0.75, 0.85);
    c.bench_function("evaluate_cycle", |b| {
        b.iter(|| monitor.evaluate_cycle(black_box(&inputs)))
    });
}

fn bench_full_cycle(c: &mut Criterion) {
    let monitor = GovernanceMonitor::default();
    monitor.register_source("bench");
    let attestations: Vec<InputAttestation> = (0..10)
        .map(|i| InputAttestation::new(format!("src{i}"), i % 3 != 0))
        .collect();
    let inputs = ScoreInputs::from_signal(0.5, 0.9);

    c.bench_function("full_cycle", |b| {
        b.iter(|| {
            monitor.audit_inputs(black_box(&attestations));
            let report = monitor.run_cycle("bench", black_box(&inputs));
            if let Ok(report) = report {
                if report.is_alert() {
                    monitor.record_breach("VOW_EMERGENCE_BREACH", "bench");
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_similarity_768,
    bench_coherence_and_classify,
    bench_composite,
    bench_evaluate_cycle,
    bench_full_cycle,
);
criterion_main!(benches);
