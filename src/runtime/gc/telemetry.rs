//! Collection-cycle metrics.
//!
//! Every call to [`GcHeap::collect`](super::GcHeap::collect) produces a
//! [`CollectReport`]; the heap keeps the history in a [`GcTelemetry`] that can
//! be rendered as text or exported as JSON.

use std::fmt::Write as _;

use serde::Serialize;

/// Metrics captured for a single collection cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectReport {
    pub cycle_index: usize,
    pub live_before: usize,
    pub live_after: usize,
    /// Array buffers freed because they formed unreachable cycles.
    pub reclaimed: usize,
    pub roots_scanned: usize,
    pub duration_micros: u64,
    pub threshold_before: usize,
    pub threshold_after: usize,
}

#[derive(Debug, Default)]
pub struct GcTelemetry {
    cycles: Vec<CollectReport>,
}

impl GcTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: CollectReport) {
        self.cycles.push(report);
    }

    pub fn cycles(&self) -> &[CollectReport] {
        &self.cycles
    }

    pub fn total_reclaimed(&self) -> usize {
        self.cycles.iter().map(|c| c.reclaimed).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.cycles)
    }

    /// Human-readable summary, one line per cycle.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "gc: {} cycles, {} buffers reclaimed",
            self.cycles.len(),
            self.total_reclaimed()
        );
        for c in &self.cycles {
            let _ = writeln!(
                out,
                "  #{:<4} live {:>6} -> {:<6} reclaimed {:<6} roots {:<6} {:>6}us threshold {} -> {}",
                c.cycle_index,
                c.live_before,
                c.live_after,
                c.reclaimed,
                c.roots_scanned,
                c.duration_micros,
                c.threshold_before,
                c.threshold_after,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(index: usize, reclaimed: usize) -> CollectReport {
        CollectReport {
            cycle_index: index,
            live_before: 10,
            live_after: 10 - reclaimed,
            reclaimed,
            roots_scanned: 3,
            duration_micros: 0,
            threshold_before: 1024,
            threshold_after: 1024,
        }
    }

    #[test]
    fn totals_sum_over_cycles() {
        let mut telemetry = GcTelemetry::new();
        telemetry.record(sample(0, 2));
        telemetry.record(sample(1, 5));
        assert_eq!(telemetry.total_reclaimed(), 7);
        assert!(telemetry.report().starts_with("gc: 2 cycles, 7 buffers reclaimed"));
    }

    #[test]
    fn json_export_contains_every_cycle() {
        let mut telemetry = GcTelemetry::new();
        telemetry.record(sample(0, 1));
        let json = telemetry.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["reclaimed"], 1);
        assert_eq!(parsed[0]["roots_scanned"], 3);
    }
}
