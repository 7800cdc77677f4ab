//! Derived timing metrics for CPU traces.
//!
//! Everything here is recomputed from the Gantt trace plus the original
//! workload; the driver records decisions, not verdicts. Keys are
//! process names, stored in a `BTreeMap` so serialized reports are
//! byte-identical across runs.

use crate::driver::GanttSegment;
use crate::process::Process;
use serde::Serialize;
use std::collections::BTreeMap;

/// Timing metrics for a single process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    /// End time of the process's last segment.
    pub completion: u64,
    /// `completion - arrival`.
    pub turnaround: u64,
    /// `turnaround - burst`: time spent arrived but not running.
    pub waiting: u64,
    /// Start of the first segment minus arrival.
    pub response: u64,
}

/// Per-process metrics plus arithmetic-mean averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub per_process: BTreeMap<String, ProcessMetrics>,
}

impl MetricsReport {
    /// Derives metrics from a completed trace.
    ///
    /// Processes without segments (an empty workload, or a trace cut
    /// short) are simply absent from the report.
    pub fn from_trace(processes: &[Process], segments: &[GanttSegment]) -> Self {
        let mut per_process = BTreeMap::new();

        for p in processes {
            let mut first_start = None;
            let mut completion = None;

            for seg in segments.iter().filter(|s| !s.is_idle() && s.name == p.name) {
                if first_start.is_none() {
                    first_start = Some(seg.start);
                }
                completion = Some(seg.end);
            }

            let (Some(first_start), Some(completion)) = (first_start, completion) else {
                continue;
            };

            let turnaround = completion - p.arrival;
            per_process.insert(
                p.name.clone(),
                ProcessMetrics {
                    completion,
                    turnaround,
                    waiting: turnaround - p.burst,
                    response: first_start - p.arrival,
                },
            );
        }

        Self { per_process }
    }

    pub fn get(&self, name: &str) -> Option<&ProcessMetrics> {
        self.per_process.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.per_process.is_empty()
    }

    pub fn avg_turnaround(&self) -> f64 {
        self.average(|m| m.turnaround)
    }

    pub fn avg_waiting(&self) -> f64 {
        self.average(|m| m.waiting)
    }

    pub fn avg_response(&self) -> f64 {
        self.average(|m| m.response)
    }

    fn average(&self, field: impl Fn(&ProcessMetrics) -> u64) -> f64 {
        if self.per_process.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.per_process.values().map(field).sum();
        sum as f64 / self.per_process.len() as f64
    }
}
