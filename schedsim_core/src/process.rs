//! CPU workload model: validated, immutable process records.
//!
//! A [`CpuWorkload`] is built once by the caller and never mutated by a
//! run. Everything the driver mutates (remaining time, queues) lives in
//! per-run state and is discarded at completion, so re-running the same
//! workload reproduces an identical trace.

use crate::error::WorkloadError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single process record as supplied by the caller.
///
/// `priority` follows the usual convention: lower value means higher
/// priority. It is ignored by every policy except the two priority
/// variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,

    /// Simulated instant at which the process becomes eligible to run.
    #[serde(default)]
    pub arrival: u64,

    /// Total CPU time the process requires. Must be positive.
    pub burst: u64,

    #[serde(default)]
    pub priority: u64,
}

impl Process {
    /// Creates a process with default (highest) priority.
    pub fn new(name: impl Into<String>, arrival: u64, burst: u64) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority: 0,
        }
    }

    /// Creates a process with an explicit priority value.
    pub fn with_priority(name: impl Into<String>, arrival: u64, burst: u64, priority: u64) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority,
        }
    }
}

/// An ordered collection of processes, validated on construction.
///
/// Order matters: several policies break ties by input position, so the
/// workload preserves exactly the sequence the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Process>", into = "Vec<Process>")]
pub struct CpuWorkload {
    processes: Vec<Process>,
}

impl CpuWorkload {
    /// Validates and wraps a process list.
    ///
    /// Rejects duplicate names and zero burst times. An empty list is
    /// legal and simulates to an empty trace.
    pub fn new(processes: Vec<Process>) -> Result<Self, WorkloadError> {
        let mut seen = HashSet::new();
        for p in &processes {
            if p.burst == 0 {
                return Err(WorkloadError::ZeroBurst(p.name.clone()));
            }
            if !seen.insert(p.name.as_str()) {
                return Err(WorkloadError::DuplicateName(p.name.clone()));
            }
        }
        Ok(Self { processes })
    }

    /// An empty workload.
    pub fn empty() -> Self {
        Self {
            processes: Vec::new(),
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of all burst times. Every complete trace attributes exactly
    /// this much busy time to the workload.
    pub fn total_burst(&self) -> u64 {
        self.processes.iter().map(|p| p.burst).sum()
    }
}

impl TryFrom<Vec<Process>> for CpuWorkload {
    type Error = WorkloadError;

    fn try_from(processes: Vec<Process>) -> Result<Self, Self::Error> {
        CpuWorkload::new(processes)
    }
}

impl From<CpuWorkload> for Vec<Process> {
    fn from(workload: CpuWorkload) -> Self {
        workload.processes
    }
}
