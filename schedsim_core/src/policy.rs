//! CPU scheduling policies.
//!
//! Each policy is a pure selection rule: given the per-run task states
//! and the current simulated time, pick the task that should occupy the
//! CPU next. All six share one driver ([`crate::driver::CpuSimulation`]);
//! only the selection key and the preemption rule differ.

use crate::driver::Task;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The CPU scheduling algorithm, including any per-algorithm parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "algorithm")]
pub enum CpuAlgorithm {
    /// First-Come First-Served: earliest arrival runs to completion,
    /// ties broken by input list position.
    Fcfs,

    /// Shortest Job First, non-preemptive.
    Sjf,

    /// Shortest Remaining Time First, the preemptive variant of SJF.
    Srtf,

    /// Lowest priority value wins; the choice is only made when the CPU
    /// is free.
    PriorityNonPreemptive,

    /// Lowest priority value wins and a strictly higher-priority
    /// arrival preempts the running process.
    PriorityPreemptive,

    /// FIFO ready queue with a fixed time quantum.
    RoundRobin { quantum: u64 },
}

impl CpuAlgorithm {
    /// Returns the short algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            CpuAlgorithm::Fcfs => "fcfs",
            CpuAlgorithm::Sjf => "sjf",
            CpuAlgorithm::Srtf => "srtf",
            CpuAlgorithm::PriorityNonPreemptive => "priority",
            CpuAlgorithm::PriorityPreemptive => "priority-preemptive",
            CpuAlgorithm::RoundRobin { .. } => "round-robin",
        }
    }

    /// True for policies that re-evaluate their choice at every time
    /// unit and may interrupt the running process.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            CpuAlgorithm::Srtf | CpuAlgorithm::PriorityPreemptive
        )
    }

    /// The ranking key the policy minimizes.
    fn key(&self, task: &Task) -> u64 {
        match self {
            CpuAlgorithm::Fcfs => task.arrival,
            CpuAlgorithm::Sjf => task.burst,
            CpuAlgorithm::Srtf => task.remaining,
            CpuAlgorithm::PriorityNonPreemptive | CpuAlgorithm::PriorityPreemptive => task.priority,
            // Round-Robin is queue-driven; the driver never asks it to rank.
            CpuAlgorithm::RoundRobin { .. } => 0,
        }
    }

    /// Selects the next task to run, or `None` when no task has
    /// arrived (CPU idle: the driver must jump to the next arrival).
    ///
    /// The scan is stable left-to-right, so ties go to the earliest
    /// input position. For preemptive policies a currently running task
    /// is kept unless a strictly smaller key is found: equal keys never
    /// preempt.
    pub(crate) fn select_next(
        &self,
        tasks: &[Task],
        now: u64,
        running: Option<usize>,
    ) -> Option<usize> {
        // Manual scan with a strict comparison: `min_by_key` keeps the
        // last minimum, but ties must go to the earliest position.
        let mut candidate: Option<usize> = None;
        for (i, t) in tasks.iter().enumerate() {
            if t.arrival > now || t.remaining == 0 {
                continue;
            }
            match candidate {
                Some(c) if self.key(t) >= self.key(&tasks[c]) => {}
                _ => candidate = Some(i),
            }
        }
        let candidate = candidate?;

        match running {
            Some(r) if tasks[r].remaining > 0 && self.key(&tasks[r]) <= self.key(&tasks[candidate]) => {
                Some(r)
            }
            _ => Some(candidate),
        }
    }
}

impl fmt::Display for CpuAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuAlgorithm::RoundRobin { quantum } => write!(f, "round-robin (q={})", quantum),
            other => write!(f, "{}", other.name()),
        }
    }
}
