//! The CPU simulation driver.
//!
//! One generic state machine drives every CPU policy. A run advances a
//! simulated clock in discrete units, asks the policy who should own
//! the CPU, and records the decisions as a sequence of Gantt segments.
//! The driver is a pure function of its inputs: no wall clock, no
//! randomness, so equal workloads always reproduce identical traces.
//!
//! Two interfaces are exposed:
//! - [`CpuSimulation::run`] computes the full trace in one call.
//! - [`CpuSimulation::step`] emits one closed segment at a time, for
//!   consumers that replay decisions incrementally (e.g. a UI
//!   scrubber). Step-for-step it produces exactly the trace `run`
//!   would.

use crate::error::SimError;
use crate::metrics::MetricsReport;
use crate::policy::CpuAlgorithm;
use crate::process::{CpuWorkload, Process};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Name recorded on idle segments.
pub const IDLE_NAME: &str = "Idle";

/// Discriminates CPU-busy intervals from explicit idle gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Busy,
    Idle,
}

/// A contiguous interval during which one process occupied the CPU, or
/// an explicit idle gap.
///
/// Under preemption a process may own several non-contiguous segments;
/// `completed` is false on every segment but the one that finishes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSegment {
    pub name: String,
    pub start: u64,
    pub end: u64,
    pub completed: bool,
    pub kind: SegmentKind,
}

impl GanttSegment {
    fn busy(name: &str, start: u64, end: u64, completed: bool) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
            completed,
            kind: SegmentKind::Busy,
        }
    }

    fn idle(start: u64, end: u64) -> Self {
        Self {
            name: IDLE_NAME.to_string(),
            start,
            end,
            completed: true,
            kind: SegmentKind::Idle,
        }
    }

    pub fn duration(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.kind == SegmentKind::Idle
    }
}

/// The driver's phase, recorded explicitly rather than as scattered
/// flags so renderers can animate transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing has arrived yet (or the run has not started).
    Idle,
    /// The last segment closed because its process finished; the next
    /// step selects again.
    Scheduling,
    /// A process currently owns the CPU (only observable mid-step).
    Running,
    /// The last segment closed by preemption.
    Preempted,
    /// All processes are complete; `step` returns `None` from here on.
    Completed,
}

/// Immutable view of the per-run state between steps.
///
/// Carries everything a renderer needs to draw pending / active /
/// completed queues without re-deriving scheduling logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimSnapshot {
    pub time: u64,
    pub phase: Phase,
    /// Processes that have not arrived yet.
    pub pending: Vec<String>,
    /// Arrived processes with work left, paired with remaining time.
    pub active: Vec<(String, u64)>,
    pub completed: Vec<String>,
}

/// The complete outcome of a CPU simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub segments: Vec<GanttSegment>,
    pub metrics: MetricsReport,
    pub terminal: bool,
}

/// Per-run mutable task state. Derived from a [`Process`] at run start
/// and discarded at completion; never part of the stored workload.
#[derive(Debug, Clone)]
pub(crate) struct Task {
    pub(crate) name: String,
    pub(crate) arrival: u64,
    pub(crate) burst: u64,
    pub(crate) priority: u64,
    pub(crate) remaining: u64,
}

impl Task {
    pub(crate) fn from_process(p: &Process) -> Self {
        Self {
            name: p.name.clone(),
            arrival: p.arrival,
            burst: p.burst,
            priority: p.priority,
            remaining: p.burst,
        }
    }
}

/// The simulation state machine for one CPU workload and one policy.
#[derive(Debug)]
pub struct CpuSimulation {
    workload: CpuWorkload,
    algorithm: CpuAlgorithm,
    tasks: Vec<Task>,
    time: u64,
    phase: Phase,
    segments: Vec<GanttSegment>,
    /// Round-Robin ready queue (unused by the other policies).
    ready: VecDeque<usize>,
    /// Round-Robin: which tasks have entered the queue already.
    admitted: Vec<bool>,
}

impl CpuSimulation {
    /// Builds the per-run state for a workload under an algorithm.
    ///
    /// Fails fast on a zero Round-Robin quantum, which would loop
    /// forever.
    pub fn new(workload: &CpuWorkload, algorithm: CpuAlgorithm) -> Result<Self, SimError> {
        if let CpuAlgorithm::RoundRobin { quantum } = algorithm {
            if quantum == 0 {
                return Err(SimError::InvalidQuantum);
            }
        }

        let tasks: Vec<Task> = workload.processes().iter().map(Task::from_process).collect();
        let admitted = vec![false; tasks.len()];

        Ok(Self {
            workload: workload.clone(),
            algorithm,
            tasks,
            time: 0,
            phase: Phase::Idle,
            segments: Vec::new(),
            ready: VecDeque::new(),
            admitted,
        })
    }

    /// Advances to the next segment boundary and returns the closed
    /// segment, or `None` once the run is terminal.
    pub fn step(&mut self) -> Option<GanttSegment> {
        if self.phase == Phase::Completed {
            return None;
        }
        if self.tasks.iter().all(|t| t.remaining == 0) {
            self.phase = Phase::Completed;
            return None;
        }

        match self.algorithm {
            CpuAlgorithm::RoundRobin { quantum } => self.step_round_robin(quantum),
            _ => self.step_policy(),
        }
    }

    /// Runs the simulation to completion and derives metrics.
    pub fn run(&mut self) -> SimulationResult {
        while self.step().is_some() {}

        SimulationResult {
            metrics: MetricsReport::from_trace(self.workload.processes(), &self.segments),
            segments: self.segments.clone(),
            terminal: true,
        }
    }

    /// Immutable view of the current state, for renderers.
    pub fn snapshot(&self) -> SimSnapshot {
        let mut pending = Vec::new();
        let mut active = Vec::new();
        let mut completed = Vec::new();

        for t in &self.tasks {
            if t.remaining == 0 {
                completed.push(t.name.clone());
            } else if t.arrival > self.time {
                pending.push(t.name.clone());
            } else {
                active.push((t.name.clone(), t.remaining));
            }
        }

        SimSnapshot {
            time: self.time,
            phase: self.phase,
            pending,
            active,
            completed,
        }
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Segments closed so far.
    pub fn segments(&self) -> &[GanttSegment] {
        &self.segments
    }

    /// One decision round for the five policy-driven algorithms.
    ///
    /// The selected task runs unit by unit. Non-preemptive policies
    /// keep it until completion; preemptive ones re-evaluate at every
    /// unit boundary and close the segment as soon as a strictly
    /// better-ranked task exists.
    fn step_policy(&mut self) -> Option<GanttSegment> {
        let Some(current) = self.algorithm.select_next(&self.tasks, self.time, None) else {
            return self.jump_to_next_arrival();
        };

        let start = self.time;
        self.phase = Phase::Running;

        loop {
            self.time += 1;
            self.tasks[current].remaining -= 1;

            if self.tasks[current].remaining == 0 {
                self.phase = Phase::Scheduling;
                return Some(self.close_segment(current, start, true));
            }

            if self.algorithm.is_preemptive() {
                let next = self.algorithm.select_next(&self.tasks, self.time, Some(current));
                if next != Some(current) {
                    self.phase = Phase::Preempted;
                    return Some(self.close_segment(current, start, false));
                }
            }
        }
    }

    /// One quantum for Round-Robin.
    ///
    /// Ordering is load-bearing: completion is resolved before the
    /// arrivals from this slice are admitted, and those arrivals enter
    /// the queue ahead of the preempted task's re-insertion at the
    /// tail.
    fn step_round_robin(&mut self, quantum: u64) -> Option<GanttSegment> {
        self.admit_arrivals();

        let Some(current) = self.ready.pop_front() else {
            return self.jump_to_next_arrival();
        };

        let start = self.time;
        let slice = quantum.min(self.tasks[current].remaining);
        self.phase = Phase::Running;
        self.time += slice;
        self.tasks[current].remaining -= slice;
        let completed = self.tasks[current].remaining == 0;

        self.admit_arrivals();

        if completed {
            self.phase = Phase::Scheduling;
        } else {
            self.ready.push_back(current);
            self.phase = Phase::Preempted;
        }

        Some(self.close_segment(current, start, completed))
    }

    /// Moves every task that has arrived by now into the ready queue,
    /// ordered by arrival time with input position breaking ties.
    fn admit_arrivals(&mut self) {
        let mut newly: Vec<usize> = (0..self.tasks.len())
            .filter(|&i| !self.admitted[i] && self.tasks[i].arrival <= self.time)
            .collect();
        newly.sort_by_key(|&i| self.tasks[i].arrival);

        for i in newly {
            self.admitted[i] = true;
            self.ready.push_back(i);
        }
    }

    /// Jumps the clock to the earliest pending arrival, recording an
    /// explicit idle segment. Returns `None` only if nothing is
    /// pending, which the caller has already ruled out.
    fn jump_to_next_arrival(&mut self) -> Option<GanttSegment> {
        let next = self
            .tasks
            .iter()
            .filter(|t| t.remaining > 0)
            .map(|t| t.arrival)
            .min()?;
        debug_assert!(next > self.time, "idle jump must move the clock forward");

        let seg = GanttSegment::idle(self.time, next);
        self.time = next;
        self.phase = Phase::Idle;
        self.segments.push(seg.clone());
        Some(seg)
    }

    fn close_segment(&mut self, task: usize, start: u64, completed: bool) -> GanttSegment {
        let seg = GanttSegment::busy(&self.tasks[task].name, start, self.time, completed);
        self.segments.push(seg.clone());
        seg
    }
}

/// Computes the full trace for a workload in one call.
pub fn simulate(workload: &CpuWorkload, algorithm: CpuAlgorithm) -> Result<SimulationResult, SimError> {
    Ok(CpuSimulation::new(workload, algorithm)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;
    use proptest::prelude::*;

    fn workload(specs: &[(&str, u64, u64)]) -> CpuWorkload {
        CpuWorkload::new(
            specs
                .iter()
                .map(|(n, a, b)| Process::new(*n, *a, *b))
                .collect(),
        )
        .unwrap()
    }

    fn names(segments: &[GanttSegment]) -> Vec<&str> {
        segments.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_fcfs_two_processes() {
        let w = workload(&[("P1", 0, 5), ("P2", 1, 3)]);
        let result = simulate(&w, CpuAlgorithm::Fcfs).unwrap();

        assert_eq!(names(&result.segments), vec!["P1", "P2"]);
        assert_eq!(result.segments[0].start, 0);
        assert_eq!(result.segments[0].end, 5);
        assert_eq!(result.segments[1].start, 5);
        assert_eq!(result.segments[1].end, 8);
        assert!(result.terminal);

        assert_eq!(result.metrics.get("P1").unwrap().waiting, 0);
        assert_eq!(result.metrics.get("P2").unwrap().waiting, 4);
    }

    #[test]
    fn test_srtf_preemption_scenario() {
        let w = workload(&[("P1", 0, 8), ("P2", 1, 4)]);
        let result = simulate(&w, CpuAlgorithm::Srtf).unwrap();

        // P1 is preempted at t=1 for P2, resumes at t=5, completes at 12.
        assert_eq!(
            result.segments,
            vec![
                GanttSegment::busy("P1", 0, 1, false),
                GanttSegment::busy("P2", 1, 5, true),
                GanttSegment::busy("P1", 5, 12, true),
            ]
        );
    }

    #[test]
    fn test_idle_gap_recorded() {
        let w = workload(&[("P1", 3, 2)]);
        let result = simulate(&w, CpuAlgorithm::Fcfs).unwrap();

        assert_eq!(result.segments.len(), 2);
        assert!(result.segments[0].is_idle());
        assert_eq!(result.segments[0].start, 0);
        assert_eq!(result.segments[0].end, 3);
        assert_eq!(result.segments[1].name, "P1");
        assert_eq!(result.segments[1].start, 3);
    }

    #[test]
    fn test_no_idle_segment_when_jump_is_zero_length() {
        let w = workload(&[("P1", 0, 2), ("P2", 2, 1)]);
        let result = simulate(&w, CpuAlgorithm::Fcfs).unwrap();
        assert!(result.segments.iter().all(|s| !s.is_idle()));
    }

    #[test]
    fn test_sjf_runs_to_completion_despite_shorter_arrival() {
        // P2 arrives mid-run with a shorter burst; SJF never preempts.
        let w = workload(&[("P1", 0, 6), ("P2", 1, 2)]);
        let result = simulate(&w, CpuAlgorithm::Sjf).unwrap();

        assert_eq!(names(&result.segments), vec!["P1", "P2"]);
        assert!(result.segments[0].completed);
    }

    #[test]
    fn test_priority_preemptive_vs_non_preemptive() {
        let w = CpuWorkload::new(vec![
            Process::with_priority("P1", 0, 4, 2),
            Process::with_priority("P2", 1, 2, 1),
        ])
        .unwrap();

        let np = simulate(&w, CpuAlgorithm::PriorityNonPreemptive).unwrap();
        assert_eq!(names(&np.segments), vec!["P1", "P2"]);

        let p = simulate(&w, CpuAlgorithm::PriorityPreemptive).unwrap();
        assert_eq!(
            p.segments,
            vec![
                GanttSegment::busy("P1", 0, 1, false),
                GanttSegment::busy("P2", 1, 3, true),
                GanttSegment::busy("P1", 3, 6, true),
            ]
        );
    }

    #[test]
    fn test_round_robin_arrivals_enter_ahead_of_preempted() {
        // P2 and P3 arrive during P1's first quantum and must be
        // queued before P1 returns to the tail.
        let w = workload(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 4)]);
        let result = simulate(&w, CpuAlgorithm::RoundRobin { quantum: 2 }).unwrap();

        assert_eq!(&names(&result.segments)[..4], &["P1", "P2", "P3", "P1"]);
    }

    #[test]
    fn test_round_robin_quantum_bound() {
        let w = workload(&[("P1", 0, 7), ("P2", 0, 4)]);
        let result = simulate(&w, CpuAlgorithm::RoundRobin { quantum: 3 }).unwrap();

        for seg in result.segments.iter().filter(|s| !s.is_idle()) {
            assert!(seg.duration() <= 3);
        }
        // Last slice of P1 is the 1-unit remainder.
        let last = result.segments.last().unwrap();
        assert_eq!(last.name, "P1");
        assert!(last.completed);
    }

    #[test]
    fn test_round_robin_zero_quantum_fails_fast() {
        let w = workload(&[("P1", 0, 1)]);
        let err = CpuSimulation::new(&w, CpuAlgorithm::RoundRobin { quantum: 0 }).unwrap_err();
        assert_eq!(err, SimError::InvalidQuantum);
    }

    #[test]
    fn test_empty_workload_is_terminal_immediately() {
        let mut sim = CpuSimulation::new(&CpuWorkload::empty(), CpuAlgorithm::Fcfs).unwrap();
        assert_eq!(sim.step(), None);
        assert!(sim.is_terminal());

        let result = simulate(&CpuWorkload::empty(), CpuAlgorithm::Srtf).unwrap();
        assert!(result.segments.is_empty());
        assert!(result.terminal);
    }

    #[test]
    fn test_incremental_matches_full_run() {
        let w = workload(&[("P1", 0, 8), ("P2", 1, 4), ("P3", 3, 2)]);
        let full = simulate(&w, CpuAlgorithm::Srtf).unwrap();

        let mut sim = CpuSimulation::new(&w, CpuAlgorithm::Srtf).unwrap();
        let mut stepped = Vec::new();
        while let Some(seg) = sim.step() {
            stepped.push(seg);
        }

        assert_eq!(stepped, full.segments);
    }

    #[test]
    fn test_snapshot_tracks_queues() {
        let w = workload(&[("P1", 0, 3), ("P2", 5, 2)]);
        let mut sim = CpuSimulation::new(&w, CpuAlgorithm::Fcfs).unwrap();

        let before = sim.snapshot();
        assert_eq!(before.active, vec![("P1".to_string(), 3)]);
        assert_eq!(before.pending, vec!["P2".to_string()]);

        sim.step(); // P1 runs 0-3
        let after = sim.snapshot();
        assert_eq!(after.completed, vec!["P1".to_string()]);
        assert_eq!(after.phase, Phase::Scheduling);
    }

    #[test]
    fn test_identical_runs_produce_identical_json() {
        let w = workload(&[("P1", 0, 4), ("P2", 2, 6), ("P3", 3, 1)]);

        let a = simulate(&w, CpuAlgorithm::RoundRobin { quantum: 2 }).unwrap();
        let b = simulate(&w, CpuAlgorithm::RoundRobin { quantum: 2 }).unwrap();

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    fn arb_workload() -> impl Strategy<Value = CpuWorkload> {
        prop::collection::vec((0u64..20, 1u64..10, 0u64..5), 1..8).prop_map(|specs| {
            CpuWorkload::new(
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (arrival, burst, priority))| {
                        Process::with_priority(format!("P{}", i + 1), arrival, burst, priority)
                    })
                    .collect(),
            )
            .unwrap()
        })
    }

    fn all_algorithms() -> Vec<CpuAlgorithm> {
        vec![
            CpuAlgorithm::Fcfs,
            CpuAlgorithm::Sjf,
            CpuAlgorithm::Srtf,
            CpuAlgorithm::PriorityNonPreemptive,
            CpuAlgorithm::PriorityPreemptive,
            CpuAlgorithm::RoundRobin { quantum: 2 },
        ]
    }

    proptest! {
        #[test]
        fn prop_no_work_lost_or_duplicated(w in arb_workload()) {
            for algo in all_algorithms() {
                let result = simulate(&w, algo).unwrap();
                let busy: u64 = result
                    .segments
                    .iter()
                    .filter(|s| !s.is_idle())
                    .map(|s| s.duration())
                    .sum();
                prop_assert_eq!(busy, w.total_burst());
            }
        }

        #[test]
        fn prop_segments_are_contiguous(w in arb_workload()) {
            for algo in all_algorithms() {
                let result = simulate(&w, algo).unwrap();
                let mut clock = 0;
                for seg in &result.segments {
                    prop_assert_eq!(seg.start, clock);
                    prop_assert!(seg.end >= seg.start);
                    clock = seg.end;
                }
            }
        }

        #[test]
        fn prop_srtf_runs_the_minimum_remaining(w in arb_workload()) {
            // Replay the trace and check that whoever holds the CPU at
            // the start of a segment has minimal remaining time among
            // the arrived.
            let result = simulate(&w, CpuAlgorithm::Srtf).unwrap();
            let mut remaining: std::collections::HashMap<&str, u64> = w
                .processes()
                .iter()
                .map(|p| (p.name.as_str(), p.burst))
                .collect();

            for seg in result.segments.iter().filter(|s| !s.is_idle()) {
                let running = remaining[seg.name.as_str()];
                for p in w.processes() {
                    if p.arrival <= seg.start && remaining[p.name.as_str()] > 0 {
                        prop_assert!(remaining[p.name.as_str()] >= running);
                    }
                }
                *remaining.get_mut(seg.name.as_str()).unwrap() -= seg.duration();
            }
        }

        #[test]
        fn prop_priority_preemptive_runs_the_minimum_priority(w in arb_workload()) {
            // Same replay as the SRTF property, over the static
            // priority key: whoever holds the CPU at the start of a
            // segment has minimal priority value among the arrived.
            let result = simulate(&w, CpuAlgorithm::PriorityPreemptive).unwrap();
            let mut remaining: std::collections::HashMap<&str, u64> = w
                .processes()
                .iter()
                .map(|p| (p.name.as_str(), p.burst))
                .collect();

            for seg in result.segments.iter().filter(|s| !s.is_idle()) {
                let running = w
                    .processes()
                    .iter()
                    .find(|p| p.name == seg.name)
                    .map(|p| p.priority)
                    .unwrap();
                for p in w.processes() {
                    if p.arrival <= seg.start && remaining[p.name.as_str()] > 0 {
                        prop_assert!(p.priority >= running);
                    }
                }
                *remaining.get_mut(seg.name.as_str()).unwrap() -= seg.duration();
            }
        }
    }
}
