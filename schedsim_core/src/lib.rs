//! SchedSim Core - Deterministic Scheduling Simulation Engine
//!
//! This library simulates the classic operating-system scheduling
//! algorithms and replays their decisions as an ordered trace:
//! 1. **CPU scheduling**: FCFS, SJF, SRTF, Priority (both variants)
//!    and Round-Robin, driven by one generic discrete-time driver that
//!    emits Gantt segments and per-process timing metrics.
//! 2. **Disk-head scheduling**: FCFS, SSTF, SCAN, C-SCAN, LOOK and
//!    C-LOOK, producing a head path and its total seek distance.
//!
//! The engine is a pure function of its inputs: no wall clock, no
//! randomness, no I/O. Any renderer can rebuild Gantt charts, queues
//! and metrics from a [`SimulationResult`] or replay decisions one at
//! a time through [`CpuSimulation::step`].

pub mod disk;
pub mod driver;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod process;

// Re-export key types for convenience
pub use disk::{compare_all, Direction, DiskAlgorithm, DiskComparison, DiskWorkload, SeekPath};
pub use driver::{simulate, CpuSimulation, GanttSegment, Phase, SimSnapshot, SimulationResult};
pub use error::{SimError, WorkloadError};
pub use metrics::{MetricsReport, ProcessMetrics};
pub use policy::CpuAlgorithm;
pub use process::{CpuWorkload, Process};
