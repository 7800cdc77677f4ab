//! Error types for the scheduling engine.

use thiserror::Error;

/// Errors raised while validating a workload before simulation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkloadError {
    /// Two processes share a name. Names key the metrics map, so they
    /// must be unique within one workload.
    #[error("duplicate process name: {0}")]
    DuplicateName(String),

    /// A process declared a burst time of zero.
    #[error("process {0} has zero burst time")]
    ZeroBurst(String),

    /// A track request lies outside the disk's track range.
    #[error("track request {track} exceeds max track {max_track}")]
    TrackOutOfRange { track: u32, max_track: u32 },
}

/// Errors raised when configuring or running a simulation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimError {
    /// Round-Robin was asked to run with a zero quantum, which would
    /// never make progress.
    #[error("round-robin quantum must be at least 1")]
    InvalidQuantum,

    /// The workload itself failed validation.
    #[error(transparent)]
    Workload(#[from] WorkloadError),
}
