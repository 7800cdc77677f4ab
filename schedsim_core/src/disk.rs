//! Disk-head scheduling policies.
//!
//! All six policies are pure: every request is present at t=0, so a
//! policy is nothing but an ordering/termination rule over the request
//! list. The four sweep-based policies (SCAN, C-SCAN, LOOK, C-LOOK)
//! share one parameterized sweep instead of four copies of the
//! sort-serve-reverse skeleton.
//!
//! The universal metric is seek distance: the sum of absolute track
//! differences between consecutive head positions, including the hop
//! from the start position to the first served request and any
//! circular jump.

use crate::error::WorkloadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Head sweep direction for SCAN and LOOK.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

/// The disk scheduling algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskAlgorithm {
    Fcfs,
    Sstf,
    Scan,
    CScan,
    Look,
    CLook,
}

/// A validated disk workload: the request list, the initial head
/// position, and the track domain size.
///
/// `max_track` is always caller-supplied: there is deliberately no
/// default, so two call sites can never disagree silently about the
/// domain size. Duplicate requests are legal and each occurrence is
/// served. The start position may lie outside `[0, max_track]`; it is
/// kept raw for seek arithmetic and only clamped by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskWorkload {
    requests: Vec<u32>,
    start: u32,
    max_track: u32,
}

impl DiskWorkload {
    pub fn new(requests: Vec<u32>, start: u32, max_track: u32) -> Result<Self, WorkloadError> {
        for &track in &requests {
            if track > max_track {
                return Err(WorkloadError::TrackOutOfRange { track, max_track });
            }
        }
        if start > max_track {
            warn!(start, max_track, "start position outside track range; kept raw for seek arithmetic");
        }
        Ok(Self {
            requests,
            start,
            max_track,
        })
    }

    pub fn requests(&self) -> &[u32] {
        &self.requests
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn max_track(&self) -> u32 {
        self.max_track
    }

    /// Start position clamped into the track range, for display scales.
    pub fn clamped_start(&self) -> u32 {
        self.start.min(self.max_track)
    }
}

/// The ordered head path and its total seek distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekPath {
    /// Track positions in visitation order; `path[0]` is the start.
    pub path: Vec<u32>,
    /// Sum of absolute differences between consecutive positions.
    pub seek_count: u64,
}

/// One algorithm's seek count within a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonEntry {
    pub algorithm: DiskAlgorithm,
    pub seek_count: u64,
}

/// Seek counts for all six algorithms over one workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskComparison {
    pub entries: Vec<ComparisonEntry>,
}

impl DiskComparison {
    /// The entry with the minimum seek count (first listed on a tie).
    pub fn best(&self) -> Option<&ComparisonEntry> {
        let mut best: Option<&ComparisonEntry> = None;
        for entry in &self.entries {
            match best {
                Some(b) if entry.seek_count >= b.seek_count => {}
                _ => best = Some(entry),
            }
        }
        best
    }
}

impl DiskAlgorithm {
    /// All algorithms in canonical comparison order.
    pub fn all() -> [DiskAlgorithm; 6] {
        [
            DiskAlgorithm::Fcfs,
            DiskAlgorithm::Sstf,
            DiskAlgorithm::Scan,
            DiskAlgorithm::CScan,
            DiskAlgorithm::Look,
            DiskAlgorithm::CLook,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiskAlgorithm::Fcfs => "fcfs",
            DiskAlgorithm::Sstf => "sstf",
            DiskAlgorithm::Scan => "scan",
            DiskAlgorithm::CScan => "cscan",
            DiskAlgorithm::Look => "look",
            DiskAlgorithm::CLook => "clook",
        }
    }

    /// Computes the head path for a workload.
    ///
    /// `direction` applies to SCAN and LOOK; C-SCAN and C-LOOK always
    /// sweep upward, FCFS and SSTF ignore it entirely.
    pub fn schedule(&self, workload: &DiskWorkload, direction: Direction) -> SeekPath {
        match self {
            DiskAlgorithm::Fcfs => {
                let mut head = Head::new(workload.start);
                for &track in &workload.requests {
                    head.visit(track);
                }
                head.finish()
            }
            DiskAlgorithm::Sstf => sstf(workload),
            DiskAlgorithm::Scan => sweep(workload, direction, Stop::Boundary, Wrap::Reverse),
            DiskAlgorithm::CScan => {
                sweep(workload, Direction::Up, Stop::Boundary, Wrap::BoundaryJump)
            }
            DiskAlgorithm::Look => sweep(workload, direction, Stop::LastRequest, Wrap::Reverse),
            DiskAlgorithm::CLook => {
                sweep(workload, Direction::Up, Stop::LastRequest, Wrap::NearestRequest)
            }
        }
    }
}

impl fmt::Display for DiskAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DiskAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" => Ok(DiskAlgorithm::Fcfs),
            "sstf" => Ok(DiskAlgorithm::Sstf),
            "scan" => Ok(DiskAlgorithm::Scan),
            "cscan" | "c-scan" => Ok(DiskAlgorithm::CScan),
            "look" => Ok(DiskAlgorithm::Look),
            "clook" | "c-look" => Ok(DiskAlgorithm::CLook),
            _ => Err(format!("unknown disk algorithm: {}", s)),
        }
    }
}

/// Runs all six algorithms against the identical workload.
pub fn compare_all(workload: &DiskWorkload, direction: Direction) -> DiskComparison {
    let entries = DiskAlgorithm::all()
        .into_iter()
        .map(|algorithm| ComparisonEntry {
            algorithm,
            seek_count: algorithm.schedule(workload, direction).seek_count,
        })
        .collect();
    DiskComparison { entries }
}

fn distance(a: u32, b: u32) -> u64 {
    (i64::from(a) - i64::from(b)).unsigned_abs()
}

/// Accumulates a head path and its seek distance.
struct Head {
    path: Vec<u32>,
    seek_count: u64,
    position: u32,
}

impl Head {
    fn new(start: u32) -> Self {
        Self {
            path: vec![start],
            seek_count: 0,
            position: start,
        }
    }

    fn visit(&mut self, track: u32) {
        self.seek_count += distance(self.position, track);
        self.position = track;
        self.path.push(track);
    }

    /// Records a circular jump with a fixed charge instead of the
    /// positional distance. C-SCAN charges exactly `max_track` for the
    /// end-to-end return regardless of where the head actually sits.
    fn jump(&mut self, cost: u64, landing: u32) {
        self.seek_count += cost;
        self.position = landing;
        self.path.push(landing);
    }

    fn finish(self) -> SeekPath {
        SeekPath {
            path: self.path,
            seek_count: self.seek_count,
        }
    }
}

/// Where the primary sweep terminates.
#[derive(PartialEq)]
enum Stop {
    /// Touch the domain boundary even with no request there (SCAN).
    Boundary,
    /// Stop at the last pending request (LOOK).
    LastRequest,
}

/// What happens after the primary sweep.
enum Wrap {
    /// Reverse and serve the other side (SCAN / LOOK).
    Reverse,
    /// Jump to the far boundary, charging the full traversal (C-SCAN).
    BoundaryJump,
    /// Land directly on the nearest unserved request (C-LOOK).
    NearestRequest,
}

/// Shortest Seek Time First: greedily serve the nearest pending
/// request, ties going to the earliest-listed one.
fn sstf(workload: &DiskWorkload) -> SeekPath {
    let mut remaining = workload.requests.to_vec();
    let mut head = Head::new(workload.start);

    while !remaining.is_empty() {
        let mut nearest = 0;
        for (i, &track) in remaining.iter().enumerate() {
            if distance(head.position, track) < distance(head.position, remaining[nearest]) {
                nearest = i;
            }
        }
        head.visit(remaining.remove(nearest));
    }

    head.finish()
}

/// The shared sweep skeleton behind SCAN, C-SCAN, LOOK and C-LOOK.
///
/// Requests are sorted ascending and partitioned around the start
/// position; the start-side partition is served in sweep order, then
/// the head either reverses or wraps around for the remainder. The
/// circular modes only sweep upward, matching the non-circular
/// direction parameterization of the policies that use them.
fn sweep(workload: &DiskWorkload, direction: Direction, stop: Stop, wrap: Wrap) -> SeekPath {
    let mut tracks = workload.requests.to_vec();
    tracks.sort_unstable();

    let start = workload.start;
    let max_track = workload.max_track;
    let mut head = Head::new(start);

    match direction {
        Direction::Up => {
            for &t in tracks.iter().filter(|&&t| t >= start) {
                head.visit(t);
            }
            if stop == Stop::Boundary && head.position < max_track {
                head.visit(max_track);
            }
            match wrap {
                Wrap::Reverse => {
                    for &t in tracks.iter().rev().filter(|&&t| t < start) {
                        head.visit(t);
                    }
                }
                Wrap::BoundaryJump => {
                    head.jump(u64::from(max_track), 0);
                    for &t in tracks.iter().filter(|&&t| t < start) {
                        head.visit(t);
                    }
                }
                Wrap::NearestRequest => {
                    // Ascending over the low side: the first visit IS
                    // the wrap jump onto the smallest pending request.
                    for &t in tracks.iter().filter(|&&t| t < start) {
                        head.visit(t);
                    }
                }
            }
        }
        Direction::Down => {
            for &t in tracks.iter().rev().filter(|&&t| t <= start) {
                head.visit(t);
            }
            if stop == Stop::Boundary && head.position > 0 {
                head.visit(0);
            }
            // Only the reversing policies sweep downward.
            for &t in tracks.iter().filter(|&&t| t > start) {
                head.visit(t);
            }
        }
    }

    head.finish()
}
