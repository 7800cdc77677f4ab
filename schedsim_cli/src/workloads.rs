//! Bundled example workloads and seeded random generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schedsim_core::{CpuWorkload, DiskWorkload, Process};
use std::fmt;
use std::str::FromStr;

/// Bundled CPU workload identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuPreset {
    /// Two processes, the canonical FCFS teaching example
    Basic,

    /// A long process overtaken by a short late arrival
    Preemptive,

    /// Mixed priorities with a high-priority latecomer
    PriorityMix,

    /// Nothing arrives before t=3, forcing an idle interval
    LateStart,

    /// Five processes with staggered arrivals
    Classroom,
}

impl CpuPreset {
    /// Returns a list of all CPU presets.
    pub fn all() -> Vec<CpuPreset> {
        vec![
            CpuPreset::Basic,
            CpuPreset::Preemptive,
            CpuPreset::PriorityMix,
            CpuPreset::LateStart,
            CpuPreset::Classroom,
        ]
    }

    /// Returns the preset name.
    pub fn name(&self) -> &'static str {
        match self {
            CpuPreset::Basic => "basic",
            CpuPreset::Preemptive => "preemptive",
            CpuPreset::PriorityMix => "priority_mix",
            CpuPreset::LateStart => "late_start",
            CpuPreset::Classroom => "classroom",
        }
    }

    /// Returns a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            CpuPreset::Basic => "P1(arr 0, burst 5) and P2(arr 1, burst 3)",
            CpuPreset::Preemptive => "long P1 overtaken at t=1 by a 4-unit P2",
            CpuPreset::PriorityMix => "three priorities, highest arriving last",
            CpuPreset::LateStart => "first arrival at t=3, CPU idles until then",
            CpuPreset::Classroom => "five staggered processes, good RR demo",
        }
    }

    /// Builds the preset workload.
    pub fn workload(&self) -> CpuWorkload {
        let processes = match self {
            CpuPreset::Basic => vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)],
            CpuPreset::Preemptive => vec![Process::new("P1", 0, 8), Process::new("P2", 1, 4)],
            CpuPreset::PriorityMix => vec![
                Process::with_priority("P1", 0, 6, 3),
                Process::with_priority("P2", 2, 4, 2),
                Process::with_priority("P3", 4, 2, 1),
            ],
            CpuPreset::LateStart => vec![Process::new("P1", 3, 4), Process::new("P2", 5, 2)],
            CpuPreset::Classroom => vec![
                Process::new("P1", 0, 5),
                Process::new("P2", 1, 3),
                Process::new("P3", 2, 8),
                Process::new("P4", 3, 2),
                Process::new("P5", 4, 4),
            ],
        };
        CpuWorkload::new(processes).expect("preset workload is valid")
    }
}

impl fmt::Display for CpuPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CpuPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(CpuPreset::Basic),
            "preemptive" => Ok(CpuPreset::Preemptive),
            "priority_mix" | "priority-mix" => Ok(CpuPreset::PriorityMix),
            "late_start" | "late-start" => Ok(CpuPreset::LateStart),
            "classroom" => Ok(CpuPreset::Classroom),
            _ => Err(format!("unknown CPU preset: {}", s)),
        }
    }
}

/// Bundled disk workload identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskPreset {
    /// The classic textbook request set (start 53, 200 tracks)
    Textbook,

    /// Two request clusters at the extremes of a 400-track disk
    Clustered,
}

impl DiskPreset {
    /// Returns a list of all disk presets.
    pub fn all() -> Vec<DiskPreset> {
        vec![DiskPreset::Textbook, DiskPreset::Clustered]
    }

    /// Returns the preset name.
    pub fn name(&self) -> &'static str {
        match self {
            DiskPreset::Textbook => "textbook",
            DiskPreset::Clustered => "clustered",
        }
    }

    /// Returns a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            DiskPreset::Textbook => "98,183,37,122,14,124,65,67 from track 53 (max 199)",
            DiskPreset::Clustered => "low/high clusters from track 200 (max 399)",
        }
    }

    /// Builds the preset workload.
    pub fn workload(&self) -> DiskWorkload {
        let (requests, start, max_track) = match self {
            DiskPreset::Textbook => (vec![98, 183, 37, 122, 14, 124, 65, 67], 53, 199),
            DiskPreset::Clustered => (vec![12, 380, 25, 390, 8, 370, 30], 200, 399),
        };
        DiskWorkload::new(requests, start, max_track).expect("preset workload is valid")
    }
}

impl fmt::Display for DiskPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DiskPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "textbook" => Ok(DiskPreset::Textbook),
            "clustered" => Ok(DiskPreset::Clustered),
            _ => Err(format!("unknown disk preset: {}", s)),
        }
    }
}

/// Generates a reproducible random CPU workload from a seed.
///
/// Arrivals accumulate small gaps so the trace mixes contention and
/// idle stretches; bursts and priorities stay in classroom-sized
/// ranges.
pub fn random_workload(count: usize, seed: u64) -> CpuWorkload {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut arrival = 0u64;
    let mut processes = Vec::with_capacity(count);

    for i in 0..count {
        arrival += rng.gen_range(0..4);
        let burst = rng.gen_range(1..=9);
        let priority = rng.gen_range(0..5);
        processes.push(Process::with_priority(
            format!("P{}", i + 1),
            arrival,
            burst,
            priority,
        ));
    }

    CpuWorkload::new(processes).expect("generated names are unique and bursts positive")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_parse_back() {
        for preset in CpuPreset::all() {
            assert_eq!(preset.name().parse::<CpuPreset>(), Ok(preset));
        }
        for preset in DiskPreset::all() {
            assert_eq!(preset.name().parse::<DiskPreset>(), Ok(preset));
        }
    }

    #[test]
    fn test_presets_build_valid_workloads() {
        for preset in CpuPreset::all() {
            assert!(!preset.workload().is_empty());
        }
        for preset in DiskPreset::all() {
            assert!(!preset.workload().requests().is_empty());
        }
    }

    #[test]
    fn test_random_workload_is_seed_deterministic() {
        let a = random_workload(6, 7);
        let b = random_workload(6, 7);
        assert_eq!(a, b);

        let c = random_workload(6, 8);
        assert_ne!(a, c);
    }
}
