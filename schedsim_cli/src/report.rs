//! Plain-text rendering of simulation results.
//!
//! Everything here is presentation only: the engine's trace carries all
//! the information, and these printers just lay it out.

use schedsim_core::{
    CpuAlgorithm, CpuWorkload, DiskAlgorithm, DiskComparison, DiskWorkload, GanttSegment,
    SeekPath, SimulationResult,
};

/// Renders the Gantt chart as a bar row plus an aligned time row.
pub fn render_gantt(segments: &[GanttSegment]) -> (String, String) {
    let mut bar = String::from("|");
    let mut times = String::from("0");

    for seg in segments {
        let width = seg.name.len().max(seg.duration() as usize * 2) + 2;
        let label = format!("{:^width$}", seg.name, width = width);
        bar.push_str(&label);
        bar.push('|');

        let end = seg.end.to_string();
        let column = bar.len().saturating_sub(end.len());
        while times.len() < column {
            times.push(' ');
        }
        times.push_str(&end);
    }

    (bar, times)
}

/// Prints the decision log, Gantt chart and metrics for a CPU run.
pub fn print_cpu(algorithm: &CpuAlgorithm, workload: &CpuWorkload, result: &SimulationResult) {
    println!();
    println!("CPU scheduling: {} ({} processes)", algorithm, workload.len());
    println!();

    // Step-by-step decision log
    for seg in &result.segments {
        if seg.is_idle() {
            println!(
                "  t={:<3} CPU idle until t={} (no process ready)",
                seg.start, seg.end
            );
        } else if seg.completed {
            println!(
                "  t={:<3} {} runs for {}u and completes at t={}",
                seg.start,
                seg.name,
                seg.duration(),
                seg.end
            );
        } else {
            println!(
                "  t={:<3} {} runs for {}u, preempted at t={}",
                seg.start,
                seg.name,
                seg.duration(),
                seg.end
            );
        }
    }

    if !result.segments.is_empty() {
        let (bar, times) = render_gantt(&result.segments);
        println!();
        println!("  {}", bar);
        println!("  {}", times);
    }

    if result.metrics.is_empty() {
        return;
    }

    println!();
    println!("  ──────────────────────────────────────────────────────────────");
    println!("  Process    Completion    Turnaround    Waiting    Response");
    println!("  ──────────────────────────────────────────────────────────────");
    for (name, m) in &result.metrics.per_process {
        println!(
            "  {:<10} {:>10}    {:>10}    {:>7}    {:>8}",
            name, m.completion, m.turnaround, m.waiting, m.response
        );
    }
    println!("  ──────────────────────────────────────────────────────────────");
    println!(
        "  Average turnaround: {:.2}   waiting: {:.2}   response: {:.2}",
        result.metrics.avg_turnaround(),
        result.metrics.avg_waiting(),
        result.metrics.avg_response()
    );
}

/// Prints the head path, a track-scale sketch and the seek total.
pub fn print_disk(algorithm: DiskAlgorithm, workload: &DiskWorkload, result: &SeekPath) {
    println!();
    println!(
        "Disk scheduling: {} (start {}, max track {})",
        algorithm,
        workload.start(),
        workload.max_track()
    );
    println!();

    let path: Vec<String> = result.path.iter().map(|t| t.to_string()).collect();
    println!("  Head path: {}", path.join(" → "));
    println!();

    // Track-scale sketch; positions are clamped for display only.
    const WIDTH: usize = 50;
    let max_track = workload.max_track().max(1);
    for &track in &result.path {
        let clamped = track.min(max_track);
        let column = (clamped as usize * (WIDTH - 1)) / max_track as usize;
        println!("  {}●  {}", " ".repeat(column), track);
    }

    println!();
    println!("  Total seek distance: {} tracks", result.seek_count);
}

/// Prints the six-way comparison with the minimum marked.
pub fn print_comparison(workload: &DiskWorkload, comparison: &DiskComparison) {
    println!();
    println!(
        "Disk algorithm comparison ({} requests, start {}, max track {})",
        workload.requests().len(),
        workload.start(),
        workload.max_track()
    );
    println!();

    let minimum = comparison.best().map(|b| b.seek_count);

    println!("  ─────────────────────────────────");
    println!("  Algorithm       Seek Distance");
    println!("  ─────────────────────────────────");
    for entry in &comparison.entries {
        let marker = if Some(entry.seek_count) == minimum {
            "  ◀ minimum"
        } else {
            ""
        };
        println!(
            "  {:<12} {:>15}{}",
            entry.algorithm.name(),
            entry.seek_count,
            marker
        );
    }
    println!("  ─────────────────────────────────");
}
