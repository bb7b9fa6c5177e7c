//! Shortest Remaining Time First (preemptive SJF).
//!
//! # Algorithm
//!
//! Runs in two stages:
//!
//! 1. [`emit_slices`]: at every decision point pick the arrived, unfinished
//!    process with the least remaining time and run it until it completes
//!    or the next arrival inside its remaining window, whichever is first.
//!    One raw interval is emitted per decision.
//! 2. [`merge_adjacent`]: fuse neighbouring slices of the same process.
//!
//! Keeping the stages apart lets each be checked on its own; the raw
//! slices are an artifact of when decisions happen, not part of the
//! observable schedule.

use tracing::trace;

use super::{Scheduler, SimulationContext};
use crate::models::{merge_adjacent, ExecutionInterval, Process, Schedule};

/// Shortest Remaining Time First.
///
/// Ties on remaining time go to the process that arrived first (stable
/// scan in arrival order).
#[derive(Debug, Clone, Copy, Default)]
pub struct Srtf;

impl Scheduler for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn schedule(&self, processes: &[Process]) -> Schedule {
        Schedule::from_intervals(merge_adjacent(emit_slices(processes)))
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Emits one interval per scheduling decision, without merging.
pub fn emit_slices(processes: &[Process]) -> Vec<ExecutionInterval> {
    let mut ctx = SimulationContext::new(processes);
    let mut remaining: Vec<i64> = ctx.processes().iter().map(|p| p.burst).collect();
    let mut ready: Vec<usize> = Vec::new();
    let mut slices = Vec::new();

    loop {
        ready.extend(ctx.admit_arrived());
        ready.retain(|&idx| remaining[idx] > 0);

        // min_by_key keeps the first minimum, and `ready` is in arrival order.
        let Some(idx) = ready.iter().copied().min_by_key(|&idx| remaining[idx]) else {
            if ctx.jump_to_next_arrival() {
                continue;
            }
            break;
        };

        let left = remaining[idx];
        // Every admitted process has arrival <= clock, so the next arrival
        // is strictly in the future.
        let run_for = match ctx.next_arrival_time() {
            Some(t) if t < ctx.clock() + left => t - ctx.clock(),
            _ => left,
        };

        let pid = ctx.processes()[idx].pid;
        trace!(pid, clock = ctx.clock(), run_for, left, "srtf decision");
        slices.push(ctx.run(pid, run_for));
        remaining[idx] -= run_for;
    }

    slices
}
