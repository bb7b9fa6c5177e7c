//! Shared driver for key-ordered non-preemptive policies (SJF, Priority).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use super::SimulationContext;
use crate::models::{Process, Schedule};

/// Runs processes to completion, always picking the ready process with the
/// smallest `key`.
///
/// The key must be total over the process set (include the pid) so that
/// the choice never depends on heap insertion order. When nothing is
/// ready the clock jumps to the next arrival.
pub(crate) fn run_to_completion<K, F>(processes: &[Process], key: F) -> Schedule
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut ctx = SimulationContext::new(processes);
    let mut ready: BinaryHeap<Reverse<(K, usize)>> = BinaryHeap::new();
    let mut schedule = Schedule::new();

    loop {
        for idx in ctx.admit_arrived() {
            ready.push(Reverse((key(&ctx.processes()[idx]), idx)));
        }

        let Some(Reverse((_, idx))) = ready.pop() else {
            if ctx.jump_to_next_arrival() {
                continue;
            }
            break;
        };

        let (pid, burst) = {
            let p = &ctx.processes()[idx];
            (p.pid, p.burst)
        };
        trace!(pid, clock = ctx.clock(), ready = ready.len(), "dispatch");
        schedule.push(ctx.run(pid, burst));
    }

    schedule
}
