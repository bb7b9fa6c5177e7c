//! First-Come-First-Served.

use tracing::trace;

use super::Scheduler;
use crate::models::{ExecutionInterval, Process, Schedule};

/// First-Come-First-Served.
///
/// Non-preemptive. Runs processes in arrival order; equal arrivals keep
/// their input order. O(n log n).
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn schedule(&self, processes: &[Process]) -> Schedule {
        let mut order: Vec<&Process> = processes.iter().collect();
        order.sort_by_key(|p| p.arrival);

        let mut schedule = Schedule::new();
        let mut clock = 0;
        for p in order {
            clock = clock.max(p.arrival);
            trace!(pid = p.pid, clock, "fcfs dispatch");
            schedule.push(ExecutionInterval::new(p.pid, clock, clock + p.burst));
            clock += p.burst;
        }
        schedule
    }

    fn description(&self) -> &'static str {
        "First-Come-First-Served"
    }
}
