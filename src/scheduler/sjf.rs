//! Shortest Job First (non-preemptive).

use super::nonpreemptive::run_to_completion;
use super::Scheduler;
use crate::models::{Process, Schedule};

/// Shortest Job First.
///
/// At each decision point picks the arrived process with the smallest
/// burst. Ties go to the earlier arrival, then the lower pid:
/// the ready set is ordered by `(burst, arrival, pid)` ascending.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine
/// when all jobs are released together.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Scheduler for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn schedule(&self, processes: &[Process]) -> Schedule {
        run_to_completion(processes, |p| (p.burst, p.arrival, p.pid))
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}
