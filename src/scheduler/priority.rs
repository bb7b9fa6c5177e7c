//! Non-preemptive priority scheduling.

use super::nonpreemptive::run_to_completion;
use super::Scheduler;
use crate::models::{Process, Schedule};

/// Priority scheduling (non-preemptive).
///
/// Lower `priority` value = more urgent. Ready set ordered by
/// `(priority, arrival, pid)` ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn schedule(&self, processes: &[Process]) -> Schedule {
        run_to_completion(processes, |p| (p.priority, p.arrival, p.pid))
    }

    fn description(&self) -> &'static str {
        "Non-preemptive Priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pid;

    fn intervals(s: &Schedule) -> Vec<(Pid, i64, i64)> {
        s.iter().map(|i| (i.pid, i.start, i.end)).collect()
    }

    #[test]
    fn test_priority_equal_arrival() {
        let processes = vec![
            Process::new(1, 0, 4).with_priority(3),
            Process::new(2, 0, 2).with_priority(1),
            Process::new(3, 0, 3).with_priority(2),
        ];
        let s = PriorityScheduler.schedule(&processes);
        assert_eq!(intervals(&s), vec![(2, 0, 2), (3, 2, 5), (1, 5, 9)]);
    }

    #[test]
    fn test_priority_is_non_preemptive() {
        // P2 is more urgent but arrives while P1 runs.
        let processes = vec![
            Process::new(1, 0, 5).with_priority(5),
            Process::new(2, 1, 2).with_priority(0),
        ];
        let s = PriorityScheduler.schedule(&processes);
        assert_eq!(intervals(&s), vec![(1, 0, 5), (2, 5, 7)]);
    }

    #[test]
    fn test_priority_ties_by_arrival_then_pid() {
        let processes = vec![
            Process::new(1, 0, 3).with_priority(0),
            Process::new(5, 1, 1).with_priority(1),
            Process::new(4, 2, 1).with_priority(1),
            Process::new(2, 2, 1).with_priority(1),
        ];
        let s = PriorityScheduler.schedule(&processes);
        assert_eq!(s.pids(), vec![1, 5, 2, 4]);
    }

    #[test]
    fn test_priority_idle_jump() {
        let processes = vec![Process::new(1, 5, 1).with_priority(9)];
        let s = PriorityScheduler.schedule(&processes);
        assert_eq!(intervals(&s), vec![(1, 5, 6)]);
    }
}
