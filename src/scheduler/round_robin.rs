//! Round Robin with a fixed quantum.

use std::collections::VecDeque;

use tracing::trace;

use super::{Scheduler, SimulationContext};
use crate::models::{merge_adjacent, Process, Schedule};

/// Quantum used when the caller supplies none.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Round Robin.
///
/// FIFO ready queue; each turn runs the head for `min(quantum, remaining)`.
/// Processes that arrive while a slice runs (up to and including its end)
/// join the queue ahead of the preempted process.
///
/// Back-to-back slices of a lone process are merged into one interval.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: i64,
}

impl RoundRobin {
    /// Creates a Round Robin scheduler. Returns `None` if `quantum <= 0`.
    pub fn new(quantum: i64) -> Option<Self> {
        (quantum > 0).then_some(Self { quantum })
    }

    /// The time slice.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn schedule(&self, processes: &[Process]) -> Schedule {
        let mut ctx = SimulationContext::new(processes);
        let mut remaining: Vec<i64> = ctx.processes().iter().map(|p| p.burst).collect();
        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut slices = Vec::new();

        loop {
            queue.extend(ctx.admit_arrived());

            let Some(idx) = queue.pop_front() else {
                if ctx.jump_to_next_arrival() {
                    continue;
                }
                break;
            };

            let slice = self.quantum.min(remaining[idx]);
            let pid = ctx.processes()[idx].pid;
            trace!(pid, clock = ctx.clock(), slice, queued = queue.len(), "rr slice");
            slices.push(ctx.run(pid, slice));
            remaining[idx] -= slice;

            if remaining[idx] > 0 {
                queue.extend(ctx.admit_arrived());
                queue.push_back(idx);
            }
        }

        Schedule::from_intervals(merge_adjacent(slices))
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pid;

    fn intervals(s: &Schedule) -> Vec<(Pid, i64, i64)> {
        s.iter().map(|i| (i.pid, i.start, i.end)).collect()
    }

    fn rr(quantum: i64) -> RoundRobin {
        RoundRobin::new(quantum).unwrap()
    }

    #[test]
    fn test_rr_two_processes() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let s = rr(2).schedule(&processes);
        assert_eq!(
            intervals(&s),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7), (1, 7, 8)]
        );
    }

    #[test]
    fn test_rr_new_arrival_goes_before_preempted() {
        // P2 arrives exactly when P1's first slice ends; it must run next.
        let processes = vec![Process::new(1, 0, 4), Process::new(2, 2, 2)];
        let s = rr(2).schedule(&processes);
        assert_eq!(intervals(&s), vec![(1, 0, 2), (2, 2, 4), (1, 4, 6)]);
    }

    #[test]
    fn test_rr_queue_order_three_processes() {
        let processes = vec![
            Process::new(1, 0, 3),
            Process::new(2, 0, 3),
            Process::new(3, 1, 1),
        ];
        let s = rr(1).schedule(&processes);
        // t=0 queue [1,2]; P1 runs, P3 arrives at 1 and queues ahead of P1.
        assert_eq!(s.pids(), vec![1, 2, 3]);
        assert_eq!(
            intervals(&s),
            vec![
                (1, 0, 1),
                (2, 1, 2),
                (3, 2, 3),
                (1, 3, 4),
                (2, 4, 5),
                (1, 5, 6),
                (2, 6, 7),
            ]
        );
    }

    #[test]
    fn test_rr_lone_process_is_merged() {
        let s = rr(2).schedule(&[Process::new(1, 0, 5)]);
        assert_eq!(intervals(&s), vec![(1, 0, 5)]);
    }

    #[test]
    fn test_rr_idle_jump() {
        let processes = vec![Process::new(1, 0, 1), Process::new(2, 4, 3)];
        let s = rr(2).schedule(&processes);
        assert_eq!(intervals(&s), vec![(1, 0, 1), (2, 4, 7)]);
    }

    #[test]
    fn test_rr_large_quantum_is_fcfs() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let s = rr(100).schedule(&processes);
        assert_eq!(intervals(&s), vec![(1, 0, 5), (2, 5, 8)]);
    }

    #[test]
    fn test_rr_rejects_non_positive_quantum() {
        assert!(RoundRobin::new(0).is_none());
        assert!(RoundRobin::new(-3).is_none());
        assert_eq!(RoundRobin::default().quantum(), DEFAULT_QUANTUM);
    }

    #[test]
    fn test_rr_empty() {
        assert!(rr(2).schedule(&[]).is_empty());
    }
}
