//! Per-run simulation state.

use std::ops::Range;

use crate::models::{ExecutionInterval, Pid, Process};

/// Working state of one simulation run.
///
/// Owns a private copy of the process set, stably sorted by arrival, plus
/// the virtual clock and an admission cursor. Created fresh for every
/// algorithm invocation and dropped on return, so concurrent runs never
/// share state.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    arrivals: Vec<Process>,
    next_arrival: usize,
    clock: i64,
}

impl SimulationContext {
    /// Creates a context at t=0 over a copy of `processes`.
    ///
    /// Processes with equal arrival keep their input order.
    pub fn new(processes: &[Process]) -> Self {
        let mut arrivals = processes.to_vec();
        arrivals.sort_by_key(|p| p.arrival);
        Self {
            arrivals,
            next_arrival: 0,
            clock: 0,
        }
    }

    /// Current simulation time.
    #[inline]
    pub fn clock(&self) -> i64 {
        self.clock
    }

    /// Processes in arrival order. Indices returned by
    /// [`admit_arrived`](Self::admit_arrived) point into this slice.
    #[inline]
    pub fn processes(&self) -> &[Process] {
        &self.arrivals
    }

    /// Admits every process that has arrived by the current clock.
    ///
    /// Returns the indices of the newly admitted processes, in arrival order.
    pub fn admit_arrived(&mut self) -> Range<usize> {
        let first = self.next_arrival;
        while self
            .arrivals
            .get(self.next_arrival)
            .is_some_and(|p| p.has_arrived(self.clock))
        {
            self.next_arrival += 1;
        }
        first..self.next_arrival
    }

    /// Arrival time of the earliest process not yet admitted.
    pub fn next_arrival_time(&self) -> Option<i64> {
        self.arrivals.get(self.next_arrival).map(|p| p.arrival)
    }

    /// Whether every process has been admitted.
    pub fn all_admitted(&self) -> bool {
        self.next_arrival >= self.arrivals.len()
    }

    /// Moves the clock forward to the next pending arrival.
    ///
    /// Returns `false` when no process is left to arrive.
    pub fn jump_to_next_arrival(&mut self) -> bool {
        match self.next_arrival_time() {
            Some(t) => {
                self.clock = self.clock.max(t);
                true
            }
            None => false,
        }
    }

    /// Runs `pid` for `duration` from the current clock and advances it.
    pub fn run(&mut self, pid: Pid, duration: i64) -> ExecutionInterval {
        let start = self.clock;
        self.clock += duration;
        ExecutionInterval::new(pid, start, self.clock)
    }
}
