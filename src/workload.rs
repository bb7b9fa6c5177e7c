//! Random workload generation.
//!
//! Produces reproducible process sets for comparing policies and for
//! randomized checks. The same seed always yields the same processes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::{Pid, Process};

/// Seeded random process-set generator.
///
/// # Example
/// ```
/// use cpu_schedule::workload::WorkloadGenerator;
///
/// let processes = WorkloadGenerator::new(5).with_seed(42).generate();
/// assert_eq!(processes.len(), 5);
/// assert_eq!(processes, WorkloadGenerator::new(5).with_seed(42).generate());
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    count: usize,
    seed: u64,
    max_arrival: i64,
    min_burst: i64,
    max_burst: i64,
    min_priority: i32,
    max_priority: i32,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with pids `1..=count`.
    ///
    /// `count` is capped at [`Pid::MAX`], the number of distinct pids.
    pub fn new(count: usize) -> Self {
        Self {
            count: count.min(Pid::MAX as usize),
            seed: 0,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            min_priority: 0,
            max_priority: 5,
        }
    }

    /// Number of processes [`generate`](Self::generate) produces.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Arrivals are drawn uniformly from `0..=max_arrival`.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Bursts are drawn uniformly from `min..=max` (clamped to at least 1).
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.min_burst = min.max(1);
        self.max_burst = max.max(self.min_burst);
        self
    }

    /// Priorities are drawn uniformly from `min..=max`.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.min_priority = min;
        self.max_priority = max.max(min);
        self
    }

    /// Generates the process set, in pid order.
    pub fn generate(&self) -> Vec<Process> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let last = Pid::try_from(self.count).unwrap_or(Pid::MAX);
        (1..=last)
            .map(|pid| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let burst = rng.random_range(self.min_burst..=self.max_burst);
                let priority = rng.random_range(self.min_priority..=self.max_priority);
                Process::new(pid, arrival, burst).with_priority(priority)
            })
            .collect()
    }
}
