//! Schedule (solution) model.
//!
//! A schedule is the ordered sequence of execution intervals the simulated
//! CPU ran. Intervals only record busy time; idle gaps are implicit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Pid;

/// A complete schedule produced by one policy run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Execution intervals, ordered by start time.
    pub intervals: Vec<ExecutionInterval>,
}

/// One contiguous stretch of CPU time given to a process.
///
/// Covers the half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInterval {
    /// Process that held the CPU.
    pub pid: Pid,
    /// Start time.
    pub start: i64,
    /// End time.
    pub end: i64,
}

impl ExecutionInterval {
    /// Creates a new interval.
    pub fn new(pid: Pid, start: i64, end: i64) -> Self {
        Self { pid, start, end }
    }

    /// Interval length (end - start).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether `next` continues this interval for the same process.
    #[inline]
    pub fn touches(&self, next: &ExecutionInterval) -> bool {
        self.pid == next.pid && self.end == next.start
    }

    /// Whether the two `[start, end)` ranges share any time.
    #[inline]
    pub fn overlaps(&self, other: &ExecutionInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<(Pid, i64, i64)> for ExecutionInterval {
    fn from((pid, start, end): (Pid, i64, i64)) -> Self {
        Self::new(pid, start, end)
    }
}

/// Merges consecutive intervals of the same process that touch.
///
/// Two intervals merge only when they are neighbours in the sequence,
/// share a pid and the first ends exactly where the second starts.
/// Zero-length intervals are dropped.
pub fn merge_adjacent(raw: Vec<ExecutionInterval>) -> Vec<ExecutionInterval> {
    let mut merged: Vec<ExecutionInterval> = Vec::with_capacity(raw.len());
    for interval in raw {
        if interval.duration() == 0 {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.touches(&interval) => last.end = interval.end,
            _ => merged.push(interval),
        }
    }
    merged
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from already ordered intervals.
    pub fn from_intervals(intervals: Vec<ExecutionInterval>) -> Self {
        Self { intervals }
    }

    /// Appends an interval.
    pub fn push(&mut self, interval: ExecutionInterval) {
        self.intervals.push(interval);
    }

    /// Whether the schedule has no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Iterates over the intervals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionInterval> {
        self.intervals.iter()
    }

    /// Makespan: latest end time across all intervals.
    pub fn makespan(&self) -> i64 {
        self.intervals.iter().map(|i| i.end).max().unwrap_or(0)
    }

    /// Total busy time (sum of interval durations).
    pub fn busy_time(&self) -> i64 {
        self.intervals.iter().map(|i| i.duration()).sum()
    }

    /// Returns all intervals for a given process.
    pub fn intervals_for(&self, pid: Pid) -> Vec<&ExecutionInterval> {
        self.intervals.iter().filter(|i| i.pid == pid).collect()
    }

    /// Completion time for a process (latest end of its intervals).
    pub fn completion_time(&self, pid: Pid) -> Option<i64> {
        self.intervals
            .iter()
            .filter(|i| i.pid == pid)
            .map(|i| i.end)
            .max()
    }

    /// Busy time per process, keyed by pid.
    pub fn busy_time_by_pid(&self) -> BTreeMap<Pid, i64> {
        let mut busy = BTreeMap::new();
        for i in &self.intervals {
            *busy.entry(i.pid).or_insert(0) += i.duration();
        }
        busy
    }

    /// Distinct pids in first-run order.
    pub fn pids(&self) -> Vec<Pid> {
        let mut seen = Vec::new();
        for i in &self.intervals {
            if !seen.contains(&i.pid) {
                seen.push(i.pid);
            }
        }
        seen
    }

    /// Number of times the CPU switched from one process to another.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|w| w[0].pid != w[1].pid)
            .count()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ExecutionInterval;
    type IntoIter = std::slice::Iter<'a, ExecutionInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
