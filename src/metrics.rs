//! Schedule performance metrics.
//!
//! Derives per-process and aggregate statistics from a finished schedule
//! and its input processes.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | Latest end of a process's intervals |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first start - arrival |
//! | CPU Utilization | 100 × busy / (last completion - earliest arrival) |
//! | Throughput | processes / (last completion - earliest arrival) |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Pid, Process, Schedule};

/// Aggregate statistics over all scheduled processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time (first dispatch minus arrival).
    pub avg_response_time: f64,
    /// Percentage of the observed window the CPU was busy (0.0..=100.0).
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Last completion time.
    pub makespan: i64,
    /// Sum of all interval durations.
    pub busy_time: i64,
}

/// Statistics for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival: i64,
    pub burst: i64,
    pub completion: i64,
    pub turnaround: i64,
    pub waiting: i64,
    pub response: i64,
}

/// Metrics for a whole schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    pub summary: SummaryMetrics,
    /// One row per scheduled process, ordered by ascending pid.
    pub per_process: Vec<ProcessMetrics>,
}

#[derive(Default)]
struct Accumulator {
    busy: i64,
    first_start: i64,
    completion: i64,
}

impl ScheduleMetrics {
    /// Computes metrics from a schedule and its input processes.
    ///
    /// Returns `None` when there is nothing to measure (empty schedule).
    /// Intervals whose pid is not in `processes` are skipped.
    pub fn calculate(schedule: &Schedule, processes: &[Process]) -> Option<Self> {
        if schedule.is_empty() {
            return None;
        }

        let by_pid: BTreeMap<Pid, &Process> = processes.iter().map(|p| (p.pid, p)).collect();
        let mut acc: BTreeMap<Pid, Accumulator> = BTreeMap::new();

        for interval in schedule {
            if !by_pid.contains_key(&interval.pid) {
                warn!(pid = interval.pid, "interval for unknown process ignored");
                continue;
            }
            let entry = acc.entry(interval.pid).or_insert_with(|| Accumulator {
                first_start: interval.start,
                ..Default::default()
            });
            entry.busy += interval.duration();
            entry.first_start = entry.first_start.min(interval.start);
            entry.completion = entry.completion.max(interval.end);
        }

        if acc.is_empty() {
            return None;
        }

        // BTreeMap iteration gives ascending pid order.
        let per_process: Vec<ProcessMetrics> = acc
            .iter()
            .map(|(&pid, a)| {
                let p = by_pid[&pid];
                let turnaround = a.completion - p.arrival;
                ProcessMetrics {
                    pid,
                    arrival: p.arrival,
                    burst: p.burst,
                    completion: a.completion,
                    turnaround,
                    waiting: turnaround - p.burst,
                    response: a.first_start - p.arrival,
                }
            })
            .collect();

        let count = per_process.len() as f64;
        let mean = |f: fn(&ProcessMetrics) -> i64| {
            per_process.iter().map(|m| f(m) as f64).sum::<f64>() / count
        };

        let busy_time: i64 = acc.values().map(|a| a.busy).sum();
        let makespan = acc.values().map(|a| a.completion).max().unwrap_or(0);
        let earliest_arrival = processes.iter().map(|p| p.arrival).min().unwrap_or(0);
        let window = makespan - earliest_arrival;

        let (cpu_utilization, throughput) = if window > 0 {
            (
                100.0 * busy_time as f64 / window as f64,
                count / window as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let summary = SummaryMetrics {
            avg_waiting_time: mean(|m| m.waiting),
            avg_turnaround_time: mean(|m| m.turnaround),
            avg_response_time: mean(|m| m.response),
            cpu_utilization,
            throughput,
            makespan,
            busy_time,
        };

        Some(Self {
            summary,
            per_process,
        })
    }

    /// Row for a given process.
    pub fn for_pid(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.pid == pid)
    }
}

/// Shorthand for [`ScheduleMetrics::calculate`].
pub fn calculate(schedule: &Schedule, processes: &[Process]) -> Option<ScheduleMetrics> {
    ScheduleMetrics::calculate(schedule, processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionInterval;

    fn schedule_of(intervals: &[(Pid, i64, i64)]) -> Schedule {
        Schedule::from_intervals(intervals.iter().copied().map(ExecutionInterval::from).collect())
    }

    #[test]
    fn test_metrics_basic() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let schedule = schedule_of(&[(1, 0, 5), (2, 5, 8)]);

        let m = calculate(&schedule, &processes).unwrap();
        assert!((m.summary.avg_waiting_time - 2.0).abs() < 1e-10); // (0 + 4) / 2
        assert!((m.summary.avg_turnaround_time - 6.0).abs() < 1e-10); // (5 + 7) / 2
        assert!((m.summary.cpu_utilization - 100.0).abs() < 1e-10);
        assert!((m.summary.throughput - 0.25).abs() < 1e-10); // 2 / 8
        assert_eq!(m.summary.makespan, 8);
        assert_eq!(m.summary.busy_time, 8);

        let p2 = m.for_pid(2).unwrap();
        assert_eq!(p2.completion, 8);
        assert_eq!(p2.turnaround, 7);
        assert_eq!(p2.waiting, 4);
        assert_eq!(p2.response, 4);
    }

    #[test]
    fn test_metrics_preempted_process() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let schedule = schedule_of(&[(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7), (1, 7, 8)]);

        let m = calculate(&schedule, &processes).unwrap();
        let p1 = m.for_pid(1).unwrap();
        assert_eq!(p1.completion, 8);
        assert_eq!(p1.waiting, 3);
        assert_eq!(p1.response, 0);
        let p2 = m.for_pid(2).unwrap();
        assert_eq!(p2.completion, 7);
        assert_eq!(p2.waiting, 3); // 7 - 1 - 3
        assert_eq!(p2.response, 1);
    }

    #[test]
    fn test_metrics_idle_time_lowers_utilization() {
        let processes = vec![Process::new(1, 0, 2), Process::new(2, 6, 2)];
        let schedule = schedule_of(&[(1, 0, 2), (2, 6, 8)]);

        let m = calculate(&schedule, &processes).unwrap();
        assert!((m.summary.cpu_utilization - 50.0).abs() < 1e-10); // 4 / 8
    }

    #[test]
    fn test_metrics_window_starts_at_earliest_arrival() {
        let processes = vec![Process::new(1, 10, 4)];
        let schedule = schedule_of(&[(1, 10, 14)]);

        let m = calculate(&schedule, &processes).unwrap();
        assert!((m.summary.cpu_utilization - 100.0).abs() < 1e-10);
        assert!((m.summary.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_zero_window() {
        // Degenerate zero-length run: denominators are zero, ratios are 0.
        let processes = vec![Process::new(1, 3, 0)];
        let schedule = schedule_of(&[(1, 3, 3)]);

        let m = calculate(&schedule, &processes).unwrap();
        assert_eq!(m.summary.cpu_utilization, 0.0);
        assert_eq!(m.summary.throughput, 0.0);
    }

    #[test]
    fn test_metrics_rows_sorted_by_pid() {
        let processes = vec![
            Process::new(7, 0, 1),
            Process::new(2, 0, 1),
            Process::new(5, 0, 1),
        ];
        let schedule = schedule_of(&[(7, 0, 1), (2, 1, 2), (5, 2, 3)]);

        let m = calculate(&schedule, &processes).unwrap();
        let pids: Vec<Pid> = m.per_process.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![2, 5, 7]);
    }

    #[test]
    fn test_metrics_empty_schedule() {
        assert!(calculate(&Schedule::new(), &[Process::new(1, 0, 1)]).is_none());
        assert!(calculate(&Schedule::new(), &[]).is_none());
    }

    #[test]
    fn test_metrics_skip_unknown_pid() {
        let processes = vec![Process::new(1, 0, 2)];
        let schedule = schedule_of(&[(1, 0, 2), (9, 2, 4)]);

        let m = calculate(&schedule, &processes).unwrap();
        assert_eq!(m.per_process.len(), 1);
        assert_eq!(m.summary.busy_time, 2);

        let only_unknown = schedule_of(&[(9, 0, 1)]);
        assert!(calculate(&only_unknown, &processes).is_none());
    }

    #[test]
    fn test_metrics_serialize() {
        let processes = vec![Process::new(1, 0, 2)];
        let m = calculate(&schedule_of(&[(1, 0, 2)]), &processes).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["per_process"][0]["pid"], 1);
        assert_eq!(json["summary"]["makespan"], 2);
    }
}
