//! Scheduling policies.
//!
//! Five single-CPU policies, each a pure function from a process set to a
//! [`Schedule`]:
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | no | arrival order (stable) |
//! | SJF | no | `(burst, arrival, pid)` |
//! | SRTF | yes | least remaining time, earliest arrival on ties |
//! | Round Robin | yes | FIFO, fixed quantum |
//! | Priority | no | `(priority, arrival, pid)` |
//!
//! No policy keeps state between calls. Idle periods are skipped by jumping
//! the clock to the next arrival, so intervals only ever describe busy time.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod context;
mod fcfs;
mod nonpreemptive;
mod priority;
mod round_robin;
mod sjf;
pub mod srtf;

pub use context::SimulationContext;
pub use fcfs::Fcfs;
pub use priority::PriorityScheduler;
pub use round_robin::{RoundRobin, DEFAULT_QUANTUM};
pub use sjf::Sjf;
pub use srtf::Srtf;

use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Process, Schedule};

/// A single-CPU scheduling algorithm.
///
/// Implementations must not mutate the input and must not retain anything
/// between calls.
pub trait Scheduler: Send + Sync + Debug {
    /// Policy name as shown to users (e.g., "SJF", "Round Robin").
    fn name(&self) -> &'static str;

    /// Computes the schedule for `processes`. Empty input yields an empty schedule.
    fn schedule(&self, processes: &[Process]) -> Schedule;

    /// Whether a running process can be interrupted.
    fn is_preemptive(&self) -> bool {
        false
    }

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// The selectable scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Policy {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF")]
    Sjf,
    #[serde(rename = "SRTF")]
    Srtf,
    #[serde(rename = "Round Robin")]
    RoundRobin,
    #[serde(rename = "Priority")]
    Priority,
}

impl Policy {
    /// All policies, in display order.
    pub const ALL: [Policy; 5] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::RoundRobin,
        Policy::Priority,
    ];

    /// Canonical policy name.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Srtf => "SRTF",
            Policy::RoundRobin => "Round Robin",
            Policy::Priority => "Priority",
        }
    }

    /// Looks a policy up by its canonical name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Whether the policy reads the quantum.
    pub fn uses_quantum(&self) -> bool {
        matches!(self, Policy::RoundRobin)
    }

    /// Builds the scheduler for this policy.
    ///
    /// `quantum` is only read by Round Robin; returns `None` when it is not
    /// positive.
    pub fn scheduler(&self, quantum: i64) -> Option<Box<dyn Scheduler>> {
        Some(match self {
            Policy::Fcfs => Box::new(Fcfs),
            Policy::Sjf => Box::new(Sjf),
            Policy::Srtf => Box::new(Srtf),
            Policy::RoundRobin => Box::new(RoundRobin::new(quantum)?),
            Policy::Priority => Box::new(PriorityScheduler),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown scheduling policy '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ScheduleMetrics;
    use crate::validation::audit_schedule;
    use crate::workload::WorkloadGenerator;

    fn all_schedulers() -> Vec<Box<dyn Scheduler>> {
        Policy::ALL
            .iter()
            .map(|p| p.scheduler(DEFAULT_QUANTUM).unwrap())
            .collect()
    }

    #[test]
    fn test_policy_names_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(Policy::from_name(policy.name()), Some(policy));
            assert_eq!(policy.name().parse::<Policy>().unwrap(), policy);
        }
        assert_eq!(Policy::from_name("round robin"), None);
        assert!("LOTTERY".parse::<Policy>().is_err());
    }

    #[test]
    fn test_policy_serde_uses_display_names() {
        let json = serde_json::to_string(&Policy::RoundRobin).unwrap();
        assert_eq!(json, "\"Round Robin\"");
        let back: Policy = serde_json::from_str("\"SRTF\"").unwrap();
        assert_eq!(back, Policy::Srtf);
    }

    #[test]
    fn test_scheduler_names_match_policy() {
        for policy in Policy::ALL {
            let scheduler = policy.scheduler(3).unwrap();
            assert_eq!(scheduler.name(), policy.name());
        }
        assert!(Policy::RoundRobin.scheduler(0).is_none());
        assert!(Policy::Fcfs.scheduler(0).is_some());
    }

    #[test]
    fn test_preemptive_flags() {
        let preemptive: Vec<&str> = all_schedulers()
            .iter()
            .filter(|s| s.is_preemptive())
            .map(|s| s.name())
            .collect();
        assert_eq!(preemptive, vec!["SRTF", "Round Robin"]);
    }

    #[test]
    fn test_empty_input_every_policy() {
        for scheduler in all_schedulers() {
            assert!(scheduler.schedule(&[]).is_empty(), "{}", scheduler.name());
        }
    }

    #[test]
    fn test_random_workloads_are_well_formed() {
        for seed in 0..200 {
            let processes = WorkloadGenerator::new(8)
                .with_seed(seed)
                .with_max_arrival(15)
                .with_burst_range(1, 9)
                .generate();

            for quantum in [1, 2, 3, 5] {
                for policy in Policy::ALL {
                    let schedule = policy.scheduler(quantum).unwrap().schedule(&processes);
                    let violations = audit_schedule(&schedule, &processes);
                    assert!(
                        violations.is_empty(),
                        "{policy} q={quantum} seed={seed}: {violations:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_metrics_non_negative_on_random_workloads() {
        for seed in 0..100 {
            let processes = WorkloadGenerator::new(6).with_seed(seed).generate();
            for scheduler in all_schedulers() {
                let schedule = scheduler.schedule(&processes);
                let metrics = ScheduleMetrics::calculate(&schedule, &processes).unwrap();
                for row in &metrics.per_process {
                    assert!(row.waiting >= 0, "{} seed={seed}", scheduler.name());
                    assert!(row.turnaround >= row.burst);
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let processes = WorkloadGenerator::new(12).with_seed(7).generate();
        for scheduler in all_schedulers() {
            assert_eq!(
                scheduler.schedule(&processes),
                scheduler.schedule(&processes),
                "{}",
                scheduler.name()
            );
        }
    }

    #[test]
    fn test_input_order_does_not_change_key_ordered_policies() {
        let processes = WorkloadGenerator::new(10).with_seed(3).generate();
        let mut reversed = processes.clone();
        reversed.reverse();
        for scheduler in [&Sjf as &dyn Scheduler, &PriorityScheduler] {
            assert_eq!(
                scheduler.schedule(&processes),
                scheduler.schedule(&reversed),
                "{}",
                scheduler.name()
            );
        }
    }

    #[test]
    fn test_srtf_never_worse_than_sjf_on_average_waiting() {
        for seed in 0..50 {
            let processes = WorkloadGenerator::new(8).with_seed(seed).generate();
            let sjf = ScheduleMetrics::calculate(&Sjf.schedule(&processes), &processes).unwrap();
            let srtf = ScheduleMetrics::calculate(&Srtf.schedule(&processes), &processes).unwrap();
            assert!(
                srtf.summary.avg_waiting_time <= sjf.summary.avg_waiting_time + 1e-10,
                "seed={seed}"
            );
        }
    }
}
