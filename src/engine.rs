//! Simulation entry points.
//!
//! [`run`] is the single operation collaborators need: pick a policy by
//! name, schedule the processes, measure the result. Anything that cannot
//! produce a schedule (unknown policy, empty workload, unusable quantum)
//! comes back as [`RunOutcome::NoSchedule`] instead of an error, so a UI can
//! treat it as a no-op.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::metrics::ScheduleMetrics;
use crate::models::{ExecutionInterval, Process, Schedule};
use crate::scheduler::{Policy, DEFAULT_QUANTUM};
use crate::validation::{validate_processes, ValidationError};

/// A successful simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub policy: Policy,
    /// Quantum actually used (Round Robin only).
    pub quantum: Option<i64>,
    pub schedule: Schedule,
    pub metrics: ScheduleMetrics,
}

/// Why no schedule was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoScheduleReason {
    /// The process set was empty.
    EmptyWorkload,
    /// The policy name is not one of the known policies.
    UnknownPolicy(String),
    /// Round Robin was given a quantum that is not positive.
    InvalidQuantum(i64),
    /// The process set failed validation.
    InvalidInput(Vec<ValidationError>),
    /// The policy ran but emitted no measurable interval.
    EmptySchedule,
}

impl fmt::Display for NoScheduleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorkload => f.write_str("no processes to schedule"),
            Self::UnknownPolicy(name) => write!(f, "unknown scheduling policy '{name}'"),
            Self::InvalidQuantum(q) => write!(f, "time quantum must be positive, got {q}"),
            Self::InvalidInput(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "invalid input: {}", messages.join("; "))
            }
            Self::EmptySchedule => f.write_str("policy produced an empty schedule"),
        }
    }
}

/// Result of one simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    Scheduled(SimulationRun),
    NoSchedule(NoScheduleReason),
}

impl RunOutcome {
    /// The schedule; empty when none was produced.
    pub fn schedule(&self) -> &[ExecutionInterval] {
        match self {
            Self::Scheduled(run) => &run.schedule.intervals,
            Self::NoSchedule(_) => &[],
        }
    }

    /// The metrics; `None` when no schedule was produced.
    pub fn metrics(&self) -> Option<&ScheduleMetrics> {
        match self {
            Self::Scheduled(run) => Some(&run.metrics),
            Self::NoSchedule(_) => None,
        }
    }

    /// The policy that ran, if any.
    pub fn policy(&self) -> Option<Policy> {
        match self {
            Self::Scheduled(run) => Some(run.policy),
            Self::NoSchedule(_) => None,
        }
    }

    /// Whether a schedule was produced.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled(_))
    }

    /// The run, if one was produced.
    pub fn into_run(self) -> Option<SimulationRun> {
        match self {
            Self::Scheduled(run) => Some(run),
            Self::NoSchedule(_) => None,
        }
    }
}

/// Runs the policy named `policy_name` over `processes`.
///
/// `quantum` is only consulted for "Round Robin"; when absent,
/// [`DEFAULT_QUANTUM`] is used. A process set that fails
/// [`validate_processes`] yields [`NoScheduleReason::InvalidInput`] and no
/// algorithm runs; see [`run_checked`] for an error-returning variant.
pub fn run(policy_name: &str, processes: &[Process], quantum: Option<i64>) -> RunOutcome {
    if processes.is_empty() {
        return RunOutcome::NoSchedule(NoScheduleReason::EmptyWorkload);
    }
    match Policy::from_name(policy_name) {
        Some(policy) => run_policy(policy, processes, quantum),
        None => {
            warn!(policy = policy_name, "unknown scheduling policy");
            RunOutcome::NoSchedule(NoScheduleReason::UnknownPolicy(policy_name.to_string()))
        }
    }
}

/// Runs a known policy over `processes`, validating them first.
pub fn run_policy(policy: Policy, processes: &[Process], quantum: Option<i64>) -> RunOutcome {
    if processes.is_empty() {
        return RunOutcome::NoSchedule(NoScheduleReason::EmptyWorkload);
    }
    if let Err(errors) = validate_processes(processes) {
        warn!(policy = %policy, errors = errors.len(), "invalid process set");
        return RunOutcome::NoSchedule(NoScheduleReason::InvalidInput(errors));
    }

    let quantum = policy.uses_quantum().then(|| {
        quantum.unwrap_or_else(|| {
            debug!(default = DEFAULT_QUANTUM, "no quantum given, using default");
            DEFAULT_QUANTUM
        })
    });

    let Some(scheduler) = policy.scheduler(quantum.unwrap_or(DEFAULT_QUANTUM)) else {
        let q = quantum.unwrap_or_default();
        warn!(policy = %policy, quantum = q, "unusable quantum");
        return RunOutcome::NoSchedule(NoScheduleReason::InvalidQuantum(q));
    };

    let schedule = scheduler.schedule(processes);
    debug!(
        policy = %policy,
        processes = processes.len(),
        intervals = schedule.len(),
        makespan = schedule.makespan(),
        "schedule computed"
    );

    match ScheduleMetrics::calculate(&schedule, processes) {
        Some(metrics) => RunOutcome::Scheduled(SimulationRun {
            policy,
            quantum,
            schedule,
            metrics,
        }),
        None => RunOutcome::NoSchedule(NoScheduleReason::EmptySchedule),
    }
}

/// Validates `processes`, then runs as [`run`].
///
/// # Errors
/// [`Error::InvalidInput`] listing every malformed process.
pub fn run_checked(
    policy_name: &str,
    processes: &[Process],
    quantum: Option<i64>,
) -> Result<RunOutcome> {
    validate_processes(processes).map_err(Error::InvalidInput)?;
    Ok(run(policy_name, processes, quantum))
}

/// Runs every policy over the same workload, in parallel.
///
/// Results come back in [`Policy::ALL`] order.
pub fn compare(processes: &[Process], quantum: Option<i64>) -> Vec<(Policy, RunOutcome)> {
    Policy::ALL
        .par_iter()
        .map(|&policy| (policy, run_policy(policy, processes, quantum)))
        .collect()
}
