//! Input validation and schedule auditing.
//!
//! Two checks live here:
//! - [`validate_processes`] guards the boundary: every process set must pass
//!   it before any algorithm runs.
//! - [`audit_schedule`] inspects a finished schedule for invariant
//!   violations. A correct policy never produces one, so any violation
//!   points at a scheduling bug.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Pid, Process, Schedule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two processes share the same pid.
    DuplicatePid,
    /// Arrival time is negative.
    NegativeArrival,
    /// Burst time is zero or negative.
    NonPositiveBurst,
    /// The latest possible completion time does not fit in an `i64`.
    TimeOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set before scheduling.
///
/// Checks:
/// 1. No duplicate pids
/// 2. `arrival >= 0`
/// 3. `burst > 0`
/// 4. latest arrival plus total burst fits in an `i64`, so no policy can
///    overflow the clock
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for p in processes {
        if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }
        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process {} has negative arrival time {}", p.pid, p.arrival),
            ));
        }
        if p.burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {} has non-positive burst time {}", p.pid, p.burst),
            ));
        }
    }

    let horizon = processes
        .iter()
        .try_fold(0i64, |total, p| total.checked_add(p.burst.max(0)))
        .and_then(|total| {
            let latest = processes.iter().map(|p| p.arrival.max(0)).max().unwrap_or(0);
            latest.checked_add(total)
        });
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time exceeds the time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An invariant violation found in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Process the violation concerns.
    pub pid: Pid,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Intervals of two different processes share CPU time.
    Overlap,
    /// Total run time of a process differs from its burst.
    BurstMismatch,
    /// Two neighbouring intervals of one process touch and were not merged.
    UnmergedAdjacent,
    /// Completion minus arrival is shorter than the burst.
    NegativeWaiting,
    /// Interval starts are not in non-decreasing order.
    UnorderedStart,
    /// An interval ends before it starts.
    InvertedInterval,
    /// Process ran before its arrival.
    EarlyStart,
    /// Interval refers to a pid missing from the process set.
    UnknownProcess,
}

impl Violation {
    fn new(violation_type: ViolationType, pid: Pid, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            pid,
            message: message.into(),
        }
    }
}

/// Audits a schedule against its process set.
///
/// Returns every violation found; an empty list means the schedule is
/// well formed: ordered, non-overlapping, merged, and covering each
/// process's burst exactly with non-negative waiting time.
pub fn audit_schedule(schedule: &Schedule, processes: &[Process]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let by_pid: BTreeMap<Pid, &Process> = processes.iter().map(|p| (p.pid, p)).collect();

    for interval in schedule {
        if interval.end < interval.start {
            violations.push(Violation::new(
                ViolationType::InvertedInterval,
                interval.pid,
                format!(
                    "Interval [{}, {}) of P{} ends before it starts",
                    interval.start, interval.end, interval.pid
                ),
            ));
        }
        match by_pid.get(&interval.pid) {
            None => violations.push(Violation::new(
                ViolationType::UnknownProcess,
                interval.pid,
                format!("P{} is not part of the process set", interval.pid),
            )),
            Some(p) if interval.start < p.arrival => violations.push(Violation::new(
                ViolationType::EarlyStart,
                interval.pid,
                format!(
                    "P{} runs at {} before arriving at {}",
                    p.pid, interval.start, p.arrival
                ),
            )),
            Some(_) => {}
        }
    }

    for w in schedule.intervals.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        if b.start < a.start {
            violations.push(Violation::new(
                ViolationType::UnorderedStart,
                b.pid,
                format!("Interval of P{} at {} precedes {}", b.pid, b.start, a.start),
            ));
        }
        if a.touches(b) {
            violations.push(Violation::new(
                ViolationType::UnmergedAdjacent,
                a.pid,
                format!("P{} has unmerged intervals meeting at {}", a.pid, a.end),
            ));
        }
    }

    for (i, a) in schedule.intervals.iter().enumerate() {
        for b in &schedule.intervals[i + 1..] {
            if a.pid != b.pid && a.overlaps(b) {
                violations.push(Violation::new(
                    ViolationType::Overlap,
                    a.pid,
                    format!(
                        "P{} [{}, {}) overlaps P{} [{}, {})",
                        a.pid, a.start, a.end, b.pid, b.start, b.end
                    ),
                ));
            }
        }
    }

    let busy = schedule.busy_time_by_pid();
    for p in processes {
        let ran = busy.get(&p.pid).copied().unwrap_or(0);
        if ran != p.burst {
            violations.push(Violation::new(
                ViolationType::BurstMismatch,
                p.pid,
                format!("P{} ran for {} but needs {}", p.pid, ran, p.burst),
            ));
        }
        if let Some(completion) = schedule.completion_time(p.pid) {
            if completion - p.arrival < p.burst {
                violations.push(Violation::new(
                    ViolationType::NegativeWaiting,
                    p.pid,
                    format!(
                        "P{} completes at {} which implies negative waiting",
                        p.pid, completion
                    ),
                ));
            }
        }
    }

    violations
}
