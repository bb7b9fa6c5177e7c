//! Process model.
//!
//! A process is the unit of work handed to the simulated CPU. Its attributes
//! are fixed for the whole simulation run: no re-arrival, no aging.
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Process identifier.
pub type Pid = u32;

/// A process to be scheduled on the simulated CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub pid: Pid,
    /// Time at which the process becomes eligible to run.
    pub arrival: i64,
    /// Total CPU time required.
    pub burst: i64,
    /// Scheduling priority (lower = more urgent). Only read by the Priority policy.
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(pid: Pid, arrival: i64, burst: i64) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.arrival <= time
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{} (arrival {}, burst {}, priority {})",
            self.pid, self.arrival, self.burst, self.priority
        )
    }
}

/// Parses a `pid,arrival,burst[,priority]` row.
///
/// Fields may be separated by commas or whitespace. Only the field syntax
/// is checked here; value ranges are checked by
/// [`validate_processes`](crate::validation::validate_processes).
impl FromStr for Process {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        if !(3..=4).contains(&fields.len()) {
            return Err(Error::InvalidProcess(format!(
                "expected pid,arrival,burst[,priority], got '{s}'"
            )));
        }

        let pid = parse_field::<Pid>(fields[0], "pid", s)?;
        let arrival = parse_field::<i64>(fields[1], "arrival", s)?;
        let burst = parse_field::<i64>(fields[2], "burst", s)?;
        let priority = match fields.get(3) {
            Some(raw) => parse_field::<i32>(raw, "priority", s)?,
            None => 0,
        };

        Ok(Process::new(pid, arrival, burst).with_priority(priority))
    }
}

fn parse_field<T: FromStr>(raw: &str, name: &str, row: &str) -> Result<T, Error> {
    raw.parse::<T>().map_err(|_| {
        Error::InvalidProcess(format!("{name} '{raw}' is not a valid number in '{row}'"))
    })
}
