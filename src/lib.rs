//! Single-CPU process scheduling simulator.
//!
//! Computes the execution timeline of a process set under a chosen policy
//! and derives the classic scheduling metrics from it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ExecutionInterval`, `Schedule`
//! - **`scheduler`**: FCFS, SJF, SRTF, Round Robin and Priority policies
//! - **`metrics`**: Waiting, turnaround, response, utilization, throughput
//! - **`engine`**: `run` by policy name, `compare` across all policies
//! - **`validation`**: Input checks and schedule invariant audits
//! - **`config`**: TOML/JSON simulation files
//! - **`workload`**: Seeded random process sets
//! - **`render`**: Text Gantt chart and metrics tables
//!
//! # Example
//!
//! ```
//! use cpu_schedule::{run, Process};
//!
//! let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
//! let outcome = run("FCFS", &processes, None);
//! assert_eq!(outcome.schedule().len(), 2);
//! let metrics = outcome.metrics().unwrap();
//! assert!((metrics.summary.avg_waiting_time - 2.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use engine::{compare, run, run_checked, RunOutcome};
pub use error::{Error, Result};
pub use models::{ExecutionInterval, Pid, Process, Schedule};
pub use scheduler::Policy;
