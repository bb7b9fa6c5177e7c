//! Scheduling domain models.
//!
//! Provides the core data types for describing a single-CPU workload and
//! the schedule a policy produces for it.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Input: arrival, burst, priority |
//! | `ExecutionInterval` | Output element: `(pid, start, end)` |
//! | `Schedule` | Ordered execution intervals |

mod process;
mod schedule;

pub use process::{Pid, Process};
pub use schedule::{merge_adjacent, ExecutionInterval, Schedule};
