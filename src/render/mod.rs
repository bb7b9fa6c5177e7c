//! Text output for schedules and metrics.
//!
//! | Renderer | Output |
//! |----------|--------|
//! | [`render_gantt`] | one colored bar per interval on a shared time axis |
//! | [`render_metrics`] | summary block plus per-process table |
//! | [`render_comparison`] | one summary row per policy |
//!
//! Renderers write to any [`std::io::Write`], so the same code serves the
//! terminal and tests.

pub mod gantt;
pub mod table;

pub use gantt::{render_gantt, GanttOptions};
pub use table::{render_comparison, render_metrics};
