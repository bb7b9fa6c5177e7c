//! Metrics tables.

use std::io::{self, Write};

use crate::engine::RunOutcome;
use crate::metrics::{ProcessMetrics, ScheduleMetrics};
use crate::scheduler::Policy;

const PROCESS_COLUMNS: [&str; 7] = [
    "Process ID",
    "Arrival Time",
    "Burst Time",
    "Completion Time",
    "Turnaround Time",
    "Waiting Time",
    "Response Time",
];

const COMPARISON_COLUMNS: [&str; 6] = [
    "Policy",
    "Avg Waiting",
    "Avg Turnaround",
    "Avg Response",
    "CPU %",
    "Throughput",
];

/// Writes the summary block and the per-process table.
///
/// Prints "No metrics available." when `metrics` is `None`.
pub fn render_metrics<W: Write>(out: &mut W, metrics: Option<&ScheduleMetrics>) -> io::Result<()> {
    let Some(metrics) = metrics.filter(|m| !m.per_process.is_empty()) else {
        writeln!(out, "No metrics available.")?;
        return Ok(());
    };

    let s = &metrics.summary;
    writeln!(out, "Performance Metrics:")?;
    writeln!(out, "- Average Waiting Time: {:.2} time units", s.avg_waiting_time)?;
    writeln!(out, "- Average Turnaround Time: {:.2} time units", s.avg_turnaround_time)?;
    writeln!(out, "- Average Response Time: {:.2} time units", s.avg_response_time)?;
    writeln!(out, "- CPU Utilization: {:.2}%", s.cpu_utilization)?;
    writeln!(out, "- Throughput: {:.4} processes/time unit", s.throughput)?;
    writeln!(out)?;

    let rows: Vec<[String; 7]> = metrics.per_process.iter().map(process_row).collect();
    write_table(out, &PROCESS_COLUMNS, &rows)
}

/// Writes one summary row per policy. Policies that produced no schedule
/// show the reason instead of numbers.
pub fn render_comparison<W: Write>(out: &mut W, results: &[(Policy, RunOutcome)]) -> io::Result<()> {
    let rows: Vec<[String; 6]> = results
        .iter()
        .map(|(policy, outcome)| match outcome {
            RunOutcome::Scheduled(run) => {
                let s = &run.metrics.summary;
                [
                    policy.to_string(),
                    format!("{:.2}", s.avg_waiting_time),
                    format!("{:.2}", s.avg_turnaround_time),
                    format!("{:.2}", s.avg_response_time),
                    format!("{:.2}", s.cpu_utilization),
                    format!("{:.4}", s.throughput),
                ]
            }
            RunOutcome::NoSchedule(reason) => [
                policy.to_string(),
                format!("({reason})"),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        })
        .collect();
    write_table(out, &COMPARISON_COLUMNS, &rows)
}

fn process_row(m: &ProcessMetrics) -> [String; 7] {
    [
        m.pid.to_string(),
        m.arrival.to_string(),
        m.burst.to_string(),
        m.completion.to_string(),
        m.turnaround.to_string(),
        m.waiting.to_string(),
        m.response.to_string(),
    ]
}

/// Left-aligned first column, right-aligned rest, two spaces between columns.
fn write_table<W: Write, const N: usize>(
    out: &mut W,
    headers: &[&str; N],
    rows: &[[String; N]],
) -> io::Result<()> {
    let mut widths: [usize; N] = headers.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_row(out, &widths, &header)?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_row(out, &widths, &rule)?;
    for row in rows {
        write_row(out, &widths, row)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 0 {
                format!("{cell:<w$}")
            } else {
                format!("{cell:>w$}")
            }
        })
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}
