//! Text Gantt chart.
//!
//! Every interval gets its own row, drawn as a bar on a time axis shared by
//! all rows. Processes are colored from a fixed palette in order of first
//! appearance; the axis is labeled at each interval start and at the final
//! end.

use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::models::{Pid, Schedule};

/// Bar colors, assigned per pid in first-seen order and reused cyclically.
pub const PALETTE: [Color; 8] = [
    Color::Rgb { r: 0xFF, g: 0x57, b: 0x33 },
    Color::Rgb { r: 0x33, g: 0xFF, b: 0x57 },
    Color::Rgb { r: 0x33, g: 0x57, b: 0xFF },
    Color::Rgb { r: 0xFF, g: 0x33, b: 0xA8 },
    Color::Rgb { r: 0xA8, g: 0x33, b: 0xFF },
    Color::Rgb { r: 0xFF, g: 0xC3, b: 0x00 },
    Color::Rgb { r: 0x00, g: 0x80, b: 0x80 },
    Color::Rgb { r: 0x80, g: 0x00, b: 0x80 },
];

const BAR: char = '█';
const LABEL_WIDTH: usize = 6;

/// Chart layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GanttOptions {
    /// Columns used for the time axis.
    pub width: usize,
    /// Emit terminal color codes.
    pub color: bool,
}

impl Default for GanttOptions {
    fn default() -> Self {
        Self {
            width: 60,
            color: true,
        }
    }
}

impl GanttOptions {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Assigns a palette color to each pid in order of first appearance.
pub fn assign_colors(schedule: &Schedule) -> HashMap<Pid, Color> {
    let mut colors = HashMap::new();
    for pid in schedule.pids() {
        let next = PALETTE[colors.len() % PALETTE.len()];
        colors.entry(pid).or_insert(next);
    }
    colors
}

/// Axis positions: every interval start plus the last interval's end,
/// ascending and deduplicated.
pub fn tick_times(schedule: &Schedule) -> Vec<i64> {
    let mut ticks: Vec<i64> = schedule.iter().map(|i| i.start).collect();
    if let Some(last) = schedule.intervals.last() {
        ticks.push(last.end);
    }
    ticks.sort_unstable();
    ticks.dedup();
    ticks
}

/// Writes the chart for `schedule` to `out`.
///
/// A schedule that is empty or has only zero-length intervals prints a
/// single notice line instead of a chart.
pub fn render_gantt<W: Write>(
    out: &mut W,
    schedule: &Schedule,
    options: GanttOptions,
) -> io::Result<()> {
    let horizon = schedule.makespan();
    if schedule.is_empty() || schedule.busy_time() == 0 || horizon <= 0 {
        writeln!(out, "No schedule to display.")?;
        return Ok(());
    }

    let width = options.width.max(1);
    let column = |t: i64| -> usize {
        ((t.max(0) as i128 * width as i128) / horizon as i128) as usize
    };
    let colors = assign_colors(schedule);

    for interval in schedule.iter().filter(|i| i.duration() > 0) {
        let from = column(interval.start);
        let to = column(interval.end).max(from + 1).min(width.max(from + 1));
        let bar = BAR.to_string().repeat(to - from);
        let trailing = width.saturating_sub(to);

        let label = format!("P{}", interval.pid);
        queue!(
            out,
            Print(format!("{label:>LABEL_WIDTH$} |{}", " ".repeat(from)))
        )?;
        match colors.get(&interval.pid) {
            Some(&color) if options.color => {
                queue!(out, SetForegroundColor(color), Print(bar), ResetColor)?;
            }
            _ => queue!(out, Print(bar))?,
        }
        queue!(
            out,
            Print(format!(
                "{}| {}-{}\n",
                " ".repeat(trailing),
                interval.start,
                interval.end
            ))
        )?;
    }

    writeln!(out, "{:>LABEL_WIDTH$} +{}+", "", "-".repeat(width))?;
    let labels = axis_labels(&tick_times(schedule), width, column);
    writeln!(out, "{:>LABEL_WIDTH$}  {labels}", "Time")?;
    out.flush()
}

/// Lays tick labels out on one line, dropping labels that would collide
/// with the previous one.
fn axis_labels(ticks: &[i64], width: usize, column: impl Fn(i64) -> usize) -> String {
    let mut line = String::with_capacity(width + 8);
    for &t in ticks {
        let label = t.to_string();
        let at = column(t);
        let occupied = line.chars().count();
        let gap = if occupied == 0 { 0 } else { 1 };
        if at < occupied + gap {
            continue;
        }
        line.push_str(&" ".repeat(at - occupied));
        line.push_str(&label);
    }
    line
}
