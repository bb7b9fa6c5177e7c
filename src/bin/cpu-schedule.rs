use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    tty::IsTty,
};
use tracing::info;

use cpu_schedule::config::SimulationConfig;
use cpu_schedule::engine::{compare, RunOutcome};
use cpu_schedule::models::Process;
use cpu_schedule::render::{render_comparison, render_gantt, render_metrics, GanttOptions};
use cpu_schedule::workload::WorkloadGenerator;

/// Single-CPU scheduling simulator.
///
/// Runs one policy (or all of them with --compare) over a process set and
/// prints the Gantt chart and metrics.
#[derive(Parser, Debug)]
#[command(name = "cpu-schedule", version, about = "Single-CPU scheduling simulator")]
struct Args {
    /// Policy: "FCFS", "SJF", "SRTF", "Round Robin" or "Priority"
    #[arg(long, env = "CPU_SCHEDULE_POLICY")]
    policy: Option<String>,

    /// Round Robin time quantum (default: 2)
    #[arg(long, env = "CPU_SCHEDULE_QUANTUM", allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// Simulation file (.toml or .json)
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Process as pid,arrival,burst[,priority]; repeatable
    #[arg(long = "process", value_name = "PID,ARRIVAL,BURST[,PRIORITY]")]
    processes: Vec<Process>,

    /// Generate this many random processes instead of reading them
    #[arg(long, value_name = "N", conflicts_with_all = ["input", "processes"])]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value = "0", requires = "random")]
    seed: u64,

    /// Run every policy and print a comparison table
    #[arg(long)]
    compare: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Gantt chart width in columns
    #[arg(long, default_value = "60")]
    width: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let color = !args.no_color && !args.json && io::stdout().is_tty();
    let mut stdout = io::stdout().lock();

    if args.compare {
        config.validate().context("invalid process set")?;
        info!(processes = config.processes.len(), "comparing all policies");
        let results = compare(&config.processes, config.quantum);
        if args.json {
            serde_json::to_writer_pretty(&mut stdout, &results)?;
            writeln!(stdout)?;
        } else {
            render_comparison(&mut stdout, &results)?;
        }
        return Ok(());
    }

    info!(
        policy = %config.policy,
        processes = config.processes.len(),
        "running simulation"
    );
    let outcome = config.run().context("invalid process set")?;

    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &outcome)?;
        writeln!(stdout)?;
        return Ok(());
    }

    match &outcome {
        RunOutcome::Scheduled(run) => {
            let title = match run.quantum {
                Some(q) => format!("{} (quantum {q})\n\n", run.policy),
                None => format!("{}\n\n", run.policy),
            };
            print_colored(&mut stdout, &title, Color::Magenta, color)?;
            let options = GanttOptions::default()
                .with_width(args.width)
                .with_color(color);
            render_gantt(&mut stdout, &run.schedule, options)?;
            writeln!(stdout)?;
        }
        RunOutcome::NoSchedule(reason) => {
            print_colored(&mut stdout, &format!("No schedule: {reason}\n"), Color::Yellow, color)?;
        }
    }
    render_metrics(&mut stdout, outcome.metrics())?;
    Ok(())
}

/// Merges the simulation file with command-line overrides.
fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.input {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load simulation file '{}'", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(policy) = &args.policy {
        config.policy = policy.clone();
    }
    if args.quantum.is_some() {
        config.quantum = args.quantum;
    }
    config.processes.extend(args.processes.iter().cloned());

    if let Some(count) = args.random {
        config.processes = WorkloadGenerator::new(count).with_seed(args.seed).generate();
    }
    Ok(config)
}

fn print_colored<W: Write>(out: &mut W, text: &str, fg: Color, color: bool) -> Result<()> {
    if color {
        execute!(out, SetForegroundColor(fg), Print(text), ResetColor)?;
    } else {
        write!(out, "{text}")?;
    }
    Ok(())
}
