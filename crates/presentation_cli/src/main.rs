//! SkyWatch CLI
//!
//! Runs the wind and school-run forecast reports on their daily schedules.

#![allow(clippy::print_stdout)]

mod signals;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use application::{CycleOutcome, CycleRunner, DeliveryStatus, SCHOOL_RUN_CONCERN, WIND_CONCERN};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use domain::Schedule;
use infrastructure::{
    AppConfig, Clock, Collaborators, ConcernConfig, ShutdownSignal, Supervisor, SystemClock,
    create_periodic_tasks, create_school_run_cycle, create_wind_cycle, init_telemetry,
};
use tracing::{info, warn};

/// SkyWatch CLI
#[derive(Parser)]
#[command(name = "skywatch")]
#[command(author, version, about = "Daily wind and school-run forecast reports", long_about = None)]
struct Cli {
    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "SKYWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level, overrides the configured log filter
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every enabled concern on its schedule until interrupted
    ///
    /// Each concern runs one cycle immediately, then daily at its configured time.
    Run,

    /// Run a single cycle now and exit
    ///
    /// Example: skywatch once school-run
    Once {
        /// Concern to run
        #[arg(value_enum)]
        concern: Concern,
    },

    /// Print the next trigger times of every concern
    NextRuns {
        /// Number of upcoming runs per concern
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Concern {
    /// Airport wind direction report
    Wind,
    /// School-run rain check
    SchoolRun,
}

/// Log filter override from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Trigger instants following `from`, one per day
fn upcoming(schedule: &Schedule, from: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    std::iter::successors(Some(schedule.next_trigger(from)), |t| {
        Some(schedule.next_trigger(*t))
    })
    .take(count)
    .collect()
}

/// One line of `next-runs` output
fn format_run(concern: &str, schedule: &Schedule, at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&schedule.timezone().tz());
    format!(
        "{concern:<12} {}  ({})",
        local.format("%a %Y-%m-%d %H:%M %Z"),
        at.format("%Y-%m-%dT%H:%MZ")
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry.log_filter = filter.to_string();
    }
    init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run => run(&config).await,
        Commands::Once { concern } => once(&config, concern).await,
        Commands::NextRuns { count } => {
            next_runs(&config, count, Utc::now());
            Ok(())
        },
    }
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let collaborators = Collaborators::from_config(config)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tasks = create_periodic_tasks(config, &collaborators, &clock)?;

    info!(
        concerns = tasks.len(),
        model = %collaborators.inference.current_model(),
        "SkyWatch starting"
    );

    if !collaborators.inference.is_available().await {
        warn!("Inference server unreachable, reports fall back to the plain analysis");
    }

    let shutdown = ShutdownSignal::new();
    tokio::spawn(signals::watch(shutdown.clone()));

    let result = Supervisor::new(tasks).run(shutdown).await;
    if result.is_cancellation() {
        info!("SkyWatch stopped");
        Ok(())
    } else {
        Err(result.into())
    }
}

async fn once(config: &AppConfig, concern: Concern) -> anyhow::Result<()> {
    let collaborators = Collaborators::from_config(config)?;
    let runner: Arc<dyn CycleRunner> = match concern {
        Concern::Wind => create_wind_cycle(config, &collaborators)?,
        Concern::SchoolRun => create_school_run_cycle(config, &collaborators)?,
    };

    let shutdown = ShutdownSignal::new();
    tokio::spawn(signals::watch(shutdown.clone()));

    let outcome = tokio::select! {
        outcome = runner.run_cycle() => outcome,
        reason = shutdown.cancelled() => bail!("{} cycle aborted: {reason}", runner.name()),
    };

    match outcome {
        CycleOutcome::FetchFailed => bail!("{} cycle could not fetch a forecast", runner.name()),
        CycleOutcome::Completed {
            delivery: DeliveryStatus::Failed,
            ..
        } => bail!("{} report could not be delivered", runner.name()),
        CycleOutcome::Completed {
            summarized,
            delivery,
        } => {
            if !summarized {
                warn!("Report sent without a summary");
            }
            println!("{} cycle finished: delivery {delivery:?}", runner.name());
            Ok(())
        },
    }
}

fn next_runs(config: &AppConfig, count: usize, now: DateTime<Utc>) {
    for line in next_run_lines(config, count, now) {
        println!("{line}");
    }
}

fn next_run_lines(config: &AppConfig, count: usize, now: DateTime<Utc>) -> Vec<String> {
    let concerns: [(&str, &ConcernConfig); 2] = [
        (WIND_CONCERN, &config.wind),
        (SCHOOL_RUN_CONCERN, &config.school_run),
    ];

    let mut lines = Vec::new();
    for (name, concern) in concerns {
        if !concern.enabled {
            lines.push(format!("{name:<12} disabled"));
            continue;
        }
        match concern.schedule.to_schedule() {
            Ok(schedule) => lines.extend(
                upcoming(&schedule, now, count)
                    .into_iter()
                    .map(|at| format_run(name, &schedule, at)),
            ),
            Err(e) => lines.push(format!("{name:<12} invalid schedule: {e}")),
        }
    }
    lines
}
