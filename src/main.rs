//! CLI entry point for the gate ridership tool.
//!
//! Provides subcommands for assigning fare-gate passages to scheduled
//! departures, aggregating an assignment file into per-departure ridership,
//! and running both steps in one pass.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gate_ridership::analyzers::types::RidershipReport;
use gate_ridership::config::PipelineConfig;
use gate_ridership::output::{log_report, write_assignments, write_json, write_report};
use gate_ridership::pipeline::{Assignment, Pipeline};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// File name of the assignment CSV written by `run`.
const ASSIGNMENT_FILE: &str = "passengers_with_train_times.csv";
const STATS_FILE: &str = "match_stats.json";

#[derive(Parser)]
#[command(name = "gate_ridership")]
#[command(about = "Assign fare-gate passages to train departures and aggregate ridership", long_about = None)]
struct Cli {
    /// JSON pipeline configuration (column names, tags, holiday source)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign each passenger the first departure after their gate entry
    Assign {
        /// Passenger gate CSV
        #[arg(short, long)]
        passengers: PathBuf,

        /// Timetable CSV
        #[arg(short, long)]
        timetable: PathBuf,

        /// CSV file to write passengers with assigned departures to
        #[arg(short, long, default_value = ASSIGNMENT_FILE)]
        output: PathBuf,

        /// Only process passengers entering at this station
        #[arg(short, long)]
        station: Option<String>,
    },
    /// Aggregate an assignment CSV into ridership per departure
    Aggregate {
        /// Assignment CSV written by `assign`
        #[arg(short, long, default_value = ASSIGNMENT_FILE)]
        input: PathBuf,

        /// Directory to write the per-period counts to
        #[arg(short = 'd', long, default_value = "output")]
        output_dir: PathBuf,
    },
    /// Assign and aggregate in one pass
    Run {
        /// Passenger gate CSV
        #[arg(short, long)]
        passengers: PathBuf,

        /// Timetable CSV
        #[arg(short, long)]
        timetable: PathBuf,

        /// Directory to write assignments, counts and stats to
        #[arg(short = 'd', long, default_value = "output")]
        output_dir: PathBuf,

        /// Only process passengers entering at this station
        #[arg(short, long)]
        station: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gate_ridership.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gate_ridership.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::load_or_default(cli.config.as_deref())
        .context("failed to load pipeline config")?;

    match cli.command {
        Commands::Assign {
            passengers,
            timetable,
            output,
            station,
        } => {
            let pipeline = Pipeline::new(config.with_station(station))?;
            let assignment = pipeline.assign_files(&passengers, &timetable)?;
            save_assignment(&pipeline, &assignment, &output)?;
        }
        Commands::Aggregate { input, output_dir } => {
            let pipeline = Pipeline::new(config)?;
            let report = pipeline
                .summarize_file(&input)
                .with_context(|| format!("failed to aggregate {}", input.display()))?;
            save_report(&report, &output_dir)?;
        }
        Commands::Run {
            passengers,
            timetable,
            output_dir,
            station,
        } => {
            let pipeline = Pipeline::new(config.with_station(station))?;
            let assignment = pipeline.assign_files(&passengers, &timetable)?;

            std::fs::create_dir_all(&output_dir)?;
            save_assignment(&pipeline, &assignment, &output_dir.join(ASSIGNMENT_FILE))?;
            write_json(&output_dir.join(STATS_FILE), &assignment.stats)?;

            let report = pipeline.summarize(&assignment.trips());
            save_report(&report, &output_dir)?;
        }
    }

    info!("All processing complete");
    Ok(())
}

/// Writes the passenger rows with their assigned departure column.
fn save_assignment(pipeline: &Pipeline, assignment: &Assignment, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    write_assignments(
        BufWriter::new(file),
        &assignment.headers,
        &assignment.events,
        &pipeline.config().output_column,
    )?;
    info!(path = %path.display(), "Assignments saved");
    Ok(())
}

/// Logs and writes every period of the report.
fn save_report(report: &RidershipReport, output_dir: &Path) -> Result<()> {
    for period in &report.periods {
        log_report(period);
        write_report(output_dir, period)?;
    }
    Ok(())
}
