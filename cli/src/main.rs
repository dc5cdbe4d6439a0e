mod report;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fitlog_core::{AppConfig, CsvFileSource, HealthReportUseCase};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Weekly nutrition, weight and exercise report from tracker exports", long_about = None)]
struct Cli {
    /// Config file (default: ~/.fitlog/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the three CSV exports, overrides the config
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// One row per ISO week (default)
    Weekly,
    /// One row per calendar month
    Monthly,
    /// The merged daily records, without aggregation
    Days,
}

fn init_tracing() {
    // stderr only, stdout carries the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())
        .context("loading configuration")?
        .with_data_dir(cli.data_dir);
    debug!(
        nutrition = %config.nutrition_path().display(),
        weights = %config.measurement_path().display(),
        exercise = %config.exercise_path().display(),
        "resolved export paths"
    );

    let nutrition = CsvFileSource::new(config.nutrition_path());
    let weights = CsvFileSource::new(config.measurement_path());
    let exercise = CsvFileSource::new(config.exercise_path());
    let usecase = HealthReportUseCase::new(&nutrition, &weights, &exercise);

    let color = std::io::stdout().is_terminal();

    // Everything is computed before anything is printed.
    let output = match cli.command.unwrap_or(Commands::Weekly) {
        Commands::Weekly => {
            let weeks = usecase.weekly_report()?;
            if cli.json {
                serde_json::to_string_pretty(&weeks)?
            } else {
                report::render_weeks(&weeks, color)
            }
        }
        Commands::Monthly => {
            let months = usecase.monthly_report()?;
            if cli.json {
                serde_json::to_string_pretty(&months)?
            } else {
                report::render_months(&months, color)
            }
        }
        Commands::Days => {
            let days = usecase.daily_records()?;
            if cli.json {
                serde_json::to_string_pretty(&days)?
            } else {
                report::render_days(&days, color)
            }
        }
    };

    println!("{}", output);
    Ok(())
}
