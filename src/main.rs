mod cli;
mod error;
mod models;
mod settings;
mod source;
mod timeline;
mod tui;

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;
use crate::timeline::YearMonth;

#[derive(Parser)]
#[command(name = "buildline", about = "Construction project timeline dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the timeline layout for a project list
    Layout {
        /// Projects JSON file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD) anchoring the overview
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Show one month by day (YYYY-MM)
        #[arg(long)]
        month: Option<YearMonth>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Launch the terminal dashboard
    Tui {
        /// Projects JSON file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD) anchoring the overview
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("BUILDLINE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let settings = Settings::load();

    match cli.command {
        Commands::Layout {
            file,
            today,
            month,
            json,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();

            let records = cli::load_records(file, &cwd, &settings)?;
            let today = cli::resolve_today(today, &settings)?;
            let mut stdout = std::io::stdout().lock();
            cli::run_layout(&records, today, month, json, &mut stdout)?;
        }
        Commands::Tui { file, today } => {
            // The alternate screen owns stderr while the dashboard runs.
            let log_path = Settings::log_path_in(&cwd)
                .context("failed to create settings directory for the log file")?;
            let log_file = std::fs::File::create(&log_path)
                .with_context(|| format!("failed to open log file {}", log_path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .init();

            let records = cli::load_records(file, &cwd, &settings)?;
            let today = cli::resolve_today(today, &settings)?;
            tui::run(records, today, &settings)?;
        }
    }

    Ok(())
}
