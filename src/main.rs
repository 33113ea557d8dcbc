mod calc;
mod cmd;
mod data;
mod nav;
mod ui;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: &str = "debug";
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser)]
#[command(name = "lukkari", about = "course timetable viewer")]
struct Cli {
    /// Path to the data directory containing config.yaml and the timetable (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Write log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write config.yaml and a sample timetable into the data directory
    Init,
    /// Print the sessions in a date range
    Show {
        /// today, now, week or month (default: today)
        keyword: Option<String>,
        /// Anchor date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List all courses in the timetable
    Courses,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to a file only; stderr would tear the TUI.
    let _logger = init_logging(cli.log_file.as_deref())?;

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());
    log::debug!("data dir {}", data_dir.display());

    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Show {
            keyword,
            date,
            json,
        }) => cmd::show::run(keyword.as_deref(), date, json),
        Some(Commands::Courses) => cmd::courses::run(),
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<LoggerHandle>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .append()
        .start()?;
    Ok(Some(handle))
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
