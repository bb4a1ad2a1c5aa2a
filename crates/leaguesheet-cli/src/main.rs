//! leaguesheet CLI - League scores and standings for the web site
//!
//! Reads the league workbook and writes one scores and one standings HTML
//! fragment per division for a round date.

mod config;
mod output;
mod pipeline;
mod snapshot;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{AppSettings, FileConfig};
use crate::pipeline::Pipeline;
use crate::snapshot::SnapshotSource;

#[derive(Debug, Parser)]
#[command(name = "leaguesheet")]
#[command(author, version, about = "League scores and standings HTML generator", long_about = None)]
pub struct Cli {
    /// Divisions to process, comma-separated (default: all)
    #[arg(long, value_delimiter = ',', value_name = "DIVISIONS")]
    pub divisions: Vec<String>,

    /// Round date (default: last Saturday)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Skip the scores reports
    #[arg(long)]
    pub no_scores: bool,

    /// Skip the standings reports
    #[arg(long)]
    pub no_standings: bool,

    /// Config file (default: leaguesheet.toml if present)
    #[arg(long, env = "LEAGUESHEET_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Workbook snapshot (JSON)
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Output directory; reports go into a per-date subdirectory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.no_scores && cli.no_standings {
        println!("Both scores and standings are disabled, nothing to do.");
        return Ok(ExitCode::SUCCESS);
    }

    let file = FileConfig::discover(cli.config.as_deref())?;
    let settings = AppSettings::resolve(&cli, file, Local::now().date_naive());

    let source = SnapshotSource::open(&settings.snapshot_path).with_context(|| {
        format!(
            "Failed to load workbook snapshot {}",
            settings.snapshot_path.display()
        )
    })?;
    if let (Some(expected), Some(found)) = (settings.sheet_id.as_deref(), source.spreadsheet_id()) {
        if expected != found {
            warn!(expected, found, "snapshot is from a different spreadsheet");
        }
    }

    println!("{}", settings.summary());

    let summary = Pipeline::new(&settings, &source).run();
    for path in &summary.written {
        println!("  {}", path.display());
    }

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Failed divisions: {}", summary.failed.join(", "));
        Ok(ExitCode::FAILURE)
    }
}
