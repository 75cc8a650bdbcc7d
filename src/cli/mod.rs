//! Command-line parsing for the HK IPO statistics reporter.
//!
//! Argument parsing and command dispatch stay separate from the
//! fetch/aggregation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hkipo", version, about = "HK IPO subscription statistics reporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the listing feed, aggregate by month, and write the report files.
    Run(RunArgs),
    /// Fetch and aggregate, then print the report tables without writing files.
    Show(RunArgs),
}

/// Common options for fetching and reporting.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Listing feed URL (defaults to the public endpoint; `HKIPO_FEED_URL`
    /// in the environment also overrides it).
    #[arg(long)]
    pub url: Option<String>,

    /// Root directory the dated report directory is created under.
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Date stamp for the report directory (YYYY-MM-DD; defaults to today).
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Suppress the terminal run summary.
    #[arg(long)]
    pub quiet: bool,
}
