//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fetch/partition/aggregate pipeline
//! - prints the summary or tables
//! - writes the report files

use clap::Parser;

use crate::cli::{Command, RunArgs};
use crate::domain::ReportConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `hkipo` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `hkipo` (and `hkipo --url ...`) to behave like
    // `hkipo run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_report(args, OutputMode::WriteFiles),
        Command::Show(args) => handle_report(args, OutputMode::PrintOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    WriteFiles,
    PrintOnly,
}

fn handle_report(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = report_config_from_args(&args);
    let run = pipeline::run_report(&config)?;

    if !config.quiet {
        print!(
            "{}",
            crate::report::format_run_summary(run.records.len(), &run.monthly_counts, &run.overall)
        );
    }

    let tables = crate::report::build_tables(&run.monthly_counts, &run.monthly, &run.overall);

    match mode {
        OutputMode::WriteFiles => {
            let run_date = config
                .run_date
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            let dir = crate::io::export::write_report_files(&config.output_root, run_date, &tables)?;
            println!("Reports written to {}", dir.display());
        }
        OutputMode::PrintOnly => {
            for line in tables
                .counts
                .iter()
                .chain(&tables.months)
                .chain(&tables.total)
            {
                println!("{line}");
            }
        }
    }

    Ok(())
}

pub fn report_config_from_args(args: &RunArgs) -> ReportConfig {
    ReportConfig {
        feed_url: args.url.clone(),
        output_root: args.output.clone(),
        run_date: args.date,
        quiet: args.quiet,
    }
}

/// Rewrite argv so `hkipo` defaults to `hkipo run`.
///
/// Rules:
/// - `hkipo`                    -> `hkipo run`
/// - `hkipo --url ... `         -> `hkipo run --url ...`
/// - `hkipo --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}
