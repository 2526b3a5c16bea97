//! fastlog CLI binary entrypoint.
//!
//! Loads `fastlog.toml`, initializes tracing and dispatches to the
//! subcommand handlers. The process exit code reflects the analysis
//! outcome (see `fastlog --help`).

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod pager;
mod theme;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fastlog_core::config::{DEFAULT_CONFIG_PATH, FastlogConfig};
use fastlog_pipeline::IngestOutcome;

use cli::{Cli, Commands, ReportFormat};
use error::CliError;
use output::OutputWriter;
use theme::Theme;

/// Exit code when no records were loaded.
const EXIT_EMPTY: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create async runtime: {e}");
            return ExitCode::from(3);
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(outcome) => ExitCode::from(outcome_code(outcome)),
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(hint) = hint(&e) {
                eprintln!("  hint: {hint}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<IngestOutcome, CliError> {
    let explicit = cli.config.is_some();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    // `config validate` reports a broken file itself.
    let config = match FastlogConfig::load_or_default(&config_path, explicit).await {
        Ok(config) => config,
        Err(_) if matches!(cli.command, Some(Commands::Config(_))) => FastlogConfig::default(),
        Err(e) => return Err(e.into()),
    };

    let (verbose, quiet) = match &cli.command {
        Some(Commands::Analyze(args)) => (args.verbose, args.quiet),
        _ => (false, false),
    };

    let level = logging::effective_level(&config.general, cli.log_level.as_deref(), verbose);
    logging::init_tracing(&config.general, level)?;

    tracing::debug!(path = %config_path.display(), explicit, "configuration loaded");

    let theme = match cli.report {
        ReportFormat::Json => Theme::plain(),
        ReportFormat::Text => Theme::new(config.display.color && !quiet),
    };
    let writer = OutputWriter::new(cli.report, theme);

    match cli.command {
        Some(Commands::Analyze(args)) => commands::analyze::execute(args, config, &writer).await,
        Some(Commands::Colors) => {
            commands::colors::execute(&writer)?;
            Ok(IngestOutcome::Clean)
        }
        Some(Commands::Config(args)) => {
            commands::config::execute(args, &config_path, explicit, &writer).await?;
            Ok(IngestOutcome::Clean)
        }
        None => {
            println!("Specify a command, e.g. `fastlog analyze -i fast.log`; see `fastlog --help`.");
            Ok(IngestOutcome::Clean)
        }
    }
}

fn outcome_code(outcome: IngestOutcome) -> u8 {
    match outcome {
        IngestOutcome::Clean => 0,
        IngestOutcome::Critical(_) => 1,
        IngestOutcome::Empty => EXIT_EMPTY,
    }
}

fn hint(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Input(_) => Some("check the path given with -i/--input or input.path"),
        CliError::Config(_) | CliError::Core(_) if err.to_string().contains("encoding") => {
            Some("supported encodings: utf-8, utf-8-lossy, latin-1")
        }
        _ => None,
    }
}
