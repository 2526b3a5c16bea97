//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// fastlog -- Suricata fast.log alert analyzer.
///
/// Use `fastlog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "fastlog", version, about, long_about = None)]
#[command(after_help = "Exit codes:\n  \
    0  success, no priority-1 alerts\n  \
    1  priority-1 alerts found, or an input/export/configuration failure\n  \
    2  no records were loaded\n  \
    3  unexpected internal error")]
pub struct Cli {
    /// Path to the fastlog.toml configuration file [default: fastlog.toml].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    /// Report format.
    #[arg(long, global = true, default_value = "text")]
    pub report: ReportFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable colored text.
    Text,
    /// A single machine-readable JSON document.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a fast.log file, print alerts and statistics, export records.
    Analyze(AnalyzeArgs),

    /// Show the color legend used by the text report.
    Colors,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- analyze ----

/// Parse a fast.log file and report on its alerts.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Input fast.log file [default: from config, fast.log].
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Export file [default: from config, suricata_logs.csv].
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format.
    #[arg(long, value_parser = ["csv", "json"])]
    pub format: Option<String>,

    /// Skip exporting records.
    #[arg(long)]
    pub no_export: bool,

    /// Keep only alerts whose description contains this keyword (case-insensitive).
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Keep only alerts with this priority.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=3))]
    pub priority: Option<u64>,

    /// Stop after this many matching alerts (0 = no limit).
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Input encoding (utf-8, utf-8-lossy, latin-1).
    #[arg(long)]
    pub encoding: Option<String>,

    /// Show statistics only (skip the per-alert view).
    #[arg(short, long)]
    pub stats: bool,

    /// Plain output without colors, banner or paging.
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose diagnostics (debug logging on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

// ---- config ----

/// Manage fastlog configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, input, export, display).
        #[arg(long)]
        section: Option<String>,
    },
}
