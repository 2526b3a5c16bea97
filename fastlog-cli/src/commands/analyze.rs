//! `fastlog analyze` command handler
//!
//! Reads a fast.log file, prints the per-alert view and statistics,
//! exports the records and reports the run outcome.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use fastlog_core::config::FastlogConfig;
use fastlog_core::types::AlertRecord;
use fastlog_pipeline::{
    AlertStats, ExportFormat, ExportSummary, FamilySighting, IngestOutcome, IngestReport, Ingestor,
    InputEncoding, RecordFilter, ThreatFlag, export_records, threat_flag,
};

use crate::cli::AnalyzeArgs;
use crate::commands::colors::Banner;
use crate::error::CliError;
use crate::output::{OutputWriter, Render, section_header};
use crate::pager::Pager;
use crate::theme::{Style, Theme};

/// Timestamp layout written by Suricata/Snort.
const FAST_LOG_TIMESTAMP: &str = "%m/%d/%Y-%H:%M:%S%.f";

/// Timestamp layout used in the per-alert view.
const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Threat events above this count get the strong banner.
const STRONG_THREAT_BANNER: usize = 10;

/// Malware family summarized at the end of an unfiltered run.
const LOKIBOT_FAMILY: &str = "lokibot";

/// Execute the `analyze` command.
///
/// CLI flags override the loaded configuration, which is validated again
/// after the overrides are applied.
pub async fn execute(
    args: AnalyzeArgs,
    mut config: FastlogConfig,
    writer: &OutputWriter,
) -> Result<IngestOutcome, CliError> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let input = PathBuf::from(&config.input.path);
    let encoding: InputEncoding = config.input.encoding.parse()?;
    let export = if config.export.enabled {
        let format: ExportFormat = config.export.format.parse()?;
        Some((PathBuf::from(&config.export.path), format))
    } else {
        None
    };

    let filter = build_filter(&args);
    let ingestor = Ingestor::with_default_parser()?
        .with_filter(filter.clone())
        .with_limit(args.limit)
        .with_max_line_length(config.input.max_line_length);

    let theme = writer.theme();
    let text = writer.is_text();
    let chatty = text && !args.quiet;
    let mut out = std::io::stdout();

    if chatty {
        writer.render_to(&Banner::current(), &mut out)?;
        if args.verbose {
            writeln!(out, "{}", theme.paint(format!("Reading file: {}", input.display()), Style::Info))?;
            if let Some((path, format)) = &export {
                writeln!(
                    out,
                    "{}",
                    theme.paint(format!("Exporting to: {} ({format})", path.display()), Style::Info)
                )?;
            }
        }
    }

    info!(path = %input.display(), %encoding, "reading input");
    let ingest = ingestor.ingest_file(&input, encoding).await?;
    let outcome = ingest.outcome();

    if chatty && args.verbose {
        if ingest.limit_reached {
            writeln!(out, "{}", theme.paint(format!("Record limit reached: {}", args.limit), Style::Warning))?;
        }
        if ingest.unparsed_lines > 0 {
            writeln!(
                out,
                "{}",
                theme.paint(format!("⚠ Unparsed lines: {}", ingest.unparsed_lines), Style::Warning)
            )?;
        }
    }

    let mut report = AnalysisReport::new(&input, encoding, &ingest, filter, args.quiet);

    if outcome == IngestOutcome::Empty {
        writer.render_to(&report, &mut out)?;
        return Ok(outcome);
    }

    if chatty {
        writeln!(
            out,
            "{}",
            theme.paint(
                format!("✅ Loaded {} records from '{}'", ingest.records.len(), input.display()),
                Style::Success
            )
        )?;
    }

    if chatty && !args.stats {
        section_header(&mut out, &theme, "DETAILED VIEW")?;
        let pager = Pager::for_terminal(config.display.page_size, true);
        let total = ingest.records.len();
        for (index, record) in ingest.records.iter().enumerate() {
            RecordView { index, record }.render_text(&mut out, &theme)?;
            pager.pause(index + 1, total, &mut out, &theme).await?;
        }
    }

    let stats = AlertStats::from_records(&ingest.records, config.display.top_n);
    if text {
        StatsView {
            stats: &stats,
            plain: args.quiet,
        }
        .render_text(&mut out, &theme)?;
    }
    report.stats = Some(stats);

    if let Some((path, format)) = export {
        let summary = export_records(&ingest.records, &path, format).await?;
        if chatty {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                theme.paint(
                    format!("✅ Exported {} records to '{}' ({})", summary.records, summary.path, summary.format),
                    Style::Success
                )
            )?;
        }
        report.export = Some(summary);
    } else {
        debug!("export disabled");
    }

    writer.render_to(&report, &mut out)?;
    Ok(outcome)
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut FastlogConfig, args: &AnalyzeArgs) {
    if let Some(input) = &args.input {
        config.input.path = input.display().to_string();
    }
    if let Some(encoding) = &args.encoding {
        config.input.encoding = encoding.clone();
    }
    if let Some(output) = &args.output {
        config.export.path = output.display().to_string();
    }
    if let Some(format) = &args.format {
        config.export.format = format.clone();
    }
    if args.no_export {
        config.export.enabled = false;
    }
}

fn build_filter(args: &AnalyzeArgs) -> RecordFilter {
    let mut filter = RecordFilter::new();
    if let Some(keyword) = &args.filter {
        filter = filter.with_keyword(keyword.as_str());
    }
    if let Some(priority) = args.priority {
        filter = filter.with_priority(priority);
    }
    filter
}

/// Reformat a fast.log timestamp for display, or return it unchanged.
fn display_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, FAST_LOG_TIMESTAMP)
        .map(|ts| ts.format(DISPLAY_TIMESTAMP).to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

/// One alert in the detailed view.
struct RecordView<'a> {
    index: usize,
    record: &'a AlertRecord,
}

impl Render for RecordView<'_> {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()> {
        let r = self.record;
        let rule = "=".repeat(crate::output::RULE_WIDTH);

        writeln!(w)?;
        writeln!(w, "{}", theme.paint(&rule, Style::Info))?;
        writeln!(w, "{}", theme.paint(format!("Record #{}", self.index + 1), Style::Info))?;
        writeln!(w, "{}", theme.paint(&rule, Style::Info))?;
        writeln!(w, "Time: {}", theme.paint(display_timestamp(&r.timestamp), Style::Success))?;
        writeln!(w, "Rule ID: {}", theme.paint(&r.rule_id, Style::Accent))?;
        writeln!(w, "Description: {}", theme.paint(&r.description, Style::Strong))?;
        writeln!(w, "Classification: {}", theme.classification(&r.classification))?;
        writeln!(w, "Priority: {}", theme.priority(r.priority))?;
        writeln!(w, "Protocol: {}", theme.paint(&r.protocol, Style::Strong))?;
        writeln!(
            w,
            "Source: {}",
            theme.paint(format!("{}:{}", r.src_ip, r.src_port), Style::Info)
        )?;
        writeln!(
            w,
            "Destination: {}",
            theme.paint(format!("{}:{}", r.dst_ip, r.dst_port), Style::Info)
        )?;

        if theme.is_colored() {
            match threat_flag(r) {
                Some(ThreatFlag::CriticalThreat) => {
                    writeln!(w)?;
                    writeln!(
                        w,
                        "{}",
                        theme.paint(" WARNING: critical threat detected! ", Style::CriticalBanner)
                    )?;
                }
                Some(ThreatFlag::Malicious) => {
                    writeln!(w)?;
                    writeln!(
                        w,
                        "{}",
                        theme.paint(" Warning: malicious activity ", Style::WarningBanner)
                    )?;
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// Statistics section.
///
/// `plain` renders bare `value | count` tables without the IP rankings,
/// threat banner or recommendations.
struct StatsView<'a> {
    stats: &'a AlertStats,
    plain: bool,
}

impl Render for StatsView<'_> {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()> {
        let s = self.stats;

        if self.plain {
            writeln!(w, "Total records: {}", s.total)?;
            writeln!(w)?;
            writeln!(w, "Priority | Count")?;
            writeln!(w, "{}", "-".repeat(25))?;
            for (priority, count) in &s.by_priority {
                writeln!(w, "{priority:^9} | {count:^11}")?;
            }
            writeln!(w)?;
            writeln!(w, "Protocol | Count")?;
            writeln!(w, "{}", "-".repeat(25))?;
            for (protocol, count) in &s.by_protocol {
                writeln!(w, "{protocol:^8} | {count:^11}")?;
            }
            return Ok(());
        }

        section_header(w, theme, "ANALYSIS STATISTICS")?;
        writeln!(w, "Total records: {}", theme.paint(s.total, Style::Success))?;

        writeln!(w)?;
        writeln!(w, "By priority:")?;
        for (priority, count) in &s.by_priority {
            writeln!(w, "  Priority {}: {count} records", theme.priority(*priority))?;
        }

        writeln!(w)?;
        writeln!(w, "By protocol:")?;
        for (protocol, count) in &s.by_protocol {
            writeln!(w, "  {}: {count} records", theme.paint(protocol, Style::Info))?;
        }

        writeln!(w)?;
        writeln!(w, "Top sources:")?;
        for entry in &s.top_sources {
            writeln!(w, "  {}: {} events", theme.paint(&entry.ip, Style::Accent), entry.count)?;
        }

        writeln!(w)?;
        writeln!(w, "Top destinations:")?;
        for entry in &s.top_destinations {
            writeln!(w, "  {}: {} events", theme.paint(&entry.ip, Style::Accent), entry.count)?;
        }

        if s.threat_events > 0 {
            let style = if s.threat_events > STRONG_THREAT_BANNER {
                Style::CriticalBanner
            } else {
                Style::WarningBanner
            };
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                theme.paint(
                    format!(" WARNING: {} malicious activity events detected! ", s.threat_events),
                    style
                )
            )?;
        }

        if s.critical > 0 {
            writeln!(w)?;
            writeln!(w, "{}", theme.paint("Recommendations:", Style::Error))?;
            writeln!(w, "  1. Inspect hosts with critical (priority 1) events")?;
            writeln!(w, "  2. Isolate infected systems from the network")?;
            writeln!(w, "  3. Update the IDS rule set to the latest version")?;
            writeln!(w, "  4. Run an in-depth vulnerability assessment")?;
        }

        Ok(())
    }
}

/// Run summary; the whole document for `--report json`.
#[derive(Serialize)]
pub struct AnalysisReport {
    pub input: String,
    pub encoding: String,
    pub total_lines: usize,
    pub blank_lines: usize,
    pub unparsed_lines: usize,
    pub filtered_out: usize,
    pub limit_reached: bool,
    pub records: usize,
    pub critical: usize,
    pub filter: RecordFilter,
    pub stats: Option<AlertStats>,
    pub export: Option<ExportSummary>,
    /// First LokiBot event and the event count; only without a keyword filter.
    pub lokibot: Option<FamilySighting>,
    pub outcome: IngestOutcome,
    #[serde(skip)]
    quiet: bool,
}

impl AnalysisReport {
    fn new(
        input: &Path,
        encoding: InputEncoding,
        ingest: &IngestReport,
        filter: RecordFilter,
        quiet: bool,
    ) -> Self {
        let lokibot = match filter.keyword() {
            None => FamilySighting::find(&ingest.records, LOKIBOT_FAMILY),
            Some(_) => None,
        };

        Self {
            input: input.display().to_string(),
            encoding: encoding.to_string(),
            total_lines: ingest.total_lines,
            blank_lines: ingest.blank_lines,
            unparsed_lines: ingest.unparsed_lines,
            filtered_out: ingest.filtered_out,
            limit_reached: ingest.limit_reached,
            records: ingest.records.len(),
            critical: ingest.critical_count(),
            filter,
            stats: None,
            export: None,
            lokibot,
            outcome: ingest.outcome(),
            quiet,
        }
    }
}

impl Render for AnalysisReport {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()> {
        if self.outcome == IngestOutcome::Empty {
            writeln!(
                w,
                "{}",
                theme.paint(format!("❌ No records loaded from '{}'", self.input), Style::Error)
            )?;
            writeln!(
                w,
                "{}",
                theme.paint("   Check the file format or rerun with -v for diagnostics", Style::Warning)
            )?;
            return Ok(());
        }

        if self.quiet {
            return Ok(());
        }

        section_header(w, theme, "SUMMARY")?;

        if self.filter.is_active() {
            writeln!(w)?;
            let mut parts = Vec::new();
            if let Some(keyword) = self.filter.keyword() {
                parts.push(format!("'{keyword}'"));
            }
            if let Some(priority) = self.filter.priority() {
                parts.push(format!("priority {priority}"));
            }
            writeln!(w, "Filter applied: {}", theme.paint(parts.join(", "), Style::Info))?;
            writeln!(w, "  {} matches", self.records)?;
        }

        if let Some(sighting) = &self.lokibot {
            writeln!(w)?;
            writeln!(w, "LokiBot events detected:")?;
            writeln!(w, "  Source IP: {}", theme.paint(&sighting.src_ip, Style::Warning))?;
            writeln!(w, "  C&C server: {}", theme.paint(&sighting.dst_ip, Style::Error))?;
            writeln!(w, "  Event count: {}", theme.paint(sighting.count, Style::Info))?;
        }

        writeln!(w)?;
        writeln!(w, "{}", theme.paint("✓ Analysis completed", Style::Success))?;

        if self.critical > 0 {
            writeln!(
                w,
                "{}",
                theme.paint(format!("⚠ {} critical events detected!", self.critical), Style::Error)
            )?;
        }

        Ok(())
    }
}
