//! `fastlog colors` command handler and the startup banner

use std::io::Write;

use serde::Serialize;

use fastlog_core::types::{ClassificationTier, PriorityTier};

use crate::error::CliError;
use crate::output::{OutputWriter, RULE_WIDTH, Render};
use crate::theme::{ClassificationStyle, Style, Theme};

/// Execute the `colors` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    if writer.is_text() {
        writer.render(&Banner::current())?;
    }
    writer.render(&ColorLegend::standard())
}

/// Tool name and version shown at the top of text reports.
#[derive(Serialize)]
pub struct Banner {
    pub name: &'static str,
    pub version: &'static str,
}

impl Banner {
    pub fn current() -> Self {
        Self {
            name: "fastlog",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl Render for Banner {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(w, "{}", theme.paint(&rule, Style::Header))?;
        writeln!(
            w,
            "{}",
            theme.paint(format!("{} v{}", self.name, self.version), Style::Header)
        )?;
        writeln!(w, "Suricata fast.log alert analyzer")?;
        writeln!(w, "{}", theme.paint(&rule, Style::Header))
    }
}

/// One legend entry.
#[derive(Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub meaning: &'static str,
    #[serde(skip)]
    style: Style,
}

/// The color legend.
#[derive(Serialize)]
pub struct ColorLegend {
    pub entries: Vec<LegendEntry>,
}

impl ColorLegend {
    pub fn standard() -> Self {
        fn entry(color: &'static str, meaning: &'static str, style: Style) -> LegendEntry {
            LegendEntry {
                color,
                meaning,
                style,
            }
        }

        Self {
            entries: vec![
                entry(
                    "red",
                    "critical threats (priority 1), trojans",
                    Style::Priority(PriorityTier::Critical),
                ),
                entry(
                    "yellow",
                    "high risk (priority 2), exploits",
                    Style::Priority(PriorityTier::High),
                ),
                entry(
                    "magenta",
                    "malware, command and control activity",
                    Style::Classification(ClassificationStyle::Tier(ClassificationTier::Malware)),
                ),
                entry(
                    "blue",
                    "network scans",
                    Style::Classification(ClassificationStyle::Tier(ClassificationTier::Scan)),
                ),
                entry("green", "successful operations, statistics", Style::Success),
                entry("cyan", "informational messages (priority 3)", Style::Info),
            ],
        }
    }
}

impl Render for ColorLegend {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()> {
        writeln!(w)?;
        writeln!(w, "{}", theme.paint("COLOR SCHEME:", Style::Header))?;
        for entry in &self.entries {
            writeln!(
                w,
                "  {} - {}",
                theme.paint(format!("{:<8}", entry.color.to_uppercase()), entry.style),
                entry.meaning
            )?;
        }
        Ok(())
    }
}
