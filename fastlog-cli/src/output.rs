//! Output formatting abstraction for text vs JSON rendering
//!
//! Subcommand reports flow through [`OutputWriter`] which handles format switching.
//! This keeps format-specific logic out of command handlers.

use std::io::Write;

use serde::Serialize;

use crate::cli::ReportFormat;
use crate::error::CliError;
use crate::theme::{Style, Theme};

/// Width of section rules in the text report.
pub const RULE_WIDTH: usize = 80;

/// Abstraction for writing CLI output in different formats.
///
/// Handlers call `writer.render(&payload)` where `payload`
/// implements both `Serialize` (for JSON) and `Render` (for text).
pub struct OutputWriter {
    format: ReportFormat,
    theme: Theme,
}

impl OutputWriter {
    /// Create a new output writer with the specified format and theme.
    pub fn new(format: ReportFormat, theme: Theme) -> Self {
        Self { format, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// True when text sections should be written.
    pub fn is_text(&self) -> bool {
        self.format == ReportFormat::Text
    }

    /// Render a payload to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.render_to(payload, &mut handle)
    }

    /// Render a payload to the given writer.
    ///
    /// For `Text` format, delegates to `Render::render_text()`.
    /// For `Json` format, serialises via `serde_json`.
    pub fn render_to<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self.format {
            ReportFormat::Text => payload.render_text(w, &self.theme)?,
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Trait for human-readable text rendering.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()>;
}

/// Write a titled section header framed by `=` rules.
pub fn section_header(w: &mut dyn Write, theme: &Theme, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(w)?;
    writeln!(w, "{}", theme.paint(&rule, Style::Header))?;
    writeln!(
        w,
        "{}",
        theme.paint(format!("{title:^width$}", width = RULE_WIDTH), Style::Header)
    )?;
    writeln!(w, "{}", theme.paint(&rule, Style::Header))
}
