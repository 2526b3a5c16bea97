//! `fastlog config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use fastlog_core::config::FastlogConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::theme::{Style, Theme};

/// Section names accepted by `config show --section`.
const SECTIONS: [&str; 4] = ["general", "input", "export", "display"];

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    explicit: bool,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, explicit, writer).await,
        ConfigAction::Show { section } => {
            execute_show(config_path, explicit, section, writer).await
        }
    }
}

/// Load and validate the configuration, reporting any errors.
///
/// A missing default `fastlog.toml` is valid (defaults apply); a missing
/// file given with `--config` is not.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails.
async fn execute_validate(
    config_path: &Path,
    explicit: bool,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match FastlogConfig::load_or_default(config_path, explicit).await {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Show the effective configuration (file + env overrides + defaults).
///
/// # Errors
///
/// Returns `CliError::Core` if loading fails or `CliError::Command` if the
/// section name is unknown.
async fn execute_show(
    config_path: &Path,
    explicit: bool,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = FastlogConfig::load_or_default(config_path, explicit).await?;
    let report = ConfigReport::build(config_path, &config, section)?;
    writer.render(&report)
}

/// Configuration display report.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Effective values
    pub values: serde_json::Value,
    /// Serialized TOML configuration (text rendering only)
    #[serde(skip)]
    pub config_toml: String,
}

impl ConfigReport {
    fn build(
        config_path: &Path,
        config: &FastlogConfig,
        section: Option<String>,
    ) -> Result<Self, CliError> {
        let (values, config_toml) = match section.as_deref() {
            None => section_values(config)?,
            Some("general") => section_values(&config.general)?,
            Some("input") => section_values(&config.input)?,
            Some("export") => section_values(&config.export)?,
            Some("display") => section_values(&config.display)?,
            Some(other) => {
                return Err(CliError::Command(format!(
                    "unknown section: {other} (expected: {})",
                    SECTIONS.join(", ")
                )));
            }
        };

        Ok(Self {
            source: config_path.display().to_string(),
            section,
            values,
            config_toml,
        })
    }
}

fn section_values<T: Serialize>(value: &T) -> Result<(serde_json::Value, String), CliError> {
    let toml = toml::to_string_pretty(value)
        .map_err(|e| CliError::Internal(format!("failed to serialize configuration: {e}")))?;
    Ok((serde_json::to_value(value)?, toml))
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()> {
        if let Some(ref section) = self.section {
            writeln!(
                w,
                "Configuration {} (source: {})",
                theme.paint(format!("[{section}]"), Style::Strong),
                self.source
            )?;
        } else {
            writeln!(
                w,
                "Configuration (source: {})",
                theme.paint(&self.source, Style::Strong)
            )?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write, theme: &Theme) -> std::io::Result<()> {
        writeln!(w, "Config Validation: {}", theme.paint(&self.source, Style::Strong))?;

        if self.valid {
            writeln!(w, "  Result: {}", theme.paint("VALID", Style::Success))?;
        } else {
            writeln!(w, "  Result: {}", theme.paint("INVALID", Style::Error))?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", theme.paint(err, Style::Error))?;
            }
        }

        Ok(())
    }
}
