//! CLI-specific error types and exit code mapping

use fastlog_core::error::FastlogError;
use fastlog_pipeline::PipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input file could not be read or decoded.
    #[error("input error: {0}")]
    Input(String),

    /// Export file could not be written.
    #[error("export error: {0}")]
    Export(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, terminal prompt, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from fastlog-core.
    #[error("{0}")]
    Core(#[from] FastlogError),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                       |
    /// |------|-----------------------------------------------|
    /// | 1    | Input, decoding, export or configuration error |
    /// | 3    | Unexpected internal error                      |
    ///
    /// Codes 0 and 2 are produced by successful runs (see `main`).
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_)
            | Self::Input(_)
            | Self::Export(_)
            | Self::Command(_)
            | Self::Io(_)
            | Self::Core(_) => 1,
            Self::JsonSerialize(_) | Self::Internal(_) => 3,
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InputNotFound { .. }
            | PipelineError::Decode { .. }
            | PipelineError::Io(_) => Self::Input(e.to_string()),
            PipelineError::PermissionDenied { .. }
            | PipelineError::Export { .. }
            | PipelineError::Csv(_)
            | PipelineError::Json(_) => Self::Export(e.to_string()),
            PipelineError::UnsupportedEncoding(_) | PipelineError::UnsupportedExportFormat(_) => {
                Self::Config(e.to_string())
            }
            PipelineError::Regex(_) => Self::Internal(e.to_string()),
        }
    }
}
