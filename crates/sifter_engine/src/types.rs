use std::fmt;
use std::path::PathBuf;

use crate::export::{ExportError, ExportReceipt};

/// Output format the engine is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFormat {
    Csv,
    Json,
}

impl ParseFormat {
    /// File extension for artifacts in this format.
    pub fn extension(self) -> &'static str {
        match self {
            ParseFormat::Csv => "csv",
            ParseFormat::Json => "json",
        }
    }

    /// Value passed to the engine's `--format` flag.
    pub fn as_arg(self) -> &'static str {
        self.extension()
    }
}

/// One user-initiated parse. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub source_path: PathBuf,
    pub format: ParseFormat,
}

/// The path and format the engine must produce. One contract per invocation;
/// paths are unique across invocations (see `contract::resolve_output_contract`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputContract {
    pub path: PathBuf,
    pub format: ParseFormat,
}

/// Terminal observation of one engine process. Discarded after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// The materialized artifact read back from the output contract path.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedArtifact {
    /// Raw CSV text; first line is the header row.
    Csv(String),
    /// Deserialized JSON value (object or array).
    Json(serde_json::Value),
}

/// Successful pipeline result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub artifact: ParsedArtifact,
    pub format: ParseFormat,
    pub record_count: usize,
    /// Engine stderr accumulated over the run.
    pub diagnostic_log: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Executable/script unresolvable or unspawnable; no diagnostics exist yet.
    Launch,
    /// Engine exited nonzero.
    Execution { exit_code: i32 },
    /// Engine exited zero but its declared output was unreadable or unparsable.
    Materialization,
    /// Engine exceeded the bounded wait and was killed.
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Launch => write!(f, "launch failure"),
            FailureKind::Execution { exit_code } => {
                write!(f, "execution failure (exit code {exit_code})")
            }
            FailureKind::Materialization => write!(f, "materialization failure"),
            FailureKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// Uniform failure for the invocation path, carrying whatever diagnostics the
/// engine produced before failing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: FailureKind,
    pub message: String,
    pub diagnostic_log: String,
}

impl ParseError {
    pub(crate) fn new(
        kind: FailureKind,
        message: impl Into<String>,
        diagnostic_log: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            diagnostic_log: diagnostic_log.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Events reported by the engine handle. Temp-file cleanup emits no event.
#[derive(Debug)]
pub enum EngineEvent {
    ParseCompleted {
        result: Result<ParseOutput, ParseError>,
    },
    ExportCompleted {
        result: Result<ExportReceipt, ExportError>,
    },
}
