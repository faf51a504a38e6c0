use std::path::{Path, PathBuf};

use crate::view_model::SessionViewModel;

/// File extensions the session accepts for parsing (matched case-insensitively).
pub const ACCEPTED_EXTENSIONS: &[&str] = &["json", "ndjson"];

/// Output format requested from the external engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseFormat {
    #[default]
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

    /// Human-facing name used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            ParseFormat::Csv => "CSV",
            ParseFormat::Json => "JSON",
        }
    }
}

/// Lifecycle phase of the session: Idle -> Invoking -> Succeeded/Failed -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Invoking,
    Succeeded,
    Failed,
}

/// The materialized artifact, shaped by the format it was requested in.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPayload {
    /// Raw CSV text; first line is the header row.
    Csv(String),
    /// Deserialized JSON value (object or array).
    Json(serde_json::Value),
}

/// Terminal outcome of one parse invocation. At most one is live per session.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Success {
        payload: ParsedPayload,
        format: ParseFormat,
        record_count: usize,
        diagnostic_log: String,
        output_path: PathBuf,
    },
    Failure {
        message: String,
        diagnostic_log: String,
    },
}

/// Where an export should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    File(PathBuf),
    Clipboard,
}

/// Result of an export attempt, reported back by the effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Copied,
    /// User dismissed the destination chooser; a no-op, not an error.
    Cancelled,
    Failed(String),
}

/// Session state for one window instance. Mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub(crate) phase: SessionPhase,
    pub(crate) active_result: Option<ParseResult>,
    pub(crate) pending_temp_file: Option<PathBuf>,
    pub(crate) source_file_name: Option<String>,
    pub(crate) selected_format: ParseFormat,
    pub(crate) last_error: Option<String>,
    pub(crate) export_note: Option<String>,
    pub(crate) dirty: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selected_format(&self) -> ParseFormat {
        self.selected_format
    }

    /// The sole source of truth for what must be deleted before the next
    /// invocation or on teardown.
    pub fn pending_temp_file(&self) -> Option<&Path> {
        self.pending_temp_file.as_deref()
    }

    pub fn active_result(&self) -> Option<&ParseResult> {
        self.active_result.as_ref()
    }

    pub fn view(&self) -> SessionViewModel {
        SessionViewModel::project(self)
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
