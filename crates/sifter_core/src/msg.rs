use std::path::PathBuf;

use crate::{ExportDestination, ExportOutcome, ParseFormat, ParsedPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a source file (file dialog or drag-and-drop).
    FileChosen(PathBuf),
    /// User switched the output format for the next invocation.
    FormatChanged(ParseFormat),
    /// Engine pipeline finished and materialized an artifact.
    ParseSucceeded {
        payload: ParsedPayload,
        format: ParseFormat,
        record_count: usize,
        diagnostic_log: String,
        output_path: PathBuf,
    },
    /// Engine pipeline failed anywhere between launch and materialization.
    ParseFailed {
        message: String,
        diagnostic_log: String,
    },
    /// User asked to export the held result.
    ExportRequested(ExportDestination),
    /// Effect runner (or a cancelled destination chooser) reported the export outcome.
    ExportFinished(ExportOutcome),
    /// Window is closing; last chance for temp-file cleanup.
    SessionClosing,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
