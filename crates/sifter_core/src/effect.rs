use std::path::PathBuf;

use crate::{ExportDestination, ParseFormat, ParsedPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Best-effort deletion of a leftover engine output file. Failures are
    /// logged by the runner and never reported back.
    DeleteTempFile(PathBuf),
    /// Launch the external engine against `source_path`.
    StartParse {
        source_path: PathBuf,
        format: ParseFormat,
    },
    /// Serialize and persist/copy the held result.
    ExportResult {
        payload: ParsedPayload,
        format: ParseFormat,
        destination: ExportDestination,
        suggested_name: String,
    },
}
