use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::format::codec_for;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{ParseFormat, ParsedArtifact};

/// Where a held result should be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    File(PathBuf),
    Clipboard,
}

/// Confirmation of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportReceipt {
    Saved(PathBuf),
    Copied,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("destination has no file name: {0}")]
    BadDestination(PathBuf),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("clipboard error: {0}")]
    Clipboard(String),
}

/// Serializes the held artifact per its format and writes it to the target.
/// Never mutates the artifact; exporting the same result twice produces two
/// independent identical writes.
pub fn export_artifact(
    artifact: &ParsedArtifact,
    format: ParseFormat,
    target: &ExportTarget,
) -> Result<ExportReceipt, ExportError> {
    let text = (codec_for(format).render)(artifact);
    match target {
        ExportTarget::File(path) => save_to_file(path, &text),
        ExportTarget::Clipboard => copy_to_clipboard(&text),
    }
}

fn save_to_file(path: &Path, text: &str) -> Result<ExportReceipt, ExportError> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ExportError::BadDestination(path.to_path_buf()))?;
    let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    let writer = AtomicFileWriter::new(dir.unwrap_or_else(|| Path::new(".")).to_path_buf());
    let written = writer.write(&filename, text)?;
    Ok(ExportReceipt::Saved(written))
}

fn copy_to_clipboard(text: &str) -> Result<ExportReceipt, ExportError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|err| ExportError::Clipboard(err.to_string()))?;
    Ok(ExportReceipt::Copied)
}
