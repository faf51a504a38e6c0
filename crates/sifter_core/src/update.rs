use std::path::Path;

use crate::{
    Effect, ExportOutcome, Msg, ParseResult, Session, SessionPhase, ACCEPTED_EXTENSIONS,
};

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut session: Session, msg: Msg) -> (Session, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(path) => {
            if session.phase == SessionPhase::Invoking {
                // At most one in-flight invocation per session; refuse, don't queue.
                session.last_error = Some("A parse is already in progress".to_string());
                session.mark_dirty();
                return (session, Vec::new());
            }
            if !has_accepted_extension(&path) {
                session.last_error = Some("Please select .ndjson or .json files".to_string());
                session.mark_dirty();
                return (session, Vec::new());
            }

            let mut effects = Vec::with_capacity(2);
            // Delete the previous output before the new invocation starts, so
            // the scratch file is never contended between two invocations.
            if let Some(prev) = session.pending_temp_file.take() {
                effects.push(Effect::DeleteTempFile(prev));
            }

            session.source_file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            session.phase = SessionPhase::Invoking;
            session.active_result = None;
            session.last_error = None;
            session.export_note = None;
            session.mark_dirty();

            effects.push(Effect::StartParse {
                source_path: path,
                format: session.selected_format,
            });
            effects
        }
        Msg::FormatChanged(format) => {
            // Applies to the next invocation only; a held result keeps its format.
            session.selected_format = format;
            session.mark_dirty();
            Vec::new()
        }
        Msg::ParseSucceeded {
            payload,
            format,
            record_count,
            diagnostic_log,
            output_path,
        } => {
            session.pending_temp_file = Some(output_path.clone());
            session.active_result = Some(ParseResult::Success {
                payload,
                format,
                record_count,
                diagnostic_log,
                output_path,
            });
            session.selected_format = format;
            session.phase = SessionPhase::Succeeded;
            session.mark_dirty();
            Vec::new()
        }
        Msg::ParseFailed {
            message,
            diagnostic_log,
        } => {
            // pending_temp_file stays as-is: no new durable artifact was
            // produced, and any leftover is deleted before the next invocation.
            session.active_result = Some(ParseResult::Failure {
                message,
                diagnostic_log,
            });
            session.phase = SessionPhase::Failed;
            session.mark_dirty();
            Vec::new()
        }
        Msg::ExportRequested(destination) => {
            let held = match &session.active_result {
                Some(ParseResult::Success {
                    payload, format, ..
                }) if session.phase == SessionPhase::Succeeded => {
                    Some((payload.clone(), *format))
                }
                _ => None,
            };
            match held {
                Some((payload, format)) => vec![Effect::ExportResult {
                    payload,
                    format,
                    destination,
                    suggested_name: suggested_export_name(
                        session.source_file_name.as_deref(),
                        format,
                    ),
                }],
                None => {
                    session.last_error = Some("Nothing to export yet".to_string());
                    session.mark_dirty();
                    Vec::new()
                }
            }
        }
        Msg::ExportFinished(outcome) => {
            match outcome {
                ExportOutcome::Saved(path) => {
                    session.export_note = Some(format!("File saved to: {}", path.display()));
                }
                ExportOutcome::Copied => {
                    session.export_note = Some("Copied to clipboard".to_string());
                }
                ExportOutcome::Cancelled => {
                    session.export_note = Some("Save cancelled".to_string());
                }
                ExportOutcome::Failed(message) => {
                    session.last_error = Some(format!("Export failed: {message}"));
                }
            }
            session.mark_dirty();
            Vec::new()
        }
        Msg::SessionClosing => {
            if let Some(prev) = session.pending_temp_file.take() {
                vec![Effect::DeleteTempFile(prev)]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (session, effects)
}

fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Suggested export filename: `<source stem>_parsed.<ext>`.
fn suggested_export_name(source_file_name: Option<&str>, format: crate::ParseFormat) -> String {
    let base = source_file_name
        .map(strip_source_extension)
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| "parsed_output".to_string());
    format!("{base}_parsed.{}", format.extension())
}

fn strip_source_extension(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    for ext in ACCEPTED_EXTENSIONS {
        if let Some(stripped_len) = lower
            .strip_suffix(&format!(".{ext}"))
            .map(|stripped| stripped.len())
        {
            return name[..stripped_len].to_string();
        }
    }
    name.to_string()
}
