use crate::{ParseFormat, ParseResult, ParsedPayload, Session, SessionPhase};

/// CSV preview shows the header plus the first three records.
pub const CSV_PREVIEW_LINES: usize = 4;
/// JSON preview shows at most the first three array items.
pub const JSON_PREVIEW_ITEMS: usize = 3;

/// Read-only projection of the session for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionViewModel {
    pub phase: SessionPhase,
    pub source_file_name: Option<String>,
    pub selected_format: ParseFormat,
    pub record_count: Option<usize>,
    pub preview: Option<String>,
    pub diagnostic_log: Option<String>,
    pub error: Option<String>,
    pub export_note: Option<String>,
    pub can_export: bool,
    pub dirty: bool,
}

impl SessionViewModel {
    pub(crate) fn project(session: &Session) -> Self {
        let mut view = Self {
            phase: session.phase,
            source_file_name: session.source_file_name.clone(),
            selected_format: session.selected_format,
            export_note: session.export_note.clone(),
            error: session.last_error.clone(),
            dirty: session.dirty,
            ..Self::default()
        };

        match &session.active_result {
            Some(ParseResult::Success {
                payload,
                record_count,
                diagnostic_log,
                ..
            }) => {
                view.record_count = Some(*record_count);
                view.preview = Some(preview_of(payload));
                if !diagnostic_log.is_empty() {
                    view.diagnostic_log = Some(diagnostic_log.clone());
                }
                view.can_export = session.phase == SessionPhase::Succeeded;
            }
            Some(ParseResult::Failure {
                message,
                diagnostic_log,
            }) => {
                if !diagnostic_log.is_empty() {
                    view.diagnostic_log = Some(diagnostic_log.clone());
                }
                if view.error.is_none() {
                    view.error = Some(message.clone());
                }
            }
            None => {}
        }

        view
    }
}

/// Short preview of a materialized artifact, per format.
pub fn preview_of(payload: &ParsedPayload) -> String {
    match payload {
        ParsedPayload::Csv(text) => text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(CSV_PREVIEW_LINES)
            .collect::<Vec<_>>()
            .join("\n"),
        ParsedPayload::Json(value) => {
            let head = match value {
                serde_json::Value::Array(items) => serde_json::Value::Array(
                    items.iter().take(JSON_PREVIEW_ITEMS).cloned().collect(),
                ),
                other => serde_json::Value::Array(vec![other.clone()]),
            };
            serde_json::to_string_pretty(&head).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{preview_of, CSV_PREVIEW_LINES};
    use crate::ParsedPayload;

    #[test]
    fn csv_preview_keeps_header_and_first_records() {
        let text = "a,b\n1,2\n3,4\n5,6\n7,8\n".to_string();
        let preview = preview_of(&ParsedPayload::Csv(text));
        assert_eq!(preview.lines().count(), CSV_PREVIEW_LINES);
        assert!(preview.starts_with("a,b"));
        assert!(!preview.contains("7,8"));
    }

    #[test]
    fn csv_preview_skips_blank_lines() {
        let text = "a,b\n\n1,2\n".to_string();
        let preview = preview_of(&ParsedPayload::Csv(text));
        assert_eq!(preview, "a,b\n1,2");
    }

    #[test]
    fn json_preview_truncates_to_first_items() {
        let value = serde_json::json!([{"a": 1}, {"a": 2}, {"a": 3}, {"a": 4}]);
        let preview = preview_of(&ParsedPayload::Json(value));
        assert!(preview.contains("\"a\": 3"));
        assert!(!preview.contains("\"a\": 4"));
    }

    #[test]
    fn json_preview_wraps_scalar_value() {
        let value = serde_json::json!({"only": true});
        let preview = preview_of(&ParsedPayload::Json(value));
        assert!(preview.starts_with('['));
        assert!(preview.contains("\"only\": true"));
    }
}
