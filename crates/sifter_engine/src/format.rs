use std::fs;
use std::path::Path;

use crate::{ParseFormat, ParsedArtifact};

#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-format behaviour, selected once by `codec_for` instead of branching on
/// the format at every use site.
pub struct FormatCodec {
    pub extension: &'static str,
    /// Reads the engine's declared output file into an artifact.
    pub materialize: fn(&Path) -> Result<ParsedArtifact, MaterializeError>,
    /// Serializes an artifact for preview/export.
    pub render: fn(&ParsedArtifact) -> String,
    pub count_records: fn(&ParsedArtifact) -> usize,
}

static CSV_CODEC: FormatCodec = FormatCodec {
    extension: "csv",
    materialize: materialize_csv,
    render: render_artifact,
    count_records: count_csv_records,
};

static JSON_CODEC: FormatCodec = FormatCodec {
    extension: "json",
    materialize: materialize_json,
    render: render_artifact,
    count_records: count_json_records,
};

pub fn codec_for(format: ParseFormat) -> &'static FormatCodec {
    match format {
        ParseFormat::Csv => &CSV_CODEC,
        ParseFormat::Json => &JSON_CODEC,
    }
}

fn materialize_csv(path: &Path) -> Result<ParsedArtifact, MaterializeError> {
    Ok(ParsedArtifact::Csv(fs::read_to_string(path)?))
}

fn materialize_json(path: &Path) -> Result<ParsedArtifact, MaterializeError> {
    let text = fs::read_to_string(path)?;
    Ok(ParsedArtifact::Json(serde_json::from_str(&text)?))
}

/// CSV is a raw passthrough of the engine's text; JSON is pretty-printed.
fn render_artifact(artifact: &ParsedArtifact) -> String {
    match artifact {
        ParsedArtifact::Csv(text) => text.clone(),
        ParsedArtifact::Json(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Non-blank line count minus the header, so a trailing blank line from the
/// engine never inflates the count.
fn count_csv_records(artifact: &ParsedArtifact) -> usize {
    match artifact {
        ParsedArtifact::Csv(text) => text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count()
            .saturating_sub(1),
        ParsedArtifact::Json(value) => count_json(value),
    }
}

fn count_json_records(artifact: &ParsedArtifact) -> usize {
    match artifact {
        ParsedArtifact::Json(value) => count_json(value),
        ParsedArtifact::Csv(_) => count_csv_records(artifact),
    }
}

/// Sequence length, or 1 for a single object/scalar.
fn count_json(value: &serde_json::Value) -> usize {
    match value {
        serde_json::Value::Array(items) => items.len(),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::codec_for;
    use crate::{ParseFormat, ParsedArtifact};

    #[test]
    fn csv_record_count_excludes_header_and_trailing_blank() {
        let codec = codec_for(ParseFormat::Csv);
        let artifact = ParsedArtifact::Csv("a,b\n1,2\n3,4\n".to_string());
        assert_eq!((codec.count_records)(&artifact), 2);

        let header_only = ParsedArtifact::Csv("a,b\n".to_string());
        assert_eq!((codec.count_records)(&header_only), 0);

        let empty = ParsedArtifact::Csv(String::new());
        assert_eq!((codec.count_records)(&empty), 0);
    }

    #[test]
    fn json_record_count_is_sequence_length_or_one() {
        let codec = codec_for(ParseFormat::Json);
        let array = ParsedArtifact::Json(serde_json::json!([{"a": 1}, {"a": 2}, {"a": 3}]));
        assert_eq!((codec.count_records)(&array), 3);

        let object = ParsedArtifact::Json(serde_json::json!({"a": 1}));
        assert_eq!((codec.count_records)(&object), 1);
    }

    #[test]
    fn csv_render_is_raw_passthrough() {
        let codec = codec_for(ParseFormat::Csv);
        let artifact = ParsedArtifact::Csv("a,b\n1,2\n".to_string());
        assert_eq!((codec.render)(&artifact), "a,b\n1,2\n");
    }

    #[test]
    fn json_render_is_pretty_printed() {
        let codec = codec_for(ParseFormat::Json);
        let artifact = ParsedArtifact::Json(serde_json::json!([1, 2]));
        assert_eq!((codec.render)(&artifact), "[\n  1,\n  2\n]");
    }
}
