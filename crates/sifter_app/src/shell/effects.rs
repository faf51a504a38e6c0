use sifter_core::{Effect, ExportOutcome, Msg};
use sifter_engine::{EngineEvent, EngineHandle, ExportReceipt, ExportTarget};
use sifter_logging::engine_info;

/// Executes core effects against the engine handle. Effects are forwarded in
/// order, which preserves the delete-before-invoke ordering the session emits.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DeleteTempFile(path) => {
                    engine_info!("Scheduling temp-file deletion of {:?}", path);
                    self.engine.delete_temp(path);
                }
                Effect::StartParse {
                    source_path,
                    format,
                } => {
                    engine_info!("StartParse source={:?} format={}", source_path, format.label());
                    self.engine.parse(source_path, map_format(format));
                }
                Effect::ExportResult {
                    payload,
                    format,
                    destination,
                    suggested_name,
                } => {
                    let target = map_destination(destination, &suggested_name);
                    self.engine
                        .export(map_payload(payload), map_format(format), target);
                }
            }
        }
    }
}

/// Maps an engine event into the session message it settles.
pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ParseCompleted { result } => match result {
            Ok(output) => Msg::ParseSucceeded {
                payload: map_artifact(output.artifact),
                format: map_format_back(output.format),
                record_count: output.record_count,
                diagnostic_log: output.diagnostic_log,
                output_path: output.output_path,
            },
            Err(err) => Msg::ParseFailed {
                message: err.message,
                diagnostic_log: err.diagnostic_log,
            },
        },
        EngineEvent::ExportCompleted { result } => Msg::ExportFinished(match result {
            Ok(ExportReceipt::Saved(path)) => ExportOutcome::Saved(path),
            Ok(ExportReceipt::Copied) => ExportOutcome::Copied,
            Err(err) => ExportOutcome::Failed(err.to_string()),
        }),
    }
}

fn map_format(format: sifter_core::ParseFormat) -> sifter_engine::ParseFormat {
    match format {
        sifter_core::ParseFormat::Csv => sifter_engine::ParseFormat::Csv,
        sifter_core::ParseFormat::Json => sifter_engine::ParseFormat::Json,
    }
}

fn map_format_back(format: sifter_engine::ParseFormat) -> sifter_core::ParseFormat {
    match format {
        sifter_engine::ParseFormat::Csv => sifter_core::ParseFormat::Csv,
        sifter_engine::ParseFormat::Json => sifter_core::ParseFormat::Json,
    }
}

fn map_payload(payload: sifter_core::ParsedPayload) -> sifter_engine::ParsedArtifact {
    match payload {
        sifter_core::ParsedPayload::Csv(text) => sifter_engine::ParsedArtifact::Csv(text),
        sifter_core::ParsedPayload::Json(value) => sifter_engine::ParsedArtifact::Json(value),
    }
}

fn map_artifact(artifact: sifter_engine::ParsedArtifact) -> sifter_core::ParsedPayload {
    match artifact {
        sifter_engine::ParsedArtifact::Csv(text) => sifter_core::ParsedPayload::Csv(text),
        sifter_engine::ParsedArtifact::Json(value) => sifter_core::ParsedPayload::Json(value),
    }
}

/// A directory destination gets the session's suggested file name appended,
/// the way a save dialog would prefill it.
fn map_destination(
    destination: sifter_core::ExportDestination,
    suggested_name: &str,
) -> ExportTarget {
    match destination {
        sifter_core::ExportDestination::File(path) => {
            if path.is_dir() {
                ExportTarget::File(path.join(suggested_name))
            } else {
                ExportTarget::File(path)
            }
        }
        sifter_core::ExportDestination::Clipboard => ExportTarget::Clipboard,
    }
}
