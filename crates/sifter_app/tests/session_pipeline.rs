//! Drives the session state machine against a scripted engine double,
//! executing `StartParse` effects through the real pipeline.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use sifter_core::{update, Effect, Msg, Session, SessionPhase};
use sifter_engine::{
    classify_exit, remove_temp_file, run_parse, EngineInvoker, InvocationRequest, OutputContract,
    ParseError, ProcessOutcome,
};

struct ScriptedEngine {
    exit_code: i32,
    stderr: &'static str,
    output: Option<&'static str>,
    invocations: AtomicUsize,
}

impl ScriptedEngine {
    fn new(exit_code: i32, stderr: &'static str, output: Option<&'static str>) -> Self {
        Self {
            exit_code,
            stderr,
            output,
            invocations: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl EngineInvoker for ScriptedEngine {
    async fn invoke(
        &self,
        _request: &InvocationRequest,
        contract: &OutputContract,
    ) -> Result<ProcessOutcome, ParseError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if let Some(content) = self.output {
            std::fs::write(&contract.path, content).unwrap();
        }
        classify_exit(self.exit_code, String::new(), self.stderr.to_string())
    }
}

fn map_format(format: sifter_core::ParseFormat) -> sifter_engine::ParseFormat {
    match format {
        sifter_core::ParseFormat::Csv => sifter_engine::ParseFormat::Csv,
        sifter_core::ParseFormat::Json => sifter_engine::ParseFormat::Json,
    }
}

fn map_artifact(artifact: sifter_engine::ParsedArtifact) -> sifter_core::ParsedPayload {
    match artifact {
        sifter_engine::ParsedArtifact::Csv(text) => sifter_core::ParsedPayload::Csv(text),
        sifter_engine::ParsedArtifact::Json(value) => sifter_core::ParsedPayload::Json(value),
    }
}

/// Executes the session's effects the way the shell's effect runner would,
/// but synchronously and against the scripted engine.
async fn settle_effects(
    session: Session,
    effects: Vec<Effect>,
    engine: &ScriptedEngine,
    scratch: &tempfile::TempDir,
) -> Session {
    let mut session = session;
    for effect in effects {
        match effect {
            Effect::DeleteTempFile(path) => remove_temp_file(&path),
            Effect::StartParse {
                source_path,
                format,
            } => {
                let format = map_format(format);
                let request = InvocationRequest {
                    source_path,
                    format,
                };
                let contract = OutputContract {
                    path: scratch
                        .path()
                        .join(format!("out_{}.{}", engine.invocations.load(Ordering::SeqCst), format.extension())),
                    format,
                };
                let msg = match run_parse(engine, &request, &contract).await {
                    Ok(output) => Msg::ParseSucceeded {
                        payload: map_artifact(output.artifact),
                        format: match output.format {
                            sifter_engine::ParseFormat::Csv => sifter_core::ParseFormat::Csv,
                            sifter_engine::ParseFormat::Json => sifter_core::ParseFormat::Json,
                        },
                        record_count: output.record_count,
                        diagnostic_log: output.diagnostic_log,
                        output_path: output.output_path,
                    },
                    Err(err) => Msg::ParseFailed {
                        message: err.message,
                        diagnostic_log: err.diagnostic_log,
                    },
                };
                let (next, more) = update(session, msg);
                assert!(more.is_empty());
                session = next;
            }
            Effect::ExportResult { .. } => panic!("no export expected in these tests"),
        }
    }
    session
}

#[tokio::test]
async fn accepted_file_passes_through_invoking_to_succeeded() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(0, "parsed 2 rows\n", Some("a,b\n1,2\n3,4\n"));

    let session = Session::new();
    let (session, effects) = update(session, Msg::FileChosen(PathBuf::from("/data/in.json")));
    // Invoking is always entered before any terminal phase.
    assert_eq!(session.phase(), SessionPhase::Invoking);

    let session = settle_effects(session, effects, &engine, &scratch).await;

    assert_eq!(session.phase(), SessionPhase::Succeeded);
    assert_eq!(session.view().record_count, Some(2));
    assert_eq!(engine.invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_extension_never_reaches_the_invoker() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(0, "", Some("a,b\n"));

    let session = Session::new();
    let (session, effects) = update(session, Msg::FileChosen(PathBuf::from("/data/in.txt")));
    let session = settle_effects(session, effects, &engine, &scratch).await;

    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(engine.invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn broken_output_contract_settles_in_failed() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(0, "", None);

    let session = Session::new();
    let (session, effects) = update(session, Msg::FileChosen(PathBuf::from("/data/in.json")));
    let session = settle_effects(session, effects, &engine, &scratch).await;

    assert_eq!(session.phase(), SessionPhase::Failed);
    assert!(session
        .view()
        .error
        .unwrap()
        .contains("Failed to read output"));
}

#[tokio::test]
async fn engine_failure_surfaces_exit_code_and_log() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(2, "bad input", None);

    let session = Session::new();
    let (session, effects) = update(session, Msg::FileChosen(PathBuf::from("/data/in.json")));
    let session = settle_effects(session, effects, &engine, &scratch).await;

    assert_eq!(session.phase(), SessionPhase::Failed);
    let view = session.view();
    assert!(view.error.unwrap().contains("code 2"));
    assert!(view.diagnostic_log.unwrap().contains("bad input"));
}

#[tokio::test]
async fn reselecting_deletes_the_previous_output_file() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(0, "", Some("a,b\n1,2\n"));

    let session = Session::new();
    let (session, effects) = update(session, Msg::FileChosen(PathBuf::from("/data/in.json")));
    let session = settle_effects(session, effects, &engine, &scratch).await;
    let first_output = session.pending_temp_file().unwrap().to_path_buf();
    assert!(first_output.exists());

    let (session, effects) = update(session, Msg::FileChosen(PathBuf::from("/data/in.json")));
    let session = settle_effects(session, effects, &engine, &scratch).await;

    assert!(!first_output.exists());
    assert_ne!(session.pending_temp_file().unwrap(), first_output);
}
