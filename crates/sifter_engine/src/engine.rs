use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::cleanup::remove_temp_file;
use crate::contract::resolve_output_contract;
use crate::export::{export_artifact, ExportTarget};
use crate::invoke::{InvokerSettings, ProcessInvoker};
use crate::locate::resolve_engine;
use crate::pipeline::run_parse;
use crate::{EngineConfig, EngineEvent, InvocationRequest, ParseFormat, ParsedArtifact};

enum EngineCommand {
    Parse {
        request: InvocationRequest,
    },
    Export {
        artifact: ParsedArtifact,
        format: ParseFormat,
        target: ExportTarget,
    },
    DeleteTemp(PathBuf),
}

/// Handle to the engine worker: a background thread owning a Tokio runtime.
/// Commands are processed in submission order, which is what guarantees a
/// queued temp-file deletion runs before the invocation that follows it.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(config: EngineConfig) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &config, command, &event_tx);
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn parse(&self, source_path: impl Into<PathBuf>, format: ParseFormat) {
        let _ = self.cmd_tx.send(EngineCommand::Parse {
            request: InvocationRequest {
                source_path: source_path.into(),
                format,
            },
        });
    }

    pub fn export(&self, artifact: ParsedArtifact, format: ParseFormat, target: ExportTarget) {
        let _ = self.cmd_tx.send(EngineCommand::Export {
            artifact,
            format,
            target,
        });
    }

    /// Fire-and-forget: deletion failures are logged by the worker, and no
    /// event is reported back.
    pub fn delete_temp(&self, path: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(EngineCommand::DeleteTemp(path.into()));
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    config: &EngineConfig,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Parse { request } => {
            let result = match resolve_engine(config) {
                Ok(plan) => {
                    let contract = resolve_output_contract(&request, config);
                    // The engine only writes the file; the scratch dir is ours
                    // to provide. Errors surface through the run itself.
                    if let Some(dir) = contract.path.parent() {
                        if let Err(err) = crate::persist::ensure_output_dir(dir) {
                            sifter_logging::engine_warn!(
                                "Could not prepare scratch dir {:?}: {}",
                                dir,
                                err
                            );
                        }
                    }
                    let invoker = ProcessInvoker::new(
                        plan,
                        InvokerSettings {
                            timeout: config.timeout,
                        },
                    );
                    runtime.block_on(run_parse(&invoker, &request, &contract))
                }
                Err(err) => Err(err),
            };
            let _ = event_tx.send(EngineEvent::ParseCompleted { result });
        }
        EngineCommand::Export {
            artifact,
            format,
            target,
        } => {
            let result = export_artifact(&artifact, format, &target);
            let _ = event_tx.send(EngineEvent::ExportCompleted { result });
        }
        EngineCommand::DeleteTemp(path) => remove_temp_file(&path),
    }
}
