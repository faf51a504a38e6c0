//! Sifter engine: external-process invocation pipeline and effect execution.
mod cleanup;
mod config;
mod contract;
mod engine;
mod export;
mod format;
mod invoke;
mod locate;
mod materialize;
mod persist;
mod pipeline;
mod types;

pub use cleanup::remove_temp_file;
pub use config::{EngineConfig, RuntimeMode};
pub use contract::resolve_output_contract;
pub use engine::EngineHandle;
pub use export::{export_artifact, ExportError, ExportReceipt, ExportTarget};
pub use format::{codec_for, FormatCodec, MaterializeError};
pub use invoke::{classify_exit, EngineInvoker, InvokerSettings, ProcessInvoker};
pub use locate::{resolve_engine, LaunchPlan};
pub use materialize::materialize;
pub use pipeline::run_parse;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, InvocationRequest, OutputContract, ParseError, ParseFormat,
    ParseOutput, ParsedArtifact, ProcessOutcome,
};
