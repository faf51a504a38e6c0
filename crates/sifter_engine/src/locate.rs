use std::path::{Path, PathBuf};

use crate::{EngineConfig, FailureKind, ParseError, RuntimeMode};

const PACKAGED_BINARY: &str = if cfg!(windows) {
    "sifter-engine.exe"
} else {
    "sifter-engine"
};
const BUNDLED_SCRIPT: &str = "engine/main.py";

/// A resolved way to start the engine: the program plus any arguments that
/// come before the invocation arguments (the bundled script, if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub prelude_args: Vec<PathBuf>,
}

impl LaunchPlan {
    fn packaged(binary: PathBuf) -> Self {
        Self {
            program: binary,
            prelude_args: Vec::new(),
        }
    }

    fn scripted(interpreter: &str, script: PathBuf) -> Self {
        Self {
            program: PathBuf::from(interpreter),
            prelude_args: vec![script],
        }
    }
}

/// Resolves the engine by the mode-ordered fallback chain: packaged binary,
/// then interpreter + bundled script. Fails without spawning anything when
/// neither exists on disk.
pub fn resolve_engine(config: &EngineConfig) -> Result<LaunchPlan, ParseError> {
    let binary = config.resource_dir.join(PACKAGED_BINARY);
    let script = config.resource_dir.join(BUNDLED_SCRIPT);

    let packaged = plan_if_present(&binary, || LaunchPlan::packaged(binary.clone()));
    let scripted = plan_if_present(&script, || {
        LaunchPlan::scripted(&config.interpreter, script.clone())
    });

    let ordered = match config.mode {
        RuntimeMode::Production => [packaged, scripted],
        RuntimeMode::Development => [scripted, packaged],
    };

    ordered.into_iter().flatten().next().ok_or_else(|| {
        ParseError::new(
            FailureKind::Launch,
            format!(
                "no engine available under {} (looked for {PACKAGED_BINARY} and {BUNDLED_SCRIPT})",
                config.resource_dir.display()
            ),
            String::new(),
        )
    })
}

fn plan_if_present(path: &Path, build: impl FnOnce() -> LaunchPlan) -> Option<LaunchPlan> {
    path.is_file().then(build)
}
