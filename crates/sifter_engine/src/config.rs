use std::path::PathBuf;
use std::time::Duration;

/// Selects the engine-resolution strategy and the scratch directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    /// Prefer the packaged native engine binary; scratch in the platform temp dir.
    #[default]
    Production,
    /// Prefer the interpreter + bundled script; scratch in `./scratch`.
    Development,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub mode: RuntimeMode,
    /// Directory holding the packaged binary and the bundled script.
    pub resource_dir: PathBuf,
    /// Interpreter used for the script fallback.
    pub interpreter: String,
    /// Bounded wait for one engine run; the child is killed on expiry.
    pub timeout: Duration,
    /// Overrides the mode-derived scratch directory when set.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: RuntimeMode::default(),
            resource_dir: PathBuf::from("resources"),
            interpreter: "python3".to_string(),
            timeout: Duration::from_secs(120),
            scratch_dir: None,
        }
    }
}

impl EngineConfig {
    pub fn with_mode(mode: RuntimeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
