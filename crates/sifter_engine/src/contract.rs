use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::{EngineConfig, InvocationRequest, OutputContract, RuntimeMode};

/// Process-wide sequence appended to every contract path, so two contracts
/// resolved within the same millisecond still never collide.
static CONTRACT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Derives the output contract for one invocation:
/// `<stem(source)>_parsed_<unix-millis>-<seq>.<ext>` in the scratch directory.
/// No side effects beyond the sequence counter.
pub fn resolve_output_contract(
    request: &InvocationRequest,
    config: &EngineConfig,
) -> OutputContract {
    let stem = request
        .source_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let timestamp = Utc::now().timestamp_millis();
    let seq = CONTRACT_SEQ.fetch_add(1, Ordering::Relaxed);
    let filename = format!(
        "{stem}_parsed_{timestamp}-{seq}.{}",
        request.format.extension()
    );

    OutputContract {
        path: scratch_dir(config).join(filename),
        format: request.format,
    }
}

fn scratch_dir(config: &EngineConfig) -> PathBuf {
    if let Some(dir) = &config.scratch_dir {
        return dir.clone();
    }
    match config.mode {
        RuntimeMode::Production => std::env::temp_dir(),
        RuntimeMode::Development => PathBuf::from("scratch"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use super::resolve_output_contract;
    use crate::{EngineConfig, InvocationRequest, ParseFormat, RuntimeMode};

    fn request(format: ParseFormat) -> InvocationRequest {
        InvocationRequest {
            source_path: PathBuf::from("/data/export.ndjson"),
            format,
        }
    }

    #[test]
    fn filename_carries_stem_marker_and_extension() {
        let config = EngineConfig::default();
        let contract = resolve_output_contract(&request(ParseFormat::Csv), &config);
        let name = contract.path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("export_parsed_"));
        assert!(name.ends_with(".csv"));

        let contract = resolve_output_contract(&request(ParseFormat::Json), &config);
        let name = contract.path.file_name().unwrap().to_string_lossy();
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn rapid_resolutions_never_collide() {
        let config = EngineConfig::default();
        let paths: HashSet<_> = (0..256)
            .map(|_| resolve_output_contract(&request(ParseFormat::Csv), &config).path)
            .collect();
        assert_eq!(paths.len(), 256);
    }

    #[test]
    fn scratch_dir_follows_mode_and_override() {
        let request = request(ParseFormat::Csv);

        let prod = EngineConfig::with_mode(RuntimeMode::Production);
        let contract = resolve_output_contract(&request, &prod);
        assert!(contract.path.starts_with(std::env::temp_dir()));

        let dev = EngineConfig::with_mode(RuntimeMode::Development);
        let contract = resolve_output_contract(&request, &dev);
        assert!(contract.path.starts_with("scratch"));

        let mut pinned = EngineConfig::default();
        pinned.scratch_dir = Some(PathBuf::from("/pinned"));
        let contract = resolve_output_contract(&request, &pinned);
        assert!(contract.path.starts_with("/pinned"));
    }
}
