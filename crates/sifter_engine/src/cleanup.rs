use std::fs;
use std::io;
use std::path::Path;

use sifter_logging::{engine_debug, engine_warn};

/// Best-effort deletion of a leftover engine output file. A missing file
/// counts as already clean; any other failure is logged and swallowed, and
/// never blocks subsequent operations.
pub fn remove_temp_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => engine_debug!("Removed temp file {:?}", path),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => engine_warn!("Failed to remove temp file {:?}: {}", path, err),
    }
}

#[cfg(test)]
mod tests {
    use super::remove_temp_file;

    #[test]
    fn removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leftover.csv");
        std::fs::write(&path, "a,b\n").unwrap();

        remove_temp_file(&path);
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_silently_clean() {
        let dir = tempfile::tempdir().unwrap();
        remove_temp_file(&dir.path().join("never_existed.csv"));
    }
}
