//! Usage: Small filesystem helpers shared across infra adapters (atomic writes, optional reads).

use std::path::{Path, PathBuf};

pub(crate) fn read_optional_file(path: &Path) -> Result<Option<Vec<u8>>, String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(format!("failed to read {}: {e}", path.display())),
    }
}

pub(crate) fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let tmp_path = stage_file(path, bytes)?;
    commit_staged(&tmp_path, path)
}

/// Writes `bytes` beside `path`. The target is untouched until [`commit_staged`].
fn stage_file(path: &Path, bytes: &[u8]) -> Result<PathBuf, String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create dir {}: {e}", parent.display()))?;
    }

    let file_name = path.file_name().and_then(|v| v.to_str()).unwrap_or("file");
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    std::fs::write(&tmp_path, bytes)
        .map_err(|e| format!("failed to write temp file {}: {e}", tmp_path.display()))?;
    Ok(tmp_path)
}

/// Renames the staged file over the target, which replaces an existing file in one step on
/// every desktop platform. The previous contents survive a failed rename.
fn commit_staged(tmp_path: &Path, path: &Path) -> Result<(), String> {
    if let Err(e) = std::fs::rename(tmp_path, path) {
        let _ = std::fs::remove_file(tmp_path);
        return Err(format!("failed to finalize file {}: {e}", path.display()));
    }
    Ok(())
}
