//! Usage: Resolve the settings file location and per-user app directories.

use std::path::{Path, PathBuf};
use tauri::Manager;

pub const SETTINGS_FILE_NAME: &str = "config.json";
const SETTINGS_PATH_ENV: &str = "FRIGATE_DESKTOP_CONFIG";
const WEBVIEW_PARTITION: &str = "frigate";

fn settings_path_from(override_value: Option<String>, working_dir: &Path) -> PathBuf {
    let override_path = override_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    match override_path {
        Some(path) if path.is_absolute() => path,
        Some(path) => working_dir.join(path),
        None => working_dir.join(SETTINGS_FILE_NAME),
    }
}

/// `config.json` next to the process working directory, unless `FRIGATE_DESKTOP_CONFIG` points
/// elsewhere.
pub fn settings_path() -> PathBuf {
    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    settings_path_from(std::env::var(SETTINGS_PATH_ENV).ok(), &working_dir)
}

/// Persistent storage for the dashboard webview (cookies, local storage).
pub fn webview_data_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| format!("failed to resolve app data dir: {e}"))?;

    let dir = data_dir.join("webview").join(WEBVIEW_PARTITION);
    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create webview dir: {e}"))?;

    Ok(dir)
}

pub fn log_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let dir = app
        .path()
        .app_log_dir()
        .map_err(|e| format!("failed to resolve log dir: {e}"))?;
    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create log dir: {e}"))?;

    Ok(dir)
}
