//! Usage: Persisted application settings (schema + read/write helpers).

use crate::shared::fs::{read_optional_file, write_file_atomic};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;
pub const DEFAULT_SERVER_IP: &str = "http://192.168.1.50:5000";

/// Last known non-maximized window geometry, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowBounds {
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            x: None,
            y: None,
        }
    }
}

impl WindowBounds {
    /// Size to build the window with; zero dimensions fall back to the defaults.
    pub fn size_or_default(&self) -> (u32, u32) {
        let width = if self.width == 0 {
            DEFAULT_WINDOW_WIDTH
        } else {
            self.width
        };
        let height = if self.height == 0 {
            DEFAULT_WINDOW_HEIGHT
        } else {
            self.height
        };
        (width, height)
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        Some((self.x?, self.y?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub auto_start: bool,
    pub start_minimized: bool,
    pub window_bounds: WindowBounds,
    pub is_maximized: bool,
    #[serde(rename = "serverIP")]
    pub server_ip: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_start: false,
            start_minimized: false,
            window_bounds: WindowBounds::default(),
            is_maximized: false,
            server_ip: DEFAULT_SERVER_IP.to_string(),
        }
    }
}

type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Key-by-key merge over the defaults. A key holding a value of the wrong shape keeps its
/// default; only unparseable JSON or a non-object document rejects the file.
fn merge_over_defaults(content: &[u8]) -> Result<AppSettings, String> {
    let saved: serde_json::Value = serde_json::from_slice(content)
        .map_err(|e| format!("failed to parse settings file: {e}"))?;
    let serde_json::Value::Object(saved) = saved else {
        return Err("failed to parse settings file: top-level value is not an object".to_string());
    };

    let mut settings = AppSettings::default();
    if let Some(v) = saved_field(&saved, "autoStart") {
        settings.auto_start = v;
    }
    if let Some(v) = saved_field(&saved, "startMinimized") {
        settings.start_minimized = v;
    }
    if let Some(v) = saved_field(&saved, "isMaximized") {
        settings.is_maximized = v;
    }
    if let Some(v) = saved_field(&saved, "serverIP") {
        settings.server_ip = v;
    }
    if let Some(bounds) = saved.get("windowBounds") {
        settings.window_bounds = saved_bounds(bounds);
    }
    Ok(settings)
}

fn saved_field<T: DeserializeOwned>(saved: &JsonObject, key: &str) -> Option<T> {
    let value = saved.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, "ignoring invalid settings value: {e}");
            None
        }
    }
}

/// A saved bounds object replaces the default one; members that are missing or not usable
/// numbers fall back individually. Fractional values are rounded.
fn saved_bounds(value: &serde_json::Value) -> WindowBounds {
    let defaults = WindowBounds::default();
    let serde_json::Value::Object(bounds) = value else {
        if !value.is_null() {
            tracing::warn!(key = "windowBounds", "ignoring invalid settings value: not an object");
        }
        return defaults;
    };

    let dimension = |key: &str| {
        saved_number(bounds, key)
            .filter(|n| *n >= 1.0 && *n <= f64::from(u32::MAX))
            .map(|n| n as u32)
    };
    let coordinate = |key: &str| {
        saved_number(bounds, key)
            .filter(|n| *n >= f64::from(i32::MIN) && *n <= f64::from(i32::MAX))
            .map(|n| n as i32)
    };

    WindowBounds {
        width: dimension("width").unwrap_or(defaults.width),
        height: dimension("height").unwrap_or(defaults.height),
        x: coordinate("x"),
        y: coordinate("y"),
    }
}

fn saved_number(bounds: &JsonObject, key: &str) -> Option<f64> {
    let value = bounds.get(key)?;
    let number = value.as_f64().filter(|n| n.is_finite()).map(f64::round);
    if number.is_none() && !value.is_null() {
        tracing::warn!(key, "ignoring invalid window bounds value: {value}");
    }
    number
}

/// Reads and merges the settings file. `Ok(None)` when the file does not exist.
pub fn read(path: &Path) -> Result<Option<AppSettings>, String> {
    let Some(content) = read_optional_file(path)? else {
        return Ok(None);
    };
    merge_over_defaults(&content).map(Some)
}

pub fn write(path: &Path, settings: &AppSettings) -> Result<(), String> {
    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;
    write_file_atomic(path, &content)
}

/// Never fails: a missing, unreadable or corrupt file yields the defaults.
pub fn load(path: &Path) -> AppSettings {
    match read(path) {
        Ok(Some(settings)) => {
            tracing::debug!(path = %path.display(), "settings loaded");
            settings
        }
        Ok(None) => {
            tracing::info!(path = %path.display(), "no settings file; using defaults");
            AppSettings::default()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to load settings, using defaults: {err}");
            AppSettings::default()
        }
    }
}

/// Best-effort: the in-memory record stays authoritative when the write fails.
pub fn save(path: &Path, settings: &AppSettings) {
    if let Err(err) = write(path, settings) {
        tracing::error!(path = %path.display(), "failed to save settings: {err}");
    }
}

#[cfg(test)]
mod tests;
