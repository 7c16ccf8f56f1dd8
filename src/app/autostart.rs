//! Usage: OS login-item registration (open at login, start hidden).

#[cfg(desktop)]
use super::app_state::HIDDEN_ARG;

#[cfg(desktop)]
pub(crate) fn plugin<R: tauri::Runtime>() -> tauri::plugin::TauriPlugin<R> {
    let builder = tauri_plugin_autostart::Builder::new().args([HIDDEN_ARG]);
    #[cfg(target_os = "macos")]
    let builder = builder.macos_launcher(tauri_plugin_autostart::MacosLauncher::LaunchAgent);
    builder.build()
}

#[cfg(not(desktop))]
pub(crate) fn apply(_app: &tauri::AppHandle, _enabled: bool) {}

/// Best-effort: failures are logged and the setting keeps its value.
#[cfg(desktop)]
pub(crate) fn apply(app: &tauri::AppHandle, enabled: bool) {
    use tauri_plugin_autostart::ManagerExt;

    let launcher = app.autolaunch();
    let registered = match launcher.is_enabled() {
        Ok(registered) => registered,
        Err(err) => {
            tracing::warn!("failed to query login item: {err}");
            !enabled
        }
    };
    if registered == enabled {
        return;
    }

    let result = if enabled {
        launcher.enable()
    } else {
        launcher.disable()
    };
    match result {
        Ok(()) => tracing::info!(enabled, "login item updated"),
        Err(err) => tracing::warn!(enabled, "failed to update login item: {err}"),
    }
}
