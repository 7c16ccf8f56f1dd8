//! Usage: Desktop resident mode (single-instance focus, window event dispatch, exit policy).

use super::app_state::AppContext;
use super::{main_window, server_dialog};
use tauri::Manager;

/// A second launch focuses the window of the instance that holds the lock.
pub(crate) fn on_second_instance(app: &tauri::AppHandle, argv: Vec<String>, _cwd: String) {
    tracing::info!(args = argv.len(), "second instance launched; focusing main window");
    main_window::show_main_window(app);
}

pub(crate) fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    main_window::on_window_event(window, event);
    server_dialog::on_window_event(window, event);
}

/// Whether the process should stay alive after its last window closed.
fn keep_running_without_windows(quitting: bool) -> bool {
    cfg!(target_os = "macos") && !quitting
}

pub(crate) fn on_run_event(app: &tauri::AppHandle, event: tauri::RunEvent) {
    if let tauri::RunEvent::ExitRequested { api, code, .. } = &event {
        // `code` is `None` when the last window closed, `Some` for an explicit exit.
        let quitting = app
            .try_state::<AppContext>()
            .is_some_and(|context| context.is_quitting());
        if code.is_none() && keep_running_without_windows(quitting) {
            api.prevent_exit();
            return;
        }
        tracing::info!("exiting");
        return;
    }

    #[cfg(target_os = "macos")]
    if let tauri::RunEvent::Reopen {
        has_visible_windows,
        ..
    } = event
    {
        if !has_visible_windows {
            main_window::show_main_window(app);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quitting_never_keeps_the_process_alive() {
        assert!(!keep_running_without_windows(true));
    }

    #[test]
    fn only_macos_stays_resident_without_windows() {
        assert_eq!(
            keep_running_without_windows(false),
            cfg!(target_os = "macos")
        );
    }
}
