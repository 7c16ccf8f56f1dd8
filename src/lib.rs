mod app;
mod commands;
mod infra;
mod shared;

pub(crate) use app::{app_state, main_window, resident, server_dialog};
pub(crate) use infra::{app_paths, settings};

use app_state::{AppContext, LaunchOptions};
use commands::*;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    // Must be the first plugin: a losing process exits here before any window exists.
    #[cfg(desktop)]
    let builder = builder
        .plugin(tauri_plugin_single_instance::init(resident::on_second_instance))
        .plugin(app::autostart::plugin());

    let app = builder
        .manage(server_dialog::ServerDialogState::default())
        .on_window_event(resident::on_window_event)
        .setup(|app| {
            app::logging::init(app.handle());

            let launch = LaunchOptions::from_args(std::env::args());
            let settings_path = app_paths::settings_path();
            tracing::info!(
                path = %settings_path.display(),
                hidden = launch.hidden,
                version = env!("CARGO_PKG_VERSION"),
                "starting"
            );

            let context = AppContext::load(settings_path, launch);
            let startup = context.settings();
            app.manage(context);

            app::autostart::apply(app.handle(), startup.auto_start);
            main_window::create_primary_window(app.handle(), &startup)?;
            main_window::spawn_minimize_watcher(app.handle());

            #[cfg(desktop)]
            app::tray::setup_tray(app.handle())?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            server_dialog_request_get,
            server_dialog_respond
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(resident::on_run_event);
}
