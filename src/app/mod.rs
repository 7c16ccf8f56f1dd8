//! Usage: Application layer (Tauri-managed state, tray/window lifecycle, startup wiring).

pub(crate) mod app_state;
pub(crate) mod autostart;
pub(crate) mod lifecycle;
pub(crate) mod logging;
pub(crate) mod main_window;
pub(crate) mod resident;
pub(crate) mod server_dialog;
#[cfg(desktop)]
pub(crate) mod tray;
