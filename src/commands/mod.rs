//! Usage: Tauri command handlers exposed to local app windows.

mod server_dialog;

pub(crate) use server_dialog::*;
