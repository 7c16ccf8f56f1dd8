//! Usage: Server-address dialog commands (request lookup + one-shot answer).

use crate::server_dialog::{ServerAddressRequest, ServerDialogState, DIALOG_WINDOW_LABEL};

#[tauri::command]
pub(crate) fn server_dialog_request_get(
    state: tauri::State<'_, ServerDialogState>,
) -> Result<ServerAddressRequest, String> {
    state
        .request()
        .ok_or_else(|| "SERVER_DIALOG: no pending request".to_string())
}

#[tauri::command]
pub(crate) fn server_dialog_respond(
    window: tauri::WebviewWindow,
    state: tauri::State<'_, ServerDialogState>,
    value: Option<String>,
) -> Result<bool, String> {
    if window.label() != DIALOG_WINDOW_LABEL {
        return Err(format!(
            "SERVER_DIALOG: window {:?} cannot answer the dialog",
            window.label()
        ));
    }

    let delivered = state.respond(value);
    if let Err(err) = window.close() {
        tracing::warn!("failed to close server address dialog: {err}");
    }
    Ok(delivered)
}
