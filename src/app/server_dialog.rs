//! Usage: Server-address dialog (secondary window + one-shot request/response channel).
//!
//! Opening the dialog parks a [`ServerAddressRequest`] in managed state. The dialog page reads it
//! with `server_dialog_request_get` and answers once with `server_dialog_respond`; `None` means
//! cancel. Closing the window without answering also cancels.

use super::app_state::AppContext;
use super::main_window::{self, MAIN_WINDOW_LABEL};
use crate::shared::mutex_ext::MutexExt;
use std::sync::Mutex;
use tauri::webview::PageLoadEvent;
use tauri::{Manager, WebviewUrl, WebviewWindowBuilder};
use tokio::sync::oneshot;

pub(crate) const DIALOG_WINDOW_LABEL: &str = "server-address";
const DIALOG_TITLE: &str = "Frigate Server";
const DIALOG_PAGE: &str = "server-address.html";
const DIALOG_SIZE: (f64, f64) = (300.0, 300.0);

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct ServerAddressRequest {
    pub current: String,
}

struct PendingRequest {
    request: ServerAddressRequest,
    responder: oneshot::Sender<Option<String>>,
}

#[derive(Default)]
pub(crate) struct ServerDialogState(Mutex<Option<PendingRequest>>);

impl ServerDialogState {
    /// Parks a request. `None` while another request is still waiting for its answer.
    pub(crate) fn begin(
        &self,
        request: ServerAddressRequest,
    ) -> Option<oneshot::Receiver<Option<String>>> {
        let mut slot = self.0.lock_or_recover();
        if slot
            .as_ref()
            .is_some_and(|pending| !pending.responder.is_closed())
        {
            return None;
        }

        let (responder, receiver) = oneshot::channel();
        *slot = Some(PendingRequest { request, responder });
        Some(receiver)
    }

    pub(crate) fn request(&self) -> Option<ServerAddressRequest> {
        self.0
            .lock_or_recover()
            .as_ref()
            .map(|pending| pending.request.clone())
    }

    /// Answers the pending request. `false` when nothing was waiting.
    pub(crate) fn respond(&self, response: Option<String>) -> bool {
        let Some(pending) = self.0.lock_or_recover().take() else {
            return false;
        };
        pending.responder.send(response).is_ok()
    }
}

/// Trimmed, non-empty address; anything else leaves the settings untouched.
pub(crate) fn normalize_response(response: Option<String>) -> Option<String> {
    let response = response?;
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Stores a submitted address. Returns the address the main window should reload with.
pub(crate) fn apply_response(context: &AppContext, response: Option<String>) -> Option<String> {
    let address = normalize_response(response)?;
    context.update_settings(|settings| settings.server_ip = address.clone());
    Some(address)
}

fn focus_existing(app: &tauri::AppHandle) -> bool {
    let Some(window) = app.get_webview_window(DIALOG_WINDOW_LABEL) else {
        return false;
    };
    let _ = window.show();
    let _ = window.set_focus();
    true
}

pub(crate) fn open(app: &tauri::AppHandle) {
    if focus_existing(app) {
        return;
    }

    let current = app.state::<AppContext>().settings().server_ip;
    let state = app.state::<ServerDialogState>();
    let Some(receiver) = state.begin(ServerAddressRequest { current }) else {
        tracing::debug!("server address dialog already pending");
        return;
    };

    if let Err(err) = build_window(app) {
        tracing::error!("failed to open server address dialog: {err}");
        state.respond(None);
        return;
    }

    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        // A dropped responder counts as cancel.
        let response = receiver.await.unwrap_or(None);
        on_response(&app, response);
    });
}

fn build_window(app: &tauri::AppHandle) -> Result<(), String> {
    let mut builder =
        WebviewWindowBuilder::new(app, DIALOG_WINDOW_LABEL, WebviewUrl::App(DIALOG_PAGE.into()))
            .title(DIALOG_TITLE)
            .inner_size(DIALOG_SIZE.0, DIALOG_SIZE.1)
            .resizable(true)
            .visible(false)
            .on_page_load(|window, payload| {
                if payload.event() == PageLoadEvent::Finished {
                    let _ = window.show();
                    let _ = window.set_focus();
                }
            });

    if let Some(main) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        builder = builder
            .parent(&main)
            .map_err(|e| format!("failed to attach dialog to main window: {e}"))?;
    }

    builder
        .build()
        .map_err(|e| format!("failed to create dialog window: {e}"))?;
    Ok(())
}

fn on_response(app: &tauri::AppHandle, response: Option<String>) {
    let context = app.state::<AppContext>();
    let Some(address) = apply_response(&context, response) else {
        tracing::debug!("server address dialog dismissed without changes");
        return;
    };

    tracing::info!(address = %address, "server address updated");
    if let Err(err) = main_window::reload(app, &address) {
        tracing::warn!("failed to reload main window: {err}");
    }
}

pub(crate) fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != DIALOG_WINDOW_LABEL {
        return;
    }
    if let tauri::WindowEvent::Destroyed = event {
        window.state::<ServerDialogState>().respond(None);
    }
}
