//! Usage: Primary dashboard window (creation, hide-to-tray, geometry persistence, reload).

use super::app_state::AppContext;
use super::lifecycle::{CloseDecision, ObservedGeometry, ToggleDecision};
use crate::app_paths;
use crate::settings::{AppSettings, WindowBounds};
use std::time::Duration;
use tauri::webview::PageLoadEvent;
use tauri::{Manager, WebviewUrl, WebviewWindowBuilder};

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
const MAIN_WINDOW_TITLE: &str = "Frigate Desktop";
const BLANK_PAGE: &str = "about:blank";

const MINIMIZE_POLL_VISIBLE: Duration = Duration::from_millis(100);
const MINIMIZE_POLL_HIDDEN: Duration = Duration::from_secs(2);

/// Native window calls made by the hide-to-tray handlers.
trait NativeWindow {
    fn is_minimized(&self) -> bool;
    fn hide(&self);
}

impl<R: tauri::Runtime> NativeWindow for tauri::Window<R> {
    fn is_minimized(&self) -> bool {
        tauri::Window::is_minimized(self).unwrap_or(false)
    }

    fn hide(&self) {
        let _ = tauri::Window::hide(self);
    }
}

impl<R: tauri::Runtime> NativeWindow for tauri::WebviewWindow<R> {
    fn is_minimized(&self) -> bool {
        tauri::WebviewWindow::is_minimized(self).unwrap_or(false)
    }

    fn hide(&self) {
        let _ = tauri::WebviewWindow::hide(self);
    }
}

/// Parses a server address into the URL the dashboard webview loads.
pub(crate) fn server_url(address: &str) -> Result<tauri::Url, String> {
    let address = address.trim();
    let url = tauri::Url::parse(address)
        .map_err(|e| format!("invalid server address {address:?}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "invalid server address {address:?}: unsupported scheme {other:?}"
        )),
    }
}

fn startup_url(settings: &AppSettings) -> Result<tauri::Url, String> {
    match server_url(&settings.server_ip) {
        Ok(url) => Ok(url),
        Err(err) => {
            tracing::error!("{err}; loading a blank page until the address is fixed");
            tauri::Url::parse(BLANK_PAGE)
                .map_err(|e| format!("failed to parse blank page: {e}"))
        }
    }
}

pub(crate) fn create_primary_window(
    app: &tauri::AppHandle,
    settings: &AppSettings,
) -> Result<(), String> {
    if app.get_webview_window(MAIN_WINDOW_LABEL).is_some() {
        return Ok(());
    }

    let url = startup_url(settings)?;
    let (width, height) = settings.window_bounds.size_or_default();

    let mut builder =
        WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
            .title(MAIN_WINDOW_TITLE)
            .inner_size(f64::from(width), f64::from(height))
            .visible(false)
            .on_page_load(|window, payload| {
                if payload.event() == PageLoadEvent::Finished {
                    on_first_paint(&window);
                }
            });

    if let Some((x, y)) = settings.window_bounds.position() {
        builder = builder.position(f64::from(x), f64::from(y));
    }

    match app_paths::webview_data_dir(app) {
        Ok(dir) => builder = builder.data_directory(dir),
        Err(err) => tracing::warn!("webview storage unavailable, using platform default: {err}"),
    }

    builder
        .build()
        .map_err(|e| format!("failed to create main window: {e}"))?;

    tracing::info!(
        width,
        height,
        maximized = settings.is_maximized,
        "main window created"
    );
    Ok(())
}

fn on_first_paint(window: &tauri::WebviewWindow) {
    let context = window.state::<AppContext>();
    let settings = context.settings();
    let launched_hidden = context.launch().hidden;
    let Some(decision) = context.with_lifecycle(|l| l.first_paint(&settings, launched_hidden))
    else {
        return;
    };

    if decision.maximize {
        let _ = window.maximize();
    }
    if decision.show {
        let _ = window.show();
    }
    tracing::debug!(
        maximize = decision.maximize,
        show = decision.show,
        "main window ready to show"
    );
}

pub(crate) fn reload(app: &tauri::AppHandle, address: &str) -> Result<(), String> {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return Err("main window is not available".to_string());
    };
    let url = server_url(address)?;
    window
        .navigate(url)
        .map_err(|e| format!("failed to load {address}: {e}"))?;
    tracing::info!(address = %address, "main window content reloaded");
    Ok(())
}

pub(crate) fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    if !app.state::<AppContext>().with_lifecycle(|l| l.show()) {
        return;
    }

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

pub(crate) fn toggle_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let is_visible = window.is_visible().unwrap_or(false);
    let is_minimized = window.is_minimized().unwrap_or(false);
    let (decision, visibility) = app
        .state::<AppContext>()
        .with_lifecycle(|l| (l.toggle(is_visible && !is_minimized), l.visibility()));
    tracing::debug!(?decision, ?visibility, "main window toggled");

    match decision {
        Some(ToggleDecision::Show) => show_main_window(app),
        Some(ToggleDecision::Hide) => {
            let _ = window.hide();
        }
        None => {}
    }
}

fn observe_geometry(window: &tauri::Window) -> Option<ObservedGeometry> {
    let minimized = window.is_minimized().ok()?;
    let maximized = window.is_maximized().ok()?;
    let visible = window.is_visible().ok()?;
    let scale = window.scale_factor().ok()?;
    let size = window.inner_size().ok()?.to_logical::<f64>(scale);
    let position = window.outer_position().ok()?.to_logical::<f64>(scale);

    Some(ObservedGeometry {
        maximized,
        minimized,
        visible,
        bounds: WindowBounds {
            width: size.width.round() as u32,
            height: size.height.round() as u32,
            x: Some(position.x.round() as i32),
            y: Some(position.y.round() as i32),
        },
    })
}

/// Hides the window on the edge into minimized. Returns whether it was hidden.
fn intercept_minimize(context: &AppContext, window: &impl NativeWindow) -> bool {
    let minimized = window.is_minimized();
    if !context.with_lifecycle(|l| l.minimize_observed(minimized)) {
        return false;
    }
    window.hide();
    tracing::debug!("main window minimized to tray");
    true
}

/// Returns `true` when the native close must be prevented.
fn intercept_close(context: &AppContext, window: &impl NativeWindow) -> bool {
    match context.with_lifecycle(|l| l.close_requested()) {
        CloseDecision::Hide => {
            window.hide();
            true
        }
        CloseDecision::Proceed => false,
    }
}

/// macOS miniaturize and X11 iconify raise neither a resize nor, on every window manager, a
/// focus change; polling the minimized flag catches those.
pub(crate) fn spawn_minimize_watcher(app: &tauri::AppHandle) {
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        loop {
            let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
                tracing::debug!("main window gone; minimize watcher stopped");
                break;
            };
            let visible = window.is_visible().unwrap_or(false);
            if visible {
                intercept_minimize(&app.state::<AppContext>(), &window);
            }
            drop(window);

            let poll = if visible {
                MINIMIZE_POLL_VISIBLE
            } else {
                MINIMIZE_POLL_HIDDEN
            };
            tokio::time::sleep(poll).await;
        }
    });
}

fn on_geometry_changed(window: &tauri::Window) {
    let context = window.state::<AppContext>();
    if intercept_minimize(&context, window) {
        return;
    }

    // Minimized or hidden observations are dropped by `capture_geometry`.
    let Some(observed) = observe_geometry(window) else {
        return;
    };
    let saved = context.update_settings_if(|settings| {
        context.with_lifecycle(|l| l.capture_geometry(settings, observed))
    });
    if saved {
        let frame = context.with_lifecycle(|l| l.frame());
        tracing::debug!(
            ?frame,
            width = observed.bounds.width,
            height = observed.bounds.height,
            "window geometry saved"
        );
    }
}

pub(crate) fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    match event {
        tauri::WindowEvent::Resized(_) | tauri::WindowEvent::Moved(_) => {
            on_geometry_changed(window)
        }
        // Minimizing drops focus on platforms that report no resize for it.
        tauri::WindowEvent::Focused(_) => {
            intercept_minimize(&window.state::<AppContext>(), window);
        }
        tauri::WindowEvent::CloseRequested { api, .. } => {
            if intercept_close(&window.state::<AppContext>(), window) {
                api.prevent_close();
            }
        }
        tauri::WindowEvent::Destroyed => {
            window.state::<AppContext>().with_lifecycle(|l| l.destroyed());
            tracing::info!("main window destroyed");
        }
        _ => {}
    }
}
