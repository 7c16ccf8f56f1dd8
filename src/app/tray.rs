//! Usage: System tray icon and its context menu.

use super::app_state::AppContext;
use super::{autostart, main_window, server_dialog};
use tauri::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::tray::{MouseButton, TrayIconBuilder, TrayIconEvent};
use tauri::Manager;

const TRAY_ID: &str = "main-tray";
const TRAY_TOOLTIP: &str = "Frigate Desktop";
const TRAY_MENU_SHOW_ID: &str = "tray.show";
const TRAY_MENU_SETTINGS_ID: &str = "tray.settings";
const TRAY_MENU_SERVER_IP_ID: &str = "tray.settings.server_ip";
const TRAY_MENU_AUTO_START_ID: &str = "tray.settings.auto_start";
const TRAY_MENU_START_MINIMIZED_ID: &str = "tray.settings.start_minimized";
const TRAY_MENU_QUIT_ID: &str = "tray.quit";

/// Tray menu actions, decoupled from menu item ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrayAction {
    Show,
    ServerAddress,
    AutoStart,
    StartMinimized,
    Quit,
}

impl TrayAction {
    fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            TRAY_MENU_SHOW_ID => Some(Self::Show),
            TRAY_MENU_SERVER_IP_ID => Some(Self::ServerAddress),
            TRAY_MENU_AUTO_START_ID => Some(Self::AutoStart),
            TRAY_MENU_START_MINIMIZED_ID => Some(Self::StartMinimized),
            TRAY_MENU_QUIT_ID => Some(Self::Quit),
            _ => None,
        }
    }
}

pub(crate) fn setup_tray(app: &tauri::AppHandle) -> Result<(), String> {
    let settings = app.state::<AppContext>().settings();

    let show_item = MenuItem::with_id(app, TRAY_MENU_SHOW_ID, "Show", true, None::<&str>)
        .map_err(|e| format!("failed to create tray show menu item: {e}"))?;
    let server_ip_item =
        MenuItem::with_id(app, TRAY_MENU_SERVER_IP_ID, "Server IP", true, None::<&str>)
            .map_err(|e| format!("failed to create tray server ip menu item: {e}"))?;
    let auto_start_item = CheckMenuItem::with_id(
        app,
        TRAY_MENU_AUTO_START_ID,
        "Auto-start on login",
        true,
        settings.auto_start,
        None::<&str>,
    )
    .map_err(|e| format!("failed to create tray auto-start menu item: {e}"))?;
    let start_minimized_item = CheckMenuItem::with_id(
        app,
        TRAY_MENU_START_MINIMIZED_ID,
        "Start minimized",
        true,
        settings.start_minimized,
        None::<&str>,
    )
    .map_err(|e| format!("failed to create tray start-minimized menu item: {e}"))?;
    let settings_separator = PredefinedMenuItem::separator(app)
        .map_err(|e| format!("failed to create tray menu separator: {e}"))?;
    let settings_menu = Submenu::with_id_and_items(
        app,
        TRAY_MENU_SETTINGS_ID,
        "Settings",
        true,
        &[
            &server_ip_item,
            &settings_separator,
            &auto_start_item,
            &start_minimized_item,
        ],
    )
    .map_err(|e| format!("failed to create tray settings submenu: {e}"))?;
    let quit_item = MenuItem::with_id(app, TRAY_MENU_QUIT_ID, "Quit", true, None::<&str>)
        .map_err(|e| format!("failed to create tray quit menu item: {e}"))?;
    let separator = PredefinedMenuItem::separator(app)
        .map_err(|e| format!("failed to create tray menu separator: {e}"))?;

    let menu = Menu::with_items(app, &[&show_item, &settings_menu, &separator, &quit_item])
        .map_err(|e| format!("failed to create tray menu: {e}"))?;

    let icon = app
        .default_window_icon()
        .cloned()
        .ok_or_else(|| "failed to load tray icon: no bundled icon".to_string())?;

    TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip(TRAY_TOOLTIP)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| {
            let Some(action) = TrayAction::from_menu_id(event.id().0.as_str()) else {
                return;
            };
            match action {
                TrayAction::Show => main_window::show_main_window(app),
                TrayAction::ServerAddress => server_dialog::open(app),
                TrayAction::AutoStart => {
                    // The native item flips its own check state before the event arrives.
                    let enabled = auto_start_item.is_checked().unwrap_or(false);
                    set_auto_start(app, enabled);
                }
                TrayAction::StartMinimized => {
                    let enabled = start_minimized_item.is_checked().unwrap_or(false);
                    app.state::<AppContext>()
                        .update_settings(|s| s.start_minimized = enabled);
                    tracing::info!(enabled, "start minimized toggled");
                }
                TrayAction::Quit => quit(app),
            }
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::DoubleClick {
                button: MouseButton::Left,
                ..
            } = event
            {
                main_window::toggle_main_window(tray.app_handle());
            }
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))?;

    Ok(())
}

fn set_auto_start(app: &tauri::AppHandle, enabled: bool) {
    app.state::<AppContext>()
        .update_settings(|s| s.auto_start = enabled);
    autostart::apply(app, enabled);
    tracing::info!(enabled, "auto-start toggled");
}

/// The only path that lets the main window actually close.
pub(crate) fn quit(app: &tauri::AppHandle) {
    app.state::<AppContext>().with_lifecycle(|l| l.begin_quit());
    tracing::info!("quit requested from tray");
    app.exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ids_map_to_actions() {
        assert_eq!(TrayAction::from_menu_id("tray.show"), Some(TrayAction::Show));
        assert_eq!(
            TrayAction::from_menu_id("tray.settings.server_ip"),
            Some(TrayAction::ServerAddress)
        );
        assert_eq!(
            TrayAction::from_menu_id("tray.settings.auto_start"),
            Some(TrayAction::AutoStart)
        );
        assert_eq!(
            TrayAction::from_menu_id("tray.settings.start_minimized"),
            Some(TrayAction::StartMinimized)
        );
        assert_eq!(TrayAction::from_menu_id("tray.quit"), Some(TrayAction::Quit));
    }

    #[test]
    fn submenu_and_unknown_ids_are_ignored() {
        assert_eq!(TrayAction::from_menu_id(TRAY_MENU_SETTINGS_ID), None);
        assert_eq!(TrayAction::from_menu_id("tray.toggle"), None);
        assert_eq!(TrayAction::from_menu_id(""), None);
    }
}
