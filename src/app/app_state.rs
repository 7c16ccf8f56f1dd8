//! Usage: Application context shared with every controller through Tauri managed state.

use super::lifecycle::MainWindowLifecycle;
use crate::settings::{self, AppSettings};
use crate::shared::mutex_ext::MutexExt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Launch argument passed by the OS login item; the window stays hidden on such launches.
pub(crate) const HIDDEN_ARG: &str = "--hidden";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LaunchOptions {
    pub hidden: bool,
}

impl LaunchOptions {
    pub(crate) fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hidden: args.into_iter().skip(1).any(|arg| arg.as_ref() == HIDDEN_ARG),
        }
    }
}

pub(crate) struct AppContext {
    settings_path: PathBuf,
    settings: Mutex<AppSettings>,
    lifecycle: Mutex<MainWindowLifecycle>,
    launch: LaunchOptions,
}

impl AppContext {
    pub(crate) fn new(
        settings_path: PathBuf,
        settings: AppSettings,
        launch: LaunchOptions,
    ) -> Self {
        Self {
            settings_path,
            settings: Mutex::new(settings),
            lifecycle: Mutex::new(MainWindowLifecycle::default()),
            launch,
        }
    }

    pub(crate) fn load(settings_path: PathBuf, launch: LaunchOptions) -> Self {
        let settings = settings::load(&settings_path);
        Self::new(settings_path, settings, launch)
    }

    pub(crate) fn launch(&self) -> LaunchOptions {
        self.launch
    }

    pub(crate) fn settings(&self) -> AppSettings {
        self.settings.lock_or_recover().clone()
    }

    /// Mutates the record and flushes it before returning, so saves never interleave.
    pub(crate) fn update_settings<R>(&self, f: impl FnOnce(&mut AppSettings) -> R) -> R {
        let mut guard = self.settings.lock_or_recover();
        let out = f(&mut guard);
        settings::save(&self.settings_path, &guard);
        out
    }

    /// Like [`Self::update_settings`], but only persists when `f` reports a change.
    pub(crate) fn update_settings_if(&self, f: impl FnOnce(&mut AppSettings) -> bool) -> bool {
        let mut guard = self.settings.lock_or_recover();
        let changed = f(&mut guard);
        if changed {
            settings::save(&self.settings_path, &guard);
        }
        changed
    }

    pub(crate) fn with_lifecycle<R>(&self, f: impl FnOnce(&mut MainWindowLifecycle) -> R) -> R {
        let mut guard = self.lifecycle.lock_or_recover();
        f(&mut guard)
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.with_lifecycle(|lifecycle| lifecycle.is_quitting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::lifecycle::ObservedGeometry;
    use crate::settings::WindowBounds;
    use crate::shared::fs::test_support::unique_tmp_dir;

    #[test]
    fn hidden_flag_is_read_from_arguments_after_program_name() {
        assert!(LaunchOptions::from_args(["frigate-desktop", "--hidden"]).hidden);
        assert!(!LaunchOptions::from_args(["frigate-desktop"]).hidden);
        assert!(!LaunchOptions::from_args(["--hidden"]).hidden);
        assert!(!LaunchOptions::from_args(["frigate-desktop", "--hidden=1"]).hidden);
    }

    #[test]
    fn update_settings_persists_each_mutation() {
        let dir = unique_tmp_dir("context");
        let path = dir.join("config.json");
        let context = AppContext::load(path.clone(), LaunchOptions::default());

        context.update_settings(|s| s.start_minimized = true);
        assert!(settings::load(&path).start_minimized);

        context.update_settings(|s| s.auto_start = true);
        let on_disk = settings::load(&path);
        assert!(on_disk.start_minimized && on_disk.auto_start);
        assert_eq!(on_disk, context.settings());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unchanged_geometry_does_not_touch_the_file() {
        let dir = unique_tmp_dir("context");
        let path = dir.join("config.json");
        let context = AppContext::load(path.clone(), LaunchOptions::default());
        context.with_lifecycle(|l| l.first_paint(&AppSettings::default(), false));

        let observed = ObservedGeometry {
            maximized: false,
            minimized: false,
            visible: true,
            bounds: WindowBounds::default(),
        };
        let changed = context
            .update_settings_if(|s| context.with_lifecycle(|l| l.capture_geometry(s, observed)));
        assert!(!changed);
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn geometry_survives_relaunch() {
        let dir = unique_tmp_dir("context");
        let path = dir.join("config.json");

        let first = AppContext::load(path.clone(), LaunchOptions::default());
        let startup = first.settings();
        first.with_lifecycle(|l| l.first_paint(&startup, false));
        let observed = ObservedGeometry {
            maximized: false,
            minimized: false,
            visible: true,
            bounds: WindowBounds {
                width: 900,
                height: 600,
                x: Some(30),
                y: Some(40),
            },
        };
        assert!(first
            .update_settings_if(|s| first.with_lifecycle(|l| l.capture_geometry(s, observed))));

        let relaunched = AppContext::load(path, LaunchOptions::default());
        let bounds = relaunched.settings().window_bounds;
        assert_eq!(bounds.size_or_default(), (900, 600));
        assert_eq!(bounds.position(), Some((30, 40)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn quitting_is_tracked_by_the_lifecycle() {
        let context = AppContext::new(
            PathBuf::from("unused.json"),
            AppSettings::default(),
            LaunchOptions::default(),
        );
        assert!(!context.is_quitting());
        context.with_lifecycle(|l| l.begin_quit());
        assert!(context.is_quitting());
    }
}
