//! Usage: Tracing subscriber setup (stderr + daily rolling file under the app log dir).

use crate::app_paths;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILTER_ENV: &str = "FRIGATE_DESKTOP_LOG";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "frigate-desktop.log";

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn filter_directives(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn env_filter() -> EnvFilter {
    let directives = filter_directives(std::env::var(LOG_FILTER_ENV).ok());
    EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("invalid {LOG_FILTER_ENV}={directives:?}: {err}; using {DEFAULT_LOG_FILTER}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

/// Installs the global subscriber once. Never fails startup.
pub(crate) fn init(app: &tauri::AppHandle) {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    // Tauri and its plugins log through the `log` facade.
    if let Err(err) = tracing_log::LogTracer::init() {
        eprintln!("log bridge already installed: {err}");
    }

    let file_layer = match app_paths::log_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_WRITER_GUARD.set(guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        Err(err) => {
            eprintln!("file logging disabled: {err}");
            None
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer);

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing subscriber already installed: {err}");
    }
}
