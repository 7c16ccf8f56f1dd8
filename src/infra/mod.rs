//! Usage: Infrastructure adapters (filesystem paths, persistence).

pub(crate) mod app_paths;
pub(crate) mod settings;
