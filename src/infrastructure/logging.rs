use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::domain::SetupError;

const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber, writing to `path`.
///
/// The terminal belongs to the UI, so log lines go to a file instead of
/// stderr. Verbosity follows `RUST_LOG` and defaults to `info`.
pub fn init(path: &Path) -> Result<(), SetupError> {
    let file = open_log_file(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| SetupError::Subscriber(e.to_string()))
}

/// Opens `path` for appending, creating it and any missing parent
/// directories.
pub fn open_log_file(path: &Path) -> Result<File, SetupError> {
    let to_err = |source| SetupError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_err)
}
