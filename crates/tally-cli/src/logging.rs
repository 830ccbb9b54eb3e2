//! Subscriber construction. Nothing here installs a global logger; `main`
//! scopes the returned dispatch to the run with `set_default`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tally_config::LogConfig;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Build the run's subscriber from `[log]` settings.
///
/// # Errors
///
/// Fails if the filter directive does not parse or the log file cannot be
/// opened for appending.
pub fn dispatch(config: &LogConfig) -> anyhow::Result<Dispatch> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter '{}'", config.filter))?;

    let (writer, ansi) = match &config.path {
        Some(path) => (file_writer(path)?, false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .finish();
    Ok(Dispatch::new(subscriber))
}

/// Stderr at `info`, for reporting failures that happen before the
/// configured subscriber exists.
#[must_use]
pub fn fallback() -> Dispatch {
    Dispatch::new(
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("info"))
            .with_writer(io::stderr)
            .with_target(false)
            .finish(),
    )
}

fn file_writer(path: &Path) -> anyhow::Result<BoxMakeWriter> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}
