use anyhow::Result;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "promptpal.log";
const DEFAULT_FILTER: &str = "promptpal=info";

/// Routes tracing output to `<dir>/promptpal.log`; the terminal belongs to
/// the UI. Keep the guard alive until shutdown so buffered lines are flushed.
pub fn init_tracing(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let mut log_file_opts = OpenOptions::new();
    log_file_opts.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        log_file_opts.mode(0o600);
    }

    let log_file = log_file_opts.open(dir.join(LOG_FILE))?;
    let (writer, guard) = non_blocking(log_file);

    // RUST_LOG wins over the default.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;
    Ok(guard)
}
