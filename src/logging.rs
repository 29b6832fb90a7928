use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialise logging. In debug mode the default level is `debug` and can be
/// overridden via the `RUST_LOG` environment variable, otherwise the level is
/// fixed at `info`.
///
/// When `log_file` is given, log lines are additionally appended to that file
/// through a non-blocking writer. The returned guard must be held until the
/// program ends; dropping it flushes the pending lines. Calling `init` more
/// than once is harmless; only the first subscriber is installed.
#[must_use = "dropping the guard stops file logging"]
pub fn init(debug: bool, log_file: Option<PathBuf>) -> Option<WorkerGuard> {
    // Without debug logging we force `info` regardless of `RUST_LOG` so a
    // stray variable in the user's environment doesn't flood the console.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let mut guard = None;
    let file_layer = log_file.and_then(|path| {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            Ok(file) => {
                let (writer, file_guard) = tracing_appender::non_blocking(file);
                guard = Some(file_guard);
                Some(fmt::layer().with_ansi(false).with_writer(writer))
            }
            Err(e) => {
                eprintln!("failed to open log file {}: {e}", path.display());
                None
            }
        }
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init();
    guard
}
