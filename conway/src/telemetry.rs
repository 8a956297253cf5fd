// telemetry.rs - Tracing subscriber setup: stderr by default, a non-blocking file with CONWAY_LOG

use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Keeps the background log writer alive; dropping it flushes queued lines.
#[derive(Debug)]
pub struct TelemetryGuard {
    _guard: Option<WorkerGuard>,
}

impl TelemetryGuard {
    fn disabled() -> Self {
        Self { _guard: None }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_level`;
/// `CONWAY_LOG=<path>` appends to a file instead of stderr.
pub fn init_tracing(default_level: &str) -> TelemetryGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard, ansi) = match log_file_path_from_env() {
        Some(path) => match file_writer(&path) {
            Ok((non_blocking, guard)) => (BoxMakeWriter::new(non_blocking), Some(guard), false),
            Err(err) => {
                eprintln!("Warning: failed to open log file {}: {}", path.display(), err);
                (BoxMakeWriter::new(io::stderr), None, io::stderr().is_terminal())
            }
        },
        None => (BoxMakeWriter::new(io::stderr), None, io::stderr().is_terminal()),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    if subscriber.try_init().is_err() {
        return TelemetryGuard::disabled();
    }

    TelemetryGuard { _guard: guard }
}

/// Opens `path` for appending behind a background writer thread.
fn file_writer(path: &Path) -> io::Result<(NonBlocking, WorkerGuard)> {
    let file: File = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_appender::non_blocking(file))
}

fn log_file_path_from_env() -> Option<PathBuf> {
    std::env::var("CONWAY_LOG").ok().map(PathBuf::from)
}
