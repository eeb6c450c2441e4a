use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const DEFAULT_LOG_FILE: &str = "tankmon.log";

// The returned guards must stay alive for the whole process or the
// non blocking writers silently drop their buffered lines.
pub fn init(level: Level, console: bool, log_file: Option<PathBuf>) -> Vec<WorkerGuard> {
    let mut guards = Vec::new();
    let format = tracing_subscriber::fmt::format()
        .with_level(true) // include levels in formatted output
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact(); // use the `Compact` formatting style.
    match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(&path));
            guards.push(guard);
            if console {
                tracing_subscriber::fmt()
                    .event_format(format)
                    .with_max_level(level)
                    .with_ansi(false)
                    .with_writer(writer.and(std::io::stdout))
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .event_format(format)
                    .with_max_level(level)
                    .with_ansi(false)
                    .with_writer(writer)
                    .init();
            }
        }
        None => {
            tracing_subscriber::fmt()
                .event_format(format)
                .with_max_level(level)
                .init();
        }
    }
    guards
}

fn file_appender(path: &Path) -> tracing_appender::rolling::RollingFileAppender {
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_LOG_FILE));
    tracing_appender::rolling::never(directory, file_name)
}
