use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeZone};
use thiserror::Error;
use tracing::{info, subscriber::SetGlobalDefaultError, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// The handle of the file log writer. Dropping it flushes and disables the
/// writer.
pub struct LogGuard {
    _guard: WorkerGuard,
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Could not create log directory {}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to set a global collector")]
    Collector(#[from] SetGlobalDefaultError),
}

/// Installs a global `tracing` collector logging to stdout and to a new
/// file in `log_dir`.
///
/// Log level defaults to INFO and might be overridden with the `RUST_LOG`
/// environment variable.
pub fn init(log_dir: impl AsRef<Path>) -> Result<LogGuard, LogError> {
    let log_dir = log_dir.as_ref();
    std::fs::create_dir_all(log_dir).map_err(|source| LogError::Directory {
        path: log_dir.to_owned(),
        source,
    })?;

    let file_name = log_file_name(&chrono::Local::now());
    let file_appender = tracing_appender::rolling::never(log_dir, &file_name);
    let (non_blocking_log_writer, guard) = tracing_appender::non_blocking(file_appender);

    let collector = tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                // defaults to INFO if RUST_LOG not set
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_log_writer),
        );
    tracing::subscriber::set_global_default(collector)?;

    info!("Logging to {}", log_dir.join(file_name).display());
    Ok(LogGuard { _guard: guard })
}

fn log_file_name<Tz>(time: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%Y-%m-%d_%H-%M-%S.log").to_string().into()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_log_file_name() {
        let time = Utc.with_ymd_and_hms(2023, 5, 1, 13, 4, 5).unwrap();
        assert_eq!(
            log_file_name(&time),
            PathBuf::from("2023-05-01_13-04-05.log")
        );
    }
}
