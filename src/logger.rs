use chrono::Local;
use flexi_logger::{DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle};
use log::{error, info, Record};
use std::io::Write;
use std::panic;
use std::path::Path;

use crate::error::AppError;

const LOG_BASENAME: &str = "battery-monitor";

// Format: TIMESTAMP LEVEL [MODULE] MESSAGE
fn log_line(w: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
    write!(
        w,
        "{} {:<5} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.args()
    )
}

/// Starts logging to stdout, and additionally to a file when `directory` is set.
///
/// The returned handle has to stay alive for as long as the application runs.
pub fn start_logger(spec: &str, directory: Option<&Path>) -> Result<LoggerHandle, AppError> {
    let logger = Logger::try_with_str(spec)?.format(log_line);

    let logger = match directory {
        Some(directory) => logger
            .log_to_file(FileSpec::default().directory(directory).basename(LOG_BASENAME))
            .duplicate_to_stdout(Duplicate::All),
        None => logger.log_to_stdout(),
    };

    let handle = logger.start()?;

    panic::set_hook(Box::new(|info| {
        error!("Panic: {info}");
    }));

    info!("# Session started: {}", Local::now());
    if let Some(directory) = directory {
        info!("# Writing log files to {}", directory.display());
    }

    Ok(handle)
}
