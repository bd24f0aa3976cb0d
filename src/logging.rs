use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::err::*;

const LOG_FILE_PREFIX: &str = "ddns-sync.log";

/// Install the console subscriber plus a daily-rolled file under `log_dir`.
/// The returned guard must stay alive until exit, otherwise buffered file
/// lines are lost.
pub fn init(log_dir: &Path, level: tracing::Level) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        AppErr::Config(format!(
            "cannot create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX));

    let with_origin = level >= tracing::Level::DEBUG;

    let console = tracing_subscriber::fmt::layer()
        .with_file(with_origin)
        .with_line_number(with_origin);

    let file = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_file(with_origin)
        .with_line_number(with_origin);

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}
