use std::fs::File;
use tgloop_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Map a configured level onto a tracing filter directive.
fn directive(level: &str) -> &'static str {
    match level {
        "debug" => "debug",
        "warning" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// Install the process-wide subscriber. `RUST_LOG` wins over the
/// configured level when set.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(config: &LogConfig) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(&config.level)));

    let (writer, guard) = match config.file.as_deref() {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| anyhow::anyhow!("failed to open log file {path}: {e}"))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.file.is_none())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;

    Ok(guard)
}
