//! Tracing subscriber setup

use clap::ValueEnum;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Builds the filter: `RUST_LOG` directives on top of `level`
pub fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Installs the global subscriber writing to stderr
///
/// The returned guard flushes buffered lines on drop and must be kept alive
/// for the lifetime of the process.
pub fn init(format: LogFormat, level: LevelFilter) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let layer = match format {
        LogFormat::Text => fmt::layer()
            .with_writer(writer)
            .with_target(false)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(env_filter(level)))
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_from_cli_value() {
        assert_eq!(LogFormat::from_str("json", true), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_str("TEXT", true), Ok(LogFormat::Text));
        assert!(LogFormat::from_str("xml", true).is_err());
    }
}
