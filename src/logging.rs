use crate::config::LoggingConfig;
use crate::{GoPackageError, Result};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(GoPackageError::Configuration(format!(
                "unknown log format {:?} (expected pretty, compact or json)",
                other
            ))),
        }
    }
}

/// Install the global tracing subscriber. Logs go to stderr so stdout only
/// carries the per-file report. `RUST_LOG` takes precedence over `level`.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            GoPackageError::Configuration(format!("invalid log level {:?}: {}", level, e))
        })?,
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match LogFormat::parse(&config.format)? {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| GoPackageError::Configuration(format!("logging already initialised: {}", e)))
}
