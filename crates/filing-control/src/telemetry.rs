use crate::config::TelemetryConfig;
use std::fmt;
use tracing::debug;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    /// `APP_LOG_LEVEL` did not parse as a tracing filter.
    InvalidLogLevel { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidLogLevel { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{}' is not a valid tracing filter", value)
            }
            TelemetryError::Subscriber(err) => {
                write!(f, "failed to install log subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidLogLevel { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Filter source chosen by [`build_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterSource {
    RustLog,
    LogLevel,
}

/// `RUST_LOG` directives win when they parse; anything else falls back to the
/// configured level, which must parse.
fn build_filter(
    directives: Option<&str>,
    log_level: &str,
) -> Result<(EnvFilter, FilterSource), TelemetryError> {
    if let Some(filter) = directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
    {
        return Ok((filter, FilterSource::RustLog));
    }

    EnvFilter::try_new(log_level)
        .map(|filter| (filter, FilterSource::LogLevel))
        .map_err(|source| TelemetryError::InvalidLogLevel {
            value: log_level.to_string(),
            source,
        })
}

/// Install the process-wide subscriber. Logs go to stderr so monitor summaries
/// and assessment JSON on stdout stay machine-readable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let (filter, source) = build_filter(rust_log.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    debug!(?source, log_level = %config.log_level, "log subscriber installed");
    Ok(())
}
