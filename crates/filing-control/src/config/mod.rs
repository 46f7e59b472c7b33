use chrono::NaiveDate;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub monitor: MonitorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let reference_date = match env::var("FC_REFERENCE_DATE") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|source| ConfigError::InvalidReferenceDate { value: raw, source })?,
            ),
            _ => None,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            monitor: MonitorConfig { reference_date },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings for deadline monitor runs.
#[derive(Debug, Clone, Default)]
pub struct MonitorConfig {
    /// Pins "today" for monitor runs; the caller's clock is used when unset.
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidReferenceDate {
        value: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReferenceDate { value, .. } => {
                write!(f, "FC_REFERENCE_DATE must be YYYY-MM-DD, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidReferenceDate { source, .. } => Some(source),
        }
    }
}
