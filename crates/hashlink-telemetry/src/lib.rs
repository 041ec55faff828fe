//! Tracing setup shared by the hashlink binaries.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing_log::LogTracer;
use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to bridge log records: {0}")]
    LogTracer(#[from] tracing_log::log::SetLoggerError),
    #[error("failed to install subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
    #[error("unknown log format: {0}")]
    UnknownFormat(String),
}

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(TelemetryError::UnknownFormat(other.to_string())),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber and forwards `log` records into it.
///
/// Fails if a global subscriber or logger is already installed.
pub fn init(format: LogFormat) -> Result<(), TelemetryError> {
    LogTracer::init()?;

    let fmt_layer = match format {
        LogFormat::Pretty => fmt::layer().boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
    };
    let subscriber = Registry::default().with(fmt_layer).with(env_filter());
    set_global_default(subscriber)?;

    Ok(())
}
