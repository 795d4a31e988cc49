//! Tracing subscriber setup
//!
//! Human-readable output while developing, one JSON object per line in
//! production. `RUST_LOG` always wins over the built-in directives.

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

/// Output layout of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset
    pub directives: String,
    /// Emit an event when a span closes, with its busy/idle timings
    pub span_timings: bool,
}

impl TracingConfig {
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Production | Environment::Staging => Self {
                format: LogFormat::Json,
                directives: "info,sqlx=warn".to_string(),
                span_timings: false,
            },
            Environment::Testing => Self {
                format: LogFormat::Compact,
                directives: "warn".to_string(),
                span_timings: false,
            },
            Environment::Development => Self {
                format: LogFormat::Pretty,
                directives: "debug,sqlx=info,hyper=info,tower_http=debug".to_string(),
                span_timings: true,
            },
        }
    }

    /// Defaults for `ENVIRONMENT`, with the layout overridable by `LOG_FORMAT`
    #[must_use]
    pub fn from_env() -> Self {
        let env = std::env::var("ENVIRONMENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let mut config = Self::for_environment(env);

        if let Some(format) = std::env::var("LOG_FORMAT").ok().and_then(|v| v.parse().ok()) {
            config.format = format;
        }
        config
    }
}

/// Install the global subscriber.
///
/// Fails instead of panicking when one is already installed.
pub fn try_init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.directives))
        .map_err(|e| TracingError::InvalidDirectives(e.to_string()))?;
    let spans = if config.span_timings {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_span_events(spans))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false).with_span_events(spans))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_span_events(spans))
            .try_init(),
    };

    installed.map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Invalid log filter: {0}")]
    InvalidDirectives(String),
}
