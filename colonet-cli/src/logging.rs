//! Logging initialisation for the colonet CLI.
//!
//! Diagnostics go to `stderr` through a global `tracing` subscriber so the
//! plan report on `stdout` stays clean. The `log` facade is bridged into the
//! same subscriber.
//!
//! | Variable              | Values                    | Default |
//! |-----------------------|---------------------------|---------|
//! | `RUST_LOG`            | any `EnvFilter` directive | `info`  |
//! | `COLONET_LOG_FORMAT`  | `human`, `json`           | `human` |
//! | `COLONET_LOG_SPANS`   | `full`, `close`, `off`    | `full`  |

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "COLONET_LOG_FORMAT";
const LOG_SPANS_ENV: &str = "COLONET_LOG_SPANS";

static INSTALLED: OnceLock<LoggingConfig> = OnceLock::new();

/// Output format for diagnostics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedValue {
                name: LOG_FORMAT_ENV,
                provided: other.to_owned(),
                expected: "`human` or `json`",
            }),
        }
    }
}

/// Which span lifecycle events are logged.
///
/// Solver spans (`mst.kruskal`, `tour.solve`, ...) carry timing on close, so
/// `close` is enough to profile a plan without the enter/exit noise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SpanEvents {
    /// New, enter, exit and close.
    #[default]
    Full,
    /// Close only, with busy and idle time.
    Close,
    /// No span events; only explicit events are logged.
    Off,
}

impl SpanEvents {
    const fn as_fmt_span(self) -> FmtSpan {
        match self {
            Self::Full => FmtSpan::FULL,
            Self::Close => FmtSpan::CLOSE,
            Self::Off => FmtSpan::NONE,
        }
    }
}

impl FromStr for SpanEvents {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "close" => Ok(Self::Close),
            "off" | "none" => Ok(Self::Off),
            other => Err(LoggingError::UnsupportedValue {
                name: LOG_SPANS_ENV,
                provided: other.to_owned(),
                expected: "`full`, `close` or `off`",
            }),
        }
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// A logging variable named an unknown option.
    #[error("unsupported value `{provided}` for `{name}`; expected {expected}")]
    UnsupportedValue {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Normalised value supplied by the user.
        provided: String,
        /// Accepted values, for the message.
        expected: &'static str,
    },
    /// Failed to install the global tracing subscriber.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Logging options resolved from the environment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Span lifecycle events to log.
    pub span_events: SpanEvents,
}

impl LoggingConfig {
    /// Reads `COLONET_LOG_FORMAT` and `COLONET_LOG_SPANS`.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when a variable is not valid Unicode or
    /// holds an unsupported value.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|name| env::var(name))
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, env::VarError>,
    ) -> Result<Self, LoggingError> {
        Ok(Self {
            format: parse_var(&lookup, LOG_FORMAT_ENV)?.unwrap_or_default(),
            span_events: parse_var(&lookup, LOG_SPANS_ENV)?.unwrap_or_default(),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&'static str) -> Result<String, env::VarError>,
    name: &'static str,
) -> Result<Option<T>, LoggingError>
where
    T: FromStr<Err = LoggingError>,
{
    match lookup(name) {
        Ok(raw) => raw.parse().map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source @ env::VarError::NotUnicode(_)) => {
            Err(LoggingError::InvalidUnicode { name, source })
        }
    }
}

/// Installs global structured logging once per process.
///
/// Later calls return immediately. If another subscriber already owns the
/// global slot a notice is printed and that subscriber is kept.
///
/// # Errors
/// Returns [`LoggingError`] if the logging variables are invalid.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let config = LoggingConfig::from_env()?;
    if let Err(LoggingError::InstallFailed { source }) = install_subscriber(config) {
        report_existing_subscriber(&source);
    }
    let _ = INSTALLED.set(config);
    Ok(())
}

fn install_subscriber(config: LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_span_events(config.span_events.as_fmt_span())
        .with_writer(std::io::stderr);
    let stderr_layer = match config.format {
        LogFormat::Json => stderr_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => stderr_layer.boxed(),
    };

    // Best-effort: another logger may already own the `log` slot.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

#[expect(
    clippy::print_stderr,
    reason = "No subscriber of ours is installed to carry this notice"
)]
fn report_existing_subscriber(source: &tracing_subscriber::util::TryInitError) {
    eprintln!("structured logging already configured elsewhere: {source}");
}
