//! # Logger
//!
//! Shared `tracing` setup for the workspace binaries.
//!
//! Logs always go to stderr so stdout stays reserved for program output.
//! Verbosity comes from `RUST_LOG` (default `warn`); `RESPOND_LOG_FORMAT=json`
//! switches to one JSON object per line.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Reads `RESPOND_LOG_FORMAT`; anything other than `json` means text.
    pub fn from_env() -> Self {
        std::env::var("RESPOND_LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// RFC 3339 UTC timestamps with millisecond precision.
struct UtcTimestamp;

impl FormatTime for UtcTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Installs the global subscriber using `RUST_LOG` and `RESPOND_LOG_FORMAT`.
///
/// Returns `false` if a subscriber was already installed.
pub fn init() -> bool {
    init_with(DEFAULT_FILTER, LogFormat::from_env())
}

pub fn init_with(default_filter: &str, format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTimestamp)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(?format, "logger initialized");
    }
    installed.is_ok()
}
