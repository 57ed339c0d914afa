//! Logging initialization.
//!
//! Structured logging through `tracing`. The library only emits events;
//! binaries call [`init_logging_with_config`] once at startup.
//!
//! | Variable                        | Default | Values                          |
//! |---------------------------------|---------|---------------------------------|
//! | `ROUTETPL_LOG_LEVEL`            | `info`  | trace/debug/info/warn/error     |
//! | `ROUTETPL_LOG_FORMAT`           | `json`  | json/pretty                     |
//! | `ROUTETPL_LOG_TARGET_FILTER`    | unset   | comma-separated directives      |
//! | `ROUTETPL_LOG_INCLUDE_LOCATION` | `false` | true/false                      |
//!
//! `RUST_LOG` overrides the level when set.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Encoding of the stderr log stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Settings for the `routetpl` log stream.
///
/// Unparseable values fall back to the defaults: `INFO`, JSON, no extra
/// directives, no source locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Extra `EnvFilter` directives such as `route_template::generate=trace`
    pub directives: Vec<String>,
    /// Attach `file:line` to every event
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Json,
            directives: Vec::new(),
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Read `ROUTETPL_LOG_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("ROUTETPL_LOG_LEVEL").ok().as_deref(),
            env::var("ROUTETPL_LOG_FORMAT").ok().as_deref(),
            env::var("ROUTETPL_LOG_TARGET_FILTER").ok().as_deref(),
            env::var("ROUTETPL_LOG_INCLUDE_LOCATION").ok().as_deref(),
        )
    }

    /// Build settings from raw values as they would appear in the
    /// environment.
    #[must_use]
    pub fn from_values(
        level: Option<&str>,
        format: Option<&str>,
        directives: Option<&str>,
        include_location: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            level: level
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.level),
            format: format
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.format),
            directives: directives
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            include_location: include_location
                .and_then(|s| s.trim().to_ascii_lowercase().parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }
}

/// Install the global tracing subscriber writing to stderr.
///
/// `RUST_LOG` replaces the configured level when set. Directives that fail
/// to parse are reported as a `warn!` once the subscriber is live.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let mut rejected = Vec::new();
    for directive in &config.directives {
        match directive.parse() {
            Ok(parsed) => env_filter = env_filter.add_directive(parsed),
            Err(_) => rejected.push(directive.as_str()),
        }
    }

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    for directive in rejected {
        tracing::warn!(directive = %directive, "Ignoring invalid log filter directive");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse(), Ok(LogFormat::Json));
        assert_eq!(" PRETTY ".parse(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(
            LogConfig::from_values(None, None, None, None),
            LogConfig::default()
        );
    }

    #[test]
    fn test_from_values() {
        let config = LogConfig::from_values(
            Some("warn"),
            Some("pretty"),
            Some("route_template::generate=trace, ,hyper=off"),
            Some("TRUE"),
        );
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(
            config.directives,
            ["route_template::generate=trace", "hyper=off"]
        );
        assert!(config.include_location);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = LogConfig::from_values(Some("loud"), Some("xml"), None, Some("maybe"));
        assert_eq!(config, LogConfig::default());
    }
}
