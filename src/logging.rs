// Logging set-up and the stack error log listener

use crate::config::LogConfig;
use crate::messaging::bus::Listener;
use crate::messaging::notification::StackEvent;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{0}': {1}")]
    Filter(String, String),

    #[error("Cannot open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("Logger already installed: {0}")]
    Install(String),
}

/// Install the global tracing subscriber
///
/// Filter precedence: `level_override`, then `RUST_LOG`, then the
/// configured level. Logs go to the configured file, or to stderr so they
/// never mix with the calculator output.
pub fn init_logging(config: &LogConfig, level_override: Option<&str>) -> Result<(), LoggingError> {
    let filter = build_filter(config, level_override)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

fn build_filter(config: &LogConfig, level_override: Option<&str>) -> Result<EnvFilter, LoggingError> {
    if let Some(level) = level_override {
        return parse_filter(level);
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(&config.level),
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive)
        .map_err(|e| LoggingError::Filter(directive.to_string(), e.to_string()))
}

/// Records every stack error event in the log
#[derive(Debug, Default)]
pub struct LogListener;

impl Listener<StackEvent> for LogListener {
    fn on_event(&self, event: &StackEvent) {
        if let Some(message) = event.message() {
            debug!(?event, message, "stack error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let config = LogConfig::default();
        let filter = build_filter(&config, Some("debug")).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_invalid_directive() {
        assert!(matches!(
            parse_filter("rpncalc=notalevel"),
            Err(LoggingError::Filter(_, _))
        ));
    }
}
