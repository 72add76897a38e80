//! Logger configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default worker wait timeout (1 second)
///
/// Bounds how long the worker sleeps before re-checking the stop flag when no
/// entries arrive.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(1000);

/// What the worker does when an entry panics while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanicPolicy {
    /// Catch the panic, report it on stderr, count it, and keep draining.
    #[default]
    Isolate,
    /// Let the panic unwind the worker thread. Entries still queued are never
    /// executed; `shutdown()` reports the failure when it joins the worker.
    Propagate,
}

/// Startup configuration for a logger.
///
/// # Example
///
/// ```
/// use deferred_logger::{LogLevel, LoggerConfig, PanicPolicy};
///
/// let config = LoggerConfig::from_json(
///     r#"{ "min_level": "debug", "colored": false, "panic_policy": "propagate" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.min_level, LogLevel::Debug);
/// assert!(!config.colored);
/// assert_eq!(config.panic_policy, PanicPolicy::Propagate);
/// assert_eq!(config.wait_timeout_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub colored: bool,
    pub wait_timeout_ms: u64,
    pub panic_policy: PanicPolicy,
}

impl LoggerConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.wait_timeout_ms == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "wait_timeout_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            colored: true,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT.as_millis() as u64,
            panic_policy: PanicPolicy::Isolate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.colored);
        assert_eq!(config.wait_timeout(), DEFAULT_WAIT_TIMEOUT);
        assert_eq!(config.panic_policy, PanicPolicy::Isolate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = LoggerConfig::from_json(r#"{ "wait_timeout_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = LoggerConfig::from_json(r#"{ "min_level": "loud" }"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = LoggerConfig {
            min_level: LogLevel::Trace,
            colored: false,
            wait_timeout_ms: 250,
            panic_policy: PanicPolicy::Propagate,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"propagate\""));
        assert_eq!(LoggerConfig::from_json(&json).unwrap(), config);
    }
}
