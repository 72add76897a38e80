//! Core logger types

pub mod config;
pub mod error;
pub mod global;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod record;
pub mod settings;
pub mod worker;

pub use config::{LoggerConfig, PanicPolicy, DEFAULT_WAIT_TIMEOUT};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use queue::MessageQueue;
pub use record::LogRecord;
pub use settings::LoggerSettings;
pub use worker::{spawned_workers, WorkerState};
