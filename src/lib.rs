//! # Deferred Logger
//!
//! A minimal, thread-safe asynchronous logger. Application threads enqueue
//! deferred render actions; a single background worker executes them in FIFO
//! order, so producers never pay for console I/O.
//!
//! ## Features
//!
//! - **Non-blocking producers**: enqueueing only takes a brief queue lock
//! - **Ordered output**: entries run exactly once, in insertion order
//! - **Lossless shutdown**: `shutdown()` returns after a final drain, and runs
//!   automatically at normal process exit on Unix
//! - **Lock-free config**: level and color flags are independent atomics
//!
//! ## Example
//!
//! ```no_run
//! use deferred_logger::{info, warning, Logger, LogLevel};
//!
//! let logger = Logger::instance();
//! logger.set_level(LogLevel::Debug);
//!
//! info!(logger, "listening on port {}", 8080);
//! warning!(logger, "cache miss rate {:.1}%", 12.5);
//!
//! deferred_logger::shutdown();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::ConsoleAppender;
    pub use crate::core::{
        LogEntry, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, PanicPolicy, Result, WorkerState,
    };
}

pub use crate::appenders::ConsoleAppender;
pub use crate::core::global::{exit_hook_registered, init, instance, shutdown, try_instance};
pub use crate::core::{
    spawned_workers, LogEntry, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, LoggerSettings, MessageQueue, PanicPolicy, Result, WorkerState,
    DEFAULT_WAIT_TIMEOUT,
};
