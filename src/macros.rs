//! Logging macros for ergonomic log message formatting.
//!
//! Each macro filters against the logger's level at the call site, formats the
//! message immediately, and enqueues a render action that the worker later
//! writes to the console. Nothing is enqueued for filtered-out messages.
//!
//! # Examples
//!
//! ```
//! use deferred_logger::prelude::*;
//! use deferred_logger::info;
//!
//! let logger = Logger::builder().build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! logger.shutdown();
//! ```
//!
//! The process-wide logger works the same way:
//!
//! ```no_run
//! use deferred_logger::{error, Logger};
//!
//! error!(Logger::instance(), "Failed to open {}", "config.toml");
//! ```

/// Log a message with automatic formatting.
///
/// `$logger` may be a `Logger`, a `&Logger`, or anything that derefs to one.
///
/// # Examples
///
/// ```
/// # use deferred_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use deferred_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.is_enabled(level) {
            let record = $crate::LogRecord::new(level, ::std::format!($($arg)+))
                .with_location(::std::file!(), ::std::line!(), ::std::module_path!());
            let colored = logger.colored();
            logger.enqueue(move || $crate::ConsoleAppender::emit(&record, colored));
        }
    }};
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use deferred_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use deferred_logger::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use deferred_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use deferred_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use deferred_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use deferred_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use deferred_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use deferred_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use deferred_logger::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::Debug).build().unwrap();
/// use deferred_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use deferred_logger::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::Trace).build().unwrap();
/// use deferred_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}
