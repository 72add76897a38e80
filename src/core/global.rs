//! Process-wide logger instance and its exit hook.
//!
//! The instance is built lazily by a [`OnceLock`], so concurrent first calls
//! construct exactly one logger and start exactly one worker. The exit hook is
//! registered inside the same one-time initialiser, which makes registration
//! exactly-once as well.

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    logger::Logger,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

static EXIT_HOOK_REGISTERED: AtomicBool = AtomicBool::new(false);

/// The process-wide logger, created with [`LoggerConfig::default`] on first
/// call (level `Info`, colored output, worker started immediately).
///
/// # Panics
///
/// Panics if the OS cannot start the worker thread, like
/// [`std::thread::spawn`].
pub fn instance() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| start_global(LoggerConfig::default()))
}

/// Configure the process-wide logger before its first use.
///
/// # Errors
///
/// Returns [`LoggerError::AlreadyInitialized`] if the logger was already
/// constructed (by [`instance`] or an earlier `init`), or a configuration
/// error if `config` is invalid.
///
/// # Example
///
/// ```no_run
/// use deferred_logger::{LogLevel, LoggerConfig};
///
/// let logger = deferred_logger::init(LoggerConfig {
///     min_level: LogLevel::Debug,
///     ..LoggerConfig::default()
/// })
/// .expect("logger configured twice");
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
pub fn init(config: LoggerConfig) -> Result<&'static Logger> {
    config.validate()?;

    let mut initialized_here = false;
    let logger = GLOBAL_LOGGER.get_or_init(|| {
        initialized_here = true;
        start_global(config)
    });

    if initialized_here {
        Ok(logger)
    } else {
        Err(LoggerError::AlreadyInitialized)
    }
}

/// The process-wide logger if it has been created, without creating it.
pub fn try_instance() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// Shut down the process-wide logger if it exists.
///
/// Runs automatically at normal process exit on Unix; call it explicitly
/// elsewhere, or before an exit path that skips exit handlers.
pub fn shutdown() {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.shutdown();
    }
}

/// Whether the exit hook was installed for the process-wide logger.
pub fn exit_hook_registered() -> bool {
    EXIT_HOOK_REGISTERED.load(Ordering::Acquire)
}

fn start_global(config: LoggerConfig) -> Logger {
    let logger = match Logger::new(config) {
        Ok(logger) => logger,
        Err(err) => panic!("[LOGGER CRITICAL] Cannot start global logger: {}", err),
    };
    register_exit_hook();
    logger
}

#[cfg(unix)]
extern "C" fn shutdown_at_exit() {
    shutdown();
}

#[cfg(unix)]
fn register_exit_hook() {
    // SAFETY: `shutdown_at_exit` is a plain `extern "C" fn()` with no
    // arguments, as `atexit` requires, and it only touches 'static state.
    let rc = unsafe { libc::atexit(shutdown_at_exit) };
    if rc == 0 {
        EXIT_HOOK_REGISTERED.store(true, Ordering::Release);
    } else {
        eprintln!(
            "[LOGGER WARNING] Failed to register exit hook. \
             Call deferred_logger::shutdown() before exit to flush pending entries."
        );
    }
}

#[cfg(not(unix))]
fn register_exit_hook() {}
