//! Main logger implementation

use super::{
    config::{LoggerConfig, PanicPolicy},
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    worker::{self, panic_message, SharedState, WorkerState},
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

/// Asynchronous logger: producers enqueue deferred render actions, a single
/// background worker executes them in FIFO order.
///
/// Most programs use the process-wide instance returned by
/// [`Logger::instance`]. Independent loggers built with [`Logger::new`] or
/// [`Logger::builder`] own their own queue and worker, and shut down when
/// dropped.
///
/// # Example
///
/// ```
/// use deferred_logger::{Logger, LoggerConfig};
/// use std::sync::{Arc, Mutex};
///
/// let logger = Logger::new(LoggerConfig::default()).unwrap();
/// let sink = Arc::new(Mutex::new(Vec::new()));
///
/// for i in 1..=3 {
///     let sink = Arc::clone(&sink);
///     logger.enqueue(move || sink.lock().unwrap().push(i));
/// }
///
/// logger.shutdown();
/// assert_eq!(*sink.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub struct Logger {
    shared: Arc<SharedState>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl Logger {
    /// Create a logger and start its worker immediately
    pub fn new(config: LoggerConfig) -> Result<Self> {
        config.validate()?;

        let shared = Arc::new(SharedState::new(&config));
        let handle = worker::spawn(Arc::clone(&shared)).map_err(LoggerError::WorkerSpawn)?;
        let worker_id = handle.thread().id();

        Ok(Self {
            shared,
            worker: Mutex::new(Some(handle)),
            worker_id,
        })
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use deferred_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .colored(false)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.level(), LogLevel::Debug);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The process-wide logger, created on first call.
    ///
    /// See [`crate::instance`].
    #[inline]
    pub fn instance() -> &'static Logger {
        super::global::instance()
    }

    /// Append a deferred render action to the queue.
    ///
    /// Never waits on the worker; the only contention is the brief queue lock
    /// shared with other producers. Entries enqueued after shutdown are kept in
    /// the queue but never executed.
    pub fn enqueue<F>(&self, render: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue_entry(LogEntry::new(render));
    }

    pub fn enqueue_entry(&self, entry: LogEntry) {
        self.shared.queue.push(entry);
        self.shared.metrics.record_enqueued();
    }

    /// Like [`Logger::enqueue`], but refuses entries once shutdown has been
    /// requested.
    pub fn try_enqueue<F>(&self, render: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.shared.is_stopping() {
            return Err(LoggerError::LoggerStopped);
        }
        self.enqueue(render);
        Ok(())
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.shared.settings.level()
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.shared.settings.set_level(level);
    }

    #[inline]
    pub fn colored(&self) -> bool {
        self.shared.settings.colored()
    }

    #[inline]
    pub fn set_colored(&self, colored: bool) {
        self.shared.settings.set_colored(colored);
    }

    /// Call-site filter: whether a message at `level` should be enqueued.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level())
    }

    /// Number of entries enqueued but not yet executed
    pub fn pending(&self) -> u64 {
        self.shared.metrics.pending()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn worker_state(&self) -> WorkerState {
        self.shared.worker_state()
    }

    /// Whether the worker has not yet finished its final drain.
    ///
    /// Reads the worker state rather than the join handle, so it never waits
    /// on a concurrent `shutdown` and is safe to call from inside an entry.
    pub fn is_running(&self) -> bool {
        self.worker_state() != WorkerState::Stopped
    }

    /// Stop the worker and wait until it has drained every entry enqueued
    /// before this call.
    ///
    /// Idempotent: later calls return immediately. Concurrent callers all
    /// block until the final drain completes. When called from inside an entry
    /// (on the worker thread) it only requests the stop, since the worker
    /// cannot join itself.
    pub fn shutdown(&self) {
        self.shared.request_stop();

        if thread::current().id() == self.worker_id {
            return;
        }

        let mut slot = self.worker.lock();
        if let Some(handle) = slot.take() {
            Self::join_worker(handle);
        }
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Returns `true` once the worker has finished its final drain, `false`
    /// if `timeout` elapsed first. On timeout the worker keeps running and a
    /// later `shutdown` call can still wait for it.
    pub fn shutdown_timeout(&self, timeout: Duration) -> bool {
        self.shared.request_stop();

        if thread::current().id() == self.worker_id {
            return false;
        }

        let start = Instant::now();

        loop {
            // The slot is only held for a check; a concurrent `shutdown` that
            // is joining keeps it locked until the worker is gone.
            let remaining = timeout.saturating_sub(start.elapsed());
            if let Some(mut slot) = self.worker.try_lock_for(remaining) {
                let finished = match slot.as_ref() {
                    None => return true,
                    Some(handle) => handle.is_finished(),
                };

                if finished {
                    if let Some(handle) = slot.take() {
                        Self::join_worker(handle);
                    }
                    return true;
                }
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Worker did not finish within {:?}. \
                     {} entries still pending.",
                    timeout,
                    self.pending()
                );
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn join_worker(handle: JoinHandle<()>) {
        if let Err(panic_info) = handle.join() {
            eprintln!(
                "[LOGGER ERROR] Worker thread panicked: {}. \
                 Entries queued after the failure were not executed.",
                panic_message(panic_info.as_ref())
            );
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("colored", &self.colored())
            .field("state", &self.worker_state())
            .field("pending", &self.pending())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use deferred_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Trace)
///     .wait_timeout(Duration::from_millis(200))
///     .panic_policy(PanicPolicy::Isolate)
///     .build()
///     .unwrap();
/// logger.shutdown();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colored(mut self, colored: bool) -> Self {
        self.config.colored = colored;
        self
    }

    /// Set how long the idle worker waits before re-checking the stop flag
    ///
    /// Sub-millisecond values round up to one millisecond.
    #[must_use = "builder methods return a new value"]
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.config.wait_timeout_ms = (timeout.as_millis() as u64).max(1);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn panic_policy(mut self, policy: PanicPolicy) -> Self {
        self.config.panic_policy = policy;
        self
    }

    /// The configuration the builder would apply
    pub fn to_config(&self) -> LoggerConfig {
        self.config.clone()
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        Logger::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn quiet_logger() -> Logger {
        Logger::builder()
            .colored(false)
            .wait_timeout(Duration::from_millis(50))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build().unwrap();
        assert_eq!(logger.level(), LogLevel::Info);
        assert!(logger.colored());
        assert!(logger.is_running());
    }

    #[test]
    fn test_builder_full_configuration() {
        let builder = Logger::builder()
            .min_level(LogLevel::Debug)
            .colored(false)
            .wait_timeout(Duration::from_millis(250))
            .panic_policy(PanicPolicy::Propagate);

        let config = builder.to_config();
        assert_eq!(config.wait_timeout_ms, 250);
        assert_eq!(config.panic_policy, PanicPolicy::Propagate);

        let logger = builder.build().unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);
        assert!(!logger.colored());
    }

    #[test]
    fn test_builder_rounds_tiny_timeout_up() {
        let config = Logger::builder().wait_timeout(Duration::from_micros(10)).to_config();
        assert_eq!(config.wait_timeout_ms, 1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = LoggerConfig {
            wait_timeout_ms: 0,
            ..LoggerConfig::default()
        };
        assert!(matches!(
            Logger::new(config),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_get_after_set() {
        let logger = quiet_logger();

        logger.set_level(LogLevel::Trace);
        assert_eq!(logger.level(), LogLevel::Trace);
        logger.set_colored(true);
        assert!(logger.colored());
    }

    #[test]
    fn test_is_enabled_follows_threshold() {
        let logger = quiet_logger();
        logger.set_level(LogLevel::Warning);

        assert!(logger.is_enabled(LogLevel::Critical));
        assert!(logger.is_enabled(LogLevel::Warning));
        assert!(!logger.is_enabled(LogLevel::Info));
    }

    #[test]
    fn test_shutdown_runs_every_entry() {
        let logger = quiet_logger();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..100 {
            let count = Arc::clone(&count);
            logger.enqueue(move || {
                count.fetch_add(1, Ordering::Relaxed);
            });
        }
        logger.shutdown();

        assert_eq!(count.load(Ordering::Relaxed), 100);
        assert_eq!(logger.pending(), 0);
        assert_eq!(logger.worker_state(), WorkerState::Stopped);
        assert!(!logger.is_running());
    }

    #[test]
    fn test_try_enqueue_after_shutdown() {
        let logger = quiet_logger();
        assert!(logger.try_enqueue(|| {}).is_ok());
        logger.shutdown();

        assert!(matches!(
            logger.try_enqueue(|| {}),
            Err(LoggerError::LoggerStopped)
        ));
        assert_eq!(logger.metrics().executed(), 1);
    }

    #[test]
    fn test_shutdown_timeout_completes() {
        let logger = quiet_logger();
        logger.enqueue(|| {});
        assert!(logger.shutdown_timeout(Duration::from_secs(5)));
        assert!(logger.shutdown_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn test_shutdown_timeout_expires_on_slow_entry() {
        let logger = quiet_logger();
        logger.enqueue(|| thread::sleep(Duration::from_millis(300)));

        assert!(!logger.shutdown_timeout(Duration::from_millis(10)));
        logger.shutdown();
        assert_eq!(logger.metrics().executed(), 1);
    }

    #[test]
    fn test_is_running_does_not_wait_on_timed_shutdown() {
        let logger = Arc::new(quiet_logger());
        logger.enqueue(|| thread::sleep(Duration::from_millis(300)));

        let waiter = {
            let logger = Arc::clone(&logger);
            thread::spawn(move || logger.shutdown_timeout(Duration::from_secs(5)))
        };
        thread::sleep(Duration::from_millis(20));

        let start = Instant::now();
        assert!(logger.is_running());
        assert!(start.elapsed() < Duration::from_millis(200));

        assert!(waiter.join().unwrap());
        assert!(!logger.is_running());
    }

    #[test]
    fn test_debug_output() {
        let logger = quiet_logger();
        let debug = format!("{:?}", logger);
        assert!(debug.contains("Logger"));
        assert!(debug.contains("Info"));
    }
}
