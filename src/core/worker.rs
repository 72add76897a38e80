//! Background worker that drains the message queue.
//!
//! The worker cycles `Waiting -> Draining -> Waiting -> ...` until it observes
//! the stop flag. It only exits after a drain pass that *began* with the stop
//! flag already set, so every entry enqueued before shutdown was requested is
//! executed before the thread finishes.

use super::{
    config::{LoggerConfig, PanicPolicy},
    log_entry::LogEntry,
    metrics::LoggerMetrics,
    queue::MessageQueue,
    settings::LoggerSettings,
};
use std::any::Any;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const WORKER_THREAD_NAME: &str = "deferred-logger-worker";

static WORKERS_SPAWNED: AtomicUsize = AtomicUsize::new(0);

/// Number of worker threads started in this process so far.
pub fn spawned_workers() -> usize {
    WORKERS_SPAWNED.load(Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    Waiting = 0,
    Draining = 1,
    Stopped = 2,
}

impl WorkerState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => WorkerState::Waiting,
            1 => WorkerState::Draining,
            _ => WorkerState::Stopped,
        }
    }
}

/// State shared between the logger handle, its producers, and the worker.
///
/// No operation touches more than one of these primitives at a time.
#[derive(Debug)]
pub(crate) struct SharedState {
    pub(crate) queue: MessageQueue,
    pub(crate) settings: LoggerSettings,
    pub(crate) metrics: LoggerMetrics,
    stop: AtomicBool,
    state: AtomicU8,
    wait_timeout: Duration,
    panic_policy: PanicPolicy,
}

impl SharedState {
    pub(crate) fn new(config: &LoggerConfig) -> Self {
        Self {
            queue: MessageQueue::new(),
            settings: LoggerSettings::new(config.min_level, config.colored),
            metrics: LoggerMetrics::new(),
            stop: AtomicBool::new(false),
            state: AtomicU8::new(WorkerState::Waiting as u8),
            wait_timeout: config.wait_timeout(),
            panic_policy: config.panic_policy,
        }
    }

    #[inline]
    pub(crate) fn is_stopping(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Set the stop flag and wake the worker so it does not sit out the
    /// remainder of its wait timeout.
    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        self.queue.wake();
    }

    pub(crate) fn worker_state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: WorkerState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Start the worker thread for `shared`.
pub(crate) fn spawn(shared: Arc<SharedState>) -> io::Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || Worker::new(shared).run())?;
    WORKERS_SPAWNED.fetch_add(1, Ordering::SeqCst);
    Ok(handle)
}

/// Marks the worker `Stopped` on exit, including when an entry unwinds it.
struct StoppedOnExit<'a>(&'a SharedState);

impl Drop for StoppedOnExit<'_> {
    fn drop(&mut self) {
        self.0.set_state(WorkerState::Stopped);
    }
}

pub(crate) struct Worker {
    shared: Arc<SharedState>,
    batch: VecDeque<LogEntry>,
}

impl Worker {
    pub(crate) fn new(shared: Arc<SharedState>) -> Self {
        Self {
            shared,
            batch: VecDeque::new(),
        }
    }

    pub(crate) fn run(mut self) {
        let shared = Arc::clone(&self.shared);
        let _stopped = StoppedOnExit(&shared);

        loop {
            // Sampled before draining: exiting on a flag read after the drain
            // could lose an entry pushed between the drain and the read.
            let stopping = shared.is_stopping();

            if !stopping {
                shared.set_state(WorkerState::Waiting);
                shared
                    .queue
                    .wait_for_entries(shared.wait_timeout, || shared.is_stopping());
            }

            self.drain_once();

            if stopping {
                break;
            }
        }
    }

    /// Execute every queued entry, oldest first, until the queue is observed
    /// empty. Entries pushed while a batch runs are picked up by the next
    /// iteration of the same pass.
    pub(crate) fn drain_once(&mut self) -> usize {
        self.shared.set_state(WorkerState::Draining);
        let mut executed = 0;

        loop {
            self.shared.queue.take_into(&mut self.batch);
            if self.batch.is_empty() {
                break;
            }

            while let Some(entry) = self.batch.pop_front() {
                self.execute(entry);
                executed += 1;
            }
        }

        self.shared.metrics.record_drain_pass();
        executed
    }

    fn execute(&self, entry: LogEntry) {
        match self.shared.panic_policy {
            PanicPolicy::Propagate => {
                entry.run();
                self.shared.metrics.record_executed();
            }
            PanicPolicy::Isolate => {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| entry.run()));
                match result {
                    Ok(()) => {
                        self.shared.metrics.record_executed();
                    }
                    Err(panic_info) => {
                        self.shared.metrics.record_panicked();
                        eprintln!(
                            "[LOGGER CRITICAL] Log entry panicked: {}. \
                             Remaining entries continue to drain.",
                            panic_message(panic_info.as_ref())
                        );
                    }
                }
            }
        }
    }
}

/// Extract a printable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
