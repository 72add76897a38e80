//! Unbounded FIFO queue of deferred entries.
//!
//! Producers push under a single mutex and signal the condition variable; the
//! worker is the only consumer. The queue has no capacity limit and never
//! drops or reorders entries.

use super::log_entry::LogEntry;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MessageQueue {
    entries: Mutex<VecDeque<LogEntry>>,
    available: Condvar,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the tail and wake the worker if it is waiting.
    pub fn push(&self, entry: LogEntry) {
        self.entries.lock().push_back(entry);
        self.available.notify_one();
    }

    /// Block until the queue is non-empty, `interrupted` returns true, or
    /// `timeout` elapses. Returns whether entries are available.
    ///
    /// `interrupted` is evaluated while the queue lock is held, so a caller that
    /// flips its condition and then calls [`MessageQueue::wake`] cannot be missed.
    pub(crate) fn wait_for_entries<F>(&self, timeout: Duration, interrupted: F) -> bool
    where
        F: Fn() -> bool,
    {
        let mut entries = self.entries.lock();
        if entries.is_empty() && !interrupted() {
            self.available
                .wait_while_for(&mut entries, |queued| queued.is_empty() && !interrupted(), timeout);
        }
        !entries.is_empty()
    }

    /// Move every queued entry into `batch`, oldest first.
    ///
    /// `batch` is expected to be empty; its allocation is reused by swapping.
    pub(crate) fn take_into(&self, batch: &mut VecDeque<LogEntry>) {
        let mut entries = self.entries.lock();
        if batch.is_empty() {
            std::mem::swap(&mut *entries, batch);
        } else {
            batch.extend(entries.drain(..));
        }
    }

    /// Wake every waiter.
    ///
    /// Takes the lock before notifying so a waiter that is between its
    /// condition check and parking still receives the signal.
    pub(crate) fn wake(&self) {
        let _entries = self.entries.lock();
        self.available.notify_all();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    fn recording_entry(sink: &Arc<Mutex<Vec<u32>>>, value: u32) -> LogEntry {
        let sink = Arc::clone(sink);
        LogEntry::new(move || sink.lock().push(value))
    }

    #[test]
    fn test_take_preserves_fifo() {
        let queue = MessageQueue::new();
        let sink = Arc::new(Mutex::new(Vec::new()));
        for i in 1..=5 {
            queue.push(recording_entry(&sink, i));
        }
        assert_eq!(queue.len(), 5);

        let mut batch = VecDeque::new();
        queue.take_into(&mut batch);
        assert!(queue.is_empty());

        for entry in batch.drain(..) {
            entry.run();
        }
        assert_eq!(*sink.lock(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_take_appends_to_non_empty_batch() {
        let queue = MessageQueue::new();
        let sink = Arc::new(Mutex::new(Vec::new()));

        let mut batch = VecDeque::new();
        batch.push_back(recording_entry(&sink, 1));
        queue.push(recording_entry(&sink, 2));
        queue.take_into(&mut batch);

        for entry in batch.drain(..) {
            entry.run();
        }
        assert_eq!(*sink.lock(), vec![1, 2]);
    }

    #[test]
    fn test_wait_returns_immediately_when_non_empty() {
        let queue = MessageQueue::new();
        queue.push(LogEntry::new(|| {}));

        let start = Instant::now();
        assert!(queue.wait_for_entries(Duration::from_secs(5), || false));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_wait_times_out_when_empty() {
        let queue = MessageQueue::new();

        let start = Instant::now();
        assert!(!queue.wait_for_entries(Duration::from_millis(20), || false));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_push_wakes_waiter() {
        let queue = Arc::new(MessageQueue::new());
        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.wait_for_entries(Duration::from_secs(10), || false))
        };

        thread::sleep(Duration::from_millis(20));
        queue.push(LogEntry::new(|| {}));

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn test_wake_releases_interrupted_waiter() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let queue = Arc::new(MessageQueue::new());
        let stop = Arc::new(AtomicBool::new(false));
        let waiter = {
            let queue = Arc::clone(&queue);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let start = Instant::now();
                queue.wait_for_entries(Duration::from_secs(10), || stop.load(Ordering::Acquire));
                start.elapsed()
            })
        };

        thread::sleep(Duration::from_millis(20));
        stop.store(true, Ordering::Release);
        queue.wake();

        assert!(waiter.join().unwrap() < Duration::from_secs(5));
    }
}
