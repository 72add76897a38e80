//! Deferred log entry

use std::fmt;

/// A unit of delayed output: a closure that performs one formatted write when
/// the worker runs it.
///
/// Entries are owned by the queue from the moment they are enqueued until the
/// worker pops them; running an entry consumes it, so no entry can execute
/// twice.
pub struct LogEntry {
    render: Box<dyn FnOnce() + Send + 'static>,
}

impl LogEntry {
    pub fn new<F>(render: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            render: Box::new(render),
        }
    }

    #[inline]
    pub fn run(self) {
        (self.render)()
    }
}

impl<F> From<F> for LogEntry
where
    F: FnOnce() + Send + 'static,
{
    fn from(render: F) -> Self {
        Self::new(render)
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry").finish_non_exhaustive()
    }
}
