//! Formatted log record captured at the call site

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::cell::RefCell;

// Thread-local cache for the producer's display name to avoid repeated allocations
thread_local! {
    static THREAD_LABEL_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Name of the current thread, or its id when unnamed
fn current_thread_label() -> String {
    THREAD_LABEL_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                match current.name() {
                    Some(name) => name.to_string(),
                    None => format!("{:?}", current.id()),
                }
            })
            .clone()
    })
}

/// Everything a render action needs, captured by the producer.
///
/// The timestamp and thread are taken when the record is created, not when the
/// worker eventually prints it.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    pub module_path: Option<&'static str>,
    pub thread: String,
}

impl LogRecord {
    /// Escape newlines, carriage returns, and tabs so one record always
    /// renders as one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Local::now(),
            file: None,
            line: None,
            module_path: None,
            thread: current_thread_label(),
        }
    }

    pub fn with_location(mut self, file: &'static str, line: u32, module_path: &'static str) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self.module_path = Some(module_path);
        self
    }
}
