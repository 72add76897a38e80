//! Console appender implementation

use crate::core::{LogLevel, LogRecord};
use colored::Colorize;
use std::io::{self, Write};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Renders records as single console lines.
///
/// Stateless: the colored flag travels with each call because the producer
/// samples it when it builds the entry.
pub struct ConsoleAppender;

impl ConsoleAppender {
    /// Format a record as
    /// `YYYY-mm-dd HH:MM:SS.mmm [LEVEL   ] thread file:line - message`.
    ///
    /// # Example
    ///
    /// ```
    /// use deferred_logger::{ConsoleAppender, LogLevel, LogRecord};
    ///
    /// let record = LogRecord::new(LogLevel::Warning, "disk almost full")
    ///     .with_location("src/disk.rs", 12, "app::disk");
    /// let line = ConsoleAppender::render(&record, false);
    /// assert!(line.contains("[WARNING ]"));
    /// assert!(line.ends_with("src/disk.rs:12 - disk almost full"));
    /// ```
    pub fn render(record: &LogRecord, colored: bool) -> String {
        let level_str = if colored {
            format!("{:8}", record.level.to_str())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:8}", record.level.to_str())
        };

        let timestamp_str = record.timestamp.format(TIMESTAMP_FORMAT);

        match (record.file, record.line) {
            (Some(file), Some(line)) => format!(
                "{} [{}] {} {}:{} - {}",
                timestamp_str, level_str, record.thread, file, line, record.message
            ),
            _ => format!(
                "{} [{}] {} - {}",
                timestamp_str, level_str, record.thread, record.message
            ),
        }
    }

    /// Render and write one record.
    ///
    /// Critical and Error go to stderr, everything else to stdout.
    pub fn write(record: &LogRecord, colored: bool) -> io::Result<()> {
        let line = Self::render(record, colored);
        match record.level {
            LogLevel::Critical | LogLevel::Error => writeln!(io::stderr().lock(), "{}", line),
            _ => writeln!(io::stdout().lock(), "{}", line),
        }
    }

    /// Entry point used by the logging macros: write, and report a failed
    /// write on stderr instead of dropping it.
    pub fn emit(record: &LogRecord, colored: bool) {
        if let Err(e) = Self::write(record, colored) {
            let _ = writeln!(
                io::stderr(),
                "[LOGGER ERROR] Console write failed: {}",
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LogRecord {
        LogRecord::new(LogLevel::Info, "server started").with_location("src/server.rs", 42, "app::server")
    }

    #[test]
    fn test_render_plain() {
        let record = sample();
        let line = ConsoleAppender::render(&record, false);

        let expected_suffix = format!("[INFO    ] {} src/server.rs:42 - server started", record.thread);
        assert!(line.ends_with(&expected_suffix), "unexpected line: {}", line);
        assert!(!line.contains('\u{1b}'));
    }

    #[test]
    fn test_render_without_location() {
        let record = LogRecord::new(LogLevel::Error, "boom");
        let line = ConsoleAppender::render(&record, false);
        assert!(line.ends_with(&format!("[ERROR   ] {} - boom", record.thread)));
    }

    #[test]
    fn test_render_timestamp_prefix() {
        let record = sample();
        let line = ConsoleAppender::render(&record, false);
        let expected = record.timestamp.format(TIMESTAMP_FORMAT).to_string();
        assert!(line.starts_with(&expected));
    }

    #[test]
    fn test_render_colored() {
        colored::control::set_override(true);
        let line = ConsoleAppender::render(&sample(), true);
        assert!(line.contains('\u{1b}'));
        assert!(line.contains("INFO"));
        assert!(line.ends_with("server started"));
    }
}
