//! Appender implementations

pub mod console;

pub use console::ConsoleAppender;
