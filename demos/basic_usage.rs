//! Basic logger usage example
//!
//! Demonstrates the process-wide logger, level filtering, and colored output.
//!
//! Run with: cargo run --example basic_usage

use deferred_logger::prelude::*;
use deferred_logger::{critical, debug, error, info, trace, warning};

fn main() -> Result<()> {
    println!("=== Deferred Logger - Basic Usage Example ===\n");

    let logger = Logger::instance();

    // Set minimum log level
    logger.set_level(LogLevel::Trace);

    println!("1. Logging at different levels:");
    critical!(logger, "This is a critical message");
    error!(logger, "This is an error message");
    warning!(logger, "This is a warning message");
    info!(logger, "This is an info message");
    debug!(logger, "This is a debug message");
    trace!(logger, "This is a trace message");

    // Change minimum level
    logger.set_level(LogLevel::Info);
    logger.set_colored(false);
    info!(logger, "Minimum level set to INFO, colors off: debug and trace are filtered");
    debug!(logger, "Debug message (hidden)");
    trace!(logger, "Trace message (hidden)");
    warning!(logger, "Warning message (visible)");

    // The exit hook would flush on return as well; shutting down explicitly
    // keeps the output ahead of the closing banner.
    deferred_logger::shutdown();

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
