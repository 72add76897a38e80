//! Async logging example
//!
//! Demonstrates many producer threads feeding one worker, with a configured
//! global logger.
//!
//! Run with: cargo run --example async_logging

use deferred_logger::prelude::*;
use deferred_logger::info;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    println!("=== Deferred Logger - Async Logging Example ===\n");

    let logger = deferred_logger::init(LoggerConfig {
        min_level: LogLevel::Info,
        colored: true,
        wait_timeout_ms: 500,
        panic_policy: PanicPolicy::Isolate,
    })?;

    println!("1. Producers never wait on console I/O:");
    let start = Instant::now();
    for i in 0..100 {
        info!(logger, "Message #{}", i);
    }
    println!("   Enqueued 100 messages in {:?}", start.elapsed());

    println!("\n2. Multi-threaded logging:");
    let handles: Vec<_> = (0..5)
        .map(|thread_id| {
            thread::Builder::new()
                .name(format!("producer-{}", thread_id))
                .spawn(move || {
                    let logger = Logger::instance();
                    for i in 0..20 {
                        info!(logger, "Thread {} - Message {}", thread_id, i);
                        thread::sleep(Duration::from_millis(1));
                    }
                })
                .expect("Failed to spawn producer")
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    println!("\n3. A failing entry is reported, not silently dropped:");
    logger.enqueue(|| panic!("render failed"));

    let metrics = logger.metrics();
    deferred_logger::shutdown();
    println!(
        "\n   executed: {}, panicked: {}, drain passes: {}",
        metrics.executed(),
        metrics.panicked(),
        metrics.drain_passes()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
