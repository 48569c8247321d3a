//! Basic logger usage example
//!
//! Demonstrates the default template, thresholds and the formatting macros.
//!
//! Run with: cargo run --example basic_usage

use loggo::prelude::*;
use loggo::{debug, info, warn};

fn main() -> Result<()> {
    println!("=== loggo - Basic Usage Example ===\n");

    // Writes to stdout with "{Time} [{Level:>5}]: {Message}"
    let mut logger = Logger::new(Level::Debug);

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message (the process keeps running)");

    println!("\n2. Raising the threshold to WARN:");
    logger.set_threshold(Level::Warn);
    debug!(logger, "Debug message {} (hidden)", 1);
    info!(logger, "Info message {} (hidden)", 2);
    warn!(logger, "Warning message {} (visible)", 3);

    println!("\n3. Custom template with caller and padding:");
    let logger = Logger::builder(Level::Info)
        .template("{Time} {Caller:<24} [{Level:^7}] {Message}")
        .time_format("%H:%M:%S")
        .max_size(40)
        .build();
    info!(logger, "Request handled in {}ms", 12);
    logger.try_log(Level::Warn, "This message is longer than forty characters and gets cut")?;

    println!("\n4. Template errors are returned by try_log:");
    let broken = Logger::builder(Level::Info).template("{Level").build();
    if let Err(e) = broken.try_log(Level::Info, "never written") {
        println!("   {}", e);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
