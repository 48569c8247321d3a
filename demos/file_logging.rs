//! File logging example
//!
//! Demonstrates logging to a file sink and loading settings from JSON.
//!
//! Run with: cargo run --example file_logging

use loggo::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== loggo - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("loggo_demo");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("app.log");

    let config = LoggerConfig::from_json(
        r#"{
            "threshold": "DEBUG",
            "template": "{Time} {Caller} [{Level:>5}]: {Message}",
            "time_format": "Iso8601",
            "max_size": 120
        }"#,
    )?;
    config.validate()?;

    let logger = config
        .into_builder()
        .output(FileSink::open(&log_path)?)
        .build();

    println!("Writing to {}", log_path.display());
    for i in 0..5 {
        loggo::info!(logger, "Processing batch {}", i);
    }
    logger.warn("Disk usage above 80%");
    logger.try_log(Level::Error, "Batch 3 failed, retrying")?;
    drop(logger);

    println!("\nFile contents:");
    for line in fs::read_to_string(&log_path)?.lines() {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
