//! Hooks and context example
//!
//! Pre-hooks rewrite messages before the threshold check, post-hooks observe
//! entries that were written, and the context handle carries caller data.
//!
//! Run with: cargo run --example hooks_and_context

use loggo::prelude::*;
use loggo::PrefixHook;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Service {
    name: &'static str,
    region: &'static str,
}

fn main() -> Result<()> {
    println!("=== loggo - Hooks and Context Example ===\n");

    let written = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&written);

    let logger = Logger::builder(Level::Info)
        .template("[{Level:>5}] {Message}")
        .context(Service {
            name: "billing",
            region: "eu-west",
        })
        .pre_hook(|logger, message| {
            if let Some(service) = logger.context::<Service>() {
                message.insert_str(0, &format!("{}@{}: ", service.name, service.region));
            }
        })
        .pre_hook_boxed(Box::new(PrefixHook::new("» ")))
        .post_hook(move |_, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .build();

    logger.info("invoice created");
    logger.debug("below the threshold, still seen by pre-hooks");
    loggo::error!(logger, "payment {} declined", 1042);

    println!(
        "\nPost-hooks saw {} entries (metrics: {} emitted, {} filtered)",
        written.load(Ordering::Relaxed),
        logger.metrics().emitted(),
        logger.metrics().filtered()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
