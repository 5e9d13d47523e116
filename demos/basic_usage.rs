//! Basic logger usage example
//!
//! Demonstrates level filtering and context fields with an in-memory publisher.
//!
//! Run with: cargo run --example basic_usage

use rust_event_logger::prelude::*;
use rust_event_logger::{fields, info};
use std::sync::Arc;

fn print_events(sink: &MemoryPublisher) {
    for event in sink.take() {
        let fields: Vec<String> = event.all_fields().map(ToString::to_string).collect();
        println!(
            "   [{}] {}: {} {}",
            event.level,
            event.prefix,
            event.message,
            fields.join(" ")
        );
    }
}

fn main() -> Result<()> {
    println!("=== Rust Event Logger - Basic Usage Example ===\n");

    let sink = Arc::new(MemoryPublisher::new());

    // Create a logger that publishes into memory
    let logger = Logger::builder()
        .level(Level::Debug)
        .prefix("app")
        .field("version", "1.0")
        .publisher(sink.clone())
        .build();

    println!("1. Logging at every tier:");
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[]);
    logger.error("This is an error message", &fields!["code" => 500]);
    print_events(&sink);

    println!("\n2. Raising the threshold:");
    logger.set_level("error".parse()?);
    println!("   Level set to {} - debug and info won't show:", logger.level());
    logger.debug("Debug message (hidden)", &[]);
    logger.info("Info message (hidden)", &[]);
    logger.error("Error message (visible)", &[]);
    print_events(&sink);

    println!("\n3. Deriving a request-scoped logger:");
    logger.set_level(Level::Info);
    let request = logger.with(&fields!["request_id" => "abc-123"]);
    info!(request, ["status" => 200], "Handled {} in {}ms", "/login", 12);
    print_events(&sink);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
