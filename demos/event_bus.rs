//! Event bus example
//!
//! Demonstrates publishing log events to filtered subscribers on another thread.
//!
//! Run with: cargo run --example event_bus

use rust_event_logger::prelude::*;
use rust_event_logger::{error, info};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Event Logger - Event Bus Example ===\n");

    let bus = EventBus::with_policy(OverflowPolicy::Block);
    let all = bus.subscribe(64);
    let errors = bus.subscribe_filtered(64, Level::Error);

    let consumer = thread::spawn(move || {
        let mut seen = 0;
        while let Ok(event) = all.recv_timeout(Duration::from_millis(200)) {
            println!("   consumer <- {}", event.to_json().unwrap_or_default());
            seen += 1;
        }
        seen
    });

    let logger = Logger::builder()
        .level(Level::Info)
        .prefix("worker")
        .publisher(Arc::new(bus.clone()))
        .build();

    println!("1. Publishing jobs:");
    for job in 0..3 {
        let scoped = logger.with(&[Field::new("job", job)]);
        info!(scoped, "job {} started", job);
        if job == 2 {
            error!(scoped, ["reason" => "timeout"], "job {} failed", job);
        }
    }

    let seen = consumer
        .join()
        .map_err(|_| LoggerError::other("consumer thread panicked"))?;
    println!("\n2. Consumer received {} events", seen);

    println!("\n3. Error subscriber:");
    for event in errors.drain() {
        println!("   {} {:?}", event.message, event.field("reason"));
    }

    let metrics = bus.metrics();
    println!(
        "\n4. Metrics: published={} delivered={} dropped={}",
        metrics.published(),
        metrics.delivered(),
        metrics.dropped()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
