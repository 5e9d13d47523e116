//! Integration tests for the event logger
//!
//! These tests verify:
//! - Tier filtering at every threshold
//! - Context accumulation through `with`
//! - Independence of derived loggers
//! - Delivery through the event bus
//! - Factory injection and configuration loading

use rust_event_logger::prelude::*;
use rust_event_logger::{error, fields, info};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn capture(level: Level, prefix: &str) -> (Box<dyn Log>, Arc<MemoryPublisher>) {
    let sink = Arc::new(MemoryPublisher::new());
    let logger = Logger::builder()
        .level(level)
        .prefix(prefix)
        .publisher(sink.clone())
        .build();
    (logger, sink)
}

fn emit_all_tiers(logger: &dyn Log) {
    logger.debug("debug", &[]);
    logger.info("info", &[]);
    logger.error("error", &[]);
}

fn published_messages(sink: &MemoryPublisher) -> Vec<String> {
    sink.take().into_iter().map(|e| e.message).collect()
}

#[test]
fn test_threshold_table() {
    let cases: [(Level, &[&str]); 5] = [
        (Level::Min, &["debug", "info", "error"]),
        (Level::Debug, &["debug", "info", "error"]),
        (Level::Info, &["info", "error"]),
        (Level::Error, &["error"]),
        (Level::Off, &[]),
    ];

    for (threshold, expected) in cases {
        let (logger, sink) = capture(threshold, "svc");
        emit_all_tiers(logger.as_ref());
        assert_eq!(
            published_messages(&sink),
            expected,
            "unexpected events at threshold {}",
            threshold
        );
    }
}

#[test]
fn test_event_snapshot_contents() {
    let sink = Arc::new(MemoryPublisher::new());
    let logger = rust_event_logger::new(
        Level::Info,
        "svc",
        fields!["service" => "api"],
        sink.clone(),
    );

    let before = chrono::Utc::now();
    logger.error("upstream failed", &fields!["upstream" => "db", "attempt" => 3]);

    let events = sink.events();
    assert_eq!(events.len(), 1);

    let event = &events[0];
    assert!(event.time >= before);
    assert_eq!(event.level, Level::Error);
    assert_eq!(&*event.prefix, "svc");
    assert_eq!(event.message, "upstream failed");
    assert_eq!(event.context.len(), 1);
    assert_eq!(event.fields.len(), 2);
    assert_eq!(event.field("attempt"), Some(&FieldValue::Int(3)));
}

#[test]
fn test_with_chains_accumulate_context() {
    let (base, sink) = capture(Level::Debug, "svc");
    let child = base
        .with(&fields!["request_id" => "abc"])
        .with(&fields!["user_id" => 7]);

    child.info("handled", &fields!["status" => 200]);

    let events = sink.events();
    let keys: Vec<&str> = events[0].all_fields().map(Field::key).collect();
    assert_eq!(keys, ["request_id", "user_id", "status"]);

    // Base logger is untouched
    assert!(base.context().is_empty());
    assert_eq!(base.prefix(), "svc");
    assert_eq!(base.level(), Level::Debug);
}

#[test]
fn test_with_keeps_duplicate_keys() {
    let (base, _) = capture(Level::Info, "svc");
    let child = base
        .with(&fields!["attempt" => 1])
        .with(&fields!["attempt" => 2]);

    let values: Vec<&FieldValue> = child.context().iter().map(Field::value).collect();
    assert_eq!(values, [&FieldValue::Int(1), &FieldValue::Int(2)]);
}

#[test]
fn test_set_level_does_not_cross_forks() {
    let (parent, sink) = capture(Level::Info, "svc");
    let child = parent.with(&fields!["component" => "cache"]);

    parent.set_level(Level::Off);
    child.info("child still logs", &[]);
    parent.info("parent silenced", &[]);
    assert_eq!(published_messages(&sink), ["child still logs"]);

    child.set_level(Level::Error);
    parent.set_level(Level::Debug);
    child.info("child silenced", &[]);
    parent.debug("parent logs again", &[]);
    assert_eq!(published_messages(&sink), ["parent logs again"]);
}

#[test]
fn test_set_level_visible_through_shared_instance() {
    let (logger, sink) = capture(Level::Error, "svc");
    let shared: Arc<dyn Log> = Arc::from(logger);
    let other_handle = Arc::clone(&shared);

    other_handle.set_level(Level::Debug);
    shared.debug("now visible", &[]);

    assert_eq!(shared.level(), Level::Debug);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_logger_publishes_to_bus_subscribers() {
    let bus = EventBus::new();
    let everything = bus.subscribe(16);
    let errors = bus.subscribe_filtered(16, Level::Error);

    let logger = Logger::builder()
        .level(Level::Debug)
        .prefix("worker")
        .publisher(Arc::new(bus.clone()))
        .build();

    info!(logger, "job {} started", 1);
    error!(logger, ["job" => 1], "job {} failed", 1);

    let all: Vec<String> = everything.drain().iter().map(|e| e.message.clone()).collect();
    assert_eq!(all, ["job 1 started", "job 1 failed"]);

    let failure = errors
        .recv_timeout(Duration::from_millis(100))
        .expect("error subscriber should receive");
    assert_eq!(failure.field("job"), Some(&FieldValue::Int(1)));
    assert!(errors.is_empty());

    assert_eq!(bus.metrics().published(), 2);
    assert_eq!(bus.metrics().delivered(), 3);
}

#[test]
fn test_suppressed_calls_never_reach_bus() {
    let bus = EventBus::new();
    let sub = bus.subscribe(16);
    let logger = rust_event_logger::new(Level::Off, "quiet", Vec::new(), Arc::new(bus.clone()));

    emit_all_tiers(logger.as_ref());

    assert!(sub.is_empty());
    assert_eq!(bus.metrics().published(), 0);
}

#[test]
fn test_bus_consumer_thread() {
    let bus = EventBus::with_policy(OverflowPolicy::Block);
    let sub = bus.subscribe(4);
    let logger = rust_event_logger::new(Level::Info, "producer", Vec::new(), Arc::new(bus.clone()));

    let consumer = std::thread::spawn(move || {
        let mut count = 0;
        while let Ok(event) = sub.recv_timeout(Duration::from_secs(2)) {
            assert_eq!(&*event.prefix, "producer");
            count += 1;
            if count == 20 {
                break;
            }
        }
        count
    });

    for i in 0..20 {
        logger.info(&format!("message {}", i), &[]);
    }

    assert_eq!(consumer.join().expect("consumer panicked"), 20);
    assert_eq!(bus.metrics().dropped(), 0);
}

#[test]
fn test_injected_factory() {
    struct UppercasePrefix(Logger);

    impl Log for UppercasePrefix {
        fn with(&self, fields: &[Field]) -> Box<dyn Log> {
            Box::new(UppercasePrefix(self.0.fork(fields)))
        }
        fn level(&self) -> Level {
            self.0.level()
        }
        fn set_level(&self, level: Level) {
            self.0.set_level(level)
        }
        fn prefix(&self) -> &str {
            self.0.prefix()
        }
        fn context(&self) -> &[Field] {
            self.0.context()
        }
        fn log(&self, level: Level, message: &str, fields: &[Field]) {
            self.0.log(level, &message.to_uppercase(), fields)
        }
    }

    let factory = LoggerFactory::new(|level, prefix, context, publisher| {
        Box::new(UppercasePrefix(Logger::new(level, prefix.to_uppercase(), context, publisher)))
    });

    let sink = Arc::new(MemoryPublisher::new());
    let logger = Logger::builder()
        .prefix("svc")
        .publisher(sink.clone())
        .factory(factory)
        .build();

    logger.with(&[]).info("shout", &[]);

    let events = sink.events();
    assert_eq!(&*events[0].prefix, "SVC");
    assert_eq!(events[0].message, "SHOUT");
}

#[test]
fn test_logger_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("logger.json");
    std::fs::write(
        &path,
        r#"{"level":"error","prefix":"cfg","context":[{"key":"env","value":"prod"}]}"#,
    )
    .expect("Failed to write config");

    let config = LoggerConfig::from_file(&path).expect("Failed to load config");
    let sink = Arc::new(MemoryPublisher::new());
    let logger = LoggerBuilder::from_config(&config)
        .publisher(sink.clone())
        .build();

    logger.info("filtered", &[]);
    logger.error("kept", &[]);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(&*events[0].prefix, "cfg");
    assert_eq!(
        events[0].field("env"),
        Some(&FieldValue::String("prod".into()))
    );
}

#[test]
fn test_event_json_round_trip_through_subscriber() {
    let bus = EventBus::new();
    let sub = bus.subscribe(1);
    let logger = rust_event_logger::new(Level::Info, "json", fields!["a" => 1], Arc::new(bus.clone()));

    logger.info("serialize me", &fields!["b" => false]);

    let event = sub.try_recv().expect("event delivered");
    let json = event.to_json().expect("Failed to serialize");
    let parsed = Event::from_json(&json).expect("Failed to parse");

    assert_eq!(parsed.message, "serialize me");
    assert_eq!(parsed.level, Level::Info);
    assert_eq!(parsed.field("b"), Some(&FieldValue::Bool(false)));
}
