//! Core logger types and traits

pub mod bus;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod publisher;

pub use bus::{EventBus, Subscription, DEFAULT_SUBSCRIBER_CAPACITY};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use event::Event;
pub use field::{Field, FieldValue};
pub use level::{AtomicLevel, Level};
pub use logger::{new, Log, Logger, LoggerBuilder, LoggerFactory};
pub use metrics::BusMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use publisher::{MemoryPublisher, NoopPublisher, Publisher};
