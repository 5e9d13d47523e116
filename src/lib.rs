//! # Rust Event Logger
//!
//! A leveled, structured logging facade. Loggers carry a severity threshold,
//! a name prefix and an ordered set of context fields, and publish every
//! call that passes the threshold as an [`Event`] to a [`Publisher`],
//! typically an in-process [`EventBus`].
//!
//! ## Features
//!
//! - **Lock-free filtering**: the threshold is a single atomic byte
//! - **Structured context**: `with` derives loggers that accumulate fields
//! - **Injected construction**: a [`LoggerFactory`] instead of global state
//! - **Pub/sub delivery**: bounded subscriber queues with overflow policies
//!
//! ```
//! use rust_event_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let bus = EventBus::new();
//! let errors = bus.subscribe_filtered(64, Level::Error);
//!
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .prefix("api")
//!     .publisher(Arc::new(bus.clone()))
//!     .build();
//!
//! let request = logger.with(&[Field::new("request_id", "abc-123")]);
//! request.debug("parsing body", &[]);
//! request.error("upstream timed out", &[Field::new("upstream", "db")]);
//!
//! let event = errors.try_recv().unwrap();
//! assert_eq!(event.message, "upstream timed out");
//! assert_eq!(event.all_fields().count(), 2);
//! ```

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        BusMetrics, Event, EventBus, Field, FieldValue, Level, Log, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerFactory, MemoryPublisher, NoopPublisher,
        OverflowCallback, OverflowPolicy, Publisher, Result, Subscription,
    };
}

pub use crate::core::{
    new, AtomicLevel, BusMetrics, Event, EventBus, Field, FieldValue, Level, Log, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerFactory, MemoryPublisher, NoopPublisher,
    OverflowCallback, OverflowPolicy, Publisher, Result, Subscription,
    DEFAULT_SUBSCRIBER_CAPACITY,
};
