//! Logging macros for ergonomic log message formatting.
//!
//! These macros format like `format!`, but only when the logger would
//! actually publish the call. Call-site fields go in an optional bracketed
//! `key => value` list before the format string.
//!
//! # Examples
//!
//! ```
//! use rust_event_logger::prelude::*;
//! use rust_event_logger::{error, info};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemoryPublisher::new());
//! let logger = Logger::new(Level::Info, "server", Vec::new(), sink.clone());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With call-site fields
//! error!(logger, ["code" => 500, "path" => "/login"], "Request failed after {} retries", 3);
//!
//! let events = sink.events();
//! assert_eq!(events.len(), 3);
//! assert_eq!(events[2].message, "Request failed after 3 retries");
//! assert_eq!(events[2].fields.len(), 2);
//! ```

/// Build a `Vec<Field>` from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_event_logger::fields;
///
/// let context = fields!["service" => "api", "version" => 3];
/// assert_eq!(context.len(), 2);
/// assert_eq!(context[0].key(), "service");
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::new($key, $value)),+]
    };
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_event_logger::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// log!(logger, Level::Error, ["code" => 500], "Request failed");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, [$($key:expr => $value:expr),* $(,)?], $($arg:tt)+) => {{
        use $crate::Log as _;
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.enabled(level) {
            logger.log(
                level,
                &::std::format!($($arg)+),
                &[$($crate::Field::new($key, $value)),*],
            );
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, [], $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = Logger::builder().level(Level::Debug).build();
/// use rust_event_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_event_logger::info;
/// info!(logger, "Application started");
/// info!(logger, ["items" => 100], "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_event_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}
