//! Main logger implementation

use super::{
    config::LoggerConfig,
    event::Event,
    field::Field,
    level::{AtomicLevel, Level},
    publisher::{NoopPublisher, Publisher},
};
use std::fmt;
use std::sync::Arc;

/// Leveled, structured logger interface.
///
/// Object safe so a [`LoggerFactory`] can hand out any implementation as a
/// `Box<dyn Log>`.
pub trait Log: Send + Sync {
    /// Derive a logger with the same level and prefix, whose context is this
    /// logger's context followed by `fields`.
    ///
    /// The derived logger owns its own level: later `set_level` calls on
    /// either logger do not affect the other.
    fn with(&self, fields: &[Field]) -> Box<dyn Log>;

    fn level(&self) -> Level;

    fn set_level(&self, level: Level);

    fn prefix(&self) -> &str;

    fn context(&self) -> &[Field];

    /// Publish an event at `level` if the current threshold lets it through.
    fn log(&self, level: Level, message: &str, fields: &[Field]);

    /// Whether a call at `level` would currently be published.
    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.level().allows(level)
    }

    #[inline]
    fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    #[inline]
    fn info(&self, message: &str, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    #[inline]
    fn error(&self, message: &str, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }
}

/// The standard [`Log`] implementation.
///
/// Holds a threshold, a prefix, an immutable context and the publisher every
/// surviving call is forwarded to.
pub struct Logger {
    level: AtomicLevel,
    prefix: Arc<str>,
    context: Arc<[Field]>,
    publisher: Arc<dyn Publisher>,
}

impl Logger {
    pub fn new(
        level: Level,
        prefix: impl Into<Arc<str>>,
        context: Vec<Field>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            level: AtomicLevel::new(level),
            prefix: prefix.into(),
            context: context.into(),
            publisher,
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_event_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(Level::Debug)
    ///     .prefix("worker")
    ///     .build();
    /// assert_eq!(logger.level(), Level::Debug);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Concrete counterpart of [`Log::with`].
    pub fn fork(&self, fields: &[Field]) -> Logger {
        let context: Arc<[Field]> = if fields.is_empty() {
            Arc::clone(&self.context)
        } else {
            self.context.iter().chain(fields).cloned().collect()
        };

        Logger {
            level: AtomicLevel::new(self.level.load()),
            prefix: Arc::clone(&self.prefix),
            context,
            publisher: Arc::clone(&self.publisher),
        }
    }

    pub fn publisher(&self) -> &Arc<dyn Publisher> {
        &self.publisher
    }
}

impl Log for Logger {
    fn with(&self, fields: &[Field]) -> Box<dyn Log> {
        Box::new(self.fork(fields))
    }

    #[inline]
    fn level(&self) -> Level {
        self.level.load()
    }

    #[inline]
    fn set_level(&self, level: Level) {
        self.level.store(level);
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn context(&self) -> &[Field] {
        &self.context
    }

    fn log(&self, level: Level, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        self.publisher.publish(Event::new(
            level,
            Arc::clone(&self.prefix),
            message,
            Arc::clone(&self.context),
            fields.to_vec(),
        ));
    }
}

macro_rules! forward_log_impl {
    ($($ptr:ident),+) => {$(
        impl<L: Log + ?Sized> Log for $ptr<L> {
            fn with(&self, fields: &[Field]) -> Box<dyn Log> {
                (**self).with(fields)
            }

            fn level(&self) -> Level {
                (**self).level()
            }

            fn set_level(&self, level: Level) {
                (**self).set_level(level)
            }

            fn prefix(&self) -> &str {
                (**self).prefix()
            }

            fn context(&self) -> &[Field] {
                (**self).context()
            }

            fn log(&self, level: Level, message: &str, fields: &[Field]) {
                (**self).log(level, message, fields)
            }

            fn enabled(&self, level: Level) -> bool {
                (**self).enabled(level)
            }
        }
    )+};
}

forward_log_impl!(Box, Arc);

impl Clone for Logger {
    /// Same as `fork(&[])`: the clone gets its own level cell.
    fn clone(&self) -> Self {
        self.fork(&[])
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level.load())
            .field("prefix", &self.prefix)
            .field("context", &self.context)
            .finish()
    }
}

type FactoryFn = dyn Fn(Level, &str, Vec<Field>, Arc<dyn Publisher>) -> Box<dyn Log> + Send + Sync;

/// Constructor used by [`LoggerBuilder::build`].
///
/// Swapping the factory (for instance in tests) changes what every builder
/// it is passed to produces, without any process-wide state.
///
/// # Example
///
/// ```
/// use rust_event_logger::prelude::*;
///
/// // Every logger built with this factory starts at Error, whatever was asked.
/// let factory = LoggerFactory::new(|_level, prefix, context, publisher| {
///     Box::new(Logger::new(Level::Error, prefix, context, publisher))
/// });
///
/// let logger = Logger::builder().level(Level::Debug).factory(factory).build();
/// assert_eq!(logger.level(), Level::Error);
/// ```
#[derive(Clone)]
pub struct LoggerFactory {
    inner: Arc<FactoryFn>,
}

impl LoggerFactory {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(Level, &str, Vec<Field>, Arc<dyn Publisher>) -> Box<dyn Log> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(factory),
        }
    }

    pub fn create(
        &self,
        level: Level,
        prefix: &str,
        context: Vec<Field>,
        publisher: Arc<dyn Publisher>,
    ) -> Box<dyn Log> {
        (self.inner)(level, prefix, context, publisher)
    }
}

impl Default for LoggerFactory {
    /// Builds the standard [`Logger`].
    fn default() -> Self {
        Self::new(|level, prefix, context, publisher| {
            Box::new(Logger::new(level, prefix, context, publisher))
        })
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFactory").finish_non_exhaustive()
    }
}

/// Builder for constructing loggers with a fluent API
///
/// # Example
/// ```
/// use rust_event_logger::prelude::*;
/// use std::sync::Arc;
///
/// let bus = EventBus::new();
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .prefix("payments")
///     .field("region", "eu-west-1")
///     .publisher(Arc::new(bus.clone()))
///     .build();
///
/// assert_eq!(logger.prefix(), "payments");
/// assert_eq!(logger.context().len(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerBuilder {
    level: Level,
    prefix: String,
    context: Vec<Field>,
    publisher: Option<Arc<dyn Publisher>>,
    factory: LoggerFactory,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: Level::default(),
            prefix: String::new(),
            context: Vec::new(),
            publisher: None,
            factory: LoggerFactory::default(),
        }
    }

    /// Start from loaded settings
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new()
            .level(config.level)
            .prefix(config.prefix.clone())
            .context(config.context.clone())
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append fields to the initial context
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.context.extend(fields);
        self
    }

    /// Append one field to the initial context
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<super::field::FieldValue>,
    {
        self.context.push(Field::new(key, value));
        self
    }

    /// Set the publisher events are forwarded to
    ///
    /// Without one, events are discarded by a [`NoopPublisher`].
    #[must_use = "builder methods return a new value"]
    pub fn publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn factory(mut self, factory: LoggerFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Build the logger through the configured factory
    pub fn build(self) -> Box<dyn Log> {
        let publisher: Arc<dyn Publisher> = match self.publisher {
            Some(publisher) => publisher,
            None => Arc::new(NoopPublisher),
        };
        self.factory
            .create(self.level, &self.prefix, self.context, publisher)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a logger with the default factory.
///
/// # Example
/// ```
/// use rust_event_logger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemoryPublisher::new());
/// let logger = rust_event_logger::new(Level::Info, "svc", vec![Field::new("pid", 42)], sink.clone());
///
/// logger.debug("hidden", &[]);
/// logger.error("shown", &[]);
/// assert_eq!(sink.len(), 1);
/// ```
pub fn new(
    level: Level,
    prefix: &str,
    context: Vec<Field>,
    publisher: Arc<dyn Publisher>,
) -> Box<dyn Log> {
    LoggerBuilder::new()
        .level(level)
        .prefix(prefix)
        .context(context)
        .publisher(publisher)
        .build()
}
