//! Overflow policies for subscriber queue management
//!
//! Every [`Subscription`](super::bus::Subscription) owns a bounded queue.
//! When a slow subscriber lets its queue fill up, these policies decide what
//! the publishing thread does with the next event for that subscriber.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Policy for handling a full subscriber queue
///
/// # Example
///
/// ```
/// use rust_event_logger::OverflowPolicy;
/// use std::time::Duration;
///
/// // Default behavior: alert and drop
/// let policy = OverflowPolicy::default();
///
/// // Block with timeout
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Drop the event for this subscriber, counting it in metrics only
    DropNewest,

    /// Block the publisher until the subscriber makes room
    ///
    /// Warning: a stalled subscriber stalls every logger publishing to the bus.
    Block,

    /// Block with timeout, then drop with an alert
    BlockWithTimeout(Duration),

    /// Drop but alert via callback and stderr
    #[default]
    AlertAndDrop,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::AlertAndDrop => write!(f, "AlertAndDrop"),
        }
    }
}

/// Callback type for overflow notifications
///
/// Called when events are dropped due to a full subscriber queue.
/// The parameter is the total count of dropped events so far.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
