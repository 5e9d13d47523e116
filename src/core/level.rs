//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity of a log event, and the threshold a logger filters against.
///
/// Variants are totally ordered by their ordinal. `Min` lets everything
/// through, `Off` suppresses everything; only `Debug`, `Info` and `Error`
/// ever appear on a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Min = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Error = 3,
    Off = 4,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 5] = [
        Level::Min,
        Level::Debug,
        Level::Info,
        Level::Error,
        Level::Off,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Min => "MIN",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Map an ordinal back to its level.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Level::Min),
            1 => Some(Level::Debug),
            2 => Some(Level::Info),
            3 => Some(Level::Error),
            4 => Some(Level::Off),
            _ => None,
        }
    }

    /// Whether events may be tagged with this level.
    #[inline]
    pub const fn is_event_level(self) -> bool {
        matches!(self, Level::Debug | Level::Info | Level::Error)
    }

    /// Whether a call at `tier` passes a logger whose threshold is `self`.
    ///
    /// A tier fires while the threshold is below the next level up, which
    /// for consecutive ordinals is `threshold <= tier`.
    #[inline]
    pub fn allows(self, tier: Level) -> bool {
        tier.is_event_level() && self <= tier
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MIN" => Ok(Level::Min),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "ERROR" => Ok(Level::Error),
            "OFF" => Ok(Level::Off),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Lock-free cell holding a [`Level`] as its ordinal.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level.as_u8()))
    }

    #[inline]
    pub fn load(&self) -> Level {
        // Only `store` writes the cell, and it only writes valid ordinals.
        Level::from_u8(self.0.load(Ordering::Acquire)).unwrap_or(Level::Off)
    }

    #[inline]
    pub fn store(&self, level: Level) {
        self.0.store(level.as_u8(), Ordering::Release);
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::default())
    }
}
