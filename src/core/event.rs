//! Log event snapshot handed to publishers

use super::field::{Field, FieldValue};
use super::level::Level;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// One log call that passed the level check.
///
/// `context` is the emitting logger's context, shared rather than copied.
/// `fields` are the fields passed at the call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub time: DateTime<Utc>,
    #[serde(deserialize_with = "event_level")]
    pub level: Level,
    pub prefix: Arc<str>,
    pub message: String,
    pub context: Arc<[Field]>,
    pub fields: Vec<Field>,
}

impl Event {
    pub fn new(
        level: Level,
        prefix: Arc<str>,
        message: impl Into<String>,
        context: Arc<[Field]>,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            time: Utc::now(),
            level,
            prefix,
            message: message.into(),
            context,
            fields,
        }
    }

    /// Context fields followed by call-site fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.context.iter().chain(self.fields.iter())
    }

    /// Value of the last field named `key`, so call-site fields shadow context.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.context
            .iter()
            .chain(self.fields.iter())
            .rev()
            .find(|f| f.key() == key)
            .map(Field::value)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Only `Debug`, `Info` and `Error` tag events.
fn event_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
    let level = Level::deserialize(deserializer)?;
    if level.is_event_level() {
        Ok(level)
    } else {
        Err(D::Error::custom(format!("{} is not an event level", level)))
    }
}
