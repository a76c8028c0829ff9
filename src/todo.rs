//! Todo data structure and its persisted representation.
//!
//! This module defines the `Todo` struct that represents a single to-do item.
//! The serialized shape is a camelCase JSON object whose `createdAt` field is an
//! ISO-8601 UTC string with millisecond precision, e.g.
//! `{"id":1,"text":"Buy milk","completed":false,"createdAt":"2024-05-01T09:30:00.000Z"}`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A single user-created to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Create an uncompleted todo stamped with the current time.
    ///
    /// The caller is responsible for trimming `text` and for `id` uniqueness.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Todo {
            id,
            text: text.into(),
            completed: false,
            created_at: now_millis(),
        }
    }
}

/// Current time truncated to the precision the storage format keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Timestamps as `YYYY-MM-DDTHH:MM:SS.sssZ`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
