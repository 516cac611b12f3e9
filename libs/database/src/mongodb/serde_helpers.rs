//! Storage encodings shared by every collection.
//!
//! Ids are stored as hyphenated UUID strings and timestamps as fixed-width
//! RFC 3339 strings with millisecond precision, so filters built with
//! [`uuid_bson`] and [`datetime_bson`] compare equal to (and sort like) the
//! stored values. JSON output is unchanged.

use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer, Serializer};
use uuid::Uuid;

/// `2024-06-01T10:00:00.000Z`
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.hyphenated().to_string())
}

pub fn datetime_bson(dt: &DateTime<Utc>) -> Bson {
    Bson::String(format_datetime(dt))
}

/// `#[serde(with = "database::mongodb::uuid_as_string")]`
pub mod uuid_as_string {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.hyphenated().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "database::mongodb::datetime_as_string")]`
pub mod datetime_as_string {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_datetime(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
